use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use habitsgoals_core::types::DbId;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::sync::snapshot::load_snapshot;
use crate::ws::protocol::{ClientMessage, ServerMessage};

#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub token: String,
}

/// GET /api/v1/ws?token=
///
/// Browsers cannot set headers on a WebSocket handshake, so the access
/// token travels in the query string. Rejected with 401 before upgrading.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
) -> AppResult<impl IntoResponse> {
    let auth = AuthUser::from_token(&params.token, &state)?;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, auth.user_id)))
}

async fn handle_socket(socket: WebSocket, state: AppState, user_id: DbId) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, user_id, "WebSocket connected");

    let mut rx = state.ws_manager.add(conn_id.clone(), user_id).await;
    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let closing = matches!(msg, Message::Close(_));
            if sink.send(msg).await.is_err() || closing {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                handle_client_message(&state, &conn_id, user_id, text.as_str()).await;
            }
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    state.ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, user_id, "WebSocket disconnected");
}

async fn handle_client_message(state: &AppState, conn_id: &str, user_id: DbId, text: &str) {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            let reply = ServerMessage::error(format!("Invalid message: {e}"));
            state.ws_manager.send_to(conn_id, reply.to_message()).await;
            return;
        }
    };

    match message {
        ClientMessage::Subscribe { collection } => {
            // Held from subscribing until the first snapshot is queued.
            let _guard = state.ws_manager.lock_snapshots(user_id).await;
            state.ws_manager.subscribe(conn_id, collection).await;
            tracing::debug!(conn_id, user_id, collection = %collection, "Subscribed");

            let reply = match load_snapshot(&state.pool, user_id, collection, state.config.default_timezone).await {
                Ok(data) => ServerMessage::Snapshot { collection, data },
                Err(e) => {
                    tracing::error!(error = %e, user_id, collection = %collection, "Failed to load snapshot");
                    ServerMessage::error("Failed to load snapshot")
                }
            };
            state.ws_manager.send_to(conn_id, reply.to_message()).await;
        }
        ClientMessage::Unsubscribe { collection } => {
            state.ws_manager.unsubscribe(conn_id, collection).await;
            tracing::debug!(conn_id, user_id, collection = %collection, "Unsubscribed");
        }
    }
}
