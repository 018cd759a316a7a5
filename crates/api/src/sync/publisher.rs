use std::sync::Arc;

use chrono_tz::Tz;
use habitsgoals_db::DbPool;
use habitsgoals_events::ChangeEvent;
use tokio::sync::broadcast;

use crate::sync::snapshot::load_snapshot;
use crate::ws::protocol::ServerMessage;
use crate::ws::WsManager;

/// Turns change events into fresh snapshots for subscribed sockets.
pub struct SnapshotPublisher {
    pool: DbPool,
    ws_manager: Arc<WsManager>,
    default_timezone: Tz,
}

impl SnapshotPublisher {
    pub fn new(pool: DbPool, ws_manager: Arc<WsManager>, default_timezone: Tz) -> Self {
        Self {
            pool,
            ws_manager,
            default_timezone,
        }
    }

    /// Consume events until the bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<ChangeEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.publish(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Snapshot publisher lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, snapshot publisher shutting down");
                    break;
                }
            }
        }
    }

    /// Push one snapshot for `event`. Skips the reload when nobody listens.
    pub async fn publish(&self, event: &ChangeEvent) {
        if !self
            .ws_manager
            .has_subscribers(event.user_id, event.collection)
            .await
        {
            return;
        }

        let _guard = self.ws_manager.lock_snapshots(event.user_id).await;
        match load_snapshot(&self.pool, event.user_id, event.collection, self.default_timezone).await {
            Ok(data) => {
                let message = ServerMessage::Snapshot {
                    collection: event.collection,
                    data,
                }
                .to_message();
                let sent = self
                    .ws_manager
                    .send_to_subscribers(event.user_id, event.collection, message)
                    .await;
                tracing::debug!(
                    user_id = event.user_id,
                    collection = %event.collection,
                    sent,
                    "Snapshot pushed",
                );
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    user_id = event.user_id,
                    collection = %event.collection,
                    "Failed to load snapshot",
                );
            }
        }
    }
}
