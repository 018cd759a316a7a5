//! JSON messages exchanged over the subscription socket.

use axum::extract::ws::Message;
use habitsgoals_events::Collection;
use serde::{Deserialize, Serialize};

/// Client -> server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Subscribe { collection: Collection },
    Unsubscribe { collection: Collection },
}

/// Server -> client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Full contents of one collection, newest first (`profile` is a single
    /// object).
    Snapshot {
        collection: Collection,
        data: serde_json::Value,
    },
    Error { message: String },
}

impl ServerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }

    pub fn to_message(&self) -> Message {
        let text = serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"type":"error","message":"Failed to encode message"}"#.to_string()
        });
        Message::Text(text.into())
    }
}
