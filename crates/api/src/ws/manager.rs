use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::ws::Message;
use habitsgoals_core::types::{DbId, Timestamp};
use habitsgoals_events::Collection;
use tokio::sync::{mpsc, Mutex, OwnedMutexGuard, RwLock};

/// Sender half feeding one socket's outbound queue.
pub type WsSender = mpsc::UnboundedSender<Message>;

pub struct WsConnection {
    pub user_id: DbId,
    pub sender: WsSender,
    pub connected_at: Timestamp,
    /// Collections this socket wants snapshots for.
    pub subscriptions: HashSet<Collection>,
}

/// All live sockets, keyed by connection id.
///
/// Shared as `Arc<WsManager>`; interior `RwLock`.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
    /// Per-user guards held across a snapshot's load and send, so snapshots
    /// reach a socket in the order they were read.
    snapshot_locks: Mutex<HashMap<DbId, Arc<Mutex<()>>>>,
}

impl WsManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            snapshot_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Register a connection and return the receiver the socket's sender
    /// task drains.
    pub async fn add(&self, conn_id: String, user_id: DbId) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            user_id,
            sender: tx,
            connected_at: chrono::Utc::now(),
            subscriptions: HashSet::new(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    pub async fn remove(&self, conn_id: &str) {
        let mut conns = self.connections.write().await;
        if let Some(gone) = conns.remove(conn_id) {
            if !conns.values().any(|conn| conn.user_id == gone.user_id) {
                self.snapshot_locks.lock().await.remove(&gone.user_id);
            }
        }
    }

    /// Serialize snapshot delivery for one user. Hold the guard from loading
    /// the data until the message is queued.
    pub async fn lock_snapshots(&self, user_id: DbId) -> OwnedMutexGuard<()> {
        let lock = self
            .snapshot_locks
            .lock()
            .await
            .entry(user_id)
            .or_default()
            .clone();
        lock.lock_owned().await
    }

    /// Returns `false` when the connection is unknown.
    pub async fn subscribe(&self, conn_id: &str, collection: Collection) -> bool {
        match self.connections.write().await.get_mut(conn_id) {
            Some(conn) => {
                conn.subscriptions.insert(collection);
                true
            }
            None => false,
        }
    }

    pub async fn unsubscribe(&self, conn_id: &str, collection: Collection) -> bool {
        match self.connections.write().await.get_mut(conn_id) {
            Some(conn) => conn.subscriptions.remove(&collection),
            None => false,
        }
    }

    pub async fn is_subscribed(&self, conn_id: &str, collection: Collection) -> bool {
        self.connections
            .read()
            .await
            .get(conn_id)
            .is_some_and(|conn| conn.subscriptions.contains(&collection))
    }

    /// Whether any socket of `user_id` is subscribed to `collection`.
    pub async fn has_subscribers(&self, user_id: DbId, collection: Collection) -> bool {
        self.connections
            .read()
            .await
            .values()
            .any(|conn| conn.user_id == user_id && conn.subscriptions.contains(&collection))
    }

    pub async fn get_by_user(&self, user_id: DbId) -> Vec<String> {
        self.connections
            .read()
            .await
            .iter()
            .filter(|(_, conn)| conn.user_id == user_id)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Queue a message on one connection. `false` if it is gone.
    pub async fn send_to(&self, conn_id: &str, message: Message) -> bool {
        match self.connections.read().await.get(conn_id) {
            Some(conn) => conn.sender.send(message).is_ok(),
            None => false,
        }
    }

    /// Send to every socket of `user_id` subscribed to `collection`.
    /// Returns the number of sockets reached.
    pub async fn send_to_subscribers(
        &self,
        user_id: DbId,
        collection: Collection,
        message: Message,
    ) -> usize {
        let conns = self.connections.read().await;
        let mut count = 0;
        for conn in conns.values() {
            if conn.user_id == user_id && conn.subscriptions.contains(&collection) {
                let _ = conn.sender.send(message.clone());
                count += 1;
            }
        }
        count
    }

    /// Close and forget every socket of one user (account deletion).
    pub async fn close_user(&self, user_id: DbId) -> usize {
        let mut conns = self.connections.write().await;
        let before = conns.len();
        conns.retain(|_, conn| {
            if conn.user_id == user_id {
                let _ = conn.sender.send(Message::Close(None));
                false
            } else {
                true
            }
        });
        self.snapshot_locks.lock().await.remove(&user_id);
        before - conns.len()
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send Close to everyone and clear the map. Used on shutdown.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        self.snapshot_locks.lock().await.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
