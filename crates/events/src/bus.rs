//! In-process change bus backed by a `tokio::sync::broadcast` channel.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use habitsgoals_core::error::CoreError;
use habitsgoals_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// A per-user collection that clients can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Habits,
    HabitLogs,
    Goals,
    Tasks,
    Profile,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Habits,
        Collection::HabitLogs,
        Collection::Goals,
        Collection::Tasks,
        Collection::Profile,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Habits => "habits",
            Collection::HabitLogs => "habit_logs",
            Collection::Goals => "goals",
            Collection::Tasks => "tasks",
            Collection::Profile => "profile",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::validation(format!("Unknown collection '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// ChangeEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOp {
    Created,
    Updated,
    Deleted,
}

/// Something in one user's collection changed.
///
/// The event carries no entity data: consumers reload the collection, so a
/// dropped or reordered event only delays the next snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub user_id: DbId,
    /// The affected row, when the change concerns a single one.
    pub entity_id: Option<DbId>,
    pub op: ChangeOp,
    pub timestamp: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn new(collection: Collection, user_id: DbId, op: ChangeOp) -> Self {
        Self {
            collection,
            user_id,
            entity_id: None,
            op,
            timestamp: Utc::now(),
        }
    }

    pub fn created(collection: Collection, user_id: DbId, entity_id: DbId) -> Self {
        Self::new(collection, user_id, ChangeOp::Created).with_entity(entity_id)
    }

    pub fn updated(collection: Collection, user_id: DbId, entity_id: DbId) -> Self {
        Self::new(collection, user_id, ChangeOp::Updated).with_entity(entity_id)
    }

    pub fn deleted(collection: Collection, user_id: DbId, entity_id: DbId) -> Self {
        Self::new(collection, user_id, ChangeOp::Deleted).with_entity(entity_id)
    }

    pub fn with_entity(mut self, entity_id: DbId) -> Self {
        self.entity_id = Some(entity_id);
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 1024;

/// Fan-out bus shared as `Arc<EventBus>`.
///
/// ```rust
/// use habitsgoals_events::{ChangeEvent, Collection, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
/// bus.publish(ChangeEvent::created(Collection::Tasks, 1, 10));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<ChangeEvent>,
}

impl EventBus {
    /// When the buffer is full the oldest events are dropped and slow
    /// receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped silently when nobody
    /// is listening.
    pub fn publish(&self, event: ChangeEvent) {
        tracing::trace!(
            collection = %event.collection,
            user_id = event.user_id,
            op = ?event.op,
            "Change published",
        );
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::{RecvError, TryRecvError};

    #[tokio::test]
    async fn subscribers_each_receive_the_event() {
        let bus = EventBus::default();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.publish(ChangeEvent::updated(Collection::Goals, 7, 42));

        for rx in [&mut a, &mut b] {
            let event = rx.recv().await.unwrap();
            assert_eq!(event.collection, Collection::Goals);
            assert_eq!(event.user_id, 7);
            assert_eq!(event.entity_id, Some(42));
            assert_eq!(event.op, ChangeOp::Updated);
        }
    }

    #[tokio::test]
    async fn publish_without_subscribers_does_not_panic() {
        let bus = EventBus::default();
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(ChangeEvent::new(Collection::Profile, 1, ChangeOp::Updated));
    }

    #[tokio::test]
    async fn events_arrive_in_publish_order() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(ChangeEvent::created(Collection::Tasks, 1, 1));
        bus.publish(ChangeEvent::deleted(Collection::Tasks, 1, 1));

        assert_eq!(rx.recv().await.unwrap().op, ChangeOp::Created);
        assert_eq!(rx.recv().await.unwrap().op, ChangeOp::Deleted);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn slow_receiver_observes_lag() {
        let bus = EventBus::new(2);
        let mut rx = bus.subscribe();
        for id in 0..5 {
            bus.publish(ChangeEvent::created(Collection::Habits, 1, id));
        }
        assert!(matches!(rx.recv().await, Err(RecvError::Lagged(3))));
        assert_eq!(rx.recv().await.unwrap().entity_id, Some(3));
    }

    #[test]
    fn collection_names_round_trip_through_serde() {
        let json = serde_json::to_string(&Collection::HabitLogs).unwrap();
        assert_eq!(json, "\"habit_logs\"");
        assert_eq!("habit_logs".parse::<Collection>().unwrap(), Collection::HabitLogs);
        assert!("projects".parse::<Collection>().is_err());
    }
}
