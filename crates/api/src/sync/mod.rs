//! Push-based collection sync.
//!
//! Handlers publish a [`ChangeEvent`](habitsgoals_events::ChangeEvent)
//! after each committed write. [`SnapshotPublisher`] reloads the affected
//! collection and pushes it to the owner's subscribed sockets.

pub mod publisher;
pub mod snapshot;

pub use publisher::SnapshotPublisher;
