//! Change notifications for HabitsGoals.
//!
//! Every committed mutation publishes a [`ChangeEvent`] on the
//! [`EventBus`]; the API's snapshot publisher listens and pushes fresh
//! collection snapshots to subscribed WebSocket clients.

pub mod bus;

pub use bus::{ChangeEvent, ChangeOp, Collection, EventBus};
