//! WebSocket infrastructure for collection subscriptions.
//!
//! Connection bookkeeping, the wire protocol, heartbeat pings, and the
//! upgrade handler mounted at `/api/v1/ws`.

mod handler;
mod heartbeat;
pub mod manager;
pub mod protocol;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
