//! Long-running jobs spawned next to the server. Each one stops when its
//! [`CancellationToken`](tokio_util::sync::CancellationToken) fires.

pub mod session_cleanup;
