//! Port connectivity checking.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;

/// Trait for testing whether a local TCP port is accepting connections.
///
/// The probe loop only needs a yes/no answer per port, so implementations
/// can be swapped out (the real one dials the port; tests use a fixed map).
pub trait PortChecker: Send + Sync {
    /// Check if something is listening on `port` on the local host.
    fn is_in_use(&self, port: u16) -> impl std::future::Future<Output = bool> + Send;
}

/// Checks ports by dialing `127.0.0.1` with a short-lived TCP connection.
///
/// A successful connect means a listener is present. A refused, unreachable,
/// or timed-out connect counts as free. The stream is dropped as soon as the
/// answer is known, so no socket outlives a single probe.
pub struct TcpChecker {
    connect_timeout: Duration,
}

impl TcpChecker {
    /// Create a checker with the given per-attempt connect timeout.
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl Default for TcpChecker {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

impl PortChecker for TcpChecker {
    async fn is_in_use(&self, port: u16) -> bool {
        matches!(
            timeout(self.connect_timeout, TcpStream::connect(("127.0.0.1", port))).await,
            Ok(Ok(_))
        )
    }
}
