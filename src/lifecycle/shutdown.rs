//! Shutdown coordination for the gateway.

use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

/// Coordinator for graceful shutdown.
///
/// Wraps a root cancellation token. The server waits on it, and every
/// request derives a child token from it so in-flight retry loops stop
/// when shutdown is triggered.
#[derive(Clone, Debug)]
pub struct Shutdown {
    token: CancellationToken,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Token cancelled on shutdown, for a single request or task.
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Future resolving once shutdown is triggered.
    pub fn wait(&self) -> WaitForCancellationFutureOwned {
        self.token.clone().cancelled_owned()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        self.token.cancel();
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
