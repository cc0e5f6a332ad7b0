//! Owned cancellation handle for a single in-flight request.

use std::sync::{Arc, OnceLock};

use tokio_util::sync::CancellationToken;

use crate::error::CancelReason;

/// Cancellation handle shared between the session and one request task.
///
/// The first recorded reason wins; later `cancel` calls are no-ops.
#[derive(Debug, Clone, Default)]
pub struct RequestHandle {
    token: CancellationToken,
    reason: Arc<OnceLock<CancelReason>>,
}

impl RequestHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the request. Returns `false` if it was already cancelled.
    pub fn cancel(&self, reason: CancelReason) -> bool {
        let first = self.reason.set(reason).is_ok();
        self.token.cancel();
        first
    }

    #[cfg(test)]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Reason recorded by the first `cancel` call.
    pub fn reason(&self) -> Option<CancelReason> {
        self.reason.get().copied()
    }

    /// Resolve once the handle is cancelled, yielding the reason.
    pub async fn cancelled(&self) -> CancelReason {
        self.token.cancelled().await;
        self.reason().unwrap_or(CancelReason::Teardown)
    }
}
