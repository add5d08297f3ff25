use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Cancellation tied to the lifetime of the screen that issued a request.
///
/// Child scopes are cancelled with their parent. Cancelling never aborts a
/// fetch other callers are still waiting on; it only releases this caller.
#[derive(Debug, Clone, Default)]
pub struct CancelScope {
    token: CancellationToken,
}

impl CancelScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run `fut` until it completes or the scope is cancelled (`None`).
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.token.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            out = fut => Some(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_completes() {
        let scope = CancelScope::new();
        assert_eq!(scope.run(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn test_cancelled_scope_returns_none() {
        let scope = CancelScope::new();
        let child = scope.child();
        scope.cancel();
        assert!(child.is_cancelled());
        assert_eq!(child.run(async { 7 }).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_pending_future() {
        let scope = CancelScope::new();
        let canceller = scope.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let out = scope
            .run(tokio::time::sleep(Duration::from_secs(3600)))
            .await;
        assert!(out.is_none());
    }
}
