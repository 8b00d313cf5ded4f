use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Owner of one view's cancellation signal.
///
/// Dropping the scope tears it down.
#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn teardown(&self) {
        self.token.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Drives `fut` unless `token` fires first, in which case `fut` is dropped
/// (aborting any request it had in flight) and `None` is returned.
pub async fn until_cancelled<F: Future>(token: &CancellationToken, fut: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        out = fut => Some(out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_until_cancelled_returns_output() {
        let scope = ViewScope::new();
        let out = until_cancelled(&scope.token(), async { 7 }).await;
        assert_eq!(out, Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_aborts_pending_future() {
        let scope = ViewScope::new();
        let token = scope.token();
        let pending = tokio::spawn(async move {
            until_cancelled(&token, tokio::time::sleep(Duration::from_secs(60))).await
        });

        scope.teardown();

        assert_eq!(pending.await.unwrap(), None);
        assert!(scope.is_torn_down());
    }

    #[test]
    fn test_drop_cancels_token() {
        let token = {
            let scope = ViewScope::new();
            scope.token()
        };
        assert!(token.is_cancelled());
    }
}
