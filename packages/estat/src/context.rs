//! Per-call cancellation and deadline.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{EstatError, Result};

/// Cancellation signal and optional deadline for one or more calls.
///
/// Cloning shares the token, so cancelling any clone cancels every call
/// using it.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<(Instant, Duration)>,
}

impl CallContext {
    /// A context that never cancels and has no deadline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing token, e.g. one shared with a shutdown handler.
    #[must_use]
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Fail calls that have not completed `timeout` from now.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some((Instant::now() + timeout, timeout));
        self
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Drive `future` unless the context is cancelled or its deadline passes
    /// first. The future is dropped in either case.
    pub async fn run<F, T>(&self, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.token.is_cancelled() {
            return Err(EstatError::Cancelled);
        }

        match self.deadline {
            Some((deadline, timeout)) => {
                tokio::select! {
                    biased;
                    () = self.token.cancelled() => Err(EstatError::Cancelled),
                    outcome = tokio::time::timeout_at(deadline, future) => {
                        outcome.map_err(|_| EstatError::DeadlineExceeded(timeout))?
                    }
                }
            }
            None => {
                tokio::select! {
                    biased;
                    () = self.token.cancelled() => Err(EstatError::Cancelled),
                    outcome = future => outcome,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_completes() {
        let ctx = CallContext::new();
        let value = ctx.run(async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let ctx = CallContext::new();
        ctx.cancel();
        let result: Result<()> = ctx.run(async { Ok(()) }).await;
        assert!(matches!(result, Err(EstatError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancelled_while_running() {
        let ctx = CallContext::new();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let result: Result<()> = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(EstatError::Cancelled)));
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let ctx = CallContext::new().with_timeout(Duration::from_millis(20));
        let result: Result<()> = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            })
            .await;
        assert!(matches!(
            result,
            Err(EstatError::DeadlineExceeded(d)) if d == Duration::from_millis(20)
        ));
    }
}
