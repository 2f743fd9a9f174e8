//! Bounded retry with exponential backoff.

use std::future::Future;
use std::time::Duration;

use crate::error::{RegistryError, Result};

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubles for each following retry
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(50),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// retry budget is spent.
    pub async fn run<T, F, Fut>(&self, command: &'static str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.should_retry() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.delay_for(attempt);
                    tracing::debug!(
                        command,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Registry command failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(log_failure(command, err)),
            }
        }
    }
}

fn log_failure(command: &'static str, err: RegistryError) -> RegistryError {
    tracing::warn!(command, error = %err, "Registry command failed");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast() -> RetryPolicy {
        RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(1),
        }
    }

    fn command_failed() -> RegistryError {
        RegistryError::Response {
            code: 2400,
            message: "Command failed".to_string(),
        }
    }

    #[test]
    fn delays_double() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_millis(50));
        assert_eq!(policy.delay_for(2), Duration::from_millis(100));
        assert_eq!(policy.delay_for(3), Duration::from_millis(200));
    }

    #[tokio::test]
    async fn retries_command_failed_then_succeeds() {
        let calls = AtomicU32::new(0);
        let result = fast()
            .run("UpdateContact", || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err(command_failed())
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_budget() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = fast()
            .run("UpdateContact", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(command_failed()) }
            })
            .await;

        assert!(result.unwrap_err().should_retry());
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = fast()
            .run("CreateContact", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(RegistryError::Response {
                        code: 2302,
                        message: "Object exists".to_string(),
                    })
                }
            })
            .await;

        assert_eq!(result.unwrap_err().code(), Some(2302));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
