//! Bounded retry for fallible async operations.
//!
//! The combinator knows nothing about transcription: callers decide which
//! failures are worth another attempt and observe each failure through a
//! callback. That keeps the retry bound testable without any I/O.

use std::future::Future;
use std::time::Duration;

/// Retry policy for acquiring input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including first try)
    pub max_attempts: u32,

    /// Pause between attempts in milliseconds
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_ms: 0,
        }
    }
}

impl RetryPolicy {
    /// Policy with `max_attempts` attempts and no delay
    pub fn attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }

    /// Check if we should retry after `attempt` (1-indexed) failed
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// How a retried operation ended
#[derive(Debug, Clone, PartialEq)]
pub enum RetryOutcome<T, E> {
    /// Operation succeeded on `attempt`
    Succeeded { value: T, attempt: u32 },

    /// All attempts failed with retryable errors
    Exhausted { attempts: u32, last_error: E },

    /// A non-retryable error ended the loop early
    Aborted { attempt: u32, error: E },
}

impl<T, E> RetryOutcome<T, E> {
    pub fn ok(self) -> Option<T> {
        match self {
            RetryOutcome::Succeeded { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Run `op` until it succeeds, the policy is exhausted, or a failure is not
/// retryable. `op` receives the 1-indexed attempt number; `on_failure` sees
/// every failed attempt before the next one starts.
///
/// At least one attempt is always made.
pub async fn retry<T, E, Op, Fut, R, F>(
    policy: &RetryPolicy,
    mut op: Op,
    is_retryable: R,
    mut on_failure: F,
) -> RetryOutcome<T, E>
where
    Op: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
    F: FnMut(u32, &E),
{
    let mut attempt = 0u32;

    loop {
        attempt += 1;

        match op(attempt).await {
            Ok(value) => return RetryOutcome::Succeeded { value, attempt },
            Err(error) => {
                on_failure(attempt, &error);

                if !is_retryable(&error) {
                    return RetryOutcome::Aborted { attempt, error };
                }
                if !policy.should_retry(attempt) {
                    return RetryOutcome::Exhausted {
                        attempts: attempt,
                        last_error: error,
                    };
                }

                let delay = policy.delay();
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
