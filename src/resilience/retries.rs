//! Retry logic.
//!
//! # Responsibilities
//! - Run an operation up to `max_attempts` times, strictly one at a time
//! - Wait a constant delay between attempts (never after the last one)
//! - Stop early when the cancellation token fires
//! - Emit one log event per attempt with its 1-based index and outcome
//!
//! # State Machine
//! ```text
//! PENDING → (ATTEMPTING → [SUCCESS | TRANSIENT_FAILURE])* → SUCCESS | EXHAUSTED | CANCELLED
//! ```

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::resilience::backoff::sleep_or_cancel;

/// Fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, first call included. Always at least 1.
    pub max_attempts: u32,
    /// Wait between consecutive attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

/// Terminal failure of a retry loop.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// Every attempt failed; carries the last failure.
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: E },

    /// The token fired before an attempt succeeded.
    #[error("cancelled after {attempts} attempts")]
    Cancelled { attempts: u32, last: Option<E> },
}

/// Run `op` until it succeeds, the policy is exhausted, or `cancel` fires.
///
/// `op` receives the 1-based attempt index. An attempt that is in flight
/// when the token fires is dropped.
pub async fn retry_fixed<T, E, F, Fut>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    mut op: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut last: Option<E> = None;
    let mut attempt = 0;

    loop {
        attempt += 1;
        if cancel.is_cancelled() {
            tracing::info!(attempt, "Retry loop cancelled before attempt");
            return Err(RetryError::Cancelled { attempts: attempt - 1, last });
        }

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(attempt, "Retry loop cancelled during attempt");
                return Err(RetryError::Cancelled { attempts: attempt, last });
            }
            outcome = op(attempt) => outcome,
        };

        match outcome {
            Ok(value) => {
                tracing::debug!(attempt, max_attempts, "Attempt succeeded");
                return Ok(value);
            }
            Err(e) if attempt >= max_attempts => {
                tracing::warn!(attempt, max_attempts, error = %e, "Final attempt failed");
                return Err(RetryError::Exhausted { attempts: attempt, last: e });
            }
            Err(e) => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_ms = policy.delay.as_millis() as u64,
                    error = %e,
                    "Attempt failed, retrying"
                );
                last = Some(e);
                if sleep_or_cancel(policy.delay, cancel).await.is_err() {
                    tracing::info!(attempt, "Retry loop cancelled during delay");
                    return Err(RetryError::Cancelled { attempts: attempt, last });
                }
            }
        }
    }
}
