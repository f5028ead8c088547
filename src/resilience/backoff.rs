//! Inter-attempt waiting.
//!
//! The delay between attempts is constant. Waiting is a plain async sleep
//! raced against a cancellation token, so an abandoned request stops
//! waiting immediately instead of holding its slot until the timer fires.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Returned when the token fired before the delay elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupted;

/// Sleep for `delay` unless `cancel` fires first.
pub async fn sleep_or_cancel(delay: Duration, cancel: &CancellationToken) -> Result<(), Interrupted> {
    if delay.is_zero() {
        return if cancel.is_cancelled() {
            Err(Interrupted)
        } else {
            Ok(())
        };
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Interrupted),
        _ = tokio::time::sleep(delay) => Ok(()),
    }
}
