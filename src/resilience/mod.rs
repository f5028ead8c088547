//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Call to the classification service:
//!     → retries.rs (run attempt, on failure wait and try again)
//!     → backoff.rs (constant, cancellable wait between attempts)
//! ```
//!
//! # Design Decisions
//! - Constant delay, no exponential growth or jitter: the dependency has a
//!   bounded wake-up window and a single caller per request
//! - Attempts are strictly sequential
//! - Every wait can be interrupted through a `CancellationToken`

pub mod backoff;
pub mod retries;

pub use backoff::{sleep_or_cancel, Interrupted};
pub use retries::{retry_fixed, RetryError, RetryPolicy};
