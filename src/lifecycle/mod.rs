//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     trigger() → server stops accepting → in-flight retry loops cancelled
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger()
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::shutdown_on_signal;
