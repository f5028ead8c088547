//! Classification subsystem.
//!
//! # Data Flow
//! ```text
//! POST /factcheck text
//!     → types.rs (ClassificationRequest, rejects blank text)
//!     → client.rs (POST to service, fixed-delay retries)
//!     → ClassificationResult (opaque JSON, relayed as-is)
//!
//! POST /check-news text
//!     → fallback.rs (exact match against known headlines)
//! ```

pub mod client;
pub mod error;
pub mod fallback;
pub mod types;

pub use client::{ClassifierClient, ClientBuildError};
pub use error::{ClassifierError, ClassifierResult, TransientFailure};
pub use fallback::{check_sample, FallbackVerdict, SampleMatch};
pub use types::{ClassificationRequest, ClassificationResult, InvalidInput};
