//! Classification error definitions.

use reqwest::StatusCode;
use thiserror::Error;

use crate::resilience::RetryError;

/// Failure of a single attempt. Retried, never surfaced on its own.
#[derive(Debug, Error)]
pub enum TransientFailure {
    /// Connection refused, reset, timed out, or similar.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("classification service returned {0}")]
    Status(StatusCode),

    /// The body was not valid JSON.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl TransientFailure {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            TransientFailure::Transport(e) if e.is_timeout() => "timeout",
            TransientFailure::Transport(e) if e.is_connect() => "connect",
            TransientFailure::Transport(_) => "transport",
            TransientFailure::Status(_) => "status",
            TransientFailure::Malformed(_) => "malformed",
        }
    }
}

/// Terminal outcome of a failed classification.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Every attempt failed.
    #[error("classification service unavailable after {attempts} attempts: {last}")]
    DependencyUnavailable { attempts: u32, last: TransientFailure },

    /// The caller stopped waiting.
    #[error("classification cancelled after {attempts} attempts")]
    Cancelled { attempts: u32 },
}

impl ClassifierError {
    pub fn attempts(&self) -> u32 {
        match self {
            ClassifierError::DependencyUnavailable { attempts, .. }
            | ClassifierError::Cancelled { attempts } => *attempts,
        }
    }
}

impl From<RetryError<TransientFailure>> for ClassifierError {
    fn from(err: RetryError<TransientFailure>) -> Self {
        match err {
            RetryError::Exhausted { attempts, last } => {
                ClassifierError::DependencyUnavailable { attempts, last }
            }
            RetryError::Cancelled { attempts, .. } => ClassifierError::Cancelled { attempts },
        }
    }
}

/// Result type for classification calls.
pub type ClassifierResult<T> = Result<T, ClassifierError>;
