//! Mapping of failures to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::classifier::{ClassifierError, InvalidInput};

/// JSON error body: `{ "error": ..., "details": ... }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Errors returned by handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error("request body exceeds the configured limit")]
    PayloadTooLarge,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Classifier(ClassifierError::DependencyUnavailable { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Classifier(ClassifierError::Cancelled { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            AppError::InvalidInput(_) => ErrorBody {
                error: "No text provided",
                details: None,
            },
            AppError::PayloadTooLarge => ErrorBody {
                error: "Request body too large",
                details: None,
            },
            AppError::Classifier(e @ ClassifierError::DependencyUnavailable { .. }) => ErrorBody {
                error: "Classification service unavailable",
                details: Some(e.to_string()),
            },
            AppError::Classifier(e @ ClassifierError::Cancelled { .. }) => ErrorBody {
                error: "Request cancelled",
                details: Some(e.to_string()),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
