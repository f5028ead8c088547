//! Request handling.
//!
//! # Responsibilities
//! - Deserialize submission bodies (`text` with the legacy `newsInput` alias)
//! - Read the request ID set by the request-id layer
//! - Build the per-request trace span
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Text is forwarded verbatim; blank text is rejected later, by
//!   `ClassificationRequest::new`

use axum::{body::Body, http::Request};
use serde::Deserialize;
use tracing::Span;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// JSON body accepted by the submission endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionBody {
    #[serde(default)]
    pub text: Option<String>,

    /// Field name used by older front ends.
    #[serde(default, rename = "newsInput")]
    pub news_input: Option<String>,
}

impl SubmissionBody {
    /// Text for the classifier: `text` when non-empty, else `newsInput`.
    pub fn into_text(self) -> Option<String> {
        match self.text {
            Some(text) if !text.is_empty() => Some(text),
            _ => self.news_input,
        }
    }

    /// Text for the sample matcher: `newsInput` when non-empty, else `text`.
    pub fn into_news_input(self) -> Option<String> {
        match self.news_input {
            Some(input) if !input.is_empty() => Some(input),
            _ => self.text,
        }
    }
}

/// Request ID of `request`, or `"unknown"` when the layer did not run.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Span wrapping each inbound request.
pub fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id(request),
    )
}
