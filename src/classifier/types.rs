//! Request and result types exchanged with the classification service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected before any call is made: the submitted text was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No text provided")]
pub struct InvalidInput;

/// Text submitted for classification. Never empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationRequest {
    text: String,
}

impl ClassificationRequest {
    pub fn new(text: impl Into<String>) -> Result<Self, InvalidInput> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(InvalidInput);
        }
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Verdict payload returned by the service, relayed as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationResult(serde_json::Value);

impl ClassificationResult {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Verdict label for display, if the payload carries one.
    pub fn verdict(&self) -> Option<&str> {
        self.0
            .get("prediction")
            .or_else(|| self.0.get("label"))
            .and_then(|v| v.as_str())
    }
}
