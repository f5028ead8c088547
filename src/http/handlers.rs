//! Route handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::classifier::{check_sample, ClassificationRequest, ClassificationResult, FallbackVerdict};
use crate::http::error::AppError;
use crate::http::request::SubmissionBody;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub mode: &'static str,
}

/// `POST /factcheck`: forward text to the classification service.
pub async fn factcheck(
    State(state): State<AppState>,
    body: Result<Json<SubmissionBody>, JsonRejection>,
) -> Result<Json<ClassificationResult>, AppError> {
    let text = match body {
        Ok(Json(body)) => body.into_text(),
        // Chunked bodies only hit the size limit while being buffered.
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            tracing::warn!(error = %rejection, "Factcheck body over limit");
            return Err(AppError::PayloadTooLarge);
        }
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable factcheck body");
            None
        }
    };
    let request = ClassificationRequest::new(text.unwrap_or_default())?;

    // Dropping the handler (client gone, request timeout) cancels the loop.
    let cancel = state.shutdown.child_token();
    let _guard = cancel.clone().drop_guard();

    let result = state.classifier.classify(&request, &cancel).await?;
    Ok(Json(result))
}

/// `POST /check-news`: verdict from the built-in headline samples.
pub async fn check_news(body: Result<Json<SubmissionBody>, JsonRejection>) -> Json<FallbackVerdict> {
    let input = body
        .ok()
        .and_then(|Json(body)| body.into_news_input())
        .unwrap_or_default();
    Json(check_sample(&input))
}

/// `GET /health`.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        mode: state.mode.as_str(),
    })
}
