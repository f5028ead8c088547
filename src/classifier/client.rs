//! Classification service client with fixed-delay retries.
//!
//! # Responsibilities
//! - POST `{ "text": ... }` to the configured endpoint
//! - Treat transport errors, non-2xx statuses and non-JSON bodies as
//!   transient failures and retry them with a constant delay
//! - Relay any 2xx JSON body untouched, even one describing an error
//! - Give up with `DependencyUnavailable` after the configured attempts

use std::time::Instant;

use reqwest::header::ACCEPT;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::classifier::error::{ClassifierError, ClassifierResult, TransientFailure};
use crate::classifier::types::{ClassificationRequest, ClassificationResult};
use crate::config::ClassifierConfig;
use crate::observability::metrics;
use crate::resilience::{retry_fixed, RetryPolicy};

/// Client for the external classification service.
#[derive(Clone)]
pub struct ClassifierClient {
    http: reqwest::Client,
    endpoint: Url,
    policy: RetryPolicy,
}

impl ClassifierClient {
    /// Build a client from configuration.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ClientBuildError> {
        let endpoint = Url::parse(config.endpoint()).map_err(|e| ClientBuildError::Endpoint {
            url: config.endpoint().to_string(),
            reason: e.to_string(),
        })?;

        let mut builder = reqwest::Client::builder()
            .timeout(config.attempt_timeout())
            .connect_timeout(config.attempt_timeout());
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build().map_err(ClientBuildError::Http)?;

        Ok(Self::new(
            http,
            endpoint,
            RetryPolicy::new(config.max_attempts, config.delay()),
        ))
    }

    /// Create a client from parts.
    pub fn new(http: reqwest::Client, endpoint: Url, policy: RetryPolicy) -> Self {
        Self {
            http,
            endpoint,
            policy,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Classify `request`, retrying until the service answers, attempts run
    /// out, or `cancel` fires.
    pub async fn classify(
        &self,
        request: &ClassificationRequest,
        cancel: &CancellationToken,
    ) -> ClassifierResult<ClassificationResult> {
        let start = Instant::now();

        let outcome = retry_fixed(&self.policy, cancel, |attempt| async move {
            tracing::info!(
                attempt,
                max_attempts = self.policy.max_attempts,
                endpoint = %self.endpoint,
                text_len = request.text().len(),
                "Calling classification service"
            );
            let result = self.attempt(request).await;
            match &result {
                Ok(_) => metrics::record_attempt("success"),
                Err(e) => metrics::record_attempt(e.kind()),
            }
            result.map(|value| (attempt, value))
        })
        .await;

        match outcome {
            Ok((attempts, result)) => {
                tracing::info!(
                    attempts,
                    verdict = result.verdict().unwrap_or("unknown"),
                    elapsed_ms = elapsed_ms(start),
                    "Classification service responded"
                );
                metrics::record_classification("success", attempts, start);
                Ok(result)
            }
            Err(e) => {
                let err = ClassifierError::from(e);
                let outcome = match &err {
                    ClassifierError::DependencyUnavailable { .. } => "unavailable",
                    ClassifierError::Cancelled { .. } => "cancelled",
                };
                tracing::error!(
                    attempts = err.attempts(),
                    elapsed_ms = elapsed_ms(start),
                    error = %err,
                    "Classification failed"
                );
                metrics::record_classification(outcome, err.attempts(), start);
                Err(err)
            }
        }
    }

    /// One outbound call.
    async fn attempt(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResult, TransientFailure> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransientFailure::Status(status));
        }

        let body = response.bytes().await?;
        let value: serde_json::Value = serde_json::from_slice(&body)?;
        Ok(ClassificationResult::new(value))
    }
}

impl std::fmt::Debug for ClassifierClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("max_attempts", &self.policy.max_attempts)
            .field("delay", &self.policy.delay)
            .finish()
    }
}

/// Failure to construct a [`ClassifierClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("invalid classifier endpoint '{url}': {reason}")]
    Endpoint { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Http(#[source] reqwest::Error),
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
