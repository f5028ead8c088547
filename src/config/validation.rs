//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (attempts >= 1, delays bounded, timeouts > 0)
//! - Check that endpoint and bind addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// Upper bound for the inter-attempt delay.
pub const MAX_DELAY_MS: u64 = 60_000;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: invalid URL '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field}: {reason}")]
    OutOfRange { field: &'static str, reason: String },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::OutOfRange {
            field: "listener.max_body_bytes",
            reason: "must be greater than 0".to_string(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::OutOfRange {
            field: "timeouts.request_secs",
            reason: "must be greater than 0".to_string(),
        });
    }

    let classifier = &config.classifier;
    if classifier.max_attempts == 0 {
        errors.push(ValidationError::OutOfRange {
            field: "classifier.max_attempts",
            reason: "at least one attempt is required".to_string(),
        });
    }
    if classifier.delay_ms > MAX_DELAY_MS {
        errors.push(ValidationError::OutOfRange {
            field: "classifier.delay_ms",
            reason: format!("must not exceed {} ms", MAX_DELAY_MS),
        });
    }
    if classifier.attempt_timeout_secs == 0 {
        errors.push(ValidationError::OutOfRange {
            field: "classifier.attempt_timeout_secs",
            reason: "must be greater than 0".to_string(),
        });
    }

    for (field, value) in [
        ("classifier.production_url", &classifier.production_url),
        ("classifier.local_url", &classifier.local_url),
    ] {
        if let Err(reason) = check_http_url(value) {
            errors.push(ValidationError::InvalidUrl {
                field,
                value: value.clone(),
                reason,
            });
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Warn when the inbound request timeout would cut retries short.
pub fn warn_on_tight_budget(config: &GatewayConfig) {
    let request_timeout = Duration::from_secs(config.timeouts.request_secs);
    let worst_case = config.classifier.worst_case();
    if request_timeout < worst_case {
        tracing::warn!(
            request_timeout_secs = config.timeouts.request_secs,
            worst_case_ms = worst_case.as_millis() as u64,
            "Request timeout is shorter than the worst-case retry budget"
        );
    }
}

fn check_http_url(value: &str) -> Result<(), String> {
    let url = url::Url::parse(value).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.classifier.max_attempts = 0;
        config.classifier.delay_ms = MAX_DELAY_MS + 1;
        config.classifier.local_url = "ftp://localhost/analyze".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors
            .iter()
            .any(|e| e.to_string().contains("classifier.max_attempts")));
        assert!(errors
            .iter()
            .any(|e| e.to_string().contains("unsupported scheme 'ftp'")));
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_address = "nope".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidAddress {
                field: "observability.metrics_address",
                value: "nope".to_string(),
            }]
        );
    }
}
