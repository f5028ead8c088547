//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Timeout configuration for inbound requests.
    pub timeouts: TimeoutConfig,

    /// Classification service endpoint and retry settings.
    pub classifier: ClassifierConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Static asset serving.
    pub assets: AssetsConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            max_body_bytes: 100 * 1024,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time a client request may take, retries included, in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 120 }
    }
}

/// Deployment mode; selects which classifier endpoint is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    Production,
    #[default]
    Local,
}

impl DeploymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentMode::Production => "production",
            DeploymentMode::Local => "local",
        }
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeploymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(DeploymentMode::Production),
            "local" | "development" | "dev" => Ok(DeploymentMode::Local),
            other => Err(format!("unknown deployment mode '{}'", other)),
        }
    }
}

/// Classification service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Which endpoint to call.
    pub mode: DeploymentMode,

    /// Endpoint used in production mode.
    pub production_url: String,

    /// Endpoint used in local mode.
    pub local_url: String,

    /// Total number of attempts per classification (first call included).
    pub max_attempts: u32,

    /// Constant wait between attempts in milliseconds.
    pub delay_ms: u64,

    /// Timeout for a single attempt in seconds.
    pub attempt_timeout_secs: u64,

    /// Honor HTTP(S)_PROXY environment variables for outbound calls.
    pub system_proxy: bool,
}

impl ClassifierConfig {
    /// Endpoint selected by the deployment mode.
    pub fn endpoint(&self) -> &str {
        match self.mode {
            DeploymentMode::Production => &self.production_url,
            DeploymentMode::Local => &self.local_url,
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.attempt_timeout_secs)
    }

    /// Longest a single classification can take when every attempt times out.
    pub fn worst_case(&self) -> Duration {
        let attempts = self.max_attempts.max(1);
        self.delay() * (attempts - 1) + self.attempt_timeout() * attempts
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            mode: DeploymentMode::Local,
            production_url: "https://defake-fake-news-detector-website.onrender.com/api/analyze"
                .to_string(),
            local_url: "http://localhost:5000/api/analyze".to_string(),
            max_attempts: 8,
            delay_ms: 2000,
            attempt_timeout_secs: 10,
            system_proxy: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Pretty,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Full,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Static asset configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory served for unmatched GET requests. Disabled when unset.
    pub dir: Option<String>,
}
