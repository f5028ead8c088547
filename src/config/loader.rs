//! Configuration loading from disk and environment.

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{DeploymentMode, GatewayConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Listener port override.
pub const ENV_PORT: &str = "PORT";
/// Deployment mode override (`production` or `local`).
pub const ENV_MODE: &str = "DEFAKE_MODE";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid environment variable {name}: {reason}")]
    Env { name: &'static str, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: TOML file if given, then environment overrides, then validation.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config: GatewayConfig = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => GatewayConfig::default(),
    };

    apply_overrides(
        &mut config,
        env::var(ENV_PORT).ok().as_deref(),
        env::var(ENV_MODE).ok().as_deref(),
    )?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply `PORT` and `DEFAKE_MODE` style overrides.
///
/// The port replaces only the port of the bind address; the host is kept.
pub fn apply_overrides(
    config: &mut GatewayConfig,
    port: Option<&str>,
    mode: Option<&str>,
) -> Result<(), ConfigError> {
    if let Some(port) = port {
        let port: u16 = port.trim().parse().map_err(|e| ConfigError::Env {
            name: ENV_PORT,
            reason: format!("{}", e),
        })?;
        let mut addr: SocketAddr =
            config
                .listener
                .bind_address
                .parse()
                .map_err(|_| ConfigError::Env {
                    name: ENV_PORT,
                    reason: format!(
                        "cannot apply to bind address '{}'",
                        config.listener.bind_address
                    ),
                })?;
        addr.set_port(port);
        config.listener.bind_address = addr.to_string();
    }

    if let Some(mode) = mode {
        config.classifier.mode = mode
            .parse::<DeploymentMode>()
            .map_err(|reason| ConfigError::Env {
                name: ENV_MODE,
                reason,
            })?;
    }

    Ok(())
}
