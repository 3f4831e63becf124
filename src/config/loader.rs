//! Configuration loading from disk and the process environment.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

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

/// Values supplied on the command line or through environment variables.
///
/// Every populated field replaces the corresponding file/default value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub environment: Option<String>,
    pub fluentd_host: Option<String>,
    pub fluentd_port: Option<u16>,
    pub log_level: Option<String>,
    pub failure_seed: Option<u64>,
}

impl ConfigOverrides {
    /// Apply the overrides in place.
    pub fn apply(self, config: &mut ServiceConfig) {
        if let Some(port) = self.port {
            config.listener.bind_address = match config.listener.bind_address.parse::<SocketAddr>() {
                Ok(mut addr) => {
                    addr.set_port(port);
                    addr.to_string()
                }
                Err(_) => format!("0.0.0.0:{port}"),
            };
        }
        if let Some(environment) = self.environment {
            config.environment = environment;
        }
        // Naming a collector host is what turns forwarding on.
        if let Some(host) = self.fluentd_host {
            config.telemetry.host = host;
            config.telemetry.forward_enabled = true;
        }
        if let Some(port) = self.fluentd_port {
            config.telemetry.port = port;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
        if self.failure_seed.is_some() {
            config.failure.seed = self.failure_seed;
        }
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ServiceConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build the effective configuration: defaults, then the optional file, then overrides.
///
/// The file must be valid on its own; the merged result is validated again.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
