//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (probabilities, timeouts, capacities)
//! - Check the bind address is a socket address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { field: &'static str, value: f64 },

    #[error("{field} must be greater than zero")]
    MustBePositive { field: &'static str },

    #[error("listener.bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("environment must not be empty")]
    EmptyEnvironment,

    #[error("telemetry.host must not be empty when forwarding is enabled")]
    EmptyCollectorHost,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.environment.trim().is_empty() {
        errors.push(ValidationError::EmptyEnvironment);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    for (field, value) in [
        (
            "failure.berth_failure_probability",
            config.failure.berth_failure_probability,
        ),
        (
            "failure.auth_failure_probability",
            config.failure.auth_failure_probability,
        ),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ValidationError::ProbabilityOutOfRange { field, value });
        }
    }

    let positives = [
        ("port.total_berths", u64::from(config.port.total_berths)),
        ("telemetry.queue_capacity", config.telemetry.queue_capacity as u64),
        ("telemetry.connect_timeout_ms", config.telemetry.connect_timeout_ms),
        ("telemetry.flush_timeout_secs", config.telemetry.flush_timeout_secs),
        ("limits.request_timeout_secs", config.limits.request_timeout_secs),
        ("limits.max_body_bytes", config.limits.max_body_bytes as u64),
    ];
    for (field, value) in positives {
        if value == 0 {
            errors.push(ValidationError::MustBePositive { field });
        }
    }

    if config.telemetry.forward_enabled && config.telemetry.host.trim().is_empty() {
        errors.push(ValidationError::EmptyCollectorHost);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
