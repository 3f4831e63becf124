//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the PortTrack service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Deployment environment label (e.g. "development", "production").
    pub environment: String,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Static facts about the port.
    pub port: PortConfig,

    /// Simulated failure probabilities.
    pub failure: FailureConfig,

    /// Telemetry forwarding settings.
    pub telemetry: TelemetryConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Request limits.
    pub limits: LimitsConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            listener: ListenerConfig::default(),
            port: PortConfig::default(),
            failure: FailureConfig::default(),
            telemetry: TelemetryConfig::default(),
            observability: ObservabilityConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8082").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8082".to_string(),
        }
    }
}

/// Port facility configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PortConfig {
    /// Number of berths the port can assign.
    pub total_berths: u32,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self { total_berths: 24 }
    }
}

/// Failure simulation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FailureConfig {
    /// Probability that a berthing operation fails after validation.
    pub berth_failure_probability: f64,

    /// Probability that a login with credentials present fails.
    pub auth_failure_probability: f64,

    /// Seed for the failure sampler. Unset means seeded from entropy.
    pub seed: Option<u64>,
}

impl Default for FailureConfig {
    fn default() -> Self {
        Self {
            berth_failure_probability: 0.10,
            auth_failure_probability: 0.15,
            seed: None,
        }
    }
}

/// Telemetry sink configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Forward events to a remote collector. When false, events stay local.
    pub forward_enabled: bool,

    /// Collector host.
    pub host: String,

    /// Collector TCP port.
    pub port: u16,

    /// Maximum number of events buffered before new events are dropped.
    pub queue_capacity: usize,

    /// Timeout for establishing the collector connection in milliseconds.
    pub connect_timeout_ms: u64,

    /// Minimum delay between reconnection attempts in milliseconds.
    pub reconnect_backoff_ms: u64,

    /// Upper bound on the shutdown drain in seconds.
    pub flush_timeout_secs: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            forward_enabled: false,
            host: "localhost".to_string(),
            port: 24224,
            queue_capacity: 1024,
            connect_timeout_ms: 3000,
            reconnect_backoff_ms: 5000,
            flush_timeout_secs: 5,
        }
    }
}

impl TelemetryConfig {
    /// Collector address in `host:port` form.
    pub fn collector_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output for development.
    Pretty,
    /// One JSON object per line for log shippers.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Total time allowed per request in seconds.
    pub request_timeout_secs: u64,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            max_body_bytes: 1024 * 1024,
        }
    }
}
