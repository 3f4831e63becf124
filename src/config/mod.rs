//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → ConfigOverrides (CLI flags / environment variables)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow running with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError, ConfigOverrides};
pub use schema::{
    FailureConfig, LimitsConfig, ListenerConfig, LogFormat, ObservabilityConfig, PortConfig,
    ServiceConfig, TelemetryConfig,
};
pub use validation::{validate_config, ValidationError};
