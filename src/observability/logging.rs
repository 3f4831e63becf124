//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Pick pretty or JSON output from configuration
//! - Let `RUST_LOG` override the configured level
//!
//! # Design Decisions
//! - JSON format for production, pretty format for development
//! - Re-initialization is reported, not fatal, so tests can call it freely

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Default directive used when neither `RUST_LOG` nor config yield a filter.
const FALLBACK_FILTER: &str = "info";

/// Build the level filter, preferring `RUST_LOG` over `log_level`.
pub fn build_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive_for(&config.log_level)))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
}

fn directive_for(level: &str) -> String {
    format!("porttrack={level},tower_http={level},{level}")
}

/// Install the global subscriber. Returns false when one was already set.
pub fn init_logging(config: &ObservabilityConfig) -> bool {
    let filter = build_filter(config);
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init(),
        LogFormat::Pretty => registry.with(fmt::layer()).try_init(),
    };

    result.is_ok()
}
