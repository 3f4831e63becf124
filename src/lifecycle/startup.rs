//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn a validated configuration into [`AppState`]
//! - Choose the telemetry sink and failure injector
//! - Bind the listener and serve until shutdown
//! - Drain telemetry with a bounded timeout on the way out
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last, so traffic only arrives once state is ready

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{ConfigError, FailureConfig, ServiceConfig};
use crate::fault::{FailureInjector, RandomFailureInjector};
use crate::http::{AppState, HttpServer};
use crate::lifecycle::shutdown::Shutdown;
use crate::observability::forward::ForwardSink;
use crate::observability::metrics::MetricsError;
use crate::observability::telemetry::Telemetry;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Metrics(#[from] MetricsError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Telemetry backed by a forwarding sink when enabled, local logging otherwise.
///
/// Forwarding spawns a task, so this must run inside a Tokio runtime.
pub fn build_telemetry(config: &ServiceConfig) -> Telemetry {
    if config.telemetry.forward_enabled {
        Telemetry::new(
            Arc::new(ForwardSink::spawn(&config.telemetry)),
            config.environment.as_str(),
        )
    } else {
        Telemetry::local(config.environment.as_str())
    }
}

/// Random injector, seeded when the configuration pins a seed.
pub fn build_injector(config: &FailureConfig) -> Arc<dyn FailureInjector> {
    match config.seed {
        Some(seed) => Arc::new(RandomFailureInjector::with_seed(seed)),
        None => Arc::new(RandomFailureInjector::new()),
    }
}

pub fn build_state(config: ServiceConfig) -> Result<AppState, StartupError> {
    let telemetry = build_telemetry(&config);
    let injector = build_injector(&config.failure);
    Ok(AppState::new(config, telemetry, injector)?)
}

pub async fn bind(config: &ServiceConfig) -> Result<TcpListener, StartupError> {
    let address = config.listener.bind_address.clone();
    TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })
}

/// Serve `state` on `listener` until `shutdown` fires, then flush telemetry.
pub async fn serve(
    state: AppState,
    listener: TcpListener,
    shutdown: &Shutdown,
) -> Result<(), StartupError> {
    let telemetry = state.telemetry.clone();
    let config = Arc::clone(&state.config);
    let local_addr = listener.local_addr().map_err(StartupError::Serve)?;

    telemetry.info(
        "PortTrack API server started",
        json!({
            "address": local_addr.to_string(),
            "environment": config.environment,
            "version": env!("CARGO_PKG_VERSION"),
            "telemetry": telemetry.sink_kind(),
            "collector": config.telemetry.collector_address(),
        }),
    );

    let server = HttpServer::new(state);
    let result = server
        .run(listener, shutdown.clone())
        .await
        .map_err(StartupError::Serve);

    telemetry.info("Shutting down gracefully", json!({}));
    let timeout = Duration::from_secs(config.telemetry.flush_timeout_secs);
    match telemetry.shutdown(timeout).await {
        Ok(()) => tracing::info!("Telemetry sink closed"),
        Err(e) => tracing::warn!(error = %e, "Telemetry sink did not drain in time"),
    }

    result
}

/// Build state, bind and serve.
pub async fn run(config: ServiceConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let listener = bind(&config).await?;
    let state = build_state(config)?;
    serve(state, listener, shutdown).await
}
