//! PortTrack API server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request id ─▶ instrumentation ─▶ trace/limits ─▶ router
//!                                        │                               │
//!                                        │                               ▼
//!                                        │                         handlers/*
//!                                        │                   ┌───────┼────────┐
//!                                        │                   ▼       ▼        ▼
//!                                        │               PortStore  Failure  Telemetry
//!                                        │                          Injector  (local /
//!                                        ▼                                    forward)
//!                                 MetricsRegistry ◀──── gauges, operation counters
//!                                        │
//!                                        ▼
//!                                  GET /metrics (Prometheus scrape)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use porttrack::config::{resolve_config, ConfigOverrides};
use porttrack::lifecycle::{signals, startup, Shutdown};
use porttrack::observability::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "porttrack", version, about = "PortTrack port operations API")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "PORTTRACK_CONFIG")]
    config: Option<PathBuf>,

    /// Listen port (replaces the port in listener.bind_address)
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Deployment environment reported in health checks and telemetry
    #[arg(long, env = "PORTTRACK_ENV")]
    environment: Option<String>,

    /// Log collector host; setting it enables telemetry forwarding
    #[arg(long, env = "FLUENTD_HOST")]
    fluentd_host: Option<String>,

    #[arg(long, env = "FLUENTD_PORT")]
    fluentd_port: Option<u16>,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long)]
    log_level: Option<String>,

    /// Seed for simulated failures, for reproducible runs
    #[arg(long)]
    failure_seed: Option<u64>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            port: self.port,
            environment: self.environment.clone(),
            fluentd_host: self.fluentd_host.clone(),
            fluentd_port: self.fluentd_port,
            log_level: self.log_level.clone(),
            failure_seed: self.failure_seed,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(cli.config.as_deref(), cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("porttrack: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        environment = %config.environment,
        forward_telemetry = config.telemetry.forward_enabled,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    tokio::spawn(signals::forward_signals(shutdown.clone()));

    match startup::run(config, &shutdown).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "PortTrack API failed");
            ExitCode::FAILURE
        }
    }
}
