//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and middleware produce:
//!     → metrics.rs (counters, gauges, histograms → /metrics)
//!     → telemetry.rs (structured events, mirrored to tracing)
//!         → forward.rs (optional TCP forwarding to a log collector)
//!
//! logging.rs installs the process-wide tracing subscriber.
//! ```
//!
//! # Design Decisions
//! - Metrics registries are owned by the application, not installed globally
//! - Telemetry emission never blocks or fails a request
//! - Structured logging (JSON) for machine parsing

pub mod forward;
pub mod logging;
pub mod metrics;
pub mod telemetry;

pub use forward::{ForwardSink, ForwardStats};
pub use logging::init_logging;
pub use metrics::{MetricsError, MetricsRegistry};
pub use telemetry::{
    LocalSink, MemorySink, Telemetry, TelemetryError, TelemetryEvent, TelemetryLevel,
    TelemetrySink,
};
