//! Structured telemetry events and the sinks that receive them.
//!
//! # Responsibilities
//! - Build flat JSON events (`timestamp`, `level`, `message`, `service`, ...)
//! - Mirror every event into the local `tracing` subscriber
//! - Hand events to a [`TelemetrySink`] without waiting on it
//! - Drain the sink with a bounded timeout on shutdown
//!
//! # Design Decisions
//! - `emit` is synchronous and infallible; sinks swallow their own failures
//! - Sink selection is runtime configuration, so handlers hold `Telemetry`
//!   (a cheap clone around `Arc<dyn TelemetrySink>`)

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Service name attached to every event.
pub const SERVICE_NAME: &str = "porttrack-api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TelemetryLevel {
    Info,
    Warn,
    Error,
}

impl TelemetryLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TelemetryLevel::Info => "info",
            TelemetryLevel::Warn => "warn",
            TelemetryLevel::Error => "error",
        }
    }
}

/// One structured event, serialized flat.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryEvent {
    pub tag: String,
    pub timestamp: DateTime<Utc>,
    pub level: TelemetryLevel,
    pub message: String,
    pub service: &'static str,
    pub environment: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TelemetryEvent {
    /// Look up a caller-supplied field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("telemetry flush did not finish within {0:?}")]
    FlushTimeout(Duration),
}

/// Destination for telemetry events.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Accept an event. Must not block and must not fail the caller.
    fn emit(&self, event: TelemetryEvent);

    /// Deliver everything accepted so far and stop accepting new events.
    async fn flush(&self);

    /// Short label for health reporting.
    fn kind(&self) -> &'static str;
}

/// Sink that keeps events in the local log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalSink;

#[async_trait]
impl TelemetrySink for LocalSink {
    fn emit(&self, _event: TelemetryEvent) {}

    async fn flush(&self) {}

    fn kind(&self) -> &'static str {
        "local"
    }
}

/// Sink that retains events in memory for inspection.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<TelemetryEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event received so far.
    pub fn events(&self) -> Vec<TelemetryEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Events whose message equals `message`.
    pub fn with_message(&self, message: &str) -> Vec<TelemetryEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.message == message)
            .collect()
    }
}

#[async_trait]
impl TelemetrySink for MemorySink {
    fn emit(&self, event: TelemetryEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }

    async fn flush(&self) {}

    fn kind(&self) -> &'static str {
        "memory"
    }
}

/// Handle used by the rest of the service to emit telemetry.
#[derive(Clone)]
pub struct Telemetry {
    sink: Arc<dyn TelemetrySink>,
    environment: Arc<str>,
}

impl fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Telemetry")
            .field("sink", &self.sink.kind())
            .field("environment", &self.environment)
            .finish()
    }
}

impl Telemetry {
    pub fn new(sink: Arc<dyn TelemetrySink>, environment: impl Into<Arc<str>>) -> Self {
        Self {
            sink,
            environment: environment.into(),
        }
    }

    /// Telemetry that only writes to the local log.
    pub fn local(environment: impl Into<Arc<str>>) -> Self {
        Self::new(Arc::new(LocalSink), environment)
    }

    pub fn sink_kind(&self) -> &'static str {
        self.sink.kind()
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn info(&self, message: &str, fields: Value) {
        self.emit(TelemetryLevel::Info, message, fields);
    }

    pub fn warn(&self, message: &str, fields: Value) {
        self.emit(TelemetryLevel::Warn, message, fields);
    }

    pub fn error(&self, message: &str, fields: Value) {
        self.emit(TelemetryLevel::Error, message, fields);
    }

    /// Emit an event. Non-object `fields` are stored under `"data"`.
    pub fn emit(&self, level: TelemetryLevel, message: &str, fields: Value) {
        let fields = match fields {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };

        let rendered = Value::Object(fields.clone());
        match level {
            TelemetryLevel::Info => {
                tracing::info!(target: "porttrack::telemetry", fields = %rendered, "{message}")
            }
            TelemetryLevel::Warn => {
                tracing::warn!(target: "porttrack::telemetry", fields = %rendered, "{message}")
            }
            TelemetryLevel::Error => {
                tracing::error!(target: "porttrack::telemetry", fields = %rendered, "{message}")
            }
        }

        self.sink.emit(TelemetryEvent {
            tag: format!("porttrack.{}", level.as_str()),
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
            service: SERVICE_NAME,
            environment: self.environment.to_string(),
            fields,
        });
    }

    /// Drain the sink, giving up after `timeout`.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), TelemetryError> {
        tokio::time::timeout(timeout, self.sink.flush())
            .await
            .map_err(|_| TelemetryError::FlushTimeout(timeout))
    }
}
