//! Telemetry forwarding to a TCP log collector.
//!
//! # Responsibilities
//! - Queue events without blocking the emitting request
//! - Write newline-delimited JSON to the collector (e.g. a Fluentd `in_tcp` source)
//! - Reconnect at a bounded rate while the collector is down
//! - Drain the queue on shutdown
//!
//! # Data Flow
//! ```text
//! Telemetry::emit
//!     → ForwardSink::emit (try_send into bounded mpsc)
//!     → worker task (serialize, write to TcpStream)
//!     → collector
//! ```
//!
//! # Design Decisions
//! - A full queue or an unreachable collector drops the event and counts it
//! - While disconnected, at most one connect attempt per backoff window

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config::TelemetryConfig;
use crate::observability::telemetry::{TelemetryEvent, TelemetrySink};

/// Delivery counters shared between the sink and its worker.
#[derive(Debug, Default)]
pub struct ForwardStats {
    delivered: AtomicU64,
    dropped: AtomicU64,
}

impl ForwardStats {
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn record_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    fn record_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }
}

/// Sink that forwards events to a TCP collector from a background task.
#[derive(Debug)]
pub struct ForwardSink {
    tx: Mutex<Option<mpsc::Sender<TelemetryEvent>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    stats: Arc<ForwardStats>,
    collector: String,
}

impl ForwardSink {
    /// Start the forwarding worker. Must be called inside a Tokio runtime.
    pub fn spawn(config: &TelemetryConfig) -> Self {
        let collector = config.collector_address();
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let stats = Arc::new(ForwardStats::default());

        let worker = ForwardWorker {
            collector: collector.clone(),
            connect_timeout: Duration::from_millis(config.connect_timeout_ms),
            reconnect_backoff: Duration::from_millis(config.reconnect_backoff_ms),
            stats: Arc::clone(&stats),
            stream: None,
            last_attempt: None,
        };
        let handle = tokio::spawn(worker.run(rx));

        tracing::info!(collector = %collector, "Telemetry forwarding enabled");

        Self {
            tx: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(handle)),
            stats,
            collector,
        }
    }

    pub fn stats(&self) -> Arc<ForwardStats> {
        Arc::clone(&self.stats)
    }
}

#[async_trait]
impl TelemetrySink for ForwardSink {
    fn emit(&self, event: TelemetryEvent) {
        let guard = match self.tx.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let Some(tx) = guard.as_ref() else {
            self.stats.record_dropped();
            return;
        };
        if tx.try_send(event).is_err() {
            self.stats.record_dropped();
        }
    }

    async fn flush(&self) {
        // Dropping the sender closes the queue; the worker exits once drained.
        let sender = match self.tx.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        drop(sender);

        let handle = match self.worker.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Telemetry forwarding worker failed");
            }
        }

        tracing::info!(
            collector = %self.collector,
            delivered = self.stats.delivered(),
            dropped = self.stats.dropped(),
            "Telemetry forwarder drained"
        );
    }

    fn kind(&self) -> &'static str {
        "fluentd"
    }
}

struct ForwardWorker {
    collector: String,
    connect_timeout: Duration,
    reconnect_backoff: Duration,
    stats: Arc<ForwardStats>,
    stream: Option<TcpStream>,
    last_attempt: Option<Instant>,
}

impl ForwardWorker {
    async fn run(mut self, mut rx: mpsc::Receiver<TelemetryEvent>) {
        while let Some(event) = rx.recv().await {
            self.forward(&event).await;
        }

        if let Some(mut stream) = self.stream.take() {
            let _ = stream.flush().await;
            let _ = stream.shutdown().await;
        }
    }

    async fn forward(&mut self, event: &TelemetryEvent) {
        let mut line = match serde_json::to_vec(event) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "Dropping unserializable telemetry event");
                self.stats.record_dropped();
                return;
            }
        };
        line.push(b'\n');

        if !self.ensure_connected().await {
            self.stats.record_dropped();
            return;
        }

        let Some(stream) = self.stream.as_mut() else {
            self.stats.record_dropped();
            return;
        };
        match stream.write_all(&line).await {
            Ok(()) => self.stats.record_delivered(),
            Err(e) => {
                tracing::warn!(collector = %self.collector, error = %e, "Telemetry collector write failed");
                self.stream = None;
                self.stats.record_dropped();
            }
        }
    }

    async fn ensure_connected(&mut self) -> bool {
        if self.stream.is_some() {
            return true;
        }

        let now = Instant::now();
        if let Some(last) = self.last_attempt {
            if now.duration_since(last) < self.reconnect_backoff {
                return false;
            }
        }
        self.last_attempt = Some(now);

        match tokio::time::timeout(self.connect_timeout, TcpStream::connect(&self.collector)).await
        {
            Ok(Ok(stream)) => {
                let _ = stream.set_nodelay(true);
                tracing::debug!(collector = %self.collector, "Connected to telemetry collector");
                self.stream = Some(stream);
                true
            }
            Ok(Err(e)) => {
                tracing::warn!(collector = %self.collector, error = %e, "Telemetry collector unreachable");
                false
            }
            Err(_) => {
                tracing::warn!(collector = %self.collector, "Telemetry collector connect timed out");
                false
            }
        }
    }
}
