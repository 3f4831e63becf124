//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define the service metrics and their label sets
//! - Record request, operation and failure metrics
//! - Keep vessel-status gauges equal to the store's current counts
//! - Render the Prometheus text exposition for `/metrics`
//!
//! # Metrics
//! - `http_requests_total` (counter): requests by method, route, status code
//! - `http_request_duration_seconds` (histogram): latency by the same labels
//! - `porttrack_active_ships_total` (gauge): vessels per status
//! - `porttrack_operations_total` (counter): operations by type and outcome
//! - `porttrack_critical_operations_failed_total` (counter): injected failures
//! - `porttrack_auth_failures_total` (counter): failed logins by type
//! - `process_*`: CPU time, memory, open file descriptors, threads and start
//!   time of the server process, sampled on every render
//!
//! # Design Decisions
//! - The registry owns its recorder instead of installing a process-global
//!   one, so every application instance (and every test) is isolated
//! - Gauges are overwritten from a full store snapshot, never adjusted
//!   incrementally
//! - Registered metrics appear in the exposition before their first sample

use std::sync::Mutex;
use std::time::Duration;

use metrics::{
    counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit,
};
use metrics_exporter_prometheus::{
    BuildError, Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder,
};
use metrics_process::Collector;
use thiserror::Error;

use crate::port::{FleetSnapshot, OperationType, Outcome};

pub const HTTP_REQUEST_DURATION: &str = "http_request_duration_seconds";
pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const ACTIVE_SHIPS: &str = "porttrack_active_ships_total";
pub const PORT_OPERATIONS: &str = "porttrack_operations_total";
pub const CRITICAL_OPERATIONS_FAILED: &str = "porttrack_critical_operations_failed_total";
pub const AUTH_FAILURES: &str = "porttrack_auth_failures_total";

/// Content type of the rendered exposition.
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Latency buckets in seconds.
pub const HTTP_DURATION_BUCKETS: [f64; 5] = [0.1, 0.5, 1.0, 2.0, 5.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
}

impl MetricKind {
    fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
        }
    }
}

/// Name, type and help text of a registered metric.
#[derive(Debug, Clone, Copy)]
pub struct MetricDescriptor {
    pub name: &'static str,
    pub kind: MetricKind,
    pub help: &'static str,
}

/// Every metric the service registers.
pub const REGISTERED_METRICS: [MetricDescriptor; 6] = [
    MetricDescriptor {
        name: HTTP_REQUEST_DURATION,
        kind: MetricKind::Histogram,
        help: "Duration of HTTP requests in seconds",
    },
    MetricDescriptor {
        name: HTTP_REQUESTS_TOTAL,
        kind: MetricKind::Counter,
        help: "Total number of HTTP requests",
    },
    MetricDescriptor {
        name: ACTIVE_SHIPS,
        kind: MetricKind::Gauge,
        help: "Total number of active ships in port",
    },
    MetricDescriptor {
        name: PORT_OPERATIONS,
        kind: MetricKind::Counter,
        help: "Total number of port operations",
    },
    MetricDescriptor {
        name: CRITICAL_OPERATIONS_FAILED,
        kind: MetricKind::Counter,
        help: "Total number of failed critical operations",
    },
    MetricDescriptor {
        name: AUTH_FAILURES,
        kind: MetricKind::Counter,
        help: "Total authentication failures",
    },
];

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("failed to configure histogram buckets for {metric}: {source}")]
    Buckets {
        metric: &'static str,
        #[source]
        source: BuildError,
    },
}

/// Application-owned metrics registry backed by the Prometheus exporter.
pub struct MetricsRegistry {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
    process: Collector,
    applied_fleet_version: Mutex<Option<u64>>,
}

impl MetricsRegistry {
    /// Build the registry and register every metric in [`REGISTERED_METRICS`].
    pub fn new() -> Result<Self, MetricsError> {
        let recorder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(HTTP_REQUEST_DURATION.to_string()),
                &HTTP_DURATION_BUCKETS,
            )
            .map_err(|source| MetricsError::Buckets {
                metric: HTTP_REQUEST_DURATION,
                source,
            })?
            .build_recorder();
        let handle = recorder.handle();

        let registry = Self {
            recorder,
            handle,
            process: Collector::default(),
            applied_fleet_version: Mutex::new(None),
        };
        registry.register();
        Ok(registry)
    }

    fn register(&self) {
        metrics::with_local_recorder(&self.recorder, || {
            for descriptor in REGISTERED_METRICS {
                match descriptor.kind {
                    MetricKind::Counter => describe_counter!(descriptor.name, descriptor.help),
                    MetricKind::Gauge => describe_gauge!(descriptor.name, descriptor.help),
                    MetricKind::Histogram => {
                        describe_histogram!(descriptor.name, Unit::Seconds, descriptor.help)
                    }
                }
            }
            self.process.describe();

            // Bounded label sets start at zero so dashboards see them immediately.
            counter!(AUTH_FAILURES, "type" => "login").absolute(0);
            counter!(CRITICAL_OPERATIONS_FAILED, "operation_type" => OperationType::Berth.as_str())
                .absolute(0);
            for outcome in [Outcome::Success, Outcome::Failure] {
                counter!(PORT_OPERATIONS,
                    "operation_type" => OperationType::Berth.as_str(),
                    "outcome" => outcome.as_str()
                )
                .absolute(0);
            }
        });
    }

    /// Record one completed HTTP request.
    pub fn record_http_request(
        &self,
        method: &str,
        route: &str,
        status_code: u16,
        duration: Duration,
    ) {
        let status_code = status_code.to_string();
        metrics::with_local_recorder(&self.recorder, || {
            histogram!(HTTP_REQUEST_DURATION,
                "method" => method.to_string(),
                "route" => route.to_string(),
                "status_code" => status_code.clone()
            )
            .record(duration.as_secs_f64());

            counter!(HTTP_REQUESTS_TOTAL,
                "method" => method.to_string(),
                "route" => route.to_string(),
                "status_code" => status_code
            )
            .increment(1);
        });
    }

    /// Count a completed port operation.
    pub fn record_port_operation(&self, operation: OperationType, outcome: Outcome) {
        metrics::with_local_recorder(&self.recorder, || {
            counter!(PORT_OPERATIONS,
                "operation_type" => operation.as_str(),
                "outcome" => outcome.as_str()
            )
            .increment(1);
        });
    }

    /// Count an injected failure of a critical operation.
    pub fn record_critical_failure(&self, operation: OperationType) {
        metrics::with_local_recorder(&self.recorder, || {
            counter!(CRITICAL_OPERATIONS_FAILED, "operation_type" => operation.as_str())
                .increment(1);
        });
    }

    /// Count a failed authentication attempt.
    pub fn record_auth_failure(&self, failure_type: &'static str) {
        metrics::with_local_recorder(&self.recorder, || {
            counter!(AUTH_FAILURES, "type" => failure_type).increment(1);
        });
    }

    /// Overwrite the vessel-status gauges from `snapshot`.
    ///
    /// Returns false, changing nothing, when a newer snapshot was already
    /// applied.
    pub fn sync_fleet_gauges(&self, snapshot: &FleetSnapshot) -> bool {
        let mut applied = match self.applied_fleet_version.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if applied.is_some_and(|version| snapshot.version < version) {
            return false;
        }

        metrics::with_local_recorder(&self.recorder, || {
            for (status, count) in &snapshot.counts {
                gauge!(ACTIVE_SHIPS, "status" => status.as_str()).set(*count as f64);
            }
        });
        *applied = Some(snapshot.version);
        true
    }

    /// Render the Prometheus text exposition.
    pub fn render(&self) -> String {
        metrics::with_local_recorder(&self.recorder, || self.process.collect());

        let mut output = self.handle.render();
        for descriptor in REGISTERED_METRICS {
            if !output.contains(&format!("# TYPE {} ", descriptor.name)) {
                if !output.is_empty() && !output.ends_with('\n') {
                    output.push('\n');
                }
                output.push_str(&format!(
                    "# HELP {name} {help}\n# TYPE {name} {kind}\n",
                    name = descriptor.name,
                    help = descriptor.help,
                    kind = descriptor.kind.as_str(),
                ));
            }
        }
        output
    }
}

/// Read one sample from a rendered exposition.
///
/// Matches the first line for `name` whose label set contains every pair in
/// `labels`.
pub fn sample_value(exposition: &str, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
    exposition
        .lines()
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| {
            let (series, value) = line.rsplit_once(' ')?;
            let rest = series.strip_prefix(name)?;
            if !(rest.is_empty() || rest.starts_with('{')) {
                return None;
            }
            let matches = labels
                .iter()
                .all(|(key, val)| rest.contains(&format!("{key}=\"{val}\"")));
            if matches {
                value.parse().ok()
            } else {
                None
            }
        })
        .next()
}
