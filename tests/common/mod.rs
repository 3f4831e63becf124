//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceExt;

use porttrack::config::ServiceConfig;
use porttrack::fault::{FailureInjector, FixedFailureInjector};
use porttrack::http::{AppState, HttpServer};
use porttrack::lifecycle::Shutdown;
use porttrack::observability::{MemorySink, Telemetry};

/// In-process application with a captured telemetry stream.
pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    pub sink: MemorySink,
}

impl TestApp {
    pub fn new(injector: impl FailureInjector + 'static) -> Self {
        Self::with_config(ServiceConfig::default(), injector)
    }

    /// Failure injection forced off.
    pub fn reliable() -> Self {
        Self::new(FixedFailureInjector::never_fail())
    }

    /// Failure injection forced on.
    pub fn failing() -> Self {
        Self::new(FixedFailureInjector::always_fail())
    }

    pub fn with_config(config: ServiceConfig, injector: impl FailureInjector + 'static) -> Self {
        let sink = MemorySink::new();
        let telemetry = Telemetry::new(Arc::new(sink.clone()), "test");
        let state = AppState::new(config, telemetry, Arc::new(injector)).unwrap();
        let router = HttpServer::new(state.clone()).router();
        Self {
            state,
            router,
            sink,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        self.send(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Send a request and decode the body as JSON (`Value::Null` if it is not JSON).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    /// Current `/metrics` exposition, read without going through HTTP.
    pub fn metrics(&self) -> String {
        self.state.metrics.render()
    }
}

/// A live server on an ephemeral port.
pub struct LiveServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub sink: MemorySink,
    pub handle: JoinHandle<()>,
}

pub async fn start_live_server(injector: impl FailureInjector + 'static) -> LiveServer {
    let sink = MemorySink::new();
    let telemetry = Telemetry::new(Arc::new(sink.clone()), "test");
    let state = AppState::new(ServiceConfig::default(), telemetry, Arc::new(injector)).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.clone();

    let handle = tokio::spawn(async move {
        let _ = HttpServer::new(state).run(listener, server_shutdown).await;
    });

    LiveServer {
        addr,
        shutdown,
        sink,
        handle,
    }
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
