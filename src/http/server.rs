//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with every PortTrack endpoint
//! - Wire up middleware (request id, CORS, instrumentation, tracing, limits, panics)
//! - Bind the server to a listener and stop on the shutdown signal
//!
//! # Design Decisions
//! - Layer order, innermost first: panic catcher, timeout, body limit, trace,
//!   instrumentation, CORS, request id propagation, request id generation.
//!   The instrumentation therefore sees 408, 413 and panic-converted 500s,
//!   while CORS preflights are answered before they are measured
//! - All shared state is behind `Arc` in [`AppState`]; nothing is global

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    http::Method,
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::fault::FailureInjector;
use crate::http::handlers::{auth, navigation, operations, route_not_found, ships, staff, system};
use crate::http::middleware::{handle_panic, instrument_request, tag_matched_route};
use crate::lifecycle::Shutdown;
use crate::observability::metrics::{MetricsError, MetricsRegistry};
use crate::observability::telemetry::Telemetry;
use crate::port::PortStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PortStore>,
    pub metrics: Arc<MetricsRegistry>,
    pub telemetry: Telemetry,
    pub injector: Arc<dyn FailureInjector>,
    pub config: Arc<ServiceConfig>,
    pub started_at: Instant,
}

impl AppState {
    /// Build state around a freshly seeded store.
    pub fn new(
        config: ServiceConfig,
        telemetry: Telemetry,
        injector: Arc<dyn FailureInjector>,
    ) -> Result<Self, MetricsError> {
        Self::with_store(config, telemetry, injector, PortStore::seeded())
    }

    /// Build state around an existing store.
    pub fn with_store(
        config: ServiceConfig,
        telemetry: Telemetry,
        injector: Arc<dyn FailureInjector>,
        store: PortStore,
    ) -> Result<Self, MetricsError> {
        let metrics = MetricsRegistry::new()?;
        if let Ok(snapshot) = store.fleet_snapshot() {
            metrics.sync_fleet_gauges(&snapshot);
        }

        Ok(Self {
            store: Arc::new(store),
            metrics: Arc::new(metrics),
            telemetry,
            injector,
            config: Arc::new(config),
            started_at: Instant::now(),
        })
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(system::service_info))
        .route("/health", get(system::health))
        .route("/metrics", get(system::metrics))
        .route("/api/v1/status", get(system::api_status))
        .route("/api/v1/ships", get(ships::list_ships))
        .route("/api/v1/ships/{id}", get(ships::get_ship))
        .route("/api/v1/ships/{id}/berth", post(ships::berth_ship))
        .route("/api/v1/staff", get(staff::list_staff))
        .route("/api/v1/operations", get(operations::list_operations))
        .route("/api/v1/cargo/tracking/{ship_id}", get(ships::cargo_tracking))
        .route("/api/v1/routes", get(navigation::list_routes))
        .route("/api/v1/auth/login", post(auth::login))
        .route_layer(middleware::from_fn(tag_matched_route))
        // A known path with the wrong method is as unknown as any other path.
        .method_not_allowed_fallback(route_not_found)
        .fallback(route_not_found)
        .with_state(state.clone());

    apply_middleware(routes, state)
}

/// Wrap `router` in the service layer stack.
#[allow(deprecated)]
pub fn apply_middleware(router: Router, state: AppState) -> Router {
    let limits = state.config.limits.clone();

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TimeoutLayer::new(Duration::from_secs(limits.request_timeout_secs)))
        .layer(RequestBodyLimitLayer::new(limits.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(state, instrument_request))
        .layer(cors_layer())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Any origin, the usual REST verbs, any request header.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(Any)
}

/// HTTP server for the PortTrack API.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Serve on `listener` until `shutdown` fires, then finish in-flight requests.
    ///
    /// Returns as soon as the listener drains when shutdown was already
    /// triggered before the call.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("HTTP server no longer accepting connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
