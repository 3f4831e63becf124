//! Service metadata, health, metrics exposition and port status.

use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use crate::http::error::ApiError;
use crate::http::handlers::store_failure;
use crate::http::server::AppState;
use crate::observability::metrics::EXPOSITION_CONTENT_TYPE;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub authors: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct HealthServices {
    pub telemetry: &'static str,
    pub prometheus: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the service started.
    pub uptime: f64,
    pub environment: String,
    pub version: &'static str,
    pub services: HealthServices,
}

#[derive(Debug, Serialize)]
pub struct ServiceStates {
    pub database: &'static str,
    pub authentication: &'static str,
    pub monitoring: &'static str,
    pub logging: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Weather {
    pub condition: &'static str,
    pub wind_speed: &'static str,
    pub visibility: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortStatus {
    pub active_ships: usize,
    pub total_berths: u32,
    pub available_berths: u32,
    pub active_staff: usize,
    pub weather: Weather,
}

#[derive(Debug, Serialize)]
pub struct ApiStatus {
    pub api: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub services: ServiceStates,
    pub port_status: PortStatus,
}

pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        authors: env!("CARGO_PKG_AUTHORS")
            .split(':')
            .filter(|a| !a.is_empty())
            .collect(),
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let report = HealthReport {
        status: "healthy",
        timestamp: Utc::now(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        environment: state.config.environment.clone(),
        version: env!("CARGO_PKG_VERSION"),
        services: HealthServices {
            telemetry: state.telemetry.sink_kind(),
            prometheus: "active",
        },
    };

    state.telemetry.info(
        "Health check requested",
        json!({
            "status": report.status,
            "uptime": report.uptime,
            "environment": report.environment,
            "version": report.version,
        }),
    );
    Json(report)
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    ([(CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)], state.metrics.render())
}

pub async fn api_status(State(state): State<AppState>) -> Result<Json<ApiStatus>, ApiError> {
    let fleet = state
        .store
        .fleet_snapshot()
        .map_err(|e| store_failure(&state, "Error computing port status", e))?;

    let active_ships = fleet.berths_occupied();
    let total_berths = state.config.port.total_berths;
    let occupied = u32::try_from(active_ships).unwrap_or(u32::MAX);

    let port_status = PortStatus {
        active_ships,
        total_berths,
        available_berths: total_berths.saturating_sub(occupied),
        active_staff: state.store.active_personnel(),
        weather: Weather {
            condition: "clear",
            wind_speed: "15 knots",
            visibility: "10 nautical miles",
        },
    };

    state
        .telemetry
        .info("API status requested", json!({ "port_status": port_status }));

    Ok(Json(ApiStatus {
        api: "PortTrack API",
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        services: ServiceStates {
            database: "connected",
            authentication: "active",
            monitoring: "enabled",
            logging: state.telemetry.sink_kind(),
        },
        port_status,
    }))
}
