//! Vessel endpoints: listing, details, berthing and cargo tracking.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::HeaderMap,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http::error::{ApiError, BERTHING_FAILED, BERTH_NUMBER_REQUIRED, SHIP_NOT_FOUND};
use crate::http::handlers::{lenient_text, store_failure};
use crate::http::middleware::X_REQUEST_ID;
use crate::http::server::AppState;
use crate::port::{
    CargoView, OperationRecord, OperationType, Outcome, StoreError, Vessel, VesselFilter,
};

/// Reason recorded for injected berthing failures.
pub const SIMULATED_FAILURE: &str = "simulated_failure";

#[derive(Debug, Serialize)]
pub struct ShipList {
    pub ships: Vec<Vessel>,
    pub total: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BerthRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub berth_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BerthResponse {
    pub message: &'static str,
    pub ship: Vessel,
    pub operation: OperationRecord,
}

pub async fn list_ships(
    State(state): State<AppState>,
    Query(filter): Query<VesselFilter>,
    headers: HeaderMap,
) -> Result<Json<ShipList>, ApiError> {
    let ships = state
        .store
        .list_vessels(&filter)
        .map_err(|e| store_failure(&state, "Error fetching ships", e))?;

    let request_id = headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    state.telemetry.info(
        "Ships list requested",
        json!({
            "count": ships.len(),
            "filters": { "status": filter.status, "type": filter.vessel_type },
            "request_id": request_id,
        }),
    );

    Ok(Json(ShipList {
        total: ships.len(),
        ships,
        timestamp: Utc::now(),
    }))
}

pub async fn get_ship(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vessel>, ApiError> {
    match state.store.get_vessel(&id) {
        Ok(ship) => {
            state.telemetry.info(
                "Ship details requested",
                json!({ "shipId": ship.id, "shipName": ship.name }),
            );
            Ok(Json(ship))
        }
        Err(StoreError::VesselNotFound(_)) => {
            state
                .telemetry
                .warn("Ship not found", json!({ "shipId": id }));
            Err(ApiError::NotFound(SHIP_NOT_FOUND))
        }
        Err(e) => Err(store_failure(&state, "Error fetching ship details", e)),
    }
}

/// Dock a vessel.
///
/// Checks run in a fixed order: unknown vessel (404), missing berth number
/// (400), injected failure (500), then the mutation. Only the mutation
/// touches the store. A body that is not a JSON object counts as empty.
pub async fn berth_ship(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<BerthRequest>, JsonRejection>,
) -> Result<Json<BerthResponse>, ApiError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();

    match state.store.get_vessel(&id) {
        Ok(_) => {}
        Err(StoreError::VesselNotFound(_)) => {
            state.telemetry.warn(
                "Berth operation failed - ship not found",
                json!({ "shipId": id }),
            );
            return Err(ApiError::NotFound(SHIP_NOT_FOUND));
        }
        Err(e) => return Err(store_failure(&state, "Error in berthing operation", e)),
    }

    let Some(berth) = request.berth_number else {
        state.telemetry.warn(
            "Berth operation failed - missing berth number",
            json!({ "shipId": id }),
        );
        return Err(ApiError::BadRequest(BERTH_NUMBER_REQUIRED));
    };

    if state
        .injector
        .should_fail(state.config.failure.berth_failure_probability)
    {
        state.metrics.record_critical_failure(OperationType::Berth);
        state.telemetry.error(
            "Critical berthing operation failed",
            json!({
                "shipId": id,
                "berth": berth,
                "reason": SIMULATED_FAILURE,
            }),
        );
        return Err(ApiError::InjectedFailure(BERTHING_FAILED));
    }

    let outcome = state
        .store
        .berth_vessel(&id, &berth)
        .map_err(|e| store_failure(&state, "Error in berthing operation", e))?;

    state.metrics.sync_fleet_gauges(&outcome.fleet);
    state
        .metrics
        .record_port_operation(OperationType::Berth, Outcome::Success);

    state.telemetry.info(
        "Ship berthed successfully",
        json!({
            "shipId": outcome.vessel.id,
            "shipName": outcome.vessel.name,
            "berth": berth,
            "previousStatus": outcome.operation.details.previous_status,
            "operationId": outcome.operation.id,
        }),
    );

    Ok(Json(BerthResponse {
        message: "Ship berthed successfully",
        ship: outcome.vessel,
        operation: outcome.operation,
    }))
}

pub async fn cargo_tracking(
    State(state): State<AppState>,
    Path(ship_id): Path<String>,
) -> Result<Json<CargoView>, ApiError> {
    match state.store.cargo_status(&ship_id) {
        Ok(view) => {
            state.telemetry.info(
                "Cargo tracking requested",
                json!({ "shipId": view.ship_id, "status": view.status }),
            );
            Ok(Json(view))
        }
        Err(StoreError::VesselNotFound(_)) => {
            state.telemetry.warn(
                "Cargo tracking failed - ship not found",
                json!({ "shipId": ship_id }),
            );
            Err(ApiError::NotFound(SHIP_NOT_FOUND))
        }
        Err(e) => Err(store_failure(&state, "Error tracking cargo", e)),
    }
}
