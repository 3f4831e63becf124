use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use crate::http::error::ApiError;
use crate::http::handlers::store_failure;
use crate::http::server::AppState;
use crate::port::OperationRecord;

#[derive(Debug, Serialize)]
pub struct OperationList {
    pub operations: Vec<OperationRecord>,
    /// Number of records returned, not the size of the whole log.
    pub total: usize,
    pub timestamp: DateTime<Utc>,
}

/// Most recent operations, oldest first.
pub async fn list_operations(
    State(state): State<AppState>,
) -> Result<Json<OperationList>, ApiError> {
    let recent = state
        .store
        .recent_operations()
        .map_err(|e| store_failure(&state, "Error fetching operations", e))?;

    state.telemetry.info(
        "Operations list requested",
        json!({
            "count": recent.operations.len(),
            "totalOperations": recent.total_recorded,
        }),
    );

    Ok(Json(OperationList {
        total: recent.operations.len(),
        operations: recent.operations,
        timestamp: Utc::now(),
    }))
}
