use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use crate::http::server::AppState;
use crate::port::{Personnel, PersonnelFilter};

#[derive(Debug, Serialize)]
pub struct StaffList {
    pub staff: Vec<Personnel>,
    pub total: usize,
    pub timestamp: DateTime<Utc>,
}

pub async fn list_staff(
    State(state): State<AppState>,
    Query(filter): Query<PersonnelFilter>,
) -> Json<StaffList> {
    let staff = state.store.list_personnel(&filter);

    state.telemetry.info(
        "Staff list requested",
        json!({
            "count": staff.len(),
            "filters": {
                "role": filter.role,
                "shift": filter.shift,
                "active": filter.active,
            },
        }),
    );

    Json(StaffList {
        total: staff.len(),
        staff,
        timestamp: Utc::now(),
    })
}
