use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use crate::http::server::AppState;
use crate::port::navigation::{self, NavigationRoute};

#[derive(Debug, Serialize)]
pub struct RouteList {
    pub routes: Vec<NavigationRoute>,
    pub total: usize,
    pub timestamp: DateTime<Utc>,
}

pub async fn list_routes(State(state): State<AppState>) -> Json<RouteList> {
    let routes = navigation::catalog();

    state.telemetry.info(
        "Routes information requested",
        json!({ "routeCount": routes.len() }),
    );

    Json(RouteList {
        total: routes.len(),
        routes,
        timestamp: Utc::now(),
    })
}
