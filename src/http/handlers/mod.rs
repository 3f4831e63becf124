//! Endpoint handlers.
//!
//! # Data Flow
//! ```text
//! extractors (path, query, JSON body)
//!     → validation
//!     → PortStore read, or FailureInjector-gated mutation
//!     → MetricsRegistry update
//!     → Telemetry event
//!     → typed JSON response or ApiError
//! ```

pub mod auth;
pub mod navigation;
pub mod operations;
pub mod ships;
pub mod staff;
pub mod system;

use axum::{
    extract::State,
    http::{header::USER_AGENT, HeaderMap, Method, Uri},
};
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

use crate::http::error::{ApiError, ROUTE_NOT_FOUND};
use crate::http::server::AppState;
use crate::port::StoreError;

/// Convert a store error, reporting internal faults to telemetry first.
pub(crate) fn store_failure(state: &AppState, context: &str, err: StoreError) -> ApiError {
    if matches!(err, StoreError::LockPoisoned) {
        state
            .telemetry
            .error(context, json!({ "error": err.to_string() }));
    }
    ApiError::from(err)
}

/// Deserialize an optional body field as text, accepting any truthy JSON value.
///
/// Strings pass through; non-zero numbers, `true`, arrays and objects are
/// rendered as JSON text. `null`, `false`, `0` and `""` count as absent.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(truthy_text))
}

fn truthy_text(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Fallback for unmatched routes and unsupported methods.
pub async fn route_not_found(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> ApiError {
    let user_agent = headers.get(USER_AGENT).and_then(|v| v.to_str().ok());
    state.telemetry.warn(
        "Route not found",
        json!({
            "method": method.as_str(),
            "path": uri.path(),
            "userAgent": user_agent,
        }),
    );
    ApiError::NotFound(ROUTE_NOT_FOUND)
}
