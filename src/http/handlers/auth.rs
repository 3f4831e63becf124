//! Simulated login.
//!
//! Not an authentication system: any non-empty credentials succeed unless the
//! failure injector says otherwise. Exists to produce auth-failure telemetry.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http::error::{ApiError, AUTHENTICATION_FAILED};
use crate::http::handlers::lenient_text;
use crate::http::server::AppState;

/// Label value for `porttrack_auth_failures_total{type}`.
pub const LOGIN_FAILURE: &str = "login";

/// Opaque token handed out on success.
pub const MOCK_TOKEN: &str = "mock-jwt-token";

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureReason {
    MissingCredentials,
    InvalidCredentials,
}

impl FailureReason {
    fn as_str(&self) -> &'static str {
        match self {
            FailureReason::MissingCredentials => "missing_credentials",
            FailureReason::InvalidCredentials => "invalid_credentials",
        }
    }
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Both failure modes return the same 401 body; only telemetry tells them apart.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();

    let failure = if !present(&request.username) || !present(&request.password) {
        Some(FailureReason::MissingCredentials)
    } else if state
        .injector
        .should_fail(state.config.failure.auth_failure_probability)
    {
        Some(FailureReason::InvalidCredentials)
    } else {
        None
    };

    let username = request
        .username
        .as_deref()
        .filter(|u| !u.is_empty())
        .unwrap_or("missing");

    if let Some(reason) = failure {
        state.metrics.record_auth_failure(LOGIN_FAILURE);
        state.telemetry.warn(
            "Authentication failure",
            json!({ "username": username, "reason": reason.as_str() }),
        );
        return Err(ApiError::Unauthorized(AUTHENTICATION_FAILED));
    }

    state
        .telemetry
        .info("Successful authentication", json!({ "username": username }));

    Ok(Json(LoginResponse {
        message: "Authentication successful",
        token: MOCK_TOKEN,
    }))
}
