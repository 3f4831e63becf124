//! API error responses.
//!
//! Every failure leaves the service as `{"error": "<message>"}`. Diagnostic
//! detail goes to telemetry before the error is built, never into the body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::port::StoreError;

pub const SHIP_NOT_FOUND: &str = "Ship not found";
pub const BERTH_NUMBER_REQUIRED: &str = "Berth number is required";
pub const BERTHING_FAILED: &str = "Berthing operation failed";
pub const AUTHENTICATION_FAILED: &str = "Authentication failed";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
pub const ROUTE_NOT_FOUND: &str = "Route not found";

/// Body shared by every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    BadRequest(&'static str),

    #[error("{0}")]
    Unauthorized(&'static str),

    /// Simulated critical-path failure.
    #[error("{0}")]
    InjectedFailure(&'static str),

    /// Any other internal fault. The body is always generic.
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InjectedFailure(_) | ApiError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::NotFound(message)
            | ApiError::BadRequest(message)
            | ApiError::Unauthorized(message)
            | ApiError::InjectedFailure(message) => message,
            ApiError::Internal => INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::VesselNotFound(_) => ApiError::NotFound(SHIP_NOT_FOUND),
            StoreError::MissingBerthNumber => ApiError::BadRequest(BERTH_NUMBER_REQUIRED),
            StoreError::LockPoisoned => ApiError::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorBody {
                error: self.message(),
            }),
        )
            .into_response()
    }
}

/// `500 {"error":"Internal server error"}` outside the handler error path.
pub fn internal_error_response() -> Response {
    ApiError::Internal.into_response()
}
