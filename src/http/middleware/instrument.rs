//! Request instrumentation.
//!
//! # Responsibilities
//! - Time every request, matched or not
//! - Label metrics with the matched route template, falling back to the raw path
//! - Emit the "HTTP Request" access-log event
//! - Report caught handler panics to telemetry
//!
//! # Design Decisions
//! - The outer middleware cannot see `MatchedPath` (routing happens inside it),
//!   so a `route_layer` copies the template into a response extension
//! - The panic handler has no request context; it marks the response and the
//!   outer middleware emits the event with method and url

use std::any::Any;
use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, MatchedPath, Request, State},
    http::header::{CONTENT_LENGTH, USER_AGENT},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::http::error::ApiError;
use crate::http::server::AppState;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Route template of the handler that produced a response.
#[derive(Debug, Clone)]
pub struct RouteLabel(pub String);

/// Message of a panic caught while handling the request.
#[derive(Debug, Clone)]
pub struct PanicDetail(pub String);

/// Copy the matched route template onto the response.
pub async fn tag_matched_route(
    matched: Option<MatchedPath>,
    request: Request,
    next: Next,
) -> Response {
    let label = matched.map(|path| path.as_str().to_string());
    let mut response = next.run(request).await;
    if let Some(label) = label {
        response.extensions_mut().insert(RouteLabel(label));
    }
    response
}

/// Record duration, count and an access-log event for every request.
pub async fn instrument_request(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();

    let method = request.method().clone();
    let raw_path = request.uri().path().to_string();
    let url = request
        .uri()
        .path_and_query()
        .map_or_else(|| raw_path.clone(), |pq| pq.as_str().to_string());
    let user_agent = header_str(&request, USER_AGENT.as_str());
    let request_id = header_str(&request, X_REQUEST_ID);
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    let response = next.run(request).await;
    let elapsed = start.elapsed();

    let route = response
        .extensions()
        .get::<RouteLabel>()
        .map_or(raw_path, |label| label.0.clone());
    let status = response.status().as_u16();

    state
        .metrics
        .record_http_request(method.as_str(), &route, status, elapsed);

    if let Some(PanicDetail(detail)) = response.extensions().get::<PanicDetail>() {
        state.telemetry.error(
            "Unhandled application error",
            json!({
                "error": detail,
                "url": url,
                "method": method.as_str(),
                "request_id": request_id,
            }),
        );
    }

    let content_length = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.telemetry.info(
        "HTTP Request",
        json!({
            "method": method.as_str(),
            "url": url,
            "route": route,
            "status": status,
            "content_length": content_length,
            "response_time_ms": elapsed.as_secs_f64() * 1000.0,
            "user_agent": user_agent,
            "ip": ip,
            "request_id": request_id,
        }),
    );

    response
}

/// Convert a caught panic into the generic 500 response.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    let mut response = ApiError::Internal.into_response();
    response.extensions_mut().insert(PanicDetail(detail));
    response
}

fn header_str(request: &Request, name: &str) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
