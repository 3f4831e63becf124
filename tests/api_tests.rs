//! End-to-end tests of the HTTP surface, driven in-process.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use porttrack::config::ServiceConfig;
use porttrack::fault::{FixedFailureInjector, RandomFailureInjector};
use porttrack::http::server::apply_middleware;
use porttrack::observability::metrics::sample_value;

mod common;

use common::TestApp;

fn ids(list: &Value, key: &str) -> Vec<String> {
    list[key]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_berth_approaching_ship() {
    let app = TestApp::reliable();

    let (status, body) = app
        .post_json("/api/v1/ships/SHIP002/berth", r#"{"berthNumber":"C-15"}"#)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Ship berthed successfully");
    assert_eq!(body["ship"]["status"], "docked");
    assert_eq!(body["ship"]["berthNumber"], "C-15");
    assert!(body["ship"]["arrivalTime"].is_string());
    assert_eq!(body["operation"]["type"], "berth");
    assert_eq!(body["operation"]["shipId"], "SHIP002");
    assert_eq!(body["operation"]["outcome"], "success");
    assert_eq!(body["operation"]["details"]["berthNumber"], "C-15");
    assert_eq!(body["operation"]["details"]["previousStatus"], "approaching");
    assert!(body["operation"]["id"].as_str().unwrap().starts_with("OP"));

    let (_, ship) = app.get("/api/v1/ships/SHIP002").await;
    assert_eq!(ship["status"], "docked");

    let metrics = app.metrics();
    assert_eq!(
        sample_value(
            &metrics,
            "porttrack_operations_total",
            &[("operation_type", "berth"), ("outcome", "success")]
        ),
        Some(1.0)
    );
    assert_eq!(
        sample_value(&metrics, "porttrack_active_ships_total", &[("status", "docked")]),
        Some(2.0)
    );
    assert_eq!(
        sample_value(&metrics, "porttrack_active_ships_total", &[("status", "approaching")]),
        Some(0.0)
    );

    let events = app.sink.with_message("Ship berthed successfully");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field("previousStatus"), Some(&json!("approaching")));
}

#[tokio::test]
async fn test_unknown_ship_is_404() {
    let app = TestApp::reliable();
    let (status, body) = app.get("/api/v1/ships/NONEXISTENT").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Ship not found" }));
    assert_eq!(app.sink.with_message("Ship not found").len(), 1);
}

#[tokio::test]
async fn test_ship_filters() {
    let app = TestApp::reliable();

    let (status, docked) = app.get("/api/v1/ships?status=docked").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(docked["total"], 1);
    assert_eq!(docked["ships"][0]["status"], "docked");
    assert!(docked["timestamp"].is_string());

    let (_, tankers) = app.get("/api/v1/ships?type=tanker").await;
    assert_eq!(ids(&tankers, "ships"), ["SHIP002"]);

    let (_, none) = app.get("/api/v1/ships?status=docked&type=tanker").await;
    assert_eq!(none["total"], 0);

    let (_, all) = app.get("/api/v1/ships?status=").await;
    assert_eq!(ids(&all, "ships"), ["SHIP001", "SHIP002", "SHIP003"]);

    let (_, unknown) = app.get("/api/v1/ships?status=sunk").await;
    assert_eq!(unknown["total"], 0);
}

#[tokio::test]
async fn test_berth_validation_precedes_failure_injection() {
    let app = TestApp::failing();

    let (status, body) = app
        .post_json("/api/v1/ships/NONEXISTENT/berth", r#"{"berthNumber":"C-15"}"#)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Ship not found");

    let (status, body) = app.post_json("/api/v1/ships/SHIP002/berth", "{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Berth number is required");

    let (status, _) = app
        .post_json("/api/v1/ships/SHIP002/berth", r#"{"berthNumber":""}"#)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown vessel wins over a missing berth number.
    let (status, _) = app.post_json("/api/v1/ships/NONEXISTENT/berth", "{}").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(
        sample_value(
            &app.metrics(),
            "porttrack_critical_operations_failed_total",
            &[("operation_type", "berth")]
        ),
        Some(0.0)
    );
}

#[tokio::test]
async fn test_unreadable_berth_body_is_missing_berth_number() {
    let app = TestApp::reliable();

    let (status, _) = app
        .post_json("/api/v1/ships/SHIP002/berth", "not json")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::post("/api/v1/ships/SHIP002/berth")
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Berth number is required");
}

#[tokio::test]
async fn test_truthy_berth_number_is_accepted_as_text() {
    let app = TestApp::reliable();

    let (status, body) = app
        .post_json("/api/v1/ships/SHIP002/berth", r#"{"berthNumber":42}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ship"]["berthNumber"], "42");
    assert_eq!(body["operation"]["details"]["berthNumber"], "42");

    let (status, _) = app
        .post_json("/api/v1/ships/SHIP003/berth", r#"{"berthNumber":0}"#)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_injected_berth_failure() {
    let app = TestApp::failing();

    let (status, body) = app
        .post_json("/api/v1/ships/SHIP002/berth", r#"{"berthNumber":"C-15"}"#)
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Berthing operation failed" }));

    let (_, ship) = app.get("/api/v1/ships/SHIP002").await;
    assert_eq!(ship["status"], "approaching");
    assert!(ship.get("berthNumber").is_none());

    // The operations log is part of the store and stays untouched.
    let (_, operations) = app.get("/api/v1/operations").await;
    assert_eq!(operations["total"], 0);
    assert_eq!(operations["operations"], json!([]));

    let metrics = app.metrics();
    assert_eq!(
        sample_value(
            &metrics,
            "porttrack_critical_operations_failed_total",
            &[("operation_type", "berth")]
        ),
        Some(1.0)
    );
    assert_eq!(
        sample_value(
            &metrics,
            "porttrack_operations_total",
            &[("operation_type", "berth"), ("outcome", "success")]
        ),
        Some(0.0)
    );
    assert_eq!(
        sample_value(&metrics, "porttrack_active_ships_total", &[("status", "approaching")]),
        Some(1.0)
    );

    let events = app.sink.with_message("Critical berthing operation failed");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field("reason"), Some(&json!("simulated_failure")));
    assert!(events[0].field("operationId").is_none());
}

#[tokio::test]
async fn test_repeated_berthing_appends_records() {
    let app = TestApp::reliable();
    for _ in 0..3 {
        let (status, _) = app
            .post_json("/api/v1/ships/SHIP001/berth", r#"{"berthNumber":"A-12"}"#)
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, operations) = app.get("/api/v1/operations").await;
    let records = operations["operations"].as_array().unwrap();
    assert_eq!(records.len(), 3);
    let ids: Vec<&str> = records.iter().map(|r| r["id"].as_str().unwrap()).collect();
    let mut unique = ids.clone();
    unique.dedup();
    assert_eq!(unique.len(), 3);
}

#[tokio::test]
async fn test_operations_window_is_fifty() {
    let app = TestApp::reliable();
    for _ in 0..60 {
        app.post_json("/api/v1/ships/SHIP003/berth", r#"{"berthNumber":"B-08"}"#)
            .await;
    }

    let (status, body) = app.get("/api/v1/operations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 50);
    assert_eq!(body["operations"].as_array().unwrap().len(), 50);

    let events = app.sink.with_message("Operations list requested");
    assert_eq!(events[0].field("totalOperations"), Some(&json!(60)));
}

#[tokio::test]
async fn test_login_missing_credentials_always_fails() {
    let app = TestApp::reliable();

    for body in [
        r#"{}"#,
        r#"{"username":"ops"}"#,
        r#"{"password":"secret"}"#,
        r#"{"username":"","password":"secret"}"#,
    ] {
        let (status, response) = app.post_json("/api/v1/auth/login", body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "body {body}");
        assert_eq!(response, json!({ "error": "Authentication failed" }));
    }

    assert_eq!(
        sample_value(
            &app.metrics(),
            "porttrack_auth_failures_total",
            &[("type", "login")]
        ),
        Some(4.0)
    );
    let events = app.sink.with_message("Authentication failure");
    assert!(events
        .iter()
        .all(|e| e.field("reason") == Some(&json!("missing_credentials"))));
    assert_eq!(events[0].field("username"), Some(&json!("missing")));
}

#[tokio::test]
async fn test_login_outcome_follows_injector() {
    let ok = TestApp::reliable();
    let (status, body) = ok
        .post_json("/api/v1/auth/login", r#"{"username":"ops","password":"secret"}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token"], "mock-jwt-token");

    let failing = TestApp::failing();
    let (status, body) = failing
        .post_json("/api/v1/auth/login", r#"{"username":"ops","password":"secret"}"#)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Authentication failed" }));
    let events = failing.sink.with_message("Authentication failure");
    assert_eq!(events[0].field("reason"), Some(&json!("invalid_credentials")));
    assert_eq!(events[0].field("username"), Some(&json!("ops")));
}

#[tokio::test]
async fn test_staff_filters_keep_active_quirk() {
    let app = TestApp::reliable();

    let (_, all) = app.get("/api/v1/staff").await;
    assert_eq!(all["total"], 4);

    let (_, active) = app.get("/api/v1/staff?active=true").await;
    assert_eq!(ids(&active, "staff"), ["STAFF001", "STAFF002", "STAFF004"]);

    for raw in ["false", "yes", "TRUE", "1", ""] {
        let (_, inactive) = app.get(&format!("/api/v1/staff?active={raw}")).await;
        assert_eq!(ids(&inactive, "staff"), ["STAFF003"], "active={raw}");
    }

    let (_, cranes) = app.get("/api/v1/staff?role=crane_operator").await;
    assert_eq!(ids(&cranes, "staff"), ["STAFF002"]);

    let (_, night_active) = app.get("/api/v1/staff?shift=night&active=true").await;
    assert_eq!(night_active["total"], 0);
}

#[tokio::test]
async fn test_cargo_tracking() {
    let app = TestApp::reliable();

    let (status, cargo) = app.get("/api/v1/cargo/tracking/SHIP002").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cargo["shipId"], "SHIP002");
    assert_eq!(cargo["shipName"], "Pacific Explorer");
    assert_eq!(cargo["location"], "At sea");
    assert_eq!(cargo["cargo"]["type"], "crude_oil");
    assert_eq!(cargo["coordinates"]["lat"], 40.7);
    assert!(cargo["lastUpdate"].is_string());

    let (_, docked) = app.get("/api/v1/cargo/tracking/SHIP001").await;
    assert_eq!(docked["location"], "A-12");

    let (status, body) = app.get("/api/v1/cargo/tracking/NONEXISTENT").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Ship not found");
}

#[tokio::test]
async fn test_routes_catalog() {
    let app = TestApp::reliable();
    let (status, body) = app.get("/api/v1/routes").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["routes"][0]["name"], "Main Channel");
    assert_eq!(body["routes"][1]["status"], "restricted");
    assert_eq!(body["routes"][2]["traffic"], "high");
    assert_eq!(body["routes"][0]["coordinates"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_status_is_computed_per_call() {
    let app = TestApp::reliable();

    let (status, before) = app.get("/api/v1/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(before["api"], "PortTrack API");
    assert_eq!(before["status"], "operational");
    assert_eq!(before["port_status"]["active_ships"], 2);
    assert_eq!(before["port_status"]["total_berths"], 24);
    assert_eq!(before["port_status"]["available_berths"], 22);
    assert_eq!(before["port_status"]["active_staff"], 3);
    assert_eq!(before["port_status"]["weather"]["condition"], "clear");

    app.post_json("/api/v1/ships/SHIP002/berth", r#"{"berthNumber":"C-15"}"#)
        .await;

    let (_, after) = app.get("/api/v1/status").await;
    assert_eq!(after["port_status"]["active_ships"], 3);
    assert_eq!(after["port_status"]["available_berths"], 21);
}

#[tokio::test]
async fn test_total_berths_from_config() {
    let mut config = ServiceConfig::default();
    config.port.total_berths = 10;
    let app = TestApp::with_config(config, FixedFailureInjector::never_fail());

    let (_, status) = app.get("/api/v1/status").await;
    assert_eq!(status["port_status"]["total_berths"], 10);
    assert_eq!(status["port_status"]["available_berths"], 8);
}

#[tokio::test]
async fn test_health_and_root() {
    let app = TestApp::reliable();

    let (status, health) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["environment"], "development");
    assert_eq!(health["services"]["telemetry"], "memory");
    assert_eq!(health["services"]["prometheus"], "active");
    assert!(health["uptime"].as_f64().unwrap() >= 0.0);
    assert!(health["timestamp"].is_string());

    let (status, root) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(root["name"], "porttrack");
    assert_eq!(root["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_unmatched_route_is_measured() {
    let app = TestApp::reliable();

    let (status, body) = app.get("/api/v1/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Route not found" }));

    assert_eq!(
        sample_value(
            &app.metrics(),
            "http_requests_total",
            &[("method", "GET"), ("route", "/api/v1/nowhere"), ("status_code", "404")]
        ),
        Some(1.0)
    );
    assert_eq!(app.sink.with_message("Route not found").len(), 1);
}

#[tokio::test]
async fn test_wrong_method_on_known_path_is_route_not_found() {
    let app = TestApp::reliable();

    let (status, body) = app.post_json("/health", "{}").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Route not found" }));

    let (status, body) = app.get("/api/v1/ships/SHIP002/berth").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Route not found" }));

    let events = app.sink.with_message("Route not found");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].field("method"), Some(&json!("POST")));
    assert_eq!(events[1].field("path"), Some(&json!("/api/v1/ships/SHIP002/berth")));

    // The ship was not berthed by the GET.
    let (_, ship) = app.get("/api/v1/ships/SHIP002").await;
    assert_eq!(ship["status"], "approaching");
    assert_eq!(
        sample_value(
            &app.metrics(),
            "http_requests_total",
            &[("method", "POST"), ("route", "/health"), ("status_code", "404")]
        ),
        Some(1.0)
    );
}

#[tokio::test]
async fn test_handler_panic_becomes_logged_500() {
    async fn corrupt_manifest() -> &'static str {
        panic!("cargo manifest corrupted")
    }

    let app = TestApp::reliable();
    let router = apply_middleware(
        Router::new().route("/manifest", get(corrupt_manifest)),
        app.state.clone(),
    );

    let response = router
        .oneshot(
            Request::get("/manifest?ship=SHIP001")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().contains_key("x-request-id"));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": "Internal server error" }));

    let errors = app.sink.with_message("Unhandled application error");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].level.as_str(), "error");
    assert_eq!(errors[0].field("error"), Some(&json!("cargo manifest corrupted")));
    assert_eq!(errors[0].field("method"), Some(&json!("GET")));
    assert_eq!(errors[0].field("url"), Some(&json!("/manifest?ship=SHIP001")));

    let access = app.sink.with_message("HTTP Request");
    assert_eq!(access.len(), 1);
    assert_eq!(access[0].field("status"), Some(&json!(500)));
    assert_eq!(
        sample_value(
            &app.metrics(),
            "http_requests_total",
            &[("method", "GET"), ("route", "/manifest"), ("status_code", "500")]
        ),
        Some(1.0)
    );
}

#[tokio::test]
async fn test_cors_preflight_and_simple_requests() {
    let app = TestApp::reliable();

    let preflight = Request::builder()
        .method("OPTIONS")
        .uri("/api/v1/ships/SHIP002/berth")
        .header("origin", "https://dashboard.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(preflight).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    let allowed = response.headers()["access-control-allow-methods"]
        .to_str()
        .unwrap()
        .to_string();
    assert!(allowed.contains("POST"), "{allowed}");

    // Preflights are answered before instrumentation.
    assert!(app.sink.with_message("HTTP Request").is_empty());

    let simple = Request::get("/api/v1/routes")
        .header("origin", "https://dashboard.example")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(simple).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = TestApp::reliable();
    app.get("/api/v1/ships/SHIP001").await;

    let response = app
        .router
        .clone()
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    for name in [
        "http_request_duration_seconds",
        "http_requests_total",
        "porttrack_active_ships_total",
        "porttrack_operations_total",
        "porttrack_critical_operations_failed_total",
        "porttrack_auth_failures_total",
    ] {
        assert!(text.contains(name), "missing {name}");
    }

    let labels = [
        ("method", "GET"),
        ("route", "/api/v1/ships/{id}"),
        ("status_code", "200"),
    ];
    assert_eq!(sample_value(&text, "http_requests_total", &labels), Some(1.0));
    assert_eq!(
        sample_value(&text, "http_request_duration_seconds_count", &labels),
        Some(1.0)
    );
}

#[tokio::test]
async fn test_request_counter_strictly_increases() {
    let app = TestApp::reliable();
    let labels = [
        ("method", "GET"),
        ("route", "/api/v1/routes"),
        ("status_code", "200"),
    ];

    let mut previous = sample_value(&app.metrics(), "http_requests_total", &labels).unwrap_or(0.0);
    for _ in 0..5 {
        app.get("/api/v1/routes").await;
        let current = sample_value(&app.metrics(), "http_requests_total", &labels).unwrap();
        assert!(current > previous);
        previous = current;
    }
}

#[tokio::test]
async fn test_request_id_header() {
    let app = TestApp::reliable();

    let response = app
        .router
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let generated = response.headers()["x-request-id"].to_str().unwrap();
    assert!(!generated.is_empty());

    let response = app
        .router
        .clone()
        .oneshot(
            Request::get("/api/v1/ships")
                .header("x-request-id", "trace-abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "trace-abc");

    let listing = app.sink.with_message("Ships list requested");
    assert_eq!(listing[0].field("request_id"), Some(&json!("trace-abc")));
}

#[tokio::test]
async fn test_access_log_event_per_request() {
    let app = TestApp::reliable();
    app.get("/api/v1/ships/NONEXISTENT").await;
    app.get("/api/v1/routes").await;

    let access = app.sink.with_message("HTTP Request");
    assert_eq!(access.len(), 2);
    assert_eq!(access[0].field("status"), Some(&json!(404)));
    assert_eq!(access[0].field("method"), Some(&json!("GET")));
    assert_eq!(access[0].field("url"), Some(&json!("/api/v1/ships/NONEXISTENT")));
    assert_eq!(access[1].field("route"), Some(&json!("/api/v1/routes")));
    assert!(access[1].field("response_time_ms").unwrap().is_number());
}

#[tokio::test]
async fn test_oversized_body_rejected_and_measured() {
    let mut config = ServiceConfig::default();
    config.limits.max_body_bytes = 64;
    let app = TestApp::with_config(config, FixedFailureInjector::never_fail());

    let payload = format!(r#"{{"berthNumber":"{}"}}"#, "X".repeat(256));
    let request = Request::post("/api/v1/ships/SHIP002/berth")
        .header("content-type", "application/json")
        .header("content-length", payload.len().to_string())
        .body(Body::from(payload))
        .unwrap();
    let (status, _) = app.send(request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        sample_value(
            &app.metrics(),
            "http_requests_total",
            &[("method", "POST"), ("status_code", "413")]
        ),
        Some(1.0)
    );
    let (_, ship) = app.get("/api/v1/ships/SHIP002").await;
    assert_eq!(ship["status"], "approaching");
}

#[tokio::test]
async fn test_seeded_injection_is_reproducible() {
    async fn run(seed: u64) -> Vec<StatusCode> {
        let app = TestApp::new(RandomFailureInjector::with_seed(seed));
        let mut statuses = Vec::new();
        for _ in 0..40 {
            let (status, _) = app
                .post_json("/api/v1/ships/SHIP002/berth", r#"{"berthNumber":"C-15"}"#)
                .await;
            statuses.push(status);
        }
        statuses
    }

    let first = run(2024).await;
    let second = run(2024).await;
    assert_eq!(first, second);
    assert!(first
        .iter()
        .all(|s| *s == StatusCode::OK || *s == StatusCode::INTERNAL_SERVER_ERROR));
}
