//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layer stack)
//!     → middleware (request id, timing, access log, route label)
//!     → handlers/* (validation, store, injector, metrics, telemetry)
//!     → error.rs ({"error": ...} bodies)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, AppState, HttpServer};
