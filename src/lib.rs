//! PortTrack: a monitored HTTP service over an in-memory port model.

pub mod config;
pub mod fault;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod port;

pub use config::schema::ServiceConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
