//! HTTP middleware.
//!
//! Request ids come from `tower_http::request_id`; everything that measures or
//! logs a request lives in `instrument`.

pub mod instrument;

pub use instrument::{
    handle_panic, instrument_request, tag_matched_route, PanicDetail, RouteLabel, X_REQUEST_ID,
};
