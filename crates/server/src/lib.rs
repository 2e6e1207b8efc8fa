//! HTTP surface of the shop: axum router, access-control middleware and
//! the JSON error envelope.

pub mod auth;
pub mod errors;
pub mod extract;
pub mod openapi;
pub mod routes;
pub mod startup;

pub use startup::{app_for_state, build_app, build_state, init_logging, run};
