//! HTTP surface
//!
//! Ride, driver and user handlers behind bearer authentication, the
//! validated JSON extractor, the health check and the OpenAPI document.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
