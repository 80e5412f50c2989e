//! Ride dispatch - a ride-hailing backend
//!
//! Clients request rides, drivers accept them, and every ride moves through
//! a status lifecycle guarded by a compare-and-swap on its status.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Rides, drivers, pricing and the lifecycle state machine
//! - **services**: Dispatch, driver, user and token services
//! - **infra**: Database, migrations and repositories
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Sign a development token for a driver
//! cargo run -- token --user-id <uuid> --username mihai --driver
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Principal, Ride, RideStatus};
pub use errors::{AppError, AppResult};
