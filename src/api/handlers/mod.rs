//! HTTP request handlers.

pub mod driver_handler;
pub mod ride_handler;
pub mod user_handler;

pub use driver_handler::driver_routes;
pub use ride_handler::ride_routes;
pub use user_handler::user_routes;
