//! Domain layer - Core business entities and logic
//!
//! Rides, driver profiles, the fare formula and the ride lifecycle state
//! machine. Nothing here touches the database or HTTP.

pub mod driver;
pub mod error;
pub mod lifecycle;
pub mod pricing;
pub mod ride;
pub mod user;

pub use driver::{AvailableDriver, CreateDriver, Driver, DriverResponse, UpdateDriver, DEFAULT_DRIVER_RATING};
pub use error::{DomainError, DomainResult};
pub use lifecycle::{RideAction, Transition};
pub use ride::{Location, NewRide, Ride, RideResponse, RideStatus, MIN_DISTANCE_KM};
pub use user::{Principal, Role, User, UserResponse};
