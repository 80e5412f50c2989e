//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod driver_repository;
pub(crate) mod entities;
mod ride_repository;
mod user_repository;

pub use driver_repository::{DriverRepository, DriverStore};
pub use ride_repository::{RideRepository, RideStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use driver_repository::MockDriverRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use ride_repository::MockRideRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
