//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, and receive the acting [`Principal`] explicitly.
//!
//! [`Principal`]: crate::domain::Principal

mod auth_service;
pub mod commands;
pub mod container;
mod dispatch_service;
mod driver_service;
mod user_service;

#[cfg(test)]
pub(crate) mod testing;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use commands::{access_for, Access};
pub use dispatch_service::{DispatchService, RideDispatcher};
pub use driver_service::{DriverManager, DriverService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
