//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

use super::lifecycle::RideAction;
use super::ride::RideStatus;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("{0}")]
    Validation(String),

    /// Lifecycle transition is illegal from the current status
    #[error("Cannot {action} a ride that is {current}")]
    InvalidTransition {
        action: RideAction,
        current: RideStatus,
    },

    /// Computed fare does not fit the fixed-point price column
    #[error("Fare for {distance_km} km exceeds the maximum storable price")]
    PriceOverflow { distance_km: f64 },
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
