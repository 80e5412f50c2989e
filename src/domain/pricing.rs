//! Fare calculation for ride requests.
//!
//! Formula: `fare = BASE_FARE + distance_km * PER_KM_RATE`, stored as a
//! fixed-point decimal with two places and at most eight digits.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::{DomainError, DomainResult};

/// Base fare in currency units.
pub const BASE_FARE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Per-kilometer rate in currency units (2.5).
pub const PER_KM_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 1);

/// Decimal places kept on a stored price.
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// Largest value of a `DECIMAL(8,2)` price column: 999999.99
pub const MAX_PRICE: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, PRICE_DECIMAL_PLACES);

/// Calculate the fare for a trip of `distance_km` kilometers.
///
/// The distance is converted to a decimal before any arithmetic so the
/// result is exact to the cent. Fails with `PriceOverflow` when the input is
/// not finite or the fare exceeds `MAX_PRICE`.
pub fn fare_for_distance(distance_km: f64) -> DomainResult<Decimal> {
    let overflow = || DomainError::PriceOverflow { distance_km };

    let distance = Decimal::from_f64(distance_km).ok_or_else(overflow)?;
    let mut fare = distance
        .checked_mul(PER_KM_RATE)
        .and_then(|scaled| scaled.checked_add(BASE_FARE))
        .ok_or_else(overflow)?
        .round_dp_with_strategy(PRICE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);

    if fare.abs() > MAX_PRICE {
        return Err(overflow());
    }

    fare.rescale(PRICE_DECIMAL_PLACES);
    Ok(fare)
}
