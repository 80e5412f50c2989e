//! Ride domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::error::{DomainError, DomainResult};
use super::pricing::fare_for_distance;

/// Shortest trip that can be requested, in kilometers.
pub const MIN_DISTANCE_KM: f64 = 0.1;

/// Ride lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    Requested,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

impl RideStatus {
    /// Every status, in lifecycle order
    pub const ALL: [RideStatus; 5] = [
        RideStatus::Requested,
        RideStatus::Accepted,
        RideStatus::InProgress,
        RideStatus::Completed,
        RideStatus::Cancelled,
    ];

    /// Stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RideStatus::Requested => "requested",
            RideStatus::Accepted => "accepted",
            RideStatus::InProgress => "in_progress",
            RideStatus::Completed => "completed",
            RideStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for RideStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RideStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("Unknown ride status '{}'", s)))
    }
}

impl std::fmt::Display for RideStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labelled point on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub label: String,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(label: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            label: label.into(),
            lat,
            lng,
        }
    }
}

/// Ride request data transfer object
#[derive(Debug, Clone)]
pub struct NewRide {
    pub pickup: Location,
    pub dropoff: Location,
    pub distance_km: f64,
}

/// Ride domain entity
#[derive(Debug, Clone, PartialEq)]
pub struct Ride {
    pub id: Uuid,
    pub client_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub pickup: Location,
    pub dropoff: Location,
    pub distance_km: f64,
    pub price: Decimal,
    pub status: RideStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ride {
    /// Open a new ride request for `client_id`.
    ///
    /// Validates the distance and fixes the price; the price is never
    /// recomputed afterwards.
    pub fn request(client_id: Uuid, request: NewRide) -> DomainResult<Self> {
        if !request.distance_km.is_finite() || request.distance_km < MIN_DISTANCE_KM {
            return Err(DomainError::validation(format!(
                "distance_km must be at least {}",
                MIN_DISTANCE_KM
            )));
        }

        let price = fare_for_distance(request.distance_km)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            client_id,
            driver_id: None,
            pickup: request.pickup,
            dropoff: request.dropoff,
            distance_km: request.distance_km,
            price,
            status: RideStatus::Requested,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Ride response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RideResponse {
    pub id: Uuid,
    pub client_id: Uuid,
    /// Assigned driver profile, null until accepted
    pub driver_id: Option<Uuid>,
    #[schema(example = "Piața Unirii")]
    pub pickup_location: String,
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    #[schema(example = "Aeroportul Otopeni")]
    pub dropoff_location: String,
    pub dropoff_lat: f64,
    pub dropoff_lng: f64,
    #[schema(example = 10.0)]
    pub distance_km: f64,
    /// Fixed at creation, two decimal places
    #[schema(value_type = String, example = "30.00")]
    pub price: Decimal,
    pub status: RideStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Ride> for RideResponse {
    fn from(ride: Ride) -> Self {
        Self {
            id: ride.id,
            client_id: ride.client_id,
            driver_id: ride.driver_id,
            pickup_location: ride.pickup.label,
            pickup_lat: ride.pickup.lat,
            pickup_lng: ride.pickup.lng,
            dropoff_location: ride.dropoff.label,
            dropoff_lat: ride.dropoff.lat,
            dropoff_lng: ride.dropoff.lng,
            distance_km: ride.distance_km,
            price: ride.price,
            status: ride.status,
            created_at: ride.created_at,
            updated_at: ride.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_ride(distance_km: f64) -> NewRide {
        NewRide {
            pickup: Location::new("Gara de Nord", 44.4469, 26.0753),
            dropoff: Location::new("Piața Victoriei", 44.4522, 26.0857),
            distance_km,
        }
    }

    #[test]
    fn test_request_starts_without_driver() {
        let client_id = Uuid::new_v4();
        let ride = Ride::request(client_id, new_ride(10.0)).unwrap();

        assert_eq!(ride.client_id, client_id);
        assert_eq!(ride.status, RideStatus::Requested);
        assert!(ride.driver_id.is_none());
        assert_eq!(ride.price.to_string(), "30.00");
        assert_eq!(ride.created_at, ride.updated_at);
    }

    #[test]
    fn test_request_minimum_distance() {
        let ride = Ride::request(Uuid::new_v4(), new_ride(0.1)).unwrap();
        assert_eq!(ride.price.to_string(), "5.25");
    }

    #[test]
    fn test_request_below_minimum_distance() {
        let result = Ride::request(Uuid::new_v4(), new_ride(0.05));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_request_rejects_nan_distance() {
        let result = Ride::request(Uuid::new_v4(), new_ride(f64::NAN));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_status_round_trips_through_storage_form() {
        for status in RideStatus::ALL {
            assert_eq!(status.as_str().parse::<RideStatus>().unwrap(), status);
        }
        assert!("on_hold".parse::<RideStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&RideStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
