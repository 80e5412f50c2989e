//! Driver profile entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::{User, UserResponse};

/// Rating every new driver starts with
pub const DEFAULT_DRIVER_RATING: f64 = 5.0;

/// Driver profile, one per driving user
#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    pub id: Uuid,
    pub user_id: Uuid,
    pub license_number: String,
    pub car_model: String,
    pub car_plate: String,
    pub rating: f64,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Driver {
    /// Create a new profile for `user_id` with the default rating
    pub fn new(
        user_id: Uuid,
        license_number: String,
        car_model: String,
        car_plate: String,
        is_available: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            license_number,
            car_model,
            car_plate,
            rating: DEFAULT_DRIVER_RATING,
            is_available,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update. Absent fields are left untouched.
    pub fn apply(&mut self, update: UpdateDriver) {
        if let Some(license_number) = update.license_number {
            self.license_number = license_number;
        }
        if let Some(car_model) = update.car_model {
            self.car_model = car_model;
        }
        if let Some(car_plate) = update.car_plate {
            self.car_plate = car_plate;
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        if let Some(is_available) = update.is_available {
            self.is_available = is_available;
        }
        self.updated_at = Utc::now();
    }
}

/// Driver profile creation data transfer object
#[derive(Debug, Clone)]
pub struct CreateDriver {
    pub license_number: String,
    pub car_model: String,
    pub car_plate: String,
    pub is_available: bool,
}

/// Driver profile partial update
#[derive(Debug, Clone, Default)]
pub struct UpdateDriver {
    pub license_number: Option<String>,
    pub car_model: Option<String>,
    pub car_plate: Option<String>,
    pub rating: Option<f64>,
    pub is_available: Option<bool>,
}

/// An available driver together with the account behind the profile
#[derive(Debug, Clone, PartialEq)]
pub struct AvailableDriver {
    pub driver: Driver,
    pub user: Option<User>,
}

/// Driver response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DriverResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "B-123456")]
    pub license_number: String,
    #[schema(example = "Dacia Logan")]
    pub car_model: String,
    #[schema(example = "B123ABC")]
    pub car_plate: String,
    #[schema(example = 5.0)]
    pub rating: f64,
    pub is_available: bool,
    /// Account details, present in the available-drivers listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.id,
            user_id: driver.user_id,
            license_number: driver.license_number,
            car_model: driver.car_model,
            car_plate: driver.car_plate,
            rating: driver.rating,
            is_available: driver.is_available,
            user: None,
        }
    }
}

impl From<AvailableDriver> for DriverResponse {
    fn from(available: AvailableDriver) -> Self {
        Self {
            user: available.user.map(UserResponse::from),
            ..Self::from(available.driver)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_driver_defaults() {
        let user_id = Uuid::new_v4();
        let driver = Driver::new(
            user_id,
            "CJ-998877".to_string(),
            "Skoda Octavia".to_string(),
            "CJ01XYZ".to_string(),
            false,
        );

        assert_eq!(driver.user_id, user_id);
        assert_eq!(driver.rating, DEFAULT_DRIVER_RATING);
        assert!(!driver.is_available);
    }

    #[test]
    fn test_apply_partial_update() {
        let mut driver = Driver::new(
            Uuid::new_v4(),
            "CJ-998877".to_string(),
            "Skoda Octavia".to_string(),
            "CJ01XYZ".to_string(),
            false,
        );

        driver.apply(UpdateDriver {
            is_available: Some(true),
            rating: Some(4.7),
            ..Default::default()
        });

        assert!(driver.is_available);
        assert_eq!(driver.rating, 4.7);
        assert_eq!(driver.car_model, "Skoda Octavia");
    }
}
