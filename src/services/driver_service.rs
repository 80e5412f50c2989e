//! Driver profile service.
//!
//! A profile is created explicitly by a user with the driver capability and
//! is never created implicitly on acceptance.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{AvailableDriver, CreateDriver, Driver, Principal, UpdateDriver};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Driver service trait for dependency injection.
#[async_trait]
pub trait DriverService: Send + Sync {
    /// Create the principal's profile. One per user.
    async fn create_profile(&self, principal: &Principal, request: CreateDriver)
        -> AppResult<Driver>;

    /// The principal's own profile
    async fn get_profile(&self, principal: &Principal) -> AppResult<Driver>;

    /// Partially update the principal's own profile
    async fn update_profile(&self, principal: &Principal, patch: UpdateDriver)
        -> AppResult<Driver>;

    /// Drivers currently accepting rides, each with its user account
    async fn list_available(&self) -> AppResult<Vec<AvailableDriver>>;
}

/// Concrete implementation of DriverService using Unit of Work.
pub struct DriverManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DriverManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DriverService for DriverManager<U> {
    async fn create_profile(
        &self,
        principal: &Principal,
        request: CreateDriver,
    ) -> AppResult<Driver> {
        if !principal.is_driver {
            return Err(AppError::forbidden(
                "Only users with driver capability can create a driver profile",
            ));
        }

        let drivers = self.uow.drivers();
        if drivers.find_by_user_id(principal.id).await?.is_some() {
            return Err(AppError::conflict("Driver profile already exists"));
        }

        let driver = Driver::new(
            principal.id,
            request.license_number,
            request.car_model,
            request.car_plate,
            request.is_available,
        );
        let created = drivers.create(&driver).await?;

        tracing::info!(driver_id = %created.id, user_id = %principal.id, "Driver profile created");
        Ok(created)
    }

    async fn get_profile(&self, principal: &Principal) -> AppResult<Driver> {
        self.uow
            .drivers()
            .find_by_user_id(principal.id)
            .await?
            .ok_or_not_found("Driver profile")
    }

    async fn update_profile(
        &self,
        principal: &Principal,
        patch: UpdateDriver,
    ) -> AppResult<Driver> {
        let mut driver = self.get_profile(principal).await?;
        driver.apply(patch);
        self.uow.drivers().update(&driver).await
    }

    async fn list_available(&self) -> AppResult<Vec<AvailableDriver>> {
        let drivers = self.uow.drivers().list_available().await?;
        let user_ids: Vec<_> = drivers.iter().map(|d| d.user_id).collect();

        let mut users: HashMap<_, _> = self
            .uow
            .users()
            .find_by_ids(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(drivers
            .into_iter()
            .map(|driver| AvailableDriver {
                user: users.remove(&driver.user_id),
                driver,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_DRIVER_RATING;
    use crate::domain::User;
    use crate::infra::{MockDriverRepository, MockRideRepository, MockUserRepository};
    use crate::services::testing::MockUnitOfWork;
    use chrono::Utc;
    use mockall::predicate::*;
    use uuid::Uuid;

    fn request() -> CreateDriver {
        CreateDriver {
            license_number: "B-123456".to_string(),
            car_model: "Dacia Logan".to_string(),
            car_plate: "B123ABC".to_string(),
            is_available: false,
        }
    }

    fn existing(user_id: Uuid) -> Driver {
        Driver::new(
            user_id,
            "B-123456".to_string(),
            "Dacia Logan".to_string(),
            "B123ABC".to_string(),
            false,
        )
    }

    #[tokio::test]
    async fn test_create_profile_requires_driver_capability() {
        let service = DriverManager::new(MockUnitOfWork::with_drivers(MockDriverRepository::new()));
        let client = Principal::new(Uuid::new_v4(), "ana.client", false);

        let err = service.create_profile(&client, request()).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_create_profile_rejects_second_profile() {
        let principal = Principal::new(Uuid::new_v4(), "mihai.driver", true);
        let mut drivers = MockDriverRepository::new();
        let user_id = principal.id;
        drivers
            .expect_find_by_user_id()
            .with(eq(user_id))
            .returning(move |_| Ok(Some(existing(user_id))));
        drivers.expect_create().never();

        let service = DriverManager::new(MockUnitOfWork::with_drivers(drivers));
        let err = service.create_profile(&principal, request()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_profile_starts_with_default_rating() {
        let principal = Principal::new(Uuid::new_v4(), "mihai.driver", true);
        let mut drivers = MockDriverRepository::new();
        drivers.expect_find_by_user_id().returning(|_| Ok(None));
        drivers
            .expect_create()
            .times(1)
            .returning(|driver| Ok(driver.clone()));

        let service = DriverManager::new(MockUnitOfWork::with_drivers(drivers));
        let driver = service.create_profile(&principal, request()).await.unwrap();

        assert_eq!(driver.user_id, principal.id);
        assert_eq!(driver.rating, DEFAULT_DRIVER_RATING);
        assert!(!driver.is_available);
    }

    #[tokio::test]
    async fn test_update_profile_without_profile_is_not_found() {
        let principal = Principal::new(Uuid::new_v4(), "mihai.driver", true);
        let mut drivers = MockDriverRepository::new();
        drivers.expect_find_by_user_id().returning(|_| Ok(None));

        let service = DriverManager::new(MockUnitOfWork::with_drivers(drivers));
        let err = service
            .update_profile(&principal, UpdateDriver::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_profile_applies_patch() {
        let principal = Principal::new(Uuid::new_v4(), "mihai.driver", true);
        let user_id = principal.id;
        let mut drivers = MockDriverRepository::new();
        drivers
            .expect_find_by_user_id()
            .returning(move |_| Ok(Some(existing(user_id))));
        drivers
            .expect_update()
            .times(1)
            .returning(|driver| Ok(driver.clone()));

        let service = DriverManager::new(MockUnitOfWork::with_drivers(drivers));
        let driver = service
            .update_profile(
                &principal,
                UpdateDriver {
                    is_available: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(driver.is_available);
        assert_eq!(driver.car_plate, "B123ABC");
    }

    fn account(id: Uuid, username: &str) -> User {
        User {
            id,
            username: username.to_string(),
            email: format!("{}@example.com", username),
            phone: "+40712345678".to_string(),
            is_driver: true,
            first_name: username.to_string(),
            last_name: "Popescu".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_available_attaches_user_accounts() {
        let (mihai, orphan) = (Uuid::new_v4(), Uuid::new_v4());
        let mut drivers = MockDriverRepository::new();
        drivers
            .expect_list_available()
            .returning(move || Ok(vec![existing(mihai), existing(orphan)]));
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_ids()
            .times(1)
            .withf(move |ids| ids.to_vec() == vec![mihai, orphan])
            .returning(move |_| Ok(vec![account(mihai, "mihai.driver")]));

        let service = DriverManager::new(MockUnitOfWork::new(users, drivers, MockRideRepository::new()));
        let available = service.list_available().await.unwrap();

        assert_eq!(available.len(), 2);
        assert_eq!(available[0].driver.user_id, mihai);
        assert_eq!(
            available[0].user.as_ref().map(|u| u.username.as_str()),
            Some("mihai.driver")
        );
        assert_eq!(available[1].user, None);
    }
}
