//! In-memory persistence shared by the integration tests.
//!
//! The ride store performs its compare-and-swap under a single lock, which
//! gives the same all-or-nothing status update as the SQL store.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use ride_dispatch::domain::{Driver, Principal, Ride, RideStatus, User};
use ride_dispatch::errors::{AppError, AppResult};
use ride_dispatch::infra::{DriverRepository, RideRepository, UnitOfWork, UserRepository};
use ride_dispatch::services::{DispatchService, DriverManager, RideDispatcher, UserManager};

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().await.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<User>> {
        let users = self.users.lock().await;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }
}

#[derive(Default)]
pub struct InMemoryDrivers {
    drivers: Mutex<HashMap<Uuid, Driver>>,
}

#[async_trait]
impl DriverRepository for InMemoryDrivers {
    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<Driver>> {
        Ok(self
            .drivers
            .lock()
            .await
            .values()
            .find(|d| d.user_id == user_id)
            .cloned())
    }

    async fn create(&self, driver: &Driver) -> AppResult<Driver> {
        let mut drivers = self.drivers.lock().await;
        if drivers.values().any(|d| d.user_id == driver.user_id) {
            return Err(AppError::conflict("Driver profile already exists"));
        }
        drivers.insert(driver.id, driver.clone());
        Ok(driver.clone())
    }

    async fn update(&self, driver: &Driver) -> AppResult<Driver> {
        let mut drivers = self.drivers.lock().await;
        match drivers.get_mut(&driver.id) {
            Some(stored) => {
                *stored = driver.clone();
                Ok(driver.clone())
            }
            None => Err(AppError::NotFound("Driver profile".to_string())),
        }
    }

    async fn list_available(&self) -> AppResult<Vec<Driver>> {
        Ok(self
            .drivers
            .lock()
            .await
            .values()
            .filter(|d| d.is_available)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryRides {
    rides: Mutex<HashMap<Uuid, Ride>>,
}

impl InMemoryRides {
    fn newest_first(mut rides: Vec<Ride>) -> Vec<Ride> {
        rides.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rides
    }
}

#[async_trait]
impl RideRepository for InMemoryRides {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ride>> {
        Ok(self.rides.lock().await.get(&id).cloned())
    }

    async fn create(&self, ride: &Ride) -> AppResult<Ride> {
        self.rides.lock().await.insert(ride.id, ride.clone());
        Ok(ride.clone())
    }

    async fn list_by_client(&self, client_id: Uuid) -> AppResult<Vec<Ride>> {
        let rides = self.rides.lock().await;
        Ok(Self::newest_first(
            rides.values().filter(|r| r.client_id == client_id).cloned().collect(),
        ))
    }

    async fn list_by_driver(&self, driver_id: Uuid) -> AppResult<Vec<Ride>> {
        let rides = self.rides.lock().await;
        Ok(Self::newest_first(
            rides.values().filter(|r| r.is_assigned_to(driver_id)).cloned().collect(),
        ))
    }

    async fn update_status(&self, ride: &Ride, expected: RideStatus) -> AppResult<Ride> {
        let mut rides = self.rides.lock().await;
        let stored = rides
            .get_mut(&ride.id)
            .ok_or_else(|| AppError::NotFound("Ride".to_string()))?;

        if stored.status != expected {
            return Err(AppError::conflict(format!(
                "Ride {} changed from {} to {} concurrently",
                ride.id, expected, stored.status
            )));
        }

        stored.status = ride.status;
        stored.driver_id = ride.driver_id;
        stored.updated_at = ride.updated_at;
        Ok(stored.clone())
    }
}

/// Unit of Work over the in-memory stores
#[derive(Default)]
pub struct InMemoryUnitOfWork {
    pub users: Arc<InMemoryUsers>,
    pub drivers: Arc<InMemoryDrivers>,
    pub rides: Arc<InMemoryRides>,
}

impl UnitOfWork for InMemoryUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn drivers(&self) -> Arc<dyn DriverRepository> {
        self.drivers.clone()
    }

    fn rides(&self) -> Arc<dyn RideRepository> {
        self.rides.clone()
    }
}

impl InMemoryUnitOfWork {
    /// Provision a user row the way the identity provider would
    pub async fn add_user(&self, username: &str, is_driver: bool) -> Principal {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            phone: "+40700000000".to_string(),
            is_driver,
            first_name: username.to_string(),
            last_name: "Test".to_string(),
            created_at: now,
            updated_at: now,
        };
        let principal = Principal::new(user.id, username, is_driver);
        self.users.users.lock().await.insert(user.id, user);
        principal
    }

    /// Provision a driver user together with an available profile
    pub async fn add_driver(&self, username: &str) -> (Principal, Driver) {
        let principal = self.add_user(username, true).await;
        let driver = Driver::new(
            principal.id,
            format!("LIC-{username}"),
            "Dacia Logan".to_string(),
            "B01TST".to_string(),
            true,
        );
        self.drivers
            .drivers
            .lock()
            .await
            .insert(driver.id, driver.clone());
        (principal, driver)
    }

    /// Stored ride, bypassing any scoping
    pub async fn ride(&self, id: Uuid) -> Option<Ride> {
        self.rides.rides.lock().await.get(&id).cloned()
    }
}

pub struct TestServices {
    pub uow: Arc<InMemoryUnitOfWork>,
    pub dispatch: Arc<dyn DispatchService>,
    pub drivers: Arc<DriverManager<InMemoryUnitOfWork>>,
    pub users: Arc<UserManager<InMemoryUnitOfWork>>,
}

pub fn services() -> TestServices {
    let uow = Arc::new(InMemoryUnitOfWork::default());
    TestServices {
        dispatch: Arc::new(RideDispatcher::new(uow.clone())),
        drivers: Arc::new(DriverManager::new(uow.clone())),
        users: Arc::new(UserManager::new(uow.clone())),
        uow,
    }
}
