//! Unit of Work: one place to reach every repository.
//!
//! Ride transitions are made atomic by the compare-and-swap in
//! `RideRepository::update_status`, so no multi-statement transaction is
//! exposed here.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    DriverRepository, DriverStore, RideRepository, RideStore, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
///
/// Services are generic over this trait; tests supply in-memory or mocked
/// repositories through their own implementation.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get driver profile repository
    fn drivers(&self) -> Arc<dyn DriverRepository>;

    /// Get ride repository
    fn rides(&self) -> Arc<dyn RideRepository>;
}

/// Concrete implementation of UnitOfWork backed by SeaORM
pub struct Persistence {
    user_repo: Arc<UserStore>,
    driver_repo: Arc<DriverStore>,
    ride_repo: Arc<RideStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            driver_repo: Arc::new(DriverStore::new(db.clone())),
            ride_repo: Arc::new(RideStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn drivers(&self) -> Arc<dyn DriverRepository> {
        self.driver_repo.clone()
    }

    fn rides(&self) -> Arc<dyn RideRepository> {
        self.ride_repo.clone()
    }
}
