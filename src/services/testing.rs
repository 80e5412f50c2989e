//! Unit of Work over mockall repositories, for service unit tests.

use std::sync::Arc;

use crate::infra::{
    DriverRepository, MockDriverRepository, MockRideRepository, MockUserRepository,
    RideRepository, UnitOfWork, UserRepository,
};

pub struct MockUnitOfWork {
    users: Arc<MockUserRepository>,
    drivers: Arc<MockDriverRepository>,
    rides: Arc<MockRideRepository>,
}

impl MockUnitOfWork {
    pub fn new(
        users: MockUserRepository,
        drivers: MockDriverRepository,
        rides: MockRideRepository,
    ) -> Arc<Self> {
        Arc::new(Self {
            users: Arc::new(users),
            drivers: Arc::new(drivers),
            rides: Arc::new(rides),
        })
    }

    pub fn with_drivers(drivers: MockDriverRepository) -> Arc<Self> {
        Self::new(MockUserRepository::new(), drivers, MockRideRepository::new())
    }
}

impl UnitOfWork for MockUnitOfWork {
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
