//! Service Container - Centralized service access.
//!
//! Handlers reach services only through [`ServiceContainer`], so tests can
//! swap in stubs for any of them.

use std::sync::Arc;

use super::{AuthService, DispatchService, DriverService, UserService};
use crate::config::Config;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get driver profile service
    fn drivers(&self) -> Arc<dyn DriverService>;

    /// Get ride dispatch service
    fn dispatch(&self) -> Arc<dyn DispatchService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    driver_service: Arc<dyn DriverService>,
    dispatch_service: Arc<dyn DispatchService>,
}

impl Services {
    /// Create a service container from already built services
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        driver_service: Arc<dyn DriverService>,
        dispatch_service: Arc<dyn DispatchService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            driver_service,
            dispatch_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{Authenticator, DriverManager, RideDispatcher, UserManager};

        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            driver_service: Arc::new(DriverManager::new(uow.clone())),
            dispatch_service: Arc::new(RideDispatcher::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn drivers(&self) -> Arc<dyn DriverService> {
        self.driver_service.clone()
    }

    fn dispatch(&self) -> Arc<dyn DispatchService> {
        self.dispatch_service.clone()
    }
}
