//! Application state - Dependency injection container.
//!
//! Provides handlers with the services and the database handle.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, DispatchService, DriverService, ServiceContainer, Services, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Bearer token verification
    pub auth_service: Arc<dyn AuthService>,
    /// Current user lookup
    pub user_service: Arc<dyn UserService>,
    /// Driver profiles
    pub driver_service: Arc<dyn DriverService>,
    /// Ride creation, listing and lifecycle commands
    pub dispatch_service: Arc<dyn DispatchService>,
    /// Database connection, used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::new(&container, database)
    }

    /// Create application state from any service container.
    pub fn new(services: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            driver_service: services.drivers(),
            dispatch_service: services.dispatch(),
            database,
        }
    }
}
