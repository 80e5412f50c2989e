//! User service - read access to the caller's own account.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Principal, User};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// The principal's own user record
    async fn get_current_user(&self, principal: &Principal) -> AppResult<User>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_current_user(&self, principal: &Principal) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(principal.id)
            .await?
            .ok_or_not_found("User")
    }
}
