//! Driver profile repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, SqlErr,
};
use uuid::Uuid;

use super::entities::driver::{self, ActiveModel, Entity as DriverEntity};
use crate::domain::Driver;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Driver repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DriverRepository: Send + Sync {
    /// Find the profile owned by a user
    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<Driver>>;

    /// Insert a new profile
    async fn create(&self, driver: &Driver) -> AppResult<Driver>;

    /// Persist every field of an existing profile
    async fn update(&self, driver: &Driver) -> AppResult<Driver>;

    /// Profiles currently accepting rides, best rated first
    async fn list_available(&self) -> AppResult<Vec<Driver>>;
}

/// A second profile for the same user loses on the unique `user_id` index
fn unique_violation_as_conflict(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::conflict("Driver profile already exists")
        }
        _ => AppError::from(err),
    }
}

/// Concrete implementation of DriverRepository
pub struct DriverStore {
    db: DatabaseConnection,
}

impl DriverStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DriverRepository for DriverStore {
    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<Driver>> {
        let result = DriverEntity::find()
            .filter(driver::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Driver::from))
    }

    async fn create(&self, driver: &Driver) -> AppResult<Driver> {
        let model = ActiveModel::from(driver)
            .insert(&self.db)
            .await
            .map_err(unique_violation_as_conflict)?;

        Ok(Driver::from(model))
    }

    async fn update(&self, driver: &Driver) -> AppResult<Driver> {
        let model = ActiveModel::from(driver)
            .update(&self.db)
            .await
            .map_err(|err| match err {
                DbErr::RecordNotUpdated => AppError::NotFound("Driver profile".to_string()),
                err => AppError::from(err),
            })?;

        Ok(Driver::from(model))
    }

    async fn list_available(&self) -> AppResult<Vec<Driver>> {
        let models = DriverEntity::find()
            .filter(driver::Column::IsAvailable.eq(true))
            .order_by_desc(driver::Column::Rating)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Driver::from).collect())
    }
}
