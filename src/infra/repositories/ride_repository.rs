//! Ride repository.
//!
//! Status changes go through [`RideRepository::update_status`], a compare-and-swap
//! on the status column. Of two concurrent writers that both read the same status,
//! exactly one sees its update applied; the other gets `AppError::Conflict`.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::ride::{self, ActiveModel, Entity as RideEntity};
use crate::domain::{Ride, RideStatus};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Ride repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RideRepository: Send + Sync {
    /// Find ride by ID, regardless of who owns it
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ride>>;

    /// Insert a freshly requested ride
    async fn create(&self, ride: &Ride) -> AppResult<Ride>;

    /// Rides requested by a client, newest first
    async fn list_by_client(&self, client_id: Uuid) -> AppResult<Vec<Ride>>;

    /// Rides assigned to a driver profile, newest first
    async fn list_by_driver(&self, driver_id: Uuid) -> AppResult<Vec<Ride>>;

    /// Write `ride`'s status, driver and timestamp only if the stored status
    /// still equals `expected`.
    ///
    /// Returns `NotFound` if the ride is gone, `Conflict` if another writer
    /// changed the status first.
    async fn update_status(&self, ride: &Ride, expected: RideStatus) -> AppResult<Ride>;
}

/// Concrete implementation of RideRepository
pub struct RideStore {
    db: DatabaseConnection,
}

impl RideStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn into_rides(models: Vec<ride::Model>) -> AppResult<Vec<Ride>> {
        models.into_iter().map(Ride::try_from).collect()
    }
}

#[async_trait]
impl RideRepository for RideStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ride>> {
        let result = RideEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(Ride::try_from).transpose()
    }

    async fn create(&self, ride: &Ride) -> AppResult<Ride> {
        let model = ActiveModel::from(ride)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ride::try_from(model)
    }

    async fn list_by_client(&self, client_id: Uuid) -> AppResult<Vec<Ride>> {
        let models = RideEntity::find()
            .filter(ride::Column::ClientId.eq(client_id))
            .order_by_desc(ride::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Self::into_rides(models)
    }

    async fn list_by_driver(&self, driver_id: Uuid) -> AppResult<Vec<Ride>> {
        let models = RideEntity::find()
            .filter(ride::Column::DriverId.eq(driver_id))
            .order_by_desc(ride::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Self::into_rides(models)
    }

    async fn update_status(&self, ride: &Ride, expected: RideStatus) -> AppResult<Ride> {
        let result = RideEntity::update_many()
            .col_expr(ride::Column::Status, Expr::value(ride.status.as_str()))
            .col_expr(ride::Column::DriverId, Expr::value(ride.driver_id))
            .col_expr(ride::Column::UpdatedAt, Expr::value(ride.updated_at))
            .filter(ride::Column::Id.eq(ride.id))
            .filter(ride::Column::Status.eq(expected.as_str()))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            // Distinguish a vanished row from a lost race
            return match self.find_by_id(ride.id).await? {
                None => Err(AppError::NotFound("Ride".to_string())),
                Some(current) => Err(AppError::conflict(format!(
                    "Ride {} changed from {} to {} concurrently",
                    ride.id, expected, current.status
                ))),
            };
        }

        Ok(ride.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Location, NewRide};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn requested_ride() -> Ride {
        Ride::request(
            Uuid::new_v4(),
            NewRide {
                pickup: Location::new("Central Station", 52.37, 4.89),
                dropoff: Location::new("Airport", 52.31, 4.76),
                distance_km: 10.0,
            },
        )
        .unwrap()
    }

    fn model_with_status(ride: &Ride, status: RideStatus) -> ride::Model {
        ride::Model {
            id: ride.id,
            client_id: ride.client_id,
            driver_id: ride.driver_id,
            pickup_location: ride.pickup.label.clone(),
            pickup_lat: ride.pickup.lat,
            pickup_lng: ride.pickup.lng,
            dropoff_location: ride.dropoff.label.clone(),
            dropoff_lat: ride.dropoff.lat,
            dropoff_lng: ride.dropoff.lng,
            distance_km: ride.distance_km,
            price: ride.price,
            status: status.as_str().to_string(),
            created_at: ride.created_at,
            updated_at: ride.updated_at,
        }
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn test_update_status_applies_when_status_matches() {
        let mut ride = requested_ride();
        ride.status = RideStatus::Cancelled;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(1)])
            .into_connection();
        let store = RideStore::new(db);

        let updated = store
            .update_status(&ride, RideStatus::Requested)
            .await
            .unwrap();
        assert_eq!(updated.status, RideStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_update_status_reports_conflict_when_row_moved_on() {
        let mut ride = requested_ride();
        let stored = model_with_status(&ride, RideStatus::Accepted);
        ride.status = RideStatus::Cancelled;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(0)])
            .append_query_results([vec![stored]])
            .into_connection();
        let store = RideStore::new(db);

        let err = store
            .update_status(&ride, RideStatus::Requested)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_status_reports_not_found_when_row_is_gone() {
        let mut ride = requested_ride();
        ride.status = RideStatus::Cancelled;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(0)])
            .append_query_results([Vec::<ride::Model>::new()])
            .into_connection();
        let store = RideStore::new(db);

        let err = store
            .update_status(&ride, RideStatus::Requested)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_unknown_stored_status_is_internal_error() {
        let ride = requested_ride();
        let mut stored = model_with_status(&ride, RideStatus::Requested);
        stored.status = "teleported".to_string();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored]])
            .into_connection();
        let store = RideStore::new(db);

        let err = store.find_by_id(ride.id).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
