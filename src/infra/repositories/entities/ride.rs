//! Ride database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{Location, Ride, RideStatus};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rides")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub pickup_location: String,
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    pub dropoff_location: String,
    pub dropoff_lat: f64,
    pub dropoff_lng: f64,
    pub distance_km: f64,
    #[sea_orm(column_type = "Decimal(Some((8, 2)))")]
    pub price: Decimal,
    /// One of `RideStatus::as_str`
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ClientId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::driver::Entity",
        from = "Column::DriverId",
        to = "super::driver::Column::Id",
        on_delete = "Cascade"
    )]
    Driver,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::driver::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Driver.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// Fails only if the stored status is not a known lifecycle state.
impl TryFrom<Model> for Ride {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let status: RideStatus = model.status.parse().map_err(|_| {
            AppError::internal(format!(
                "Ride {} has unknown status '{}'",
                model.id, model.status
            ))
        })?;

        Ok(Ride {
            id: model.id,
            client_id: model.client_id,
            driver_id: model.driver_id,
            pickup: Location::new(model.pickup_location, model.pickup_lat, model.pickup_lng),
            dropoff: Location::new(model.dropoff_location, model.dropoff_lat, model.dropoff_lng),
            distance_km: model.distance_km,
            price: model.price,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&Ride> for ActiveModel {
    fn from(ride: &Ride) -> Self {
        ActiveModel {
            id: Set(ride.id),
            client_id: Set(ride.client_id),
            driver_id: Set(ride.driver_id),
            pickup_location: Set(ride.pickup.label.clone()),
            pickup_lat: Set(ride.pickup.lat),
            pickup_lng: Set(ride.pickup.lng),
            dropoff_location: Set(ride.dropoff.label.clone()),
            dropoff_lat: Set(ride.dropoff.lat),
            dropoff_lng: Set(ride.dropoff.lng),
            distance_km: Set(ride.distance_km),
            price: Set(ride.price),
            status: Set(ride.status.as_str().to_string()),
            created_at: Set(ride.created_at),
            updated_at: Set(ride.updated_at),
        }
    }
}
