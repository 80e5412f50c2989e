//! Driver profile database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::Driver;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "drivers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub license_number: String,
    pub car_model: String,
    pub car_plate: String,
    pub rating: f64,
    pub is_available: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::ride::Entity")]
    Ride,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::ride::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ride.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Driver {
    fn from(model: Model) -> Self {
        Driver {
            id: model.id,
            user_id: model.user_id,
            license_number: model.license_number,
            car_model: model.car_model,
            car_plate: model.car_plate,
            rating: model.rating,
            is_available: model.is_available,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Driver> for ActiveModel {
    fn from(driver: &Driver) -> Self {
        ActiveModel {
            id: Set(driver.id),
            user_id: Set(driver.user_id),
            license_number: Set(driver.license_number.clone()),
            car_model: Set(driver.car_model.clone()),
            car_plate: Set(driver.car_plate.clone()),
            rating: Set(driver.rating),
            is_available: Set(driver.is_available),
            created_at: Set(driver.created_at),
            updated_at: Set(driver.updated_at),
        }
    }
}
