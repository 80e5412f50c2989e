//! Migration: Create rides table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;
use super::m20240101_000002_create_drivers_table::Drivers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rides::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Rides::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Rides::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Rides::DriverId).uuid().null())
                    .col(ColumnDef::new(Rides::PickupLocation).string_len(255).not_null())
                    .col(ColumnDef::new(Rides::PickupLat).double().not_null())
                    .col(ColumnDef::new(Rides::PickupLng).double().not_null())
                    .col(ColumnDef::new(Rides::DropoffLocation).string_len(255).not_null())
                    .col(ColumnDef::new(Rides::DropoffLat).double().not_null())
                    .col(ColumnDef::new(Rides::DropoffLng).double().not_null())
                    .col(ColumnDef::new(Rides::DistanceKm).double().not_null())
                    .col(ColumnDef::new(Rides::Price).decimal_len(8, 2).not_null())
                    .col(
                        ColumnDef::new(Rides::Status)
                            .string_len(20)
                            .not_null()
                            .default("requested"),
                    )
                    .col(
                        ColumnDef::new(Rides::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Rides::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rides_client_id")
                            .from(Rides::Table, Rides::ClientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rides_driver_id")
                            .from(Rides::Table, Rides::DriverId)
                            .to(Drivers::Table, Drivers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_rides_client_id", Rides::ClientId),
            ("idx_rides_driver_id", Rides::DriverId),
            ("idx_rides_status", Rides::Status),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Rides::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rides::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Rides {
    Table,
    Id,
    ClientId,
    DriverId,
    PickupLocation,
    PickupLat,
    PickupLng,
    DropoffLocation,
    DropoffLat,
    DropoffLng,
    DistanceKm,
    Price,
    Status,
    CreatedAt,
    UpdatedAt,
}
