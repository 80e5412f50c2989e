//! Migration: Create drivers table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(drivers_table()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Drivers::Table).to_owned())
            .await
    }
}

/// Profiles start unavailable until the driver opts in.
fn drivers_table() -> TableCreateStatement {
    Table::create()
        .table(Drivers::Table)
        .if_not_exists()
        .col(ColumnDef::new(Drivers::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Drivers::UserId).uuid().not_null().unique_key())
        .col(ColumnDef::new(Drivers::LicenseNumber).string_len(20).not_null())
        .col(ColumnDef::new(Drivers::CarModel).string_len(50).not_null())
        .col(ColumnDef::new(Drivers::CarPlate).string_len(10).not_null())
        .col(ColumnDef::new(Drivers::Rating).double().not_null().default(5.0))
        .col(
            ColumnDef::new(Drivers::IsAvailable)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(Drivers::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Drivers::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_drivers_user_id")
                .from(Drivers::Table, Drivers::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[derive(Iden)]
pub(super) enum Drivers {
    Table,
    Id,
    UserId,
    LicenseNumber,
    CarModel,
    CarPlate,
    Rating,
    IsAvailable,
    CreatedAt,
    UpdatedAt,
}
