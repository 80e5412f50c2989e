//! Postgres handle for the dispatch store and its schema migrations.

use sea_orm::{Database as SeaDatabase, DatabaseConnection, DbErr};
use sea_orm_migration::{MigrationStatus, MigratorTrait};

use crate::config::Config;

pub mod migrations;

pub use migrations::Migrator;

/// Shared connection to the users, drivers and rides tables
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open a connection and bring the schema up to date. Used by `serve`.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let database = Self::open(config).await?;
        database.run_migrations().await.inspect_err(|e| {
            tracing::error!(error = %e, "Schema migration failed");
        })?;

        tracing::info!("Dispatch store ready");
        Ok(database)
    }

    /// Open a connection and leave the schema alone. Used by `migrate`.
    pub async fn open(config: &Config) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(&config.database_url).await?;
        Ok(Self { connection })
    }

    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self { connection }
    }

    /// Handle for building repositories
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Undo only the most recent migration
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Every known migration paired with whether it has been applied
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        let migrations = Migrator::get_migration_with_status(&self.connection).await?;

        Ok(migrations
            .iter()
            .map(|m| (m.name().to_string(), matches!(m.status(), MigrationStatus::Applied)))
            .collect())
    }

    /// Drop all tables, then migrate from scratch
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Connectivity check backing the health endpoint
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_ping_succeeds_on_live_connection() {
        let connection = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        assert!(Database::from_connection(connection).ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_ping_fails_when_disconnected() {
        let database = Database::from_connection(DatabaseConnection::Disconnected);
        assert!(database.ping().await.is_err());
    }
}
