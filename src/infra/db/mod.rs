//! Database connection and schema management.

use std::collections::HashSet;

use sea_orm::{ConnectOptions, DatabaseConnection, DbErr, EntityTrait};
use sea_orm_migration::{seaql_migrations, MigratorTrait};

pub mod migrations;

pub use migrations::Migrator;

/// One entry of `migrate status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

/// Shared handle to the site database
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open the database and bring the schema up to date.
    pub async fn connect(database_url: &str) -> Result<Self, DbErr> {
        let db = Self::open(database_url).await?;
        db.migrate_up().await?;

        tracing::info!("Database ready");
        Ok(db)
    }

    /// Open the database and leave the schema as it is.
    pub async fn open(database_url: &str) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(database_url);
        options.sqlx_logging(false);

        let connection = sea_orm::Database::connect(options).await?;
        Ok(Self { connection })
    }

    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    pub async fn migrate_up(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Revert the most recent `steps` migrations.
    pub async fn migrate_down(&self, steps: u32) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(steps)).await
    }

    /// Drop everything and rebuild the schema from scratch.
    pub async fn reset(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Known migrations in order, each flagged if already applied.
    pub async fn migrations(&self) -> Result<Vec<MigrationState>, DbErr> {
        let applied: HashSet<String> = seaql_migrations::Entity::find()
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|row| row.version)
            .collect();

        Ok(Migrator::migrations()
            .iter()
            .map(|migration| {
                let name = migration.name().to_string();
                MigrationState {
                    applied: applied.contains(&name),
                    name,
                }
            })
            .collect())
    }

    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection.ping().await
    }
}
