//! Durable storage for the ledger: `SeaORM` entities, migrations, and the
//! Postgres-backed implementations of the core store and directory traits.

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{SqlAccountDirectory, SqlEventStore};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tally_shared::config::DatabaseConfig;

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Establishes a connection pool sized per configuration.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections);

    Database::connect(options).await
}
