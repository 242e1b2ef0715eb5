//! # Ser Recicla Storage
//!
//! SeaORM implementation of the repository interfaces over SQLite:
//! entities, migrations, connection management and the repositories
//! themselves.

pub mod config;
pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repositories;

pub use config::DatabaseConfig;
pub use connection::{DatabaseConnection, StorageError};
pub use repositories::{SeaOrmDeliveryRepository, SeaOrmRepositoryFactory, SeaOrmUserRepository};

/// Open the database, run migrations when asked and build the repository factory
pub async fn connect(config: DatabaseConfig, run_migrations: bool) -> Result<SeaOrmRepositoryFactory, StorageError> {
    let db = DatabaseConnection::new(config).await?;
    if run_migrations {
        db.migrate().await?;
    }
    Ok(SeaOrmRepositoryFactory::new(db))
}
