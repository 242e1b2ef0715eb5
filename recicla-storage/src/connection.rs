use crate::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection as SeaConnection, DbErr};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Database connection wrapper with configuration
#[derive(Clone)]
pub struct DatabaseConnection {
    connection: SeaConnection,
    config: DatabaseConfig,
}

/// Errors raised while opening or migrating the database
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DbError(#[from] DbErr),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<StorageError> for recicla_interfaces::DatabaseError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DbError(e) => recicla_interfaces::DatabaseError::Connection { message: e.to_string() },
            other => recicla_interfaces::DatabaseError::Internal {
                message: other.to_string(),
            },
        }
    }
}

impl DatabaseConnection {
    /// Create a new database connection with configuration
    pub async fn new(config: DatabaseConfig) -> Result<Self, StorageError> {
        info!("Connecting to database: {}", config.url);

        Self::ensure_sqlite_file_exists(&config.url)?;

        let mut opts = ConnectOptions::new(&config.url);
        opts.connect_timeout(config.connection_timeout)
            .acquire_timeout(config.connection_timeout)
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        if config.is_in_memory() {
            // Every pooled connection to `:memory:` opens its own empty database,
            // so the pool must hold exactly one connection that never expires
            opts.max_connections(1).min_connections(1);
        } else {
            opts.max_connections(config.max_connections)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(3600));
        }

        let connection = Database::connect(opts).await?;

        debug!(
            "Database connection established with {} max connections",
            if config.is_in_memory() { 1 } else { config.max_connections }
        );

        Ok(Self { connection, config })
    }

    /// Ensure the parent directory of a file-based SQLite database exists
    /// and ask SQLite to create the file when missing
    fn ensure_sqlite_file_exists(database_url: &str) -> Result<(), StorageError> {
        if !database_url.starts_with("sqlite:") {
            return Err(StorageError::ConfigError(format!(
                "Unsupported database URL: {}",
                database_url
            )));
        }

        if database_url.contains(":memory:") {
            debug!("Using in-memory SQLite database");
            return Ok(());
        }

        let file_path = database_url
            .strip_prefix("sqlite://")
            .or_else(|| database_url.strip_prefix("sqlite:"))
            .map(|rest| rest.split('?').next().unwrap_or(rest))
            .filter(|path| !path.is_empty())
            .ok_or_else(|| StorageError::ConfigError(format!("Invalid SQLite URL format: {}", database_url)))?;

        let path = std::path::Path::new(file_path);

        if let Some(parent_dir) = path.parent() {
            if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                info!("Creating database directory: {:?}", parent_dir);
                std::fs::create_dir_all(parent_dir).map_err(|e| {
                    StorageError::ConfigError(format!("Failed to create database directory {:?}: {}", parent_dir, e))
                })?;
            }
        }

        if !path.exists() {
            info!("Creating database file: {:?}", path);
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| StorageError::ConfigError(format!("Failed to create database file {:?}: {}", path, e)))?;
        } else {
            debug!("Using existing database file: {:?}", path);
        }

        Ok(())
    }

    /// Get the underlying Sea-ORM connection
    pub fn get_connection(&self) -> &SeaConnection {
        &self.connection
    }

    /// Get database configuration
    pub fn get_config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<(), StorageError> {
        use sea_orm_migration::MigratorTrait;

        info!("Running database migrations");

        crate::migrations::Migrator::up(&self.connection, None)
            .await
            .map_err(|e| StorageError::MigrationError(e.to_string()))?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Check database connectivity
    pub async fn ping(&self) -> Result<(), StorageError> {
        self.connection.ping().await.map_err(|e| {
            debug!("Database ping failed: {}", e);
            StorageError::DbError(e)
        })
    }

    /// Close the database connection
    pub async fn close(self) -> Result<(), StorageError> {
        info!("Closing database connection");
        self.connection.close().await?;
        Ok(())
    }
}
