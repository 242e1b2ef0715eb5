//! Database configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://recicla.db", "sqlite::memory:")
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Maximum number of database connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection timeout
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_connection_timeout")]
    pub connection_timeout: Duration,

    /// Whether to run migrations automatically on startup
    #[serde(default = "crate::domains::utils::default_true")]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// In-memory SQLite database, used by tests
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Default::default()
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            connection_timeout: default_connection_timeout(),
            run_migrations: true,
        }
    }
}

impl Validatable for DatabaseConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.url, "url", self.domain_name())?;
        validate_positive(self.max_connections, "max_connections", self.domain_name())?;
        validate_positive(self.connection_timeout.as_secs(), "connection_timeout", self.domain_name())?;

        if !self.url.starts_with("sqlite:") {
            return Err(self.validation_error(format!("only sqlite URLs are supported, got '{}'", self.url)));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "database"
    }
}

fn default_database_url() -> String {
    "sqlite://recicla.db".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_connection_timeout() -> Duration {
    Duration::from_secs(30)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_defaults() {
        let config = DatabaseConfig::default();
        assert_eq!(config.url, "sqlite://recicla.db");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.connection_timeout, Duration::from_secs(30));
        assert!(config.run_migrations);
        assert!(!config.is_in_memory());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_config_validation() {
        let mut config = DatabaseConfig::in_memory();
        assert!(config.is_in_memory());
        assert!(config.validate().is_ok());

        config.max_connections = 0;
        assert!(config.validate().is_err());

        config = DatabaseConfig::default();
        config.url = "postgres://localhost/recicla".to_string();
        assert!(config.validate().is_err());
    }
}
