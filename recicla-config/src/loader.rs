//! Configuration loading and environment variable handling

use crate::domains::ReciclaConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use std::str::FromStr;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with the `RECICLA` prefix
    pub fn new() -> Self {
        Self {
            prefix: "RECICLA".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<ReciclaConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: ReciclaConfig = serde_yaml::from_str(&content)?;

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from defaults and environment variables only
    pub fn from_env(&self) -> ConfigResult<ReciclaConfig> {
        let mut config = ReciclaConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load from the file when given, otherwise from the environment
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<ReciclaConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut ReciclaConfig) -> ConfigResult<()> {
        self.apply_server_overrides(&mut config.server)?;
        self.apply_database_overrides(&mut config.database)?;
        self.apply_auth_overrides(&mut config.auth)?;
        self.apply_logging_overrides(&mut config.logging)?;
        Ok(())
    }

    fn apply_server_overrides(&self, config: &mut crate::domains::server::ServerConfig) -> ConfigResult<()> {
        if let Ok(bind) = self.get_env_var("SERVER_BIND_ADDRESS") {
            config.bind_address = bind;
        }

        if let Ok(port) = self.get_env_var("SERVER_PORT") {
            config.port = self.parse_var("SERVER_PORT", &port)?;
        }

        if let Ok(prefix) = self.get_env_var("API_PREFIX") {
            config.api_prefix = prefix;
        }

        Ok(())
    }

    fn apply_database_overrides(&self, config: &mut crate::domains::database::DatabaseConfig) -> ConfigResult<()> {
        if let Ok(url) = self.get_env_var("DATABASE_URL") {
            config.url = url;
        }

        if let Ok(max) = self.get_env_var("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = self.parse_var("DATABASE_MAX_CONNECTIONS", &max)?;
        }

        Ok(())
    }

    fn apply_auth_overrides(&self, config: &mut crate::domains::auth::AuthConfig) -> ConfigResult<()> {
        if let Ok(secret) = self.get_env_var("JWT_SECRET") {
            config.jwt_secret = secret;
        }

        if let Ok(secure) = self.get_env_var("SECURE_COOKIE") {
            config.secure_cookie = self.parse_var("SECURE_COOKIE", &secure)?;
        }

        Ok(())
    }

    fn apply_logging_overrides(&self, config: &mut crate::domains::logging::LoggingConfig) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = crate::domains::logging::LogLevel::from_str(&log_level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = crate::domains::logging::LogFormat::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    fn parse_var<T>(&self, name: &str, value: &str) -> ConfigResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        value
            .parse()
            .map_err(|e| ConfigError::EnvError(format!("Invalid {}_{}: {}", self.prefix, name, e)))
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
