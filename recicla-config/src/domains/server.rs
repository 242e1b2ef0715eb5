//! HTTP server configuration

use crate::error::ConfigResult;
use crate::validation::{validate_port_range, validate_positive, validate_required_string, validate_url, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Prefix under which the API routes are nested
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_cors: bool,

    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_request_id: bool,

    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_tracing: bool,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Grace period for in-flight requests on shutdown
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_shutdown_timeout")]
    pub shutdown_timeout: Duration,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins, `*` for any
    #[serde(default = "default_cors_origins")]
    pub allowed_origins: Vec<String>,

    /// Whether browsers may send the auth cookie cross-origin
    #[serde(default = "crate::domains::utils::default_false")]
    pub allow_credentials: bool,

    /// Max age for preflight requests
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_cors_max_age")]
    pub max_age: Duration,
}

impl ServerConfig {
    /// `bind_address:port`
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            api_prefix: default_api_prefix(),
            enable_cors: true,
            enable_request_id: true,
            enable_tracing: true,
            cors: CorsConfig::default(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_cors_origins(),
            allow_credentials: false,
            max_age: default_cors_max_age(),
        }
    }
}

impl Validatable for ServerConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.bind_address, "bind_address", self.domain_name())?;
        validate_port_range(self.port, "port", self.domain_name())?;

        if !self.api_prefix.starts_with('/') || self.api_prefix.ends_with('/') {
            return Err(self.validation_error(format!(
                "api_prefix must be a path like '/api', starting with '/' and not ending with one, got '{}'",
                self.api_prefix
            )));
        }

        validate_positive(self.shutdown_timeout.as_secs(), "shutdown_timeout", self.domain_name())?;

        self.cors.validate()?;

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "server"
    }
}

impl Validatable for CorsConfig {
    fn validate(&self) -> ConfigResult<()> {
        for origin in &self.allowed_origins {
            if origin != "*" {
                validate_url(origin, "allowed_origins", self.domain_name())?;
            }
        }

        // Credentialed requests cannot be combined with a wildcard origin
        if self.allow_credentials && self.allowed_origins.iter().any(|o| o == "*") {
            return Err(self.validation_error("allow_credentials requires explicit allowed_origins, not '*'"));
        }

        validate_positive(self.max_age.as_secs(), "max_age", self.domain_name())?;

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "server.cors"
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_shutdown_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_cors_max_age() -> Duration {
    Duration::from_secs(3600)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.socket_address(), "127.0.0.1:3000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_prefix_validation() {
        let mut config = ServerConfig::default();
        config.api_prefix = "api".to_string();
        assert!(config.validate().is_err());

        config.api_prefix = "/api/".to_string();
        assert!(config.validate().is_err());

        config.api_prefix = "/v1/api".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_root_api_prefix_is_rejected() {
        let mut config = ServerConfig::default();
        config.api_prefix = "/".to_string();
        assert!(config.validate().is_err());

        config.api_prefix = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cors_credentials_require_explicit_origins() {
        let mut cors = CorsConfig::default();
        cors.allow_credentials = true;
        assert!(cors.validate().is_err());

        cors.allowed_origins = vec!["http://localhost:5173".to_string()];
        assert!(cors.validate().is_ok());

        cors.allowed_origins.push("localhost".to_string());
        assert!(cors.validate().is_err());
    }
}
