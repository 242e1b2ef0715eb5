//! Domain-driven configuration management for Ser Recicla
//!
//! Configuration is split by functional domain (server, database, auth,
//! logging), loaded from YAML, overridden from `RECICLA_*` environment
//! variables and validated per domain.

pub mod error;
pub mod loader;
pub mod validation;

pub mod domains;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

pub use domains::{
    auth::AuthConfig,
    database::DatabaseConfig,
    logging::{LogFormat, LogLevel, LoggingConfig},
    server::{CorsConfig, ServerConfig},
    ReciclaConfig,
};

pub use domains::utils::serde_duration;
