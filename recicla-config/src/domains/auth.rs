//! Authentication configuration: JWT signing, session cookie, password hashing

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Secret used when none is configured. Only suitable for local development.
pub const DEVELOPMENT_JWT_SECRET: &str = "ser-recicla-development-secret-change-me";

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// JWT secret key
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// Token and cookie lifetime
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_token_expiration")]
    pub token_expiration: Duration,

    #[serde(default = "default_token_issuer")]
    pub issuer: String,

    #[serde(default = "default_token_audience")]
    pub audience: String,

    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Add the `Secure` attribute to the session cookie
    #[serde(default = "crate::domains::utils::default_false")]
    pub secure_cookie: bool,

    /// bcrypt work factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn uses_development_secret(&self) -> bool {
        self.jwt_secret == DEVELOPMENT_JWT_SECRET
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_expiration: default_token_expiration(),
            issuer: default_token_issuer(),
            audience: default_token_audience(),
            cookie_name: default_cookie_name(),
            secure_cookie: false,
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl Validatable for AuthConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.jwt_secret, "jwt_secret", self.domain_name())?;
        validate_required_string(&self.issuer, "issuer", self.domain_name())?;
        validate_required_string(&self.audience, "audience", self.domain_name())?;
        validate_required_string(&self.cookie_name, "cookie_name", self.domain_name())?;

        validate_positive(self.token_expiration.as_secs(), "token_expiration", self.domain_name())?;

        if self.jwt_secret.len() < 32 {
            return Err(self.validation_error("jwt_secret must be at least 32 characters long"));
        }

        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(self.validation_error(format!("bcrypt_cost must be between 4 and 31, got {}", self.bcrypt_cost)));
        }

        if self
            .cookie_name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ';' | ',' | '='))
        {
            return Err(self.validation_error(format!("cookie_name '{}' is not a valid cookie name", self.cookie_name)));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "auth"
    }
}

fn default_jwt_secret() -> String {
    DEVELOPMENT_JWT_SECRET.to_string()
}

fn default_token_expiration() -> Duration {
    Duration::from_secs(7 * 24 * 60 * 60)
}

fn default_token_issuer() -> String {
    "ser-recicla".to_string()
}

fn default_token_audience() -> String {
    "ser-recicla-api".to_string()
}

fn default_cookie_name() -> String {
    "auth_token".to_string()
}

fn default_bcrypt_cost() -> u32 {
    10
}
