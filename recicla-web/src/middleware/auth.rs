//! JWT session middleware
//!
//! Tokens are issued at login and carried back in the session cookie.
//! A `Bearer` header is also accepted so scripted clients can call the API
//! without a cookie jar.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::cookies::read_cookie;
use crate::errors::{WebError, INTERNAL_ERROR_MESSAGE};

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret for HS256 signing and verification
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    /// Token lifetime, also used as the cookie max age
    pub token_expiry: Duration,
    /// Cookie carrying the token
    pub cookie_name: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "ser-recicla-development-secret-change-me".to_string(),
            jwt_issuer: "ser-recicla".to_string(),
            jwt_audience: "ser-recicla-api".to_string(),
            token_expiry: Duration::from_secs(7 * 24 * 60 * 60),
            cookie_name: "auth_token".to_string(),
        }
    }
}

/// Authentication context for the current request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    /// Identity carried by a valid token, if any
    pub user_id: Option<String>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// The authenticated user id, or `Unauthorized` with the given message
    pub fn require_user(&self, message: &str) -> Result<&str, WebError> {
        self.user_id.as_deref().ok_or_else(|| WebError::unauthorized(message))
    }
}

/// JWT token manager
pub struct JwtManager {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    /// Create a new JWT manager
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Generate a JWT token for a user
    pub fn generate_token(&self, user_id: &str) -> Result<String, WebError> {
        let now = Utc::now();
        let expiry = chrono::Duration::from_std(self.config.token_expiry).map_err(|e| {
            error!("Invalid token expiry: {}", e);
            WebError::internal(INTERNAL_ERROR_MESSAGE)
        })?;

        let claims = JwtClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + expiry).timestamp(),
            iss: self.config.jwt_issuer.clone(),
            aud: self.config.jwt_audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            error!("Failed to generate JWT token: {}", e);
            WebError::internal(INTERNAL_ERROR_MESSAGE)
        })
    }

    /// Verify and decode a JWT token
    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, WebError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.jwt_issuer]);
        validation.set_audience(&[&self.config.jwt_audience]);

        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            debug!("JWT verification failed: {}", e);
            WebError::unauthorized("Token inválido ou expirado")
        })?;

        // jsonwebtoken allows a leeway on exp
        if token_data.claims.exp < Utc::now().timestamp() {
            return Err(WebError::unauthorized("Token inválido ou expirado"));
        }

        Ok(token_data.claims)
    }

    /// Extract the token from the session cookie, falling back to `Authorization: Bearer`
    pub fn extract_token(&self, headers: &HeaderMap) -> Option<String> {
        if let Some(token) = read_cookie(headers, &self.config.cookie_name) {
            return Some(token);
        }

        let auth_header = headers.get("Authorization")?.to_str().ok()?;
        auth_header.strip_prefix("Bearer ").map(|token| token.trim().to_string())
    }

    /// Resolve the caller; any missing or invalid token yields an anonymous context
    pub fn authenticate(&self, headers: &HeaderMap) -> AuthContext {
        let Some(token) = self.extract_token(headers) else {
            return AuthContext::anonymous();
        };

        match self.verify_token(&token) {
            Ok(claims) => {
                debug!("JWT authentication successful for user: {}", claims.sub);
                AuthContext::authenticated(claims.sub)
            }
            Err(_) => {
                warn!("Ignoring invalid session token");
                AuthContext::anonymous()
            }
        }
    }
}

/// Optional authentication middleware (never rejects)
///
/// Inserts an [`AuthContext`] into the request extensions for the extractor
/// to pick up. Handlers decide whether an anonymous caller is acceptable.
pub async fn optional_auth_middleware(
    State(jwt_manager): State<Arc<JwtManager>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_context = jwt_manager.authenticate(&headers);
    request.extensions_mut().insert(auth_context);

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue};

    fn create_test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-key-with-enough-length!!".to_string(),
            jwt_issuer: "test-issuer".to_string(),
            jwt_audience: "test-audience".to_string(),
            token_expiry: Duration::from_secs(3600),
            cookie_name: "auth_token".to_string(),
        }
    }

    #[test]
    fn test_jwt_token_generation_and_verification() {
        let jwt_manager = JwtManager::new(create_test_config());

        let token = jwt_manager.generate_token("user123").unwrap();
        let claims = jwt_manager.verify_token(&token).unwrap();

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-audience");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let issuer = JwtManager::new(AuthConfig {
            jwt_secret: "another-secret-key-with-enough-length".to_string(),
            ..create_test_config()
        });
        let verifier = JwtManager::new(create_test_config());

        let token = issuer.generate_token("user123").unwrap();
        assert!(matches!(
            verifier.verify_token(&token),
            Err(WebError::Unauthorized { .. })
        ));
        assert!(verifier.verify_token("not.a.token").is_err());
    }

    #[test]
    fn test_cookie_authentication() {
        let jwt_manager = JwtManager::new(create_test_config());
        let token = jwt_manager.generate_token("user123").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("auth_token={}", token)).unwrap(),
        );

        let context = jwt_manager.authenticate(&headers);
        assert!(context.is_authenticated());
        assert_eq!(context.user_id.as_deref(), Some("user123"));
    }

    #[test]
    fn test_bearer_authentication() {
        let jwt_manager = JwtManager::new(create_test_config());
        let token = jwt_manager.generate_token("user456").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );

        assert_eq!(jwt_manager.authenticate(&headers), AuthContext::authenticated("user456"));
    }

    #[test]
    fn test_missing_or_invalid_token_is_anonymous() {
        let jwt_manager = JwtManager::new(create_test_config());
        assert_eq!(jwt_manager.authenticate(&HeaderMap::new()), AuthContext::anonymous());

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("auth_token=garbage"));
        assert!(!jwt_manager.authenticate(&headers).is_authenticated());
    }

    #[test]
    fn test_require_user() {
        let anonymous = AuthContext::anonymous();
        let err = anonymous.require_user("Não autenticado").unwrap_err();
        assert_eq!(err.message(), "Não autenticado");

        let context = AuthContext::authenticated("u1");
        assert_eq!(context.require_user("Não autenticado").unwrap(), "u1");
    }
}
