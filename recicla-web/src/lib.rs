//! # Ser Recicla Web Utilities
//!
//! Reusable pieces for the HTTP API built on Axum: the error type rendered
//! by every handler, JWT session handling, cookie helpers, CORS and request
//! id middleware.

pub mod cookies;
pub mod errors;
pub mod extractors;
pub mod middleware;

pub use cookies::{read_cookie, SessionCookie};
pub use errors::{ValidationError, WebError, WebResult, INTERNAL_ERROR_MESSAGE, INVALID_DATA_MESSAGE};
pub use middleware::{
    cors_layer_with_config, error_handler_middleware, handle_not_found, optional_auth_middleware,
    request_id_middleware, AuthConfig, AuthContext, CorsConfig, JwtClaims, JwtManager, RequestId, REQUEST_ID_HEADER,
};
