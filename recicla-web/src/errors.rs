//! Web-specific error types and conversions
//!
//! Every handler error ends up as a [`WebError`], rendered as
//! `{"error": {"code": ..., "message": ..., "details": ...}}` with the
//! matching status code. Messages are shown to end users, so they are in
//! Portuguese and must never carry store or library details.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Message used when a validation failure has no more specific text
pub const INVALID_DATA_MESSAGE: &str = "Dados inválidos";

/// Message for failures whose cause must stay in the logs
pub const INTERNAL_ERROR_MESSAGE: &str = "Erro interno do servidor";

/// Web-specific error type for HTTP API operations
#[derive(Debug, Error)]
pub enum WebError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    #[error("Validation error: {errors:?}")]
    Validation { errors: Vec<ValidationError> },
}

/// Validation error details
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidationError {
    pub field: Option<String>,
    pub message: String,
    pub code: String,
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;

impl WebError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::BadRequest { .. } | WebError::Validation { .. } => StatusCode::BAD_REQUEST,
            WebError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            WebError::NotFound { .. } => StatusCode::NOT_FOUND,
            WebError::Conflict { .. } => StatusCode::CONFLICT,
            WebError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            WebError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            WebError::BadRequest { .. } => "BAD_REQUEST",
            WebError::Unauthorized { .. } => "UNAUTHORIZED",
            WebError::NotFound { .. } => "NOT_FOUND",
            WebError::Conflict { .. } => "CONFLICT",
            WebError::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE",
            WebError::Internal { .. } => "INTERNAL_ERROR",
            WebError::Validation { .. } => "VALIDATION_ERROR",
        }
    }

    /// User-facing message, without the variant prefix used by `Display`
    pub fn message(&self) -> &str {
        match self {
            WebError::BadRequest { message }
            | WebError::Unauthorized { message }
            | WebError::NotFound { message }
            | WebError::Conflict { message }
            | WebError::Internal { message }
            | WebError::ServiceUnavailable { message } => message,
            WebError::Validation { .. } => INVALID_DATA_MESSAGE,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!("Request failed with {}: {}", status, self);
        }

        let error_response = match &self {
            WebError::Validation { errors } => {
                json!({
                    "error": {
                        "code": self.error_code(),
                        "message": self.message(),
                        "details": errors
                    }
                })
            }
            _ => {
                json!({
                    "error": {
                        "code": self.error_code(),
                        "message": self.message()
                    }
                })
            }
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<validator::ValidationErrors> for WebError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<ValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |e| ValidationError {
                    field: Some(field.to_string()),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Campo '{}' inválido", field)),
                    code: e.code.to_string(),
                })
            })
            .collect();

        // field_errors() is backed by a HashMap
        details.sort_by(|a, b| a.field.cmp(&b.field));

        WebError::Validation { errors: details }
    }
}

// Common error constructors
impl WebError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        WebError::BadRequest {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        WebError::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        WebError::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        WebError::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        WebError::Internal {
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        WebError::ServiceUnavailable {
            message: message.into(),
        }
    }

    pub fn validation_single(field: Option<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        WebError::Validation {
            errors: vec![ValidationError {
                field,
                message: message.into(),
                code: code.into(),
            }],
        }
    }
}
