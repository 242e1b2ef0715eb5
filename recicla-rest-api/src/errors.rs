//! REST API specific error types and conversions

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    response::{IntoResponse, Response},
};
use recicla_core::CoreError;
use recicla_interfaces::DatabaseError;
use recicla_web::WebError;
use thiserror::Error;
use tracing::{error, warn};

/// Generic message for failures the caller cannot act on
pub const PROCESSING_ERROR: &str = "Erro ao processar a solicitação";

/// REST API specific error type
#[derive(Error, Debug)]
pub enum RestError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Web(#[from] WebError),

    #[error("Invalid input: {0}")]
    Core(#[from] CoreError),

    #[error("Malformed JSON body: {0}")]
    Json(#[from] JsonRejection),

    #[error("Malformed query string: {0}")]
    Query(#[from] QueryRejection),
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    /// Map onto the HTTP-facing error, hiding store details
    pub fn into_web_error(self) -> WebError {
        match self {
            RestError::Web(web_err) => web_err,
            RestError::Database(db_err) => {
                error!("Unhandled database error: {}", db_err);
                match db_err {
                    DatabaseError::NotFound { .. } => WebError::not_found("Recurso não encontrado"),
                    DatabaseError::Validation { .. } => WebError::bad_request("Dados inválidos"),
                    DatabaseError::Constraint { .. } => WebError::conflict("Conflito com dados existentes"),
                    DatabaseError::Connection { .. } => WebError::service_unavailable("Serviço indisponível"),
                    DatabaseError::Internal { .. } => WebError::internal(PROCESSING_ERROR),
                }
            }
            RestError::Core(core_err) => match core_err {
                CoreError::InvalidWasteType(_) => {
                    WebError::validation_single(Some("tipo".to_string()), "Tipo de resíduo inválido", "enum")
                }
                CoreError::InvalidShift(_) => {
                    WebError::validation_single(Some("turno".to_string()), "Turno inválido", "enum")
                }
                CoreError::InvalidPeriod(_) => {
                    WebError::validation_single(Some("periodo".to_string()), "Período inválido", "enum")
                }
            },
            RestError::Json(rejection) => {
                warn!("Rejected request body: {}", rejection);
                WebError::bad_request("Corpo da requisição inválido")
            }
            RestError::Query(rejection) => {
                warn!("Rejected query string: {}", rejection);
                WebError::bad_request("Parâmetros de consulta inválidos")
            }
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        self.into_web_error().into_response()
    }
}

impl From<validator::ValidationErrors> for RestError {
    fn from(errors: validator::ValidationErrors) -> Self {
        RestError::Web(WebError::from(errors))
    }
}

/// Log a store failure and replace it with a user-facing 500
pub fn store_failure(message: &'static str) -> impl FnOnce(DatabaseError) -> RestError {
    move |err| {
        error!("{}: {}", message, err);
        RestError::Web(WebError::internal(message))
    }
}
