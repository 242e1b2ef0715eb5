use axum::{
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::errors::WebError;

/// Logs every server error leaving the router, whatever produced it
pub async fn error_handler_middleware(request: Request<axum::body::Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    if response.status().is_server_error() {
        error!("{} {} failed with {}", method, path, response.status());
    }

    response
}

/// Fallback for unknown routes
pub async fn handle_not_found() -> impl IntoResponse {
    WebError::not_found("Recurso não encontrado").into_response()
}
