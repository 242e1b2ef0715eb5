//! Authentication extractors for Axum

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    errors::{WebError, INTERNAL_ERROR_MESSAGE},
    middleware::AuthContext,
};

/// Auth context extractor for Axum handlers
///
/// Requires [`crate::optional_auth_middleware`] on the route.
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| {
                tracing::error!("AuthContext missing; is optional_auth_middleware installed?");
                WebError::internal(INTERNAL_ERROR_MESSAGE)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::{optional_auth_middleware, AuthConfig, JwtManager};
    use axum::{body::Body, http::Request, http::StatusCode, middleware, routing::get, Router};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn whoami(auth: AuthContext) -> String {
        auth.user_id.unwrap_or_else(|| "anonymous".to_string())
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_extractor_reads_middleware_context() {
        let jwt = Arc::new(JwtManager::new(AuthConfig::default()));
        let token = jwt.generate_token("user-1").unwrap();

        let app = Router::new()
            .route("/me", get(whoami))
            .layer(middleware::from_fn_with_state(jwt.clone(), optional_auth_middleware));

        let request = Request::builder()
            .uri("/me")
            .header("Cookie", format!("auth_token={}", token))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(body_string(response).await, "user-1");

        let request = Request::builder().uri("/me").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(body_string(response).await, "anonymous");
    }

    #[tokio::test]
    async fn test_extractor_without_middleware_is_internal_error() {
        let app = Router::new().route("/me", get(whoami));
        let request = Request::builder().uri("/me").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
