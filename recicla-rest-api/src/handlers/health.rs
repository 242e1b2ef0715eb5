//! Health check endpoint

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::time::Instant;
use tracing::warn;

use crate::{
    context::SystemContext,
    models::{HealthCheckResult, HealthResponse, HealthStatus},
};

/// Health check endpoint
///
/// Reports 200 while the database answers and 503 otherwise.
pub async fn health_check(State(ctx): State<SystemContext>) -> impl IntoResponse {
    let start = Instant::now();
    let database = match ctx.repositories.health_check().await {
        Ok(()) => HealthCheckResult {
            status: HealthStatus::Healthy,
            message: Some("Database connection healthy".to_string()),
            duration_ms: start.elapsed().as_millis() as u64,
        },
        Err(e) => {
            warn!("Database health check failed: {}", e);
            HealthCheckResult {
                status: HealthStatus::Unhealthy,
                message: Some("Database unavailable".to_string()),
                duration_ms: start.elapsed().as_millis() as u64,
            }
        }
    };

    let response = HealthResponse::new(ctx.started_at.elapsed().as_secs()).with_check("database", database);
    let status = if response.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
