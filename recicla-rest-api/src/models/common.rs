//! Common types for REST API requests and responses

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response body carrying only a confirmation message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
    pub uptime_seconds: u64,
    pub checks: HashMap<String, HealthCheckResult>,
}

/// Individual health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub status: HealthStatus,
    pub message: Option<String>,
    pub duration_ms: u64,
}

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthResponse {
    pub fn new(uptime_seconds: u64) -> Self {
        Self {
            status: HealthStatus::Healthy,
            timestamp: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds,
            checks: HashMap::new(),
        }
    }

    /// Record a dependency check; any unhealthy check makes the whole response unhealthy
    pub fn with_check(mut self, name: impl Into<String>, check: HealthCheckResult) -> Self {
        if check.status == HealthStatus::Unhealthy {
            self.status = HealthStatus::Unhealthy;
        }
        self.checks.insert(name.into(), check);
        self
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// Treat an empty query value as absent
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unhealthy_check_marks_response_unhealthy() {
        let response = HealthResponse::new(5).with_check(
            "database",
            HealthCheckResult {
                status: HealthStatus::Healthy,
                message: None,
                duration_ms: 1,
            },
        );
        assert!(response.is_healthy());

        let response = response.with_check(
            "other",
            HealthCheckResult {
                status: HealthStatus::Unhealthy,
                message: Some("down".to_string()),
                duration_ms: 1,
            },
        );
        assert!(!response.is_healthy());
        assert_eq!(serde_json::to_value(&response).unwrap()["status"], "unhealthy");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("x".to_string())).as_deref(), Some("x"));
        assert!(non_empty(Some(String::new())).is_none());
        assert!(non_empty(None).is_none());
    }
}
