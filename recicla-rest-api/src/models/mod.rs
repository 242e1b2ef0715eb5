pub mod auth;
pub mod common;
pub mod deliveries;
pub mod stats;

// Re-export commonly used types
pub use auth::{AuthResponse, LoginRequest, SignupRequest};
pub use common::{HealthCheckResult, HealthResponse, HealthStatus, MessageResponse};
pub use deliveries::{CreateDeliveryRequest, DeliveryListQuery};
pub use stats::StatsQuery;
