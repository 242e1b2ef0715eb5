//! Context types for dependency injection in REST API handlers
//!
//! Each endpoint group gets the dependencies it needs and nothing else.
//! [`crate::AppContext`] bundles them and hands each one out through
//! `FromRef`, so handlers extract `State<AccountsContext>` and friends.

use recicla_interfaces::RepositoryFactory;
use recicla_web::{JwtManager, SessionCookie};
use std::sync::Arc;
use std::time::Instant;

/// Context for signup, login, logout and the current-user endpoint
#[derive(Clone)]
pub struct AccountsContext {
    pub repositories: Arc<dyn RepositoryFactory>,
    pub jwt_manager: Arc<JwtManager>,
    /// Attributes of the `Set-Cookie` header issued at login
    pub session_cookie: SessionCookie,
    pub bcrypt_cost: u32,
}

impl AccountsContext {
    pub fn new(
        repositories: Arc<dyn RepositoryFactory>,
        jwt_manager: Arc<JwtManager>,
        session_cookie: SessionCookie,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            repositories,
            jwt_manager,
            session_cookie,
            bcrypt_cost,
        }
    }
}

/// Context for delivery and statistics endpoints
#[derive(Clone)]
pub struct DeliveriesContext {
    pub repositories: Arc<dyn RepositoryFactory>,
}

impl DeliveriesContext {
    pub fn new(repositories: Arc<dyn RepositoryFactory>) -> Self {
        Self { repositories }
    }
}

/// Context for health reporting
#[derive(Clone)]
pub struct SystemContext {
    pub repositories: Arc<dyn RepositoryFactory>,
    pub started_at: Instant,
}

impl SystemContext {
    pub fn new(repositories: Arc<dyn RepositoryFactory>) -> Self {
        Self {
            repositories,
            started_at: Instant::now(),
        }
    }
}
