//! Database repository interfaces
//!
//! Repositories return domain types from `recicla-core` and report failures
//! as [`DatabaseError`]. Implementations live in `recicla-storage`.

use async_trait::async_trait;
use recicla_core::{Delivery, DeliveryFilter, DeliveryListing, NewDelivery, NewUser, User, UserCredentials};

/// Common database error type
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Constraint violation: {message}")]
    Constraint { message: String },

    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Internal database error: {message}")]
    Internal { message: String },
}

impl DatabaseError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Base repository trait with health check capability
#[async_trait]
pub trait Repository: Send + Sync {
    /// Check if the repository is healthy and can serve requests
    async fn health_check(&self) -> Result<(), DatabaseError>;
}

/// Registered users
#[async_trait]
pub trait UserRepository: Repository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DatabaseError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// Profile plus stored password hash, for login only
    async fn find_credentials_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DatabaseError>;

    /// Insert a user. A duplicate email yields [`DatabaseError::Constraint`].
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError>;
}

/// Delivery records
#[async_trait]
pub trait DeliveryRepository: Repository {
    /// Insert a delivery, assigning its id and creation timestamp
    async fn create(&self, delivery: NewDelivery) -> Result<Delivery, DatabaseError>;

    /// Matching records ordered by `created_at` ascending
    async fn list(&self, filter: &DeliveryFilter) -> Result<Vec<Delivery>, DatabaseError>;

    /// Matching records newest first, each with the registering user if any
    async fn list_with_users(&self, filter: &DeliveryFilter) -> Result<Vec<DeliveryListing>, DatabaseError>;
}

/// Factory trait for creating repository instances
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// Get user repository instance
    fn user_repository(&self) -> &dyn UserRepository;

    /// Get delivery repository instance
    fn delivery_repository(&self) -> &dyn DeliveryRepository;

    /// Check health of all repositories
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
