pub mod delivery_repository;
pub mod user_repository;

pub use delivery_repository::SeaOrmDeliveryRepository;
pub use user_repository::SeaOrmUserRepository;

use async_trait::async_trait;
use recicla_interfaces::{DatabaseError, DeliveryRepository, Repository, RepositoryFactory, UserRepository};

use crate::connection::DatabaseConnection;

/// Repository factory sharing one connection pool between all repositories
#[derive(Clone)]
pub struct SeaOrmRepositoryFactory {
    db: DatabaseConnection,
    user_repository: SeaOrmUserRepository,
    delivery_repository: SeaOrmDeliveryRepository,
}

impl SeaOrmRepositoryFactory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repository: SeaOrmUserRepository::new(db.clone()),
            delivery_repository: SeaOrmDeliveryRepository::new(db.clone()),
            db,
        }
    }

    /// Get the database connection
    pub fn database(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl RepositoryFactory for SeaOrmRepositoryFactory {
    fn user_repository(&self) -> &dyn UserRepository {
        &self.user_repository
    }

    fn delivery_repository(&self) -> &dyn DeliveryRepository {
        &self.delivery_repository
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await?;
        self.user_repository.health_check().await?;
        self.delivery_repository.health_check().await
    }
}
