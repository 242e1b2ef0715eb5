//! User repository implementation using SeaORM

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set, SqlErr};
use tracing::debug;

use recicla_core::{NewUser, User, UserCredentials};
use recicla_interfaces::{DatabaseError, Repository, UserRepository};

use crate::connection::DatabaseConnection;
use crate::entities::{users, Users};

/// SeaORM implementation of the UserRepository
#[derive(Clone)]
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model_by_email(&self, email: &str) -> Result<Option<users::Model>, DatabaseError> {
        Users::find()
            .filter(users::Column::Email.eq(email))
            .one(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::Internal {
                message: format!("Failed to find user by email: {}", e),
            })
    }
}

#[async_trait]
impl Repository for SeaOrmUserRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Users::find()
            .limit(1)
            .all(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::Connection {
                message: format!("User repository health check failed: {}", e),
            })?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        let user = Users::find_by_id(id.to_string())
            .one(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::Internal {
                message: format!("Failed to find user by id: {}", e),
            })?;

        Ok(user.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.find_model_by_email(email).await?.map(User::from))
    }

    async fn find_credentials_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DatabaseError> {
        Ok(self.find_model_by_email(email).await?.map(|model| {
            let password_hash = model.password_hash.clone();
            UserCredentials {
                user: User::from(model),
                password_hash,
            }
        }))
    }

    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let email = user.email.clone();
        let active_model = users::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(user.name),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            phone: Set(user.phone),
            course: Set(user.course),
            semester: Set(user.semester),
            class_id: Set(user.class_id),
            shift: Set(user.shift),
            unit_id: Set(user.unit_id),
            created_at: Set(Utc::now()),
        };

        let created = active_model
            .insert(self.db.get_connection())
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => DatabaseError::Constraint {
                    message: format!("Email already registered: {}", email),
                },
                _ => DatabaseError::Internal {
                    message: format!("Failed to create user: {}", e),
                },
            })?;

        debug!("Created user {}", created.id);
        Ok(User::from(created))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    async fn repository() -> SeaOrmUserRepository {
        let db = DatabaseConnection::new(DatabaseConfig::in_memory()).await.unwrap();
        db.migrate().await.unwrap();
        SeaOrmUserRepository::new(db)
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Maria Souza".to_string(),
            email: email.to_string(),
            password_hash: "$2b$04$hash".to_string(),
            phone: None,
            course: "Sistemas de Informação".to_string(),
            semester: "3".to_string(),
            class_id: "SI2023".to_string(),
            shift: "noturno".to_string(),
            unit_id: "alcindo_cacela".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let repo = repository().await;
        let created = repo.create_user(new_user("maria@example.com")).await.unwrap();

        assert_eq!(created.email, "maria@example.com");
        assert_eq!(created.id.len(), 36);

        let by_id = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(by_id, created);

        let by_email = repo.find_by_email("maria@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);

        let credentials = repo.find_credentials_by_email("maria@example.com").await.unwrap().unwrap();
        assert_eq!(credentials.password_hash, "$2b$04$hash");
        assert_eq!(credentials.user.class_id, "SI2023");
    }

    #[tokio::test]
    async fn test_unknown_user_is_none() {
        let repo = repository().await;
        assert!(repo.find_by_id("missing").await.unwrap().is_none());
        assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
        assert!(repo.find_credentials_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_constraint_violation() {
        let repo = repository().await;
        repo.create_user(new_user("dup@example.com")).await.unwrap();

        let err = repo.create_user(new_user("dup@example.com")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Constraint { .. }));
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = repository().await;
        assert!(repo.health_check().await.is_ok());
    }
}
