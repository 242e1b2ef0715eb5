//! Delivery repository implementation using SeaORM

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr};
use tracing::debug;

use recicla_core::{Delivery, DeliveryFilter, DeliveryListing, NewDelivery, User};
use recicla_interfaces::{DatabaseError, DeliveryRepository, Repository};

use crate::connection::DatabaseConnection;
use crate::entities::{deliveries, Deliveries, Users};

/// SeaORM implementation of the DeliveryRepository
#[derive(Clone)]
pub struct SeaOrmDeliveryRepository {
    db: DatabaseConnection,
}

impl SeaOrmDeliveryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// SQLite rowid of the delivery; rows are never deleted, so it follows insertion order
    fn insertion_order() -> SimpleExpr {
        Expr::cust("\"deliveries\".\"rowid\"")
    }

    /// Apply filters to a delivery query, joined or not
    fn apply_filters<Q: QueryFilter>(query: Q, filter: &DeliveryFilter) -> Q {
        let mut query = query;

        if let Some(waste_type) = filter.waste_type {
            query = query.filter(deliveries::Column::WasteType.eq(deliveries::WasteType::from(waste_type)));
        }

        if let Some(unit_id) = &filter.unit_id {
            query = query.filter(deliveries::Column::UnitId.eq(unit_id));
        }

        if let Some(class_id) = &filter.class_id {
            query = query.filter(deliveries::Column::ClassId.eq(class_id));
        }

        if let Some(course) = &filter.course {
            query = query.filter(deliveries::Column::Course.eq(course));
        }

        if let Some(user_id) = &filter.user_id {
            query = query.filter(deliveries::Column::UserId.eq(user_id));
        }

        if let Some(since) = filter.created_since {
            query = query.filter(deliveries::Column::CreatedAt.gte(since));
        }

        query
    }
}

#[async_trait]
impl Repository for SeaOrmDeliveryRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Deliveries::find()
            .limit(1)
            .all(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::Connection {
                message: format!("Delivery repository health check failed: {}", e),
            })?;

        Ok(())
    }
}

#[async_trait]
impl DeliveryRepository for SeaOrmDeliveryRepository {
    async fn create(&self, delivery: NewDelivery) -> Result<Delivery, DatabaseError> {
        let user_id = delivery.user_id.clone();
        let active_model = deliveries::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            quantity: Set(delivery.quantity),
            waste_type: Set(delivery.waste_type.into()),
            class_id: Set(delivery.class_id),
            course: Set(delivery.course),
            semester: Set(delivery.semester),
            shift: Set(delivery.shift.into()),
            unit_id: Set(delivery.unit_id),
            user_id: Set(delivery.user_id),
            created_at: Set(Utc::now()),
        };

        let created = active_model
            .insert(self.db.get_connection())
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => DatabaseError::Constraint {
                    message: format!("Unknown user for delivery: {}", user_id.unwrap_or_default()),
                },
                _ => DatabaseError::Internal {
                    message: format!("Failed to create delivery: {}", e),
                },
            })?;

        debug!("Created delivery {} ({} kg of {:?})", created.id, created.quantity, created.waste_type);
        Ok(Delivery::from(created))
    }

    async fn list(&self, filter: &DeliveryFilter) -> Result<Vec<Delivery>, DatabaseError> {
        let models = Self::apply_filters(Deliveries::find(), filter)
            .order_by_asc(deliveries::Column::CreatedAt)
            .order_by(Self::insertion_order(), Order::Asc)
            .all(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::Internal {
                message: format!("Failed to list deliveries: {}", e),
            })?;

        Ok(models.into_iter().map(Delivery::from).collect())
    }

    async fn list_with_users(&self, filter: &DeliveryFilter) -> Result<Vec<DeliveryListing>, DatabaseError> {
        let rows = Self::apply_filters(Deliveries::find().find_also_related(Users), filter)
            .order_by_desc(deliveries::Column::CreatedAt)
            .order_by(Self::insertion_order(), Order::Desc)
            .all(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::Internal {
                message: format!("Failed to list deliveries with users: {}", e),
            })?;

        Ok(rows
            .into_iter()
            .map(|(delivery, user)| DeliveryListing {
                delivery: Delivery::from(delivery),
                user: user.map(|u| User::from(u).summary()),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::config::DatabaseConfig;
    use crate::repositories::SeaOrmUserRepository;
    use recicla_core::{NewUser, Shift, WasteType};
    use recicla_interfaces::UserRepository;

    async fn connection() -> DatabaseConnection {
        let db = DatabaseConnection::new(DatabaseConfig::in_memory()).await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn new_delivery(quantity: f64, waste_type: WasteType, class_id: &str, unit_id: &str) -> NewDelivery {
        NewDelivery {
            quantity,
            waste_type,
            class_id: class_id.to_string(),
            course: "Engenharia Civil".to_string(),
            semester: "5".to_string(),
            shift: Shift::Morning,
            unit_id: unit_id.to_string(),
            user_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamp() {
        let repo = SeaOrmDeliveryRepository::new(connection().await);
        let before = Utc::now();

        let created = repo
            .create(new_delivery(2.5, WasteType::Aluminum, "SI2023", "alcindo_cacela"))
            .await
            .unwrap();

        assert_eq!(created.id.len(), 36);
        assert_eq!(created.quantity, 2.5);
        assert_eq!(created.waste_type, WasteType::Aluminum);
        assert_eq!(created.shift, Shift::Morning);
        assert!(created.created_at >= before);
    }

    #[tokio::test]
    async fn test_list_is_ascending_and_filtered() {
        let repo = SeaOrmDeliveryRepository::new(connection().await);
        let first = repo
            .create(new_delivery(2.5, WasteType::Aluminum, "SI2023", "alcindo_cacela"))
            .await
            .unwrap();
        let second = repo
            .create(new_delivery(1.5, WasteType::Aluminum, "SI2023", "ananindeua"))
            .await
            .unwrap();
        let third = repo
            .create(new_delivery(3.0, WasteType::Glass, "ENG2022", "alcindo_cacela"))
            .await
            .unwrap();

        let all = repo.list(&DeliveryFilter::default()).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str(), second.id.as_str(), third.id.as_str()]);

        let by_unit = repo
            .list(&DeliveryFilter {
                unit_id: Some("alcindo_cacela".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_unit.len(), 2);

        let by_type = repo
            .list(&DeliveryFilter {
                waste_type: Some(WasteType::Glass),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_type.len(), 1);
        assert_eq!(by_type[0].class_id, "ENG2022");

        let since_second = repo
            .list(&DeliveryFilter {
                created_since: Some(second.created_at),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(since_second.len(), 2);
        assert_eq!(since_second[0].id, second.id);

        let case_mismatch = repo
            .list(&DeliveryFilter {
                class_id: Some("si2023".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(case_mismatch.is_empty());
    }

    #[tokio::test]
    async fn test_list_with_users_is_newest_first_with_user_summary() {
        let db = connection().await;
        let users = SeaOrmUserRepository::new(db.clone());
        let repo = SeaOrmDeliveryRepository::new(db);

        let user = users
            .create_user(NewUser {
                name: "João Lima".to_string(),
                email: "joao@example.com".to_string(),
                password_hash: "hash".to_string(),
                phone: Some("91999990000".to_string()),
                course: "Engenharia Civil".to_string(),
                semester: "5".to_string(),
                class_id: "ENG2022".to_string(),
                shift: "matutino".to_string(),
                unit_id: "alcindo_cacela".to_string(),
            })
            .await
            .unwrap();

        let anonymous = repo
            .create(new_delivery(1.0, WasteType::Pet, "ENG2022", "alcindo_cacela"))
            .await
            .unwrap();
        let mut owned = new_delivery(4.0, WasteType::Cloth, "ENG2022", "alcindo_cacela");
        owned.user_id = Some(user.id.clone());
        let owned = repo.create(owned).await.unwrap();

        let listed = repo.list_with_users(&DeliveryFilter::default()).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].delivery.id, owned.id);
        assert_eq!(listed[0].user.as_ref().map(|u| u.email.as_str()), Some("joao@example.com"));
        assert_eq!(listed[1].delivery.id, anonymous.id);
        assert!(listed[1].user.is_none());

        let mine = repo
            .list_with_users(&DeliveryFilter {
                user_id: Some(user.id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].delivery.waste_type, WasteType::Cloth);
    }

    #[tokio::test]
    async fn test_equal_timestamps_keep_insertion_order() {
        let db = connection().await;
        let repo = SeaOrmDeliveryRepository::new(db.clone());
        let same_instant = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();

        // Ids sort differently from the insertion order
        for (id, class_id) in [("c-first", "SI2023"), ("a-second", "ENG2022"), ("b-third", "ADM2024")] {
            deliveries::ActiveModel {
                id: Set(id.to_string()),
                quantity: Set(2.0),
                waste_type: Set(deliveries::WasteType::Pet),
                class_id: Set(class_id.to_string()),
                course: Set("Engenharia Civil".to_string()),
                semester: Set("5".to_string()),
                shift: Set(deliveries::Shift::Morning),
                unit_id: Set("alcindo_cacela".to_string()),
                user_id: Set(None),
                created_at: Set(same_instant),
            }
            .insert(db.get_connection())
            .await
            .unwrap();
        }

        let oldest_first: Vec<String> = repo
            .list(&DeliveryFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(oldest_first, vec!["c-first", "a-second", "b-third"]);

        let newest_first: Vec<String> = repo
            .list_with_users(&DeliveryFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.delivery.id)
            .collect();
        assert_eq!(newest_first, vec!["b-third", "a-second", "c-first"]);

        let records = repo.list(&DeliveryFilter::default()).await.unwrap();
        let result = recicla_core::aggregate(&records, &recicla_core::StatsFilter::default());
        let classes: Vec<&str> = result.top_classes.iter().map(|c| c.class_id.as_str()).collect();
        assert_eq!(classes, vec!["SI2023", "ENG2022", "ADM2024"]);
    }

    #[tokio::test]
    async fn test_unknown_user_is_a_constraint_violation() {
        let repo = SeaOrmDeliveryRepository::new(connection().await);
        let mut delivery = new_delivery(1.0, WasteType::Pet, "ENG2022", "alcindo_cacela");
        delivery.user_id = Some("no-such-user".to_string());

        let err = repo.create(delivery).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Constraint { .. }));
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let repo = SeaOrmDeliveryRepository::new(connection().await);
        assert!(repo.list(&DeliveryFilter::default()).await.unwrap().is_empty());
        assert!(repo.list_with_users(&DeliveryFilter::default()).await.unwrap().is_empty());
        assert!(repo.health_check().await.is_ok());
    }
}
