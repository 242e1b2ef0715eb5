//! Registered user entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// UUID v4
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// bcrypt hash, never exposed outside the repository
    pub password_hash: String,
    pub phone: Option<String>,
    pub course: String,
    pub semester: String,
    pub class_id: String,
    pub shift: String,
    pub unit_id: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::deliveries::Entity")]
    Deliveries,
}

impl Related<super::deliveries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deliveries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for recicla_core::User {
    fn from(model: Model) -> Self {
        recicla_core::User {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            course: model.course,
            semester: model.semester,
            class_id: model.class_id,
            shift: model.shift,
            unit_id: model.unit_id,
            created_at: model.created_at,
        }
    }
}
