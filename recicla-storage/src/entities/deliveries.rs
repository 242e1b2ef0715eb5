//! Delivery entity: one logged drop-off of recyclable material

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deliveries")]
pub struct Model {
    /// UUID v4
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Kilograms
    pub quantity: f64,
    pub waste_type: WasteType,
    pub class_id: String,
    pub course: String,
    pub semester: String,
    pub shift: Shift,
    pub unit_id: String,
    pub user_id: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Stored waste type
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum WasteType {
    #[sea_orm(string_value = "aluminio")]
    Aluminum,
    #[sea_orm(string_value = "vidro")]
    Glass,
    #[sea_orm(string_value = "pano")]
    Cloth,
    #[sea_orm(string_value = "pet")]
    Pet,
}

/// Stored class shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Shift {
    #[sea_orm(string_value = "matutino")]
    Morning,
    #[sea_orm(string_value = "vespertino")]
    Afternoon,
    #[sea_orm(string_value = "noturno")]
    Evening,
    #[sea_orm(string_value = "integral")]
    FullTime,
}

impl From<recicla_core::WasteType> for WasteType {
    fn from(value: recicla_core::WasteType) -> Self {
        match value {
            recicla_core::WasteType::Aluminum => WasteType::Aluminum,
            recicla_core::WasteType::Glass => WasteType::Glass,
            recicla_core::WasteType::Cloth => WasteType::Cloth,
            recicla_core::WasteType::Pet => WasteType::Pet,
        }
    }
}

impl From<WasteType> for recicla_core::WasteType {
    fn from(value: WasteType) -> Self {
        match value {
            WasteType::Aluminum => recicla_core::WasteType::Aluminum,
            WasteType::Glass => recicla_core::WasteType::Glass,
            WasteType::Cloth => recicla_core::WasteType::Cloth,
            WasteType::Pet => recicla_core::WasteType::Pet,
        }
    }
}

impl From<recicla_core::Shift> for Shift {
    fn from(value: recicla_core::Shift) -> Self {
        match value {
            recicla_core::Shift::Morning => Shift::Morning,
            recicla_core::Shift::Afternoon => Shift::Afternoon,
            recicla_core::Shift::Evening => Shift::Evening,
            recicla_core::Shift::FullTime => Shift::FullTime,
        }
    }
}

impl From<Shift> for recicla_core::Shift {
    fn from(value: Shift) -> Self {
        match value {
            Shift::Morning => recicla_core::Shift::Morning,
            Shift::Afternoon => recicla_core::Shift::Afternoon,
            Shift::Evening => recicla_core::Shift::Evening,
            Shift::FullTime => recicla_core::Shift::FullTime,
        }
    }
}

impl From<Model> for recicla_core::Delivery {
    fn from(model: Model) -> Self {
        recicla_core::Delivery {
            id: model.id,
            quantity: model.quantity,
            waste_type: model.waste_type.into(),
            class_id: model.class_id,
            course: model.course,
            semester: model.semester,
            shift: model.shift.into(),
            unit_id: model.unit_id,
            user_id: model.user_id,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveEnum;

    #[test]
    fn test_stored_values_match_wire_names() {
        for waste_type in recicla_core::WasteType::all() {
            let stored: WasteType = (*waste_type).into();
            assert_eq!(stored.to_value(), waste_type.as_str());
            assert_eq!(recicla_core::WasteType::from(stored), *waste_type);
        }

        let shift: Shift = recicla_core::Shift::FullTime.into();
        assert_eq!(shift.to_value(), "integral");
    }
}
