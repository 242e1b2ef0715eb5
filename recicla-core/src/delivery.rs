//! Delivery records: one logged drop-off of recyclable material

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Shift, WasteType};
use crate::user::UserSummary;

/// A persisted delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    /// Opaque identifier (UUID v4)
    pub id: String,
    /// Kilograms, always strictly positive
    #[serde(rename = "quantidade")]
    pub quantity: f64,
    #[serde(rename = "tipo")]
    pub waste_type: WasteType,
    /// Student cohort (turma)
    #[serde(rename = "turma")]
    pub class_id: String,
    #[serde(rename = "curso")]
    pub course: String,
    #[serde(rename = "semestre")]
    pub semester: String,
    #[serde(rename = "turno")]
    pub shift: Shift,
    /// Campus location (unidade)
    #[serde(rename = "unidade")]
    pub unit_id: String,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated delivery ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewDelivery {
    pub quantity: f64,
    pub waste_type: WasteType,
    pub class_id: String,
    pub course: String,
    pub semester: String,
    pub shift: Shift,
    pub unit_id: String,
    pub user_id: Option<String>,
}

/// Delivery together with the registering user, as returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryListing {
    #[serde(flatten)]
    pub delivery: Delivery,
    pub user: Option<UserSummary>,
}

/// Exact-match filter criteria for delivery queries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryFilter {
    pub waste_type: Option<WasteType>,
    pub unit_id: Option<String>,
    pub class_id: Option<String>,
    pub course: Option<String>,
    pub user_id: Option<String>,
    /// Inclusive lower bound on `created_at`
    pub created_since: Option<DateTime<Utc>>,
}

impl DeliveryFilter {
    /// Check a record against every set criterion
    pub fn matches(&self, delivery: &Delivery) -> bool {
        self.waste_type.map_or(true, |t| delivery.waste_type == t)
            && self.unit_id.as_deref().map_or(true, |u| delivery.unit_id == u)
            && self.class_id.as_deref().map_or(true, |c| delivery.class_id == c)
            && self.course.as_deref().map_or(true, |c| delivery.course == c)
            && self
                .user_id
                .as_deref()
                .map_or(true, |id| delivery.user_id.as_deref() == Some(id))
            && self.created_since.map_or(true, |since| delivery.created_at >= since)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample() -> Delivery {
        Delivery {
            id: "d-1".to_string(),
            quantity: 2.5,
            waste_type: WasteType::Aluminum,
            class_id: "SI2023".to_string(),
            course: "Sistemas de Informação".to_string(),
            semester: "3".to_string(),
            shift: Shift::Evening,
            unit_id: "alcindo_cacela".to_string(),
            user_id: Some("u-1".to_string()),
            created_at: Utc.with_ymd_and_hms(2025, 1, 15, 14, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_delivery_wire_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["quantidade"], 2.5);
        assert_eq!(json["tipo"], "aluminio");
        assert_eq!(json["turma"], "SI2023");
        assert_eq!(json["turno"], "noturno");
        assert_eq!(json["unidade"], "alcindo_cacela");
        assert_eq!(json["userId"], "u-1");
        assert_eq!(json["createdAt"], "2025-01-15T14:30:00Z");
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(DeliveryFilter::default().matches(&sample()));
    }

    #[test]
    fn test_filter_is_exact_and_case_sensitive() {
        let filter = DeliveryFilter {
            unit_id: Some("Alcindo_Cacela".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&sample()));
    }

    #[test]
    fn test_created_since_is_inclusive() {
        let delivery = sample();
        let at = DeliveryFilter {
            created_since: Some(delivery.created_at),
            ..Default::default()
        };
        let after = DeliveryFilter {
            created_since: Some(delivery.created_at + Duration::seconds(1)),
            ..Default::default()
        };
        assert!(at.matches(&delivery));
        assert!(!after.matches(&delivery));
    }

    #[test]
    fn test_user_filter_rejects_anonymous_records() {
        let mut delivery = sample();
        delivery.user_id = None;
        let filter = DeliveryFilter {
            user_id: Some("u-1".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&delivery));
    }
}
