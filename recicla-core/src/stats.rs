//! Delivery aggregation reporter
//!
//! Summarizes a snapshot of delivery records into the totals shown on the
//! dashboard: overall mass, mass per waste type, mass per unit and the
//! classes with the most kilograms delivered. The reporter is a pure
//! function; callers fetch the records and pass them in explicitly.
//!
//! Category accumulation uses insertion-ordered maps. The ranking of classes
//! relies on that order: classes with equal mass keep the order in which
//! their first delivery appeared in the input.

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::delivery::{Delivery, DeliveryFilter};
use crate::error::CoreError;
use crate::types::WasteType;

/// Maximum number of entries in [`AggregationResult::top_classes`]
pub const TOP_CLASSES_LIMIT: usize = 5;

/// Time window selector accepted by the statistics endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsPeriod {
    /// No lower bound
    #[default]
    Total,
    /// Last 7 days
    #[serde(alias = "semanal")]
    Weekly,
    /// Last 30 days
    #[serde(alias = "mensal")]
    Monthly,
}

impl StatsPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatsPeriod::Total => "total",
            StatsPeriod::Weekly => "weekly",
            StatsPeriod::Monthly => "monthly",
        }
    }

    /// Inclusive lower bound of the window ending at `now`
    pub fn since(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            StatsPeriod::Total => None,
            StatsPeriod::Weekly => Some(now - Duration::days(7)),
            StatsPeriod::Monthly => Some(now - Duration::days(30)),
        }
    }
}

impl fmt::Display for StatsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatsPeriod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "total" => Ok(StatsPeriod::Total),
            "weekly" | "semanal" => Ok(StatsPeriod::Weekly),
            "monthly" | "mensal" => Ok(StatsPeriod::Monthly),
            _ => Err(CoreError::InvalidPeriod(s.to_string())),
        }
    }
}

/// Restriction applied to the records before aggregation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsFilter {
    /// Exact, case-sensitive unit match
    pub unit_id: Option<String>,
    /// Inclusive lower bound on `created_at`
    pub since: Option<DateTime<Utc>>,
}

impl StatsFilter {
    pub fn for_period(unit_id: Option<String>, period: StatsPeriod, now: DateTime<Utc>) -> Self {
        Self {
            unit_id,
            since: period.since(now),
        }
    }

    pub fn matches(&self, delivery: &Delivery) -> bool {
        self.unit_id.as_deref().map_or(true, |u| delivery.unit_id == u)
            && self.since.map_or(true, |since| delivery.created_at >= since)
    }

    /// Equivalent repository filter, so the store can pre-filter the snapshot
    pub fn to_delivery_filter(&self) -> DeliveryFilter {
        DeliveryFilter {
            unit_id: self.unit_id.clone(),
            created_since: self.since,
            ..Default::default()
        }
    }
}

/// Cumulative mass delivered by one class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassTotal {
    #[serde(rename = "turma")]
    pub class_id: String,
    #[serde(rename = "quantidade")]
    pub mass: f64,
}

/// Summary produced by [`aggregate`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregationResult {
    #[serde(rename = "totalReciclado")]
    pub total_mass: f64,
    #[serde(rename = "porTipo")]
    pub mass_by_type: IndexMap<WasteType, f64>,
    #[serde(rename = "porUnidade")]
    pub mass_by_unit: IndexMap<String, f64>,
    #[serde(rename = "topTurmas")]
    pub top_classes: Vec<ClassTotal>,
}

/// Aggregate the records that pass `filter`.
///
/// Total over any finite input, including an empty one. Maps only contain
/// keys observed in the filtered input.
pub fn aggregate<'a, I>(records: I, filter: &StatsFilter) -> AggregationResult
where
    I: IntoIterator<Item = &'a Delivery>,
{
    let mut total_mass = 0.0;
    let mut mass_by_type: IndexMap<WasteType, f64> = IndexMap::new();
    let mut mass_by_unit: IndexMap<String, f64> = IndexMap::new();
    let mut mass_by_class: IndexMap<&str, f64> = IndexMap::new();

    for delivery in records.into_iter().filter(|d| filter.matches(d)) {
        total_mass += delivery.quantity;
        *mass_by_type.entry(delivery.waste_type).or_insert(0.0) += delivery.quantity;
        *mass_by_unit.entry(delivery.unit_id.clone()).or_insert(0.0) += delivery.quantity;
        *mass_by_class.entry(delivery.class_id.as_str()).or_insert(0.0) += delivery.quantity;
    }

    let mut ranked: Vec<(&str, f64)> = mass_by_class.into_iter().collect();
    // `sort_by` is stable: equal masses stay in first-seen order
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(TOP_CLASSES_LIMIT);

    AggregationResult {
        total_mass,
        mass_by_type,
        mass_by_unit,
        top_classes: ranked
            .into_iter()
            .map(|(class_id, mass)| ClassTotal {
                class_id: class_id.to_string(),
                mass,
            })
            .collect(),
    }
}
