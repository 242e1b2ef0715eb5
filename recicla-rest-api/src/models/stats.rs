//! Statistics query model

use chrono::{DateTime, Utc};
use recicla_core::{CoreError, StatsFilter, StatsPeriod};
use serde::Deserialize;

use super::common::non_empty;

/// Query string of `GET /estatisticas`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsQuery {
    #[serde(alias = "unitId")]
    pub unidade: Option<String>,

    #[serde(alias = "period")]
    pub periodo: Option<String>,
}

impl StatsQuery {
    pub fn period(&self) -> Result<StatsPeriod, CoreError> {
        match self.periodo.as_deref() {
            None | Some("") => Ok(StatsPeriod::default()),
            Some(value) => value.parse(),
        }
    }

    /// Resolve the query against the given clock reading
    pub fn into_filter(self, now: DateTime<Utc>) -> Result<StatsFilter, CoreError> {
        let period = self.period()?;
        Ok(StatsFilter::for_period(non_empty(self.unidade), period, now))
    }
}
