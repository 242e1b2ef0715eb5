//! Statistics endpoint

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use recicla_core::aggregate;
use tracing::debug;

use crate::{
    context::DeliveriesContext,
    errors::{store_failure, RestResult},
    models::StatsQuery,
};

/// Summarize deliveries by type, unit and class
///
/// One store fetch per request, then the pure reporter. Nothing is cached.
pub async fn get_statistics(
    State(ctx): State<DeliveriesContext>,
    query: Result<Query<StatsQuery>, QueryRejection>,
) -> RestResult<impl IntoResponse> {
    let Query(query) = query?;
    let filter = query.into_filter(Utc::now())?;

    let records = ctx
        .repositories
        .delivery_repository()
        .list(&filter.to_delivery_filter())
        .await
        .map_err(store_failure("Erro ao buscar estatísticas"))?;

    let result = aggregate(&records, &filter);
    debug!(
        "Aggregated {} deliveries into {} kg across {} classes",
        records.len(),
        result.total_mass,
        result.top_classes.len()
    );

    Ok(Json(result))
}
