//! Delivery endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use recicla_interfaces::DatabaseError;
use recicla_web::{AuthContext, WebError};
use tracing::{debug, info};
use validator::Validate;

use crate::{
    context::DeliveriesContext,
    errors::{store_failure, RestResult},
    models::{CreateDeliveryRequest, DeliveryListQuery},
};

/// List deliveries matching the query, newest first, each with its user
pub async fn list_deliveries(
    State(ctx): State<DeliveriesContext>,
    query: Result<Query<DeliveryListQuery>, QueryRejection>,
) -> RestResult<impl IntoResponse> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    debug!("Listing deliveries with filter {:?}", filter);

    let listings = ctx
        .repositories
        .delivery_repository()
        .list_with_users(&filter)
        .await
        .map_err(store_failure("Erro ao buscar entregas"))?;

    Ok(Json(listings))
}

/// Register a delivery for the user named in the body or, failing that, the logged-in user
pub async fn create_delivery(
    State(ctx): State<DeliveriesContext>,
    auth: AuthContext,
    payload: Result<Json<CreateDeliveryRequest>, JsonRejection>,
) -> RestResult<impl IntoResponse> {
    let Json(request) = payload?;
    request.validate()?;

    let user_id = request
        .requested_user_id()
        .map(str::to_string)
        .or(auth.user_id)
        .ok_or_else(|| WebError::unauthorized("Usuário não autenticado"))?;

    let new_delivery = request.into_new_delivery(Some(user_id))?;

    let delivery = match ctx.repositories.delivery_repository().create(new_delivery).await {
        Ok(delivery) => delivery,
        Err(DatabaseError::Constraint { .. }) => {
            return Err(
                WebError::validation_single(Some("userId".to_string()), "Usuário não encontrado", "exists").into(),
            )
        }
        Err(e) => return Err(store_failure("Erro ao processar a requisição")(e)),
    };

    info!(
        "Registered delivery {}: {} kg of {} for class {}",
        delivery.id, delivery.quantity, delivery.waste_type, delivery.class_id
    );

    Ok((StatusCode::CREATED, Json(delivery)))
}
