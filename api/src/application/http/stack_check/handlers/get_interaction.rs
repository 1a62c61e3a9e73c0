use crate::application::http::server::api_entities::api_error::{ApiError, ValidateQuery};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::http::stack_check::validators::InteractionQuery;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stackcheck_core::domain::interaction::{
    ports::InteractionService, value_objects::PairInteraction,
};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetInteractionResponse {
    #[serde(flatten)]
    pub interaction: PairInteraction,
    pub last_updated: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/interactions",
    tag = "stack-check",
    summary = "Look up a single pair",
    description = "Returns the cached classification for the pair, refreshing it when missing or stale.",
    params(InteractionQuery),
    responses(
        (status = 200, body = GetInteractionResponse),
        (status = 400, description = "Missing supplement name")
    ),
)]
pub async fn get_interaction(
    State(state): State<AppState>,
    ValidateQuery(query): ValidateQuery<InteractionQuery>,
) -> Result<Response<GetInteractionResponse>, ApiError> {
    let record = state
        .service
        .get_or_refresh(query.a.clone(), query.b.clone())
        .await;

    Ok(Response::OK(GetInteractionResponse {
        interaction: PairInteraction::new(query.a.trim(), query.b.trim(), &record),
        last_updated: record.last_updated,
    }))
}
