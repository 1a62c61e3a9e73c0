use crate::application::http::server::api_entities::api_error::{ApiError, ValidateQuery};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::http::supplement::validators::SupplementNameQuery;
use axum::extract::State;
use stackcheck_core::domain::supplement::{
    entities::AlternativeSuggestion, ports::SupplementService,
};

#[utoipa::path(
    get,
    path = "/alternatives",
    tag = "supplement",
    summary = "Suggest an alternative",
    params(SupplementNameQuery),
    responses(
        (status = 200, body = AlternativeSuggestion)
    ),
)]
pub async fn get_alternatives(
    State(state): State<AppState>,
    ValidateQuery(query): ValidateQuery<SupplementNameQuery>,
) -> Result<Response<AlternativeSuggestion>, ApiError> {
    Ok(Response::OK(state.service.get_alternative(query.name)))
}
