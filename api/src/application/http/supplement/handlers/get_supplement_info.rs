use crate::application::http::server::api_entities::api_error::{ApiError, ValidateQuery};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::http::supplement::validators::SupplementNameQuery;
use axum::extract::State;
use stackcheck_core::domain::supplement::{entities::SupplementInfo, ports::SupplementService};

#[utoipa::path(
    get,
    path = "/supplements/info",
    tag = "supplement",
    summary = "Supplement details",
    description = "Canonical name, aliases, description, typical use and typical dosage.",
    params(SupplementNameQuery),
    responses(
        (status = 200, body = SupplementInfo),
        (status = 404, description = "Supplement not found")
    ),
)]
pub async fn get_supplement_info(
    State(state): State<AppState>,
    ValidateQuery(query): ValidateQuery<SupplementNameQuery>,
) -> Result<Response<SupplementInfo>, ApiError> {
    let info = state
        .service
        .get_supplement_info(query.name)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(info))
}
