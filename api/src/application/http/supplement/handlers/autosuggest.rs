use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::http::supplement::validators::AutosuggestQuery;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use stackcheck_core::domain::supplement::{entities::CanonicalAgent, ports::SupplementService};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AutosuggestResponse {
    pub results: Vec<CanonicalAgent>,
}

#[utoipa::path(
    get,
    path = "/autosuggest",
    tag = "supplement",
    summary = "Suggest supplement names",
    params(AutosuggestQuery),
    responses(
        (status = 200, body = AutosuggestResponse)
    ),
)]
pub async fn autosuggest(
    State(state): State<AppState>,
    Query(query): Query<AutosuggestQuery>,
) -> Response<AutosuggestResponse> {
    Response::OK(AutosuggestResponse {
        results: state.service.autosuggest(query.q).await,
    })
}
