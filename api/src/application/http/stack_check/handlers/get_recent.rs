use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use stackcheck_core::domain::stack_check::{entities::RecentStack, ports::StackCheckService};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetRecentResponse {
    pub recent: Vec<RecentStack>,
}

#[utoipa::path(
    get,
    path = "/recent",
    tag = "stack-check",
    summary = "Recently checked stacks",
    description = "Process-local history of the latest stack checks, newest first.",
    responses(
        (status = 200, body = GetRecentResponse)
    ),
)]
pub async fn get_recent(State(state): State<AppState>) -> Response<GetRecentResponse> {
    Response::OK(GetRecentResponse {
        recent: state.service.recent_stacks(),
    })
}
