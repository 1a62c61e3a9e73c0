use crate::application::http::server::api_entities::response::Response;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LiveResponse {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    summary = "Liveness probe",
    responses(
        (status = 200, body = LiveResponse)
    ),
)]
pub async fn live() -> Response<LiveResponse> {
    Response::OK(LiveResponse {
        status: "UP".to_string(),
    })
}
