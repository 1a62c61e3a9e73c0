use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::State;
use stackcheck_core::domain::health::{entities::DatabaseHealthStatus, ports::HealthCheckService};
use tracing::error;

#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    summary = "Readiness probe",
    description = "Pings the database and reports the round-trip latency.",
    responses(
        (status = 200, body = DatabaseHealthStatus),
        (status = 503, description = "Database unreachable")
    ),
)]
pub async fn ready(
    State(state): State<AppState>,
) -> Result<Response<DatabaseHealthStatus>, ApiError> {
    state.service.readness().await.map(Response::OK).map_err(|e| {
        error!("readiness check failed: {}", e);
        ApiError::ServiceUnavailable("Database unavailable".to_string())
    })
}
