use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::http::stack_check::validators::{CheckStackValidator, MIN_STACK_SIZE};
use axum::extract::State;
use stackcheck_core::domain::{
    stack_check::{entities::StackCheckReport, ports::StackCheckService},
    supplement::helpers::dedupe_names,
};

#[utoipa::path(
    post,
    path = "/check",
    tag = "stack-check",
    summary = "Check a supplement stack",
    description = "Resolves every supplement, classifies each pair and attaches typical use and dosage.",
    request_body = CheckStackValidator,
    responses(
        (status = 200, body = StackCheckReport),
        (status = 400, description = "Fewer than 2 or more than 10 distinct supplements")
    ),
)]
pub async fn check_stack(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CheckStackValidator>,
) -> Result<Response<StackCheckReport>, ApiError> {
    let names = dedupe_names(payload.stack);
    if names.len() < MIN_STACK_SIZE {
        return Err(ApiError::BadRequest(
            "stack must contain at least 2 distinct supplements".to_string(),
        ));
    }

    let report = state.service.check_stack(names).await;

    Ok(Response::OK(report))
}
