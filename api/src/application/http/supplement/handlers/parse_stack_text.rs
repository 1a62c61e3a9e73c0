use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::supplement::validators::ParseStackTextValidator;
use serde::{Deserialize, Serialize};
use stackcheck_core::domain::supplement::helpers::parse_stack_text as split_stack_text;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ParseStackTextResponse {
    pub supplements: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/parse-stack-text",
    tag = "supplement",
    summary = "Split pasted text into supplement names",
    request_body = ParseStackTextValidator,
    responses(
        (status = 200, body = ParseStackTextResponse)
    ),
)]
pub async fn parse_stack_text(
    ValidateJson(payload): ValidateJson<ParseStackTextValidator>,
) -> Result<Response<ParseStackTextResponse>, ApiError> {
    Ok(Response::OK(ParseStackTextResponse {
        supplements: split_stack_text(&payload.text),
    }))
}
