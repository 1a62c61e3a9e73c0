use crate::application::http::{
    health::router::HealthApiDoc, stack_check::router::StackCheckApiDoc,
    supplement::router::SupplementApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "StackCheck API"
    ),
    nest(
        (path = "/api", api = StackCheckApiDoc),
        (path = "/api", api = SupplementApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
