use super::handlers::check_stack::{__path_check_stack, check_stack};
use super::handlers::get_interaction::{__path_get_interaction, get_interaction};
use super::handlers::get_recent::{__path_get_recent, get_recent};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(check_stack, get_interaction, get_recent))]
pub struct StackCheckApiDoc;

pub fn stack_check_routes(root_path: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("{}/api/check", root_path), post(check_stack))
        .route(
            &format!("{}/api/interactions", root_path),
            get(get_interaction),
        )
        .route(&format!("{}/api/recent", root_path), get(get_recent))
}
