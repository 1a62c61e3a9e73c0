use super::handlers::autosuggest::{__path_autosuggest, autosuggest};
use super::handlers::get_alternatives::{__path_get_alternatives, get_alternatives};
use super::handlers::get_related_products::{__path_get_related_products, get_related_products};
use super::handlers::get_supplement_info::{__path_get_supplement_info, get_supplement_info};
use super::handlers::parse_stack_text::{__path_parse_stack_text, parse_stack_text};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(
    autosuggest,
    get_supplement_info,
    get_alternatives,
    get_related_products,
    parse_stack_text
))]
pub struct SupplementApiDoc;

pub fn supplement_routes(root_path: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("{}/api/autosuggest", root_path), get(autosuggest))
        .route(
            &format!("{}/api/supplements/info", root_path),
            get(get_supplement_info),
        )
        .route(
            &format!("{}/api/alternatives", root_path),
            get(get_alternatives),
        )
        .route(
            &format!("{}/api/related-products/{{supplement}}", root_path),
            get(get_related_products),
        )
        .route(
            &format!("{}/api/parse-stack-text", root_path),
            post(parse_stack_text),
        )
}
