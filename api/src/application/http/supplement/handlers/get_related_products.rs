use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use stackcheck_core::domain::supplement::ports::SupplementService;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RelatedProductsResponse {
    pub related: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/related-products/{supplement}",
    tag = "supplement",
    summary = "Related products",
    description = "Products commonly bought with or instead of the supplement.",
    params(
        ("supplement" = String, Path, description = "Supplement name")
    ),
    responses(
        (status = 200, body = RelatedProductsResponse)
    ),
)]
pub async fn get_related_products(
    Path(supplement): Path<String>,
    State(state): State<AppState>,
) -> Response<RelatedProductsResponse> {
    Response::OK(RelatedProductsResponse {
        related: state.service.get_related_products(supplement),
    })
}
