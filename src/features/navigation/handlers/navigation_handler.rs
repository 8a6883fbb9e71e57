use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::navigation::dtos::NavigationGroup;
use crate::features::navigation::services::NavigationService;
use crate::shared::types::ApiResponse;

/// Navigation menu: navbar categories with their categories and subcategories
#[utoipa::path(
    get,
    path = "/api/navigation",
    responses(
        (status = 200, description = "Three-level navigation tree", body = ApiResponse<Vec<NavigationGroup>>),
        (status = 500, description = "Failed to load one of the levels")
    ),
    tag = "navigation"
)]
pub async fn get_navigation(
    State(service): State<Arc<NavigationService>>,
) -> Result<Json<ApiResponse<Vec<NavigationGroup>>>> {
    let tree = service.tree().await?;
    Ok(Json(ApiResponse::list(tree)))
}
