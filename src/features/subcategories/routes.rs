use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::subcategories::handlers;
use crate::features::subcategories::services::SubcategoryService;

/// Create routes for the subcategories feature
///
/// Reads are public; writes require an admin token.
pub fn routes(service: Arc<SubcategoryService>) -> Router {
    Router::new()
        .route(
            "/api/subcategories",
            get(handlers::list_subcategories).post(handlers::create_subcategory),
        )
        .route(
            "/api/subcategories/{id}",
            get(handlers::get_subcategory)
                .put(handlers::update_subcategory)
                .delete(handlers::delete_subcategory),
        )
        .with_state(service)
}
