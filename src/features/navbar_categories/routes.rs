use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::navbar_categories::handlers;
use crate::features::navbar_categories::services::NavbarCategoryService;

/// Create routes for navbar categories
///
/// Reads are public; writes require an admin token.
pub fn routes(service: Arc<NavbarCategoryService>) -> Router {
    Router::new()
        .route(
            "/api/navbarcategories",
            get(handlers::list_navbar_categories)
                .post(handlers::create_navbar_category)
                .put(handlers::update_navbar_category_by_body)
                .delete(handlers::delete_navbar_category_by_body),
        )
        .route(
            "/api/navbarcategories/{id}",
            get(handlers::get_navbar_category)
                .put(handlers::update_navbar_category)
                .delete(handlers::delete_navbar_category),
        )
        .with_state(service)
}
