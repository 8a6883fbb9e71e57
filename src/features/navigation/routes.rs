use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::navigation::handlers;
use crate::features::navigation::services::NavigationService;

/// Create routes for the navigation menu (public)
pub fn routes(service: Arc<NavigationService>) -> Router {
    Router::new()
        .route("/api/navigation", get(handlers::get_navigation))
        .with_state(service)
}
