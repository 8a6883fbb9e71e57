use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::files::handlers::serve_file;
use crate::features::files::services::FileService;

/// Create routes for the files feature (public)
pub fn routes(file_service: Arc<FileService>) -> Router {
    Router::new()
        .route("/api/files/{id}", get(serve_file))
        .with_state(file_service)
}
