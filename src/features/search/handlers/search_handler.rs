use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::search::dtos::{SearchQuery, SearchResult};
use crate::features::search::services::SearchService;
use crate::shared::types::ApiResponse;

/// Search navbar categories, categories, subcategories and products by name
#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Deduplicated matches, products first", body = ApiResponse<Vec<SearchResult>>),
        (status = 500, description = "Search failed")
    ),
    tag = "search"
)]
pub async fn search(
    State(service): State<Arc<SearchService>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<SearchResult>>>> {
    let results = service.search(query.q.as_deref().unwrap_or_default()).await?;
    Ok(Json(ApiResponse::list(results)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::features::search::routes::routes;
    use axum::http::StatusCode;
    use axum_test::TestServer;

    fn server() -> TestServer {
        let service = Arc::new(SearchService::new(lazy_test_pool()));
        TestServer::new(routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_missing_query_returns_empty_list() {
        let response = server().get("/api/search").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"], serde_json::json!([]));
        assert_eq!(body["meta"]["total"], 0);
    }

    #[tokio::test]
    async fn test_blank_query_returns_empty_list() {
        let response = server().get("/api/search").add_query_param("q", "  ").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_server_error() {
        let response = server().get("/api/search").add_query_param("q", "sensor").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
