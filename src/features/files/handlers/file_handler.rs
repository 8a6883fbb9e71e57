use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::files::services::FileService;
use crate::shared::validation::parse_object_id;

/// Serve a stored image file
#[utoipa::path(
    get,
    path = "/api/files/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "Raw file content"),
        (status = 400, description = "Malformed file id"),
        (status = 404, description = "File not found")
    )
)]
pub async fn serve_file(
    State(service): State<Arc<FileService>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_object_id("file id", &id)?;
    let file = service.get(id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&file.filename),
            ),
            (
                header::CACHE_CONTROL,
                "public, max-age=31536000, immutable".to_string(),
            ),
        ],
        file.data,
    ))
}

/// `inline` disposition naming the stored file, with characters that would
/// break the quoted header value dropped
fn content_disposition(filename: &str) -> String {
    let name: String = filename
        .chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .collect();
    format!("inline; filename=\"{}\"", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::features::files::routes::routes;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use sqlx::PgPool;

    #[test]
    fn test_content_disposition_quotes_filename() {
        assert_eq!(
            content_disposition("sensor.png"),
            "inline; filename=\"sensor.png\""
        );
        assert_eq!(
            content_disposition("a\"b\r\n.png"),
            "inline; filename=\"ab.png\""
        );
    }

    #[tokio::test]
    async fn test_malformed_id_is_bad_request() {
        let server = TestServer::new(routes(Arc::new(FileService::new(lazy_test_pool())))).unwrap();
        let response = server.get("/api/files/not-an-id").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_serves_stored_bytes_with_headers(pool: PgPool) {
        let id: uuid::Uuid = sqlx::query_scalar(
            "INSERT INTO files (filename, content_type, data) VALUES ('sensor.png', 'image/png', $1) RETURNING id",
        )
        .bind(vec![1u8, 2, 3])
        .fetch_one(&pool)
        .await
        .unwrap();
        let server = TestServer::new(routes(Arc::new(FileService::new(pool)))).unwrap();

        let response = server.get(&format!("/api/files/{}", id)).await;

        response.assert_status_ok();
        assert_eq!(response.header(header::CONTENT_TYPE), "image/png");
        assert_eq!(
            response.header(header::CONTENT_DISPOSITION),
            "inline; filename=\"sensor.png\""
        );
        assert_eq!(response.as_bytes().to_vec(), vec![1u8, 2, 3]);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_unknown_file_is_not_found(pool: PgPool) {
        let server = TestServer::new(routes(Arc::new(FileService::new(pool)))).unwrap();
        let response = server.get(&format!("/api/files/{}", uuid::Uuid::new_v4())).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}
