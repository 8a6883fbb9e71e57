use sqlx::{PgConnection, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::files::models::File;
use crate::shared::constants::INTERNAL_FILE_PREFIX;

/// Service for stored image files
pub struct FileService {
    pool: PgPool,
}

impl FileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load a file with its content
    pub async fn get(&self, id: Uuid) -> Result<File> {
        sqlx::query_as::<_, File>(
            r#"
            SELECT id, filename, content_type, data
            FROM files
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("File not found".to_string()))
    }

    /// Check whether a file record exists
    pub async fn exists(&self, id: Uuid) -> Result<bool> {
        let found: Option<Uuid> = sqlx::query_scalar("SELECT id FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Normalize an image reference to the internal serving path.
    ///
    /// Values already under the internal prefix are kept. A bare file id that
    /// names a stored file becomes `/api/files/{id}`; anything else is kept
    /// as given.
    pub async fn resolve_image_reference(&self, image: String) -> Result<String> {
        if image.starts_with(INTERNAL_FILE_PREFIX) {
            return Ok(image);
        }

        match Uuid::parse_str(image.trim()) {
            Ok(id) if self.exists(id).await? => {
                debug!("Rewriting image reference {} to internal path", id);
                Ok(internal_file_path(id))
            }
            _ => Ok(image),
        }
    }
}

/// Delete a file record inside the caller's transaction.
///
/// Returns whether a record was removed.
pub async fn delete_file_record(conn: &mut PgConnection, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM files WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;

    let deleted = result.rows_affected() > 0;
    if deleted {
        info!("File deleted: id={}", id);
    }
    Ok(deleted)
}

pub fn internal_file_path(id: Uuid) -> String {
    format!("{}{}", INTERNAL_FILE_PREFIX, id)
}

/// File id referenced by an internal image path, if any.
///
/// Only values starting with the internal prefix qualify; the id is the last
/// path segment.
pub fn internal_file_id(image: &str) -> Option<Uuid> {
    if !image.starts_with(INTERNAL_FILE_PREFIX) {
        return None;
    }

    image
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| Uuid::parse_str(segment).ok())
}
