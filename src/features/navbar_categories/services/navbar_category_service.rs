use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::files::services::{delete_file_record, internal_file_id};
use crate::features::files::FileService;
use crate::features::navbar_categories::dtos::{
    CreateNavbarCategoryDto, NavbarCategoryResponseDto, UpdateNavbarCategoryDto,
};
use crate::features::navbar_categories::models::NavbarCategory;
use crate::shared::slug::slug_from_name;
use crate::shared::validation::non_empty;

const COLLECTION: &str = "navbar category";

/// Service for navbar category operations
pub struct NavbarCategoryService {
    pool: PgPool,
    files: Arc<FileService>,
}

impl NavbarCategoryService {
    pub fn new(pool: PgPool, files: Arc<FileService>) -> Self {
        Self { pool, files }
    }

    /// All navbar categories ordered by name
    pub async fn list_models(&self) -> Result<Vec<NavbarCategory>> {
        sqlx::query_as::<_, NavbarCategory>(
            r#"
            SELECT id, name, slug, image, created_at, updated_at
            FROM navbar_categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, COLLECTION))
    }

    pub async fn list(&self) -> Result<Vec<NavbarCategoryResponseDto>> {
        let categories = self.list_models().await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<NavbarCategoryResponseDto> {
        let category = sqlx::query_as::<_, NavbarCategory>(
            r#"
            SELECT id, name, slug, image, created_at, updated_at
            FROM navbar_categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, COLLECTION))?;

        category
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Navbar category not found".to_string()))
    }

    pub async fn create(&self, dto: CreateNavbarCategoryDto) -> Result<NavbarCategoryResponseDto> {
        let slug = slug_from_name(&dto.name)?;
        let image = match non_empty(dto.image) {
            Some(image) => Some(self.files.resolve_image_reference(image).await?),
            None => None,
        };

        let category = sqlx::query_as::<_, NavbarCategory>(
            r#"
            INSERT INTO navbar_categories (name, slug, image)
            VALUES ($1, $2, $3)
            RETURNING id, name, slug, image, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(&slug)
        .bind(&image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, COLLECTION))?;

        tracing::info!(
            "Navbar category created: id={}, slug={}",
            category.id,
            category.slug
        );

        Ok(category.into())
    }

    pub async fn update(
        &self,
        id: Uuid,
        dto: UpdateNavbarCategoryDto,
    ) -> Result<NavbarCategoryResponseDto> {
        let mut tx = self.pool.begin().await?;

        let mut category = sqlx::query_as::<_, NavbarCategory>(
            r#"
            SELECT id, name, slug, image, created_at, updated_at
            FROM navbar_categories
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, COLLECTION))?
        .ok_or_else(|| AppError::NotFound("Navbar category not found".to_string()))?;

        dto.apply(&mut category)?;

        let category = sqlx::query_as::<_, NavbarCategory>(
            r#"
            UPDATE navbar_categories
            SET name = $2, slug = $3, image = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, slug, image, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.image)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, COLLECTION))?;

        tx.commit().await?;

        tracing::info!("Navbar category updated: id={}", category.id);
        Ok(category.into())
    }

    /// Delete a navbar category and the stored image it points at, if any.
    ///
    /// Child categories and products are left in place.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let category = sqlx::query_as::<_, NavbarCategory>(
            r#"
            DELETE FROM navbar_categories
            WHERE id = $1
            RETURNING id, name, slug, image, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, COLLECTION))?
        .ok_or_else(|| AppError::NotFound("Navbar category not found".to_string()))?;

        if let Some(file_id) = owned_image_file(&category) {
            delete_file_record(&mut *tx, file_id).await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Navbar category deleted: id={}, slug={}",
            category.id,
            category.slug
        );
        Ok(())
    }
}

/// Stored file the category's image points at
fn owned_image_file(category: &NavbarCategory) -> Option<Uuid> {
    category.image.as_deref().and_then(internal_file_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn with_image(image: Option<String>) -> NavbarCategory {
        NavbarCategory {
            id: Uuid::new_v4(),
            name: "Sensors".to_string(),
            slug: "sensors".to_string(),
            image,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_internal_image_marks_file_for_removal() {
        let file_id = Uuid::new_v4();
        let category = with_image(Some(format!("/api/files/{}", file_id)));
        assert_eq!(owned_image_file(&category), Some(file_id));
    }

    #[test]
    fn test_external_or_missing_image_leaves_files_alone() {
        assert_eq!(owned_image_file(&with_image(None)), None);
        assert_eq!(
            owned_image_file(&with_image(Some(
                "https://cdn.example/sensors.png".to_string()
            ))),
            None
        );
        assert_eq!(
            owned_image_file(&with_image(Some(Uuid::new_v4().to_string()))),
            None
        );
    }

    async fn seed_file(pool: &PgPool) -> Uuid {
        sqlx::query_scalar(
            "INSERT INTO files (filename, content_type, data) VALUES ('sensors.png', 'image/png', $1) RETURNING id",
        )
        .bind(vec![0x89u8, 0x50, 0x4e, 0x47])
        .fetch_one(pool)
        .await
        .unwrap()
    }

    async fn seed_category(pool: &PgPool, image: Option<String>) -> Uuid {
        sqlx::query_scalar(
            "INSERT INTO navbar_categories (name, slug, image) VALUES ('Sensors', 'sensors', $1) RETURNING id",
        )
        .bind(image)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    async fn file_count(pool: &PgPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM files")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn service(pool: &PgPool) -> NavbarCategoryService {
        NavbarCategoryService::new(pool.clone(), Arc::new(FileService::new(pool.clone())))
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_removes_internal_image_file(pool: PgPool) {
        let kept = seed_file(&pool).await;
        let owned = seed_file(&pool).await;
        let id = seed_category(&pool, Some(format!("/api/files/{}", owned))).await;

        service(&pool).delete(id).await.unwrap();

        let remaining: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM files")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, vec![kept]);
        assert!(matches!(
            service(&pool).get(id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_with_external_image_leaves_files_alone(pool: PgPool) {
        let file_id = seed_file(&pool).await;
        let external = seed_category(
            &pool,
            Some(format!("https://cdn.example/{}", file_id)),
        )
        .await;

        service(&pool).delete(external).await.unwrap();

        assert_eq!(file_count(&pool).await, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_missing_category_is_not_found(pool: PgPool) {
        seed_file(&pool).await;

        let result = service(&pool).delete(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(file_count(&pool).await, 1);
    }
}
