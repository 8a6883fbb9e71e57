use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::Category;
use crate::shared::slug::slug_from_name;

const COLLECTION: &str = "category";

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All categories ordered by name
    pub async fn list_models(&self) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, navbar_category_id, name, slug, created_at, updated_at
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, COLLECTION))
    }

    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.list_models().await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, navbar_category_id, name, slug, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, COLLECTION))?;

        category
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool> {
        let found: Option<Uuid> = sqlx::query_scalar("SELECT id FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, COLLECTION))?;

        Ok(found.is_some())
    }

    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let navbar_category_id = dto.navbar_category_id()?;
        let slug = slug_from_name(&dto.name)?;

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (navbar_category_id, name, slug)
            VALUES ($1, $2, $3)
            RETURNING id, navbar_category_id, name, slug, created_at, updated_at
            "#,
        )
        .bind(navbar_category_id)
        .bind(&dto.name)
        .bind(&slug)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, COLLECTION))?;

        tracing::info!(
            "Category created: id={}, slug={}, navbar_category_id={}",
            category.id,
            category.slug,
            category.navbar_category_id
        );

        Ok(category.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let mut tx = self.pool.begin().await?;

        let mut category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, navbar_category_id, name, slug, created_at, updated_at
            FROM categories
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, COLLECTION))?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        dto.apply(&mut category)?;

        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET navbar_category_id = $2, name = $3, slug = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, navbar_category_id, name, slug, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(category.navbar_category_id)
        .bind(&category.name)
        .bind(&category.slug)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, COLLECTION))?;

        tx.commit().await?;

        tracing::info!("Category updated: id={}", category.id);
        Ok(category.into())
    }

    /// Delete a category; its subcategories and products are left in place
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let deleted: Option<Uuid> =
            sqlx::query_scalar("DELETE FROM categories WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_db_error(e, COLLECTION))?;

        deleted.ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        tracing::info!("Category deleted: id={}", id);
        Ok(())
    }
}
