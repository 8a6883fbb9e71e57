use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::subcategories::dtos::{
    SubcategoryResponseDto, CreateSubcategoryDto, UpdateSubcategoryDto,
};
use crate::features::subcategories::models::Subcategory;
use crate::shared::slug::slug_from_name;

const COLLECTION: &str = "subcategory";

/// Service for subcategory operations
pub struct SubcategoryService {
    pool: PgPool,
}

impl SubcategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All subcategories ordered by name
    pub async fn list_models(&self) -> Result<Vec<Subcategory>> {
        sqlx::query_as::<_, Subcategory>(
            r#"
            SELECT id, category_id, name, slug, created_at, updated_at
            FROM subcategories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, COLLECTION))
    }

    pub async fn list(&self) -> Result<Vec<SubcategoryResponseDto>> {
        let subcategories = self.list_models().await?;
        Ok(subcategories.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<SubcategoryResponseDto> {
        let subcategory = sqlx::query_as::<_, Subcategory>(
            r#"
            SELECT id, category_id, name, slug, created_at, updated_at
            FROM subcategories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, COLLECTION))?;

        subcategory
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Subcategory not found".to_string()))
    }

    pub async fn create(&self, dto: CreateSubcategoryDto) -> Result<SubcategoryResponseDto> {
        let category_id = dto.category_id()?;
        let slug = slug_from_name(&dto.name)?;

        let subcategory = sqlx::query_as::<_, Subcategory>(
            r#"
            INSERT INTO subcategories (category_id, name, slug)
            VALUES ($1, $2, $3)
            RETURNING id, category_id, name, slug, created_at, updated_at
            "#,
        )
        .bind(category_id)
        .bind(&dto.name)
        .bind(&slug)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, COLLECTION))?;

        tracing::info!(
            "Subcategory created: id={}, slug={}, category_id={}",
            subcategory.id,
            subcategory.slug,
            subcategory.category_id
        );

        Ok(subcategory.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateSubcategoryDto) -> Result<SubcategoryResponseDto> {
        let mut tx = self.pool.begin().await?;

        let mut subcategory = sqlx::query_as::<_, Subcategory>(
            r#"
            SELECT id, category_id, name, slug, created_at, updated_at
            FROM subcategories
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, COLLECTION))?
        .ok_or_else(|| AppError::NotFound("Subcategory not found".to_string()))?;

        dto.apply(&mut subcategory)?;

        let subcategory = sqlx::query_as::<_, Subcategory>(
            r#"
            UPDATE subcategories
            SET category_id = $2, name = $3, slug = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, category_id, name, slug, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(subcategory.category_id)
        .bind(&subcategory.name)
        .bind(&subcategory.slug)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, COLLECTION))?;

        tx.commit().await?;

        tracing::info!("Subcategory updated: id={}", subcategory.id);
        Ok(subcategory.into())
    }

    /// Delete a subcategory; products referencing it keep the stale id
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let deleted: Option<Uuid> =
            sqlx::query_scalar("DELETE FROM subcategories WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_db_error(e, COLLECTION))?;

        deleted.ok_or_else(|| AppError::NotFound("Subcategory not found".to_string()))?;

        tracing::info!("Subcategory deleted: id={}", id);
        Ok(())
    }
}
