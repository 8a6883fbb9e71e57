use sqlx::{PgExecutor, PgPool};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::categories::CategoryService;
use crate::features::products::dtos::{CreateProductDto, ProductResponseDto, UpdateProductDto};
use crate::features::products::models::{Product, ProductWithRefs};

const COLLECTION: &str = "product";

const PRODUCT_COLUMNS: &str = "id, navbar_category_id, category_id, subcategory_id, name, slug, \
     images, catalog_image, catalog_images, created_at, updated_at";

/// Select list over a `p` product source joined to its references
const JOINED_SELECT: &str = r#"
    SELECT p.id, p.navbar_category_id, p.category_id, p.subcategory_id, p.name, p.slug,
           p.images, p.catalog_image, p.catalog_images, p.created_at, p.updated_at,
           n.name AS navbar_category_name, n.slug AS navbar_category_slug,
           c.name AS category_name, c.slug AS category_slug,
           s.name AS subcategory_name, s.slug AS subcategory_slug
"#;

const REF_JOINS: &str = r#"
    LEFT JOIN navbar_categories n ON n.id = p.navbar_category_id
    LEFT JOIN categories c ON c.id = p.category_id
    LEFT JOIN subcategories s ON s.id = p.subcategory_id
"#;

/// Service for product operations
pub struct ProductService {
    pool: PgPool,
    categories: Arc<CategoryService>,
}

impl ProductService {
    pub fn new(pool: PgPool, categories: Arc<CategoryService>) -> Self {
        Self { pool, categories }
    }

    /// All products ordered by name, optionally only those in one category.
    ///
    /// Filtering by a category that does not exist is a 404.
    pub async fn list(&self, category_id: Option<Uuid>) -> Result<Vec<ProductResponseDto>> {
        let rows = match category_id {
            Some(category_id) => {
                if !self.categories.exists(category_id).await? {
                    return Err(AppError::NotFound(format!(
                        "Category with ID {} not found",
                        category_id
                    )));
                }

                let sql = format!(
                    "{} FROM products p {} WHERE p.category_id = $1 ORDER BY p.name",
                    JOINED_SELECT, REF_JOINS
                );
                sqlx::query_as::<_, ProductWithRefs>(&sql)
                    .bind(category_id)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!(
                    "{} FROM products p {} ORDER BY p.name",
                    JOINED_SELECT, REF_JOINS
                );
                sqlx::query_as::<_, ProductWithRefs>(&sql)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| map_db_error(e, COLLECTION))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<ProductResponseDto> {
        fetch_with_refs(&self.pool, id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
    }

    pub async fn create(&self, dto: CreateProductDto) -> Result<ProductResponseDto> {
        let product = dto.into_new_product()?;

        let sql = format!(
            r#"
            WITH p AS (
                INSERT INTO products
                    (navbar_category_id, category_id, subcategory_id, name, slug,
                     images, catalog_image, catalog_images)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING {}
            )
            {} FROM p {}
            "#,
            PRODUCT_COLUMNS, JOINED_SELECT, REF_JOINS
        );

        let row = sqlx::query_as::<_, ProductWithRefs>(&sql)
            .bind(product.navbar_category_id)
            .bind(product.category_id)
            .bind(product.subcategory_id)
            .bind(&product.name)
            .bind(&product.slug)
            .bind(&product.images)
            .bind(&product.catalog_image)
            .bind(&product.catalog_images)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error(e, COLLECTION))?;

        tracing::info!(
            "Product created: id={}, slug={}, navbar_category_id={}",
            row.product.id,
            row.product.slug,
            row.product.navbar_category_id
        );

        Ok(row.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateProductDto) -> Result<ProductResponseDto> {
        let mut tx = self.pool.begin().await?;

        let mut product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products WHERE id = $1 FOR UPDATE",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, COLLECTION))?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        dto.apply(&mut product)?;

        let sql = format!(
            r#"
            WITH p AS (
                UPDATE products
                SET navbar_category_id = $2, category_id = $3, subcategory_id = $4,
                    name = $5, slug = $6, images = $7, catalog_image = $8,
                    catalog_images = $9, updated_at = NOW()
                WHERE id = $1
                RETURNING {}
            )
            {} FROM p {}
            "#,
            PRODUCT_COLUMNS, JOINED_SELECT, REF_JOINS
        );

        let row = sqlx::query_as::<_, ProductWithRefs>(&sql)
            .bind(id)
            .bind(product.navbar_category_id)
            .bind(product.category_id)
            .bind(product.subcategory_id)
            .bind(&product.name)
            .bind(&product.slug)
            .bind(&product.images)
            .bind(&product.catalog_image)
            .bind(&product.catalog_images)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_db_error(e, COLLECTION))?;

        tx.commit().await?;

        tracing::info!("Product updated: id={}", row.product.id);
        Ok(row.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let deleted: Option<Uuid> =
            sqlx::query_scalar("DELETE FROM products WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_db_error(e, COLLECTION))?;

        deleted.ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        tracing::info!("Product deleted: id={}", id);
        Ok(())
    }
}

async fn fetch_with_refs<'e, E>(executor: E, id: Uuid) -> Result<Option<ProductWithRefs>>
where
    E: PgExecutor<'e>,
{
    let sql = format!("{} FROM products p {} WHERE p.id = $1", JOINED_SELECT, REF_JOINS);
    sqlx::query_as::<_, ProductWithRefs>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(|e| map_db_error(e, COLLECTION))
}
