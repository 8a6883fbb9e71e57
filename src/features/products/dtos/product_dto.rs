use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::products::models::{Product, ProductWithRefs};
use crate::shared::slug::slug_from_name;
use crate::shared::validation::{
    compact_images, is_acceptable_image_url, non_empty, parse_object_id, parse_optional_ref,
    RefUpdate,
};

/// Query params for listing products
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    /// Only products referencing this category
    pub category_id: Option<String>,
}

impl ListProductsQuery {
    pub fn category_id(&self) -> Result<Option<Uuid>> {
        parse_optional_ref("categoryId", self.category_id.as_deref())
    }
}

/// Request DTO for creating a product
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductDto {
    #[validate(length(max = 200))]
    pub name: Option<String>,

    pub navbar_category_id: Option<String>,

    /// Empty string means no category
    pub category_id: Option<String>,

    /// Empty string means no subcategory
    pub subcategory_id: Option<String>,

    #[serde(default)]
    pub images: Vec<String>,

    pub catalog_image: Option<String>,

    #[serde(default)]
    pub catalog_images: Vec<String>,
}

/// Checked product fields ready to insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub navbar_category_id: Uuid,
    pub category_id: Option<Uuid>,
    pub subcategory_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub images: Vec<String>,
    pub catalog_image: Option<String>,
    pub catalog_images: Vec<String>,
}

impl CreateProductDto {
    /// Check required fields and reference formats.
    ///
    /// References are only checked for shape; whether they name an existing
    /// record is not verified.
    pub fn into_new_product(self) -> Result<NewProduct> {
        let (name, navbar_category_id) =
            match (non_empty(self.name), non_empty(self.navbar_category_id)) {
                (Some(name), Some(navbar)) => (name, navbar),
                _ => {
                    return Err(AppError::Validation(
                        "Name and navbar category are required".to_string(),
                    ))
                }
            };

        Ok(NewProduct {
            navbar_category_id: parse_object_id("navbarCategoryId", &navbar_category_id)?,
            category_id: parse_optional_ref("categoryId", self.category_id.as_deref())?,
            subcategory_id: parse_optional_ref("subcategoryId", self.subcategory_id.as_deref())?,
            slug: slug_from_name(&name)?,
            name,
            images: compact_images(self.images),
            catalog_image: catalog_image(self.catalog_image)?,
            catalog_images: compact_images(self.catalog_images),
        })
    }
}

/// Request DTO for updating a product.
///
/// Absent fields are kept. An empty `categoryId`, `subcategoryId` or
/// `catalogImage` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    pub navbar_category_id: Option<String>,

    pub category_id: Option<String>,

    pub subcategory_id: Option<String>,

    pub images: Option<Vec<String>>,

    pub catalog_image: Option<String>,

    pub catalog_images: Option<Vec<String>>,
}

/// Collection-level update body: the id travels as `_id`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProductByIdDto {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(flatten)]
    #[validate(nested)]
    pub changes: UpdateProductDto,
}

impl UpdateProductDto {
    /// Apply the changes, re-deriving the slug when the name changes
    pub fn apply(self, target: &mut Product) -> Result<()> {
        let category = RefUpdate::parse("categoryId", self.category_id.as_deref())?;
        let subcategory = RefUpdate::parse("subcategoryId", self.subcategory_id.as_deref())?;

        if let Some(raw) = self.navbar_category_id {
            target.navbar_category_id = parse_object_id("navbarCategoryId", &raw)?;
        }
        target.category_id = category.apply(target.category_id);
        target.subcategory_id = subcategory.apply(target.subcategory_id);

        if let Some(name) = self.name {
            target.slug = slug_from_name(&name)?;
            target.name = name;
        }

        if let Some(images) = self.images {
            target.images = compact_images(images);
        }
        if let Some(image) = self.catalog_image {
            target.catalog_image = catalog_image(Some(image))?;
        }
        if let Some(images) = self.catalog_images {
            target.catalog_images = compact_images(images);
        }

        Ok(())
    }
}

fn catalog_image(raw: Option<String>) -> Result<Option<String>> {
    match non_empty(raw) {
        Some(url) if !is_acceptable_image_url(&url) => Err(AppError::Validation(
            "Invalid image URL format".to_string(),
        )),
        other => Ok(other),
    }
}

/// Name and slug of a referenced record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RefSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl RefSummary {
    fn from_parts(id: Option<Uuid>, name: Option<String>, slug: Option<String>) -> Option<Self> {
        match (id, name, slug) {
            (Some(id), Some(name), Some(slug)) => Some(Self { id, name, slug }),
            _ => None,
        }
    }
}

/// Response DTO for product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponseDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub navbar_category_id: Uuid,
    pub navbar_category: Option<RefSummary>,
    pub category_id: Option<Uuid>,
    pub category: Option<RefSummary>,
    pub subcategory_id: Option<Uuid>,
    pub subcategory: Option<RefSummary>,
    pub images: Vec<String>,
    pub catalog_image: Option<String>,
    pub catalog_images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductWithRefs> for ProductResponseDto {
    fn from(row: ProductWithRefs) -> Self {
        let p = row.product;
        Self {
            navbar_category: RefSummary::from_parts(
                Some(p.navbar_category_id),
                row.navbar_category_name,
                row.navbar_category_slug,
            ),
            category: RefSummary::from_parts(p.category_id, row.category_name, row.category_slug),
            subcategory: RefSummary::from_parts(
                p.subcategory_id,
                row.subcategory_name,
                row.subcategory_slug,
            ),
            id: p.id,
            name: p.name,
            slug: p.slug,
            navbar_category_id: p.navbar_category_id,
            category_id: p.category_id,
            subcategory_id: p.subcategory_id,
            images: p.images,
            catalog_image: p.catalog_image,
            catalog_images: p.catalog_images,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
