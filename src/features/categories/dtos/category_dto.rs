use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::features::categories::models::Category;
use crate::shared::slug::slug_from_name;
use crate::shared::validation::parse_object_id;

/// Request DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    /// Owning navbar category id
    pub navbar_category_id: String,
}

impl CreateCategoryDto {
    pub fn navbar_category_id(&self) -> Result<Uuid> {
        parse_object_id("navbarCategoryId", &self.navbar_category_id)
    }
}

/// Request DTO for updating a category; absent fields are kept
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    pub navbar_category_id: Option<String>,
}

impl UpdateCategoryDto {
    /// Apply the changes, re-deriving the slug when the name changes
    pub fn apply(self, target: &mut Category) -> Result<()> {
        if let Some(raw) = self.navbar_category_id.as_deref() {
            target.navbar_category_id = parse_object_id("navbarCategoryId", raw)?;
        }

        if let Some(name) = self.name {
            target.slug = slug_from_name(&name)?;
            target.name = name;
        }

        Ok(())
    }
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub navbar_category_id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            navbar_category_id: c.navbar_category_id,
            name: c.name,
            slug: c.slug,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
