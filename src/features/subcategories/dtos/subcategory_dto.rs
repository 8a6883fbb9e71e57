use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::features::subcategories::models::Subcategory;
use crate::shared::slug::slug_from_name;
use crate::shared::validation::parse_object_id;

/// Request DTO for creating a subcategory
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubcategoryDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    /// Owning category id
    pub category_id: String,
}

impl CreateSubcategoryDto {
    pub fn category_id(&self) -> Result<Uuid> {
        parse_object_id("categoryId", &self.category_id)
    }
}

/// Request DTO for updating a subcategory; absent fields are kept
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubcategoryDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    pub category_id: Option<String>,
}

impl UpdateSubcategoryDto {
    /// Apply the changes, re-deriving the slug when the name changes
    pub fn apply(self, target: &mut Subcategory) -> Result<()> {
        if let Some(raw) = self.category_id.as_deref() {
            target.category_id = parse_object_id("categoryId", raw)?;
        }

        if let Some(name) = self.name {
            target.slug = slug_from_name(&name)?;
            target.name = name;
        }

        Ok(())
    }
}

/// Response DTO for subcategory
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryResponseDto {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Subcategory> for SubcategoryResponseDto {
    fn from(c: Subcategory) -> Self {
        Self {
            id: c.id,
            category_id: c.category_id,
            name: c.name,
            slug: c.slug,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;

    fn sample() -> Subcategory {
        Subcategory {
            id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            name: "Thermocouples".to_string(),
            slug: "thermocouples".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_moves_subcategory_to_new_parent() {
        let mut subcategory = sample();
        let parent = Uuid::new_v4();
        let dto = UpdateSubcategoryDto {
            name: None,
            category_id: Some(parent.to_string()),
        };
        dto.apply(&mut subcategory).unwrap();
        assert_eq!(subcategory.category_id, parent);
        assert_eq!(subcategory.slug, "thermocouples");
    }

    #[test]
    fn test_apply_rejects_empty_required_reference() {
        let mut subcategory = sample();
        let dto = UpdateSubcategoryDto {
            name: None,
            category_id: Some(String::new()),
        };
        let err = dto.apply(&mut subcategory).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Invalid categoryId"));
    }

    #[test]
    fn test_create_reference_must_be_well_formed() {
        let dto = CreateSubcategoryDto {
            name: "Load Cells".to_string(),
            category_id: "nope".to_string(),
        };
        assert!(dto.category_id().is_err());
    }
}
