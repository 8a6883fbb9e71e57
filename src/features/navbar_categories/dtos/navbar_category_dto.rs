use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::features::navbar_categories::models::NavbarCategory;
use crate::shared::slug::slug_from_name;
use crate::shared::validation::non_empty;

/// Request DTO for creating a navbar category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNavbarCategoryDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    /// Image URL, internal `/api/files/{id}` path, or a bare stored file id
    pub image: Option<String>,
}

/// Request DTO for updating a navbar category.
///
/// Absent fields are kept; an empty `image` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNavbarCategoryDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    pub image: Option<String>,
}

/// Collection-level update body: the id travels as `_id`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateNavbarCategoryByIdDto {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(flatten)]
    #[validate(nested)]
    pub changes: UpdateNavbarCategoryDto,
}

impl UpdateNavbarCategoryDto {
    /// Apply the changes, re-deriving the slug when the name changes
    pub fn apply(self, target: &mut NavbarCategory) -> Result<()> {
        if let Some(name) = self.name {
            target.slug = slug_from_name(&name)?;
            target.name = name;
        }

        if let Some(image) = self.image {
            target.image = non_empty(Some(image));
        }

        Ok(())
    }
}

/// Response DTO for navbar category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavbarCategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NavbarCategory> for NavbarCategoryResponseDto {
    fn from(c: NavbarCategory) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            image: c.image,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> NavbarCategory {
        NavbarCategory {
            id: Uuid::new_v4(),
            name: "Sensors".to_string(),
            slug: "sensors".to_string(),
            image: Some("/api/files/abc".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_rename_rederives_slug() {
        let mut category = sample();
        let dto = UpdateNavbarCategoryDto {
            name: Some("Smart Sensors & Kits".to_string()),
            image: None,
        };
        dto.apply(&mut category).unwrap();

        assert_eq!(category.name, "Smart Sensors & Kits");
        assert_eq!(category.slug, "smart-sensors-kits");
        assert_eq!(category.image.as_deref(), Some("/api/files/abc"));
    }

    #[test]
    fn test_apply_empty_image_clears() {
        let mut category = sample();
        let dto = UpdateNavbarCategoryDto {
            name: None,
            image: Some(String::new()),
        };
        dto.apply(&mut category).unwrap();

        assert_eq!(category.image, None);
        assert_eq!(category.slug, "sensors");
    }

    #[test]
    fn test_update_by_id_body_flattens_changes() {
        let dto: UpdateNavbarCategoryByIdDto =
            serde_json::from_value(json!({ "_id": "x", "name": "Robotics" })).unwrap();
        assert_eq!(dto.id, "x");
        assert_eq!(dto.changes.name.as_deref(), Some("Robotics"));
        assert!(dto.changes.image.is_none());
    }

    #[test]
    fn test_create_validation_rejects_empty_name() {
        let dto = CreateNavbarCategoryDto {
            name: String::new(),
            image: None,
        };
        assert!(dto.validate().is_err());
    }
}
