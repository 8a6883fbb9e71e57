use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Product row. `category_id` and `subcategory_id` are optional references.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub navbar_category_id: Uuid,
    pub category_id: Option<Uuid>,
    pub subcategory_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub images: Vec<String>,
    pub catalog_image: Option<String>,
    pub catalog_images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product joined with the names and slugs of whatever it references.
/// A reference pointing at a missing record yields `None` columns.
#[derive(Debug, Clone, FromRow)]
pub struct ProductWithRefs {
    #[sqlx(flatten)]
    pub product: Product,
    pub navbar_category_name: Option<String>,
    pub navbar_category_slug: Option<String>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub subcategory_name: Option<String>,
    pub subcategory_slug: Option<String>,
}
