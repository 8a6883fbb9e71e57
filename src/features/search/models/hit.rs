//! Name matches from each collection, carrying the slugs of their ancestors.
//! An ancestor that cannot be resolved comes back as `None`.

use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct NavbarCategoryHit {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct CategoryHit {
    pub name: String,
    pub slug: String,
    pub navbar_category_slug: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct SubcategoryHit {
    pub name: String,
    pub slug: String,
    pub category_slug: Option<String>,
    pub navbar_category_slug: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ProductHit {
    pub name: String,
    pub slug: String,
    pub subcategory_slug: Option<String>,
    pub category_slug: Option<String>,
    pub navbar_category_slug: Option<String>,
}
