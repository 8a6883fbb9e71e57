use std::sync::Arc;

use super::hierarchy::build_tree;
use crate::core::error::Result;
use crate::features::categories::CategoryService;
use crate::features::navbar_categories::NavbarCategoryService;
use crate::features::navigation::dtos::NavigationGroup;
use crate::features::subcategories::SubcategoryService;

/// Builds the navigation menu from the three taxonomy levels
pub struct NavigationService {
    navbar_categories: Arc<NavbarCategoryService>,
    categories: Arc<CategoryService>,
    subcategories: Arc<SubcategoryService>,
}

impl NavigationService {
    pub fn new(
        navbar_categories: Arc<NavbarCategoryService>,
        categories: Arc<CategoryService>,
        subcategories: Arc<SubcategoryService>,
    ) -> Self {
        Self {
            navbar_categories,
            categories,
            subcategories,
        }
    }

    /// Load all three levels concurrently; fails if any one fails
    pub async fn tree(&self) -> Result<Vec<NavigationGroup>> {
        let (navbar_categories, categories, subcategories) = tokio::try_join!(
            self.navbar_categories.list(),
            self.categories.list(),
            self.subcategories.list(),
        )?;

        tracing::debug!(
            "Navigation loaded: navbar_categories={}, categories={}, subcategories={}",
            navbar_categories.len(),
            categories.len(),
            subcategories.len()
        );

        Ok(build_tree(navbar_categories, categories, subcategories))
    }
}
