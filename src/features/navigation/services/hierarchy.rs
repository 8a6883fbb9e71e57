use std::collections::HashMap;

use uuid::Uuid;

use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::navbar_categories::dtos::NavbarCategoryResponseDto;
use crate::features::navigation::dtos::{
    NavigationCategory, NavigationGroup, NavigationSubcategory,
};
use crate::features::subcategories::dtos::SubcategoryResponseDto;

/// Join the three flat lists into a navbar category -> category ->
/// subcategory tree.
///
/// Children keep the order they arrive in. A child whose parent is not in
/// the parent list is dropped.
pub fn build_tree(
    navbar_categories: Vec<NavbarCategoryResponseDto>,
    categories: Vec<CategoryResponseDto>,
    subcategories: Vec<SubcategoryResponseDto>,
) -> Vec<NavigationGroup> {
    let mut subcategories_by_parent: HashMap<Uuid, Vec<NavigationSubcategory>> = HashMap::new();
    for sub in subcategories {
        subcategories_by_parent
            .entry(sub.category_id)
            .or_default()
            .push(NavigationSubcategory {
                id: sub.id,
                name: sub.name,
                slug: sub.slug,
                products: Vec::new(),
            });
    }

    let mut categories_by_parent: HashMap<Uuid, Vec<NavigationCategory>> = HashMap::new();
    for category in categories {
        let subcategories = subcategories_by_parent
            .remove(&category.id)
            .unwrap_or_default();
        categories_by_parent
            .entry(category.navbar_category_id)
            .or_default()
            .push(NavigationCategory {
                id: category.id,
                name: category.name,
                slug: category.slug,
                subcategories,
            });
    }

    navbar_categories
        .into_iter()
        .map(|navbar| NavigationGroup {
            categories: categories_by_parent.remove(&navbar.id).unwrap_or_default(),
            id: navbar.id,
            name: navbar.name,
            slug: navbar.slug,
            image: navbar.image,
        })
        .collect()
}
