use std::collections::HashMap;

use crate::features::search::dtos::{SearchResult, SearchResultType};
use crate::features::search::models::{CategoryHit, NavbarCategoryHit, ProductHit, SubcategoryHit};
use crate::shared::constants::MISSING_SLUG;

fn slug_or_missing(slug: Option<&str>) -> &str {
    slug.filter(|s| !s.is_empty()).unwrap_or(MISSING_SLUG)
}

fn navbar_category_url(hit: &NavbarCategoryHit) -> String {
    format!("/products/{}", hit.slug)
}

fn category_url(hit: &CategoryHit) -> String {
    format!(
        "/products/{}/{}",
        slug_or_missing(hit.navbar_category_slug.as_deref()),
        hit.slug
    )
}

fn subcategory_url(hit: &SubcategoryHit) -> String {
    format!(
        "/products/{}/{}/{}",
        slug_or_missing(hit.navbar_category_slug.as_deref()),
        slug_or_missing(hit.category_slug.as_deref()),
        hit.slug
    )
}

fn product_url(hit: &ProductHit) -> String {
    format!(
        "/products/{}/{}/{}/{}",
        slug_or_missing(hit.navbar_category_slug.as_deref()),
        slug_or_missing(hit.category_slug.as_deref()),
        slug_or_missing(hit.subcategory_slug.as_deref()),
        hit.slug
    )
}

/// Turn per-collection hits into results, lowest priority first so that
/// first-seen order matches the order the collections are listed in.
pub fn hits_to_results(
    navbar_categories: Vec<NavbarCategoryHit>,
    categories: Vec<CategoryHit>,
    subcategories: Vec<SubcategoryHit>,
    products: Vec<ProductHit>,
) -> Vec<SearchResult> {
    let navbar = navbar_categories.into_iter().map(|hit| SearchResult {
        url: navbar_category_url(&hit),
        title: hit.name,
        kind: SearchResultType::NavbarCategory,
    });
    let category = categories.into_iter().map(|hit| SearchResult {
        url: category_url(&hit),
        title: hit.name,
        kind: SearchResultType::Category,
    });
    let subcategory = subcategories.into_iter().map(|hit| SearchResult {
        url: subcategory_url(&hit),
        title: hit.name,
        kind: SearchResultType::Subcategory,
    });
    let product = products.into_iter().map(|hit| SearchResult {
        url: product_url(&hit),
        title: hit.name,
        kind: SearchResultType::Product,
    });

    navbar.chain(category).chain(subcategory).chain(product).collect()
}

/// Deduplicate by lower-cased title, keeping the lowest-ranked entry, and
/// order by rank then by first appearance.
pub fn merge_results(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut best: HashMap<String, (usize, SearchResult)> = HashMap::new();

    for (position, result) in results.into_iter().enumerate() {
        let key = result.title.to_lowercase();
        match best.get(&key) {
            Some((_, kept)) if kept.kind.rank() <= result.kind.rank() => {}
            _ => {
                best.insert(key, (position, result));
            }
        }
    }

    let mut merged: Vec<(usize, SearchResult)> = best.into_values().collect();
    merged.sort_by_key(|(position, result)| (result.kind.rank(), *position));
    merged.into_iter().map(|(_, result)| result).collect()
}
