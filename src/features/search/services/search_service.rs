use sqlx::PgPool;

use super::merge::{hits_to_results, merge_results};
use crate::core::error::Result;
use crate::features::search::dtos::SearchResult;
use crate::features::search::models::{CategoryHit, NavbarCategoryHit, ProductHit, SubcategoryHit};
use crate::shared::constants::SEARCH_LIMIT_PER_COLLECTION;

/// Service for cross-collection name search
pub struct SearchService {
    pool: PgPool,
}

impl SearchService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Search all four collections by name.
    ///
    /// Matching is a case-insensitive literal substring match; regex and
    /// `LIKE` metacharacters in the query have no special meaning. The query
    /// is matched as given, surrounding whitespace included. A blank query
    /// returns nothing without querying. Any failing collection query fails
    /// the whole search.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let pattern = contains_pattern(query);

        let (navbar_categories, categories, subcategories, products) = tokio::try_join!(
            self.search_navbar_categories(&pattern),
            self.search_categories(&pattern),
            self.search_subcategories(&pattern),
            self.search_products(&pattern),
        )?;

        tracing::debug!(
            "Search '{}': navbar_categories={}, categories={}, subcategories={}, products={}",
            query,
            navbar_categories.len(),
            categories.len(),
            subcategories.len(),
            products.len()
        );

        Ok(merge_results(hits_to_results(
            navbar_categories,
            categories,
            subcategories,
            products,
        )))
    }

    async fn search_navbar_categories(&self, pattern: &str) -> Result<Vec<NavbarCategoryHit>> {
        let hits = sqlx::query_as::<_, NavbarCategoryHit>(
            r#"
            SELECT name, slug
            FROM navbar_categories
            WHERE name ILIKE $1
            ORDER BY name
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(SEARCH_LIMIT_PER_COLLECTION)
        .fetch_all(&self.pool)
        .await?;

        Ok(hits)
    }

    async fn search_categories(&self, pattern: &str) -> Result<Vec<CategoryHit>> {
        let hits = sqlx::query_as::<_, CategoryHit>(
            r#"
            SELECT c.name, c.slug, n.slug AS navbar_category_slug
            FROM categories c
            LEFT JOIN navbar_categories n ON n.id = c.navbar_category_id
            WHERE c.name ILIKE $1
            ORDER BY c.name
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(SEARCH_LIMIT_PER_COLLECTION)
        .fetch_all(&self.pool)
        .await?;

        Ok(hits)
    }

    async fn search_subcategories(&self, pattern: &str) -> Result<Vec<SubcategoryHit>> {
        let hits = sqlx::query_as::<_, SubcategoryHit>(
            r#"
            SELECT s.name, s.slug, c.slug AS category_slug, n.slug AS navbar_category_slug
            FROM subcategories s
            LEFT JOIN categories c ON c.id = s.category_id
            LEFT JOIN navbar_categories n ON n.id = c.navbar_category_id
            WHERE s.name ILIKE $1
            ORDER BY s.name
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(SEARCH_LIMIT_PER_COLLECTION)
        .fetch_all(&self.pool)
        .await?;

        Ok(hits)
    }

    async fn search_products(&self, pattern: &str) -> Result<Vec<ProductHit>> {
        let hits = sqlx::query_as::<_, ProductHit>(
            r#"
            SELECT p.name, p.slug,
                   s.slug AS subcategory_slug,
                   c.slug AS category_slug,
                   n.slug AS navbar_category_slug
            FROM products p
            LEFT JOIN navbar_categories n ON n.id = p.navbar_category_id
            LEFT JOIN categories c ON c.id = p.category_id
            LEFT JOIN subcategories s ON s.id = p.subcategory_id
            WHERE p.name ILIKE $1
            ORDER BY p.name
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(SEARCH_LIMIT_PER_COLLECTION)
        .fetch_all(&self.pool)
        .await?;

        Ok(hits)
    }
}

/// `ILIKE` pattern matching `query` anywhere, with wildcards in the query taken literally
fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::features::search::dtos::SearchResultType;
    use uuid::Uuid;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("sensor"), "%sensor%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }

    #[tokio::test]
    async fn test_blank_query_skips_database() {
        let service = SearchService::new(lazy_test_pool());
        assert!(service.search("").await.unwrap().is_empty());
        assert!(service.search("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_fails_the_search() {
        let service = SearchService::new(lazy_test_pool());
        assert!(service.search("sensor").await.is_err());
    }

    async fn seed_navbar_category(pool: &PgPool, name: &str, slug: &str) -> Uuid {
        sqlx::query_scalar(
            "INSERT INTO navbar_categories (name, slug) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    async fn seed_category(pool: &PgPool, navbar_id: Uuid, name: &str, slug: &str) -> Uuid {
        sqlx::query_scalar(
            "INSERT INTO categories (navbar_category_id, name, slug) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(navbar_id)
        .bind(name)
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    async fn seed_product(
        pool: &PgPool,
        navbar_id: Uuid,
        category_id: Option<Uuid>,
        name: &str,
        slug: &str,
    ) {
        sqlx::query(
            "INSERT INTO products (navbar_category_id, category_id, name, slug) VALUES ($1, $2, $3, $4)",
        )
        .bind(navbar_id)
        .bind(category_id)
        .bind(name)
        .bind(slug)
        .execute(pool)
        .await
        .unwrap();
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_each_collection_is_capped(pool: PgPool) {
        let navbar_id = seed_navbar_category(&pool, "Instruments", "instruments").await;
        for i in 1..=6 {
            let name = format!("Tool Kit {}", i);
            seed_product(&pool, navbar_id, None, &name, &format!("tool-kit-{}", i)).await;
        }

        let results = SearchService::new(pool).search("kit").await.unwrap();

        assert_eq!(results.len(), SEARCH_LIMIT_PER_COLLECTION as usize);
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Tool Kit 1", "Tool Kit 2", "Tool Kit 3", "Tool Kit 4", "Tool Kit 5"]
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_sensor_query_spans_collections(pool: PgPool) {
        let navbar_id = seed_navbar_category(&pool, "Sensors", "sensors").await;
        let category_id = seed_category(&pool, navbar_id, "Industrial", "industrial").await;
        seed_product(&pool, navbar_id, Some(category_id), "Smart Sensor", "smart-sensor").await;

        let results = SearchService::new(pool).search("SENSOR").await.unwrap();

        assert_eq!(
            results,
            vec![
                SearchResult {
                    title: "Smart Sensor".to_string(),
                    url: "/products/sensors/industrial/_/smart-sensor".to_string(),
                    kind: SearchResultType::Product,
                },
                SearchResult {
                    title: "Sensors".to_string(),
                    url: "/products/sensors".to_string(),
                    kind: SearchResultType::NavbarCategory,
                },
            ]
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_query_matches_untrimmed_and_literally(pool: PgPool) {
        let navbar_id = seed_navbar_category(&pool, "Phones", "phones").await;
        seed_product(&pool, navbar_id, None, "Smartphone", "smartphone").await;
        seed_product(&pool, navbar_id, None, "Smart Watch", "smart-watch").await;
        seed_product(&pool, navbar_id, None, "Gain 100% Boost", "gain-100-boost").await;

        let service = SearchService::new(pool);

        let titles = |results: Vec<SearchResult>| -> Vec<String> {
            results.into_iter().map(|r| r.title).collect()
        };
        assert_eq!(titles(service.search("smart ").await.unwrap()), vec!["Smart Watch"]);
        assert_eq!(titles(service.search("0%").await.unwrap()), vec!["Gain 100% Boost"]);
        assert!(service.search("sm_rt").await.unwrap().is_empty());
    }
}
