use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::debounce::SearchDebouncer;
use super::services::build_tree;
use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::navbar_categories::dtos::NavbarCategoryResponseDto;
use crate::features::navigation::dtos::NavigationGroup;
use crate::features::search::dtos::SearchResult;
use crate::features::subcategories::dtos::SubcategoryResponseDto;
use crate::shared::types::ApiResponse;

/// HTTP client for the public catalog endpoints, used by menu front ends
pub struct CatalogClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Fetch the three taxonomy lists in parallel and join them into the menu tree
    pub async fn fetch_navigation(&self) -> Result<Vec<NavigationGroup>> {
        let (navbar_categories, categories, subcategories) = tokio::try_join!(
            self.get_list::<NavbarCategoryResponseDto>("/api/navbarcategories", &[]),
            self.get_list::<CategoryResponseDto>("/api/categories", &[]),
            self.get_list::<SubcategoryResponseDto>("/api/subcategories", &[]),
        )?;

        Ok(build_tree(navbar_categories, categories, subcategories))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.get_list("/api/search", &[("q", query)]).await
    }

    /// Search-as-you-type driver backed by this client
    pub fn search_debouncer(self: &Arc<Self>) -> SearchDebouncer {
        let client = Arc::clone(self);
        SearchDebouncer::spawn(move |query: String| {
            let client = Arc::clone(&client);
            async move { client.search(&query).await }
        })
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach {}: {}", url, e);
                AppError::ExternalServiceError(format!("Failed to reach catalog: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Catalog API error: {} returned HTTP {}", path, status);
            return Err(AppError::ExternalServiceError(format!(
                "Catalog API error: HTTP {}",
                status
            )));
        }

        let envelope = response
            .json::<ApiResponse<Vec<T>>>()
            .await
            .map_err(|e| {
                tracing::error!("Failed to parse {} response: {}", path, e);
                AppError::ExternalServiceError(format!("Failed to parse catalog response: {}", e))
            })?;

        Ok(envelope.data.unwrap_or_default())
    }
}
