use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query params for search
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Free text matched case-insensitively against names
    pub q: Option<String>,
}

/// Kind of record a search result points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SearchResultType {
    Product,
    Subcategory,
    Category,
    #[serde(rename = "Product Group")]
    NavbarCategory,
}

impl SearchResultType {
    /// Lower wins when two results share a title
    pub fn rank(self) -> u8 {
        match self {
            SearchResultType::Product => 1,
            SearchResultType::Subcategory => 2,
            SearchResultType::Category => 3,
            SearchResultType::NavbarCategory => 4,
        }
    }
}

/// A single search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: SearchResultType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_navbar_category_is_labelled_product_group() {
        let result = SearchResult {
            title: "Sensors".to_string(),
            url: "/products/sensors".to_string(),
            kind: SearchResultType::NavbarCategory,
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "title": "Sensors", "url": "/products/sensors", "type": "Product Group" })
        );
    }

    #[test]
    fn test_rank_order() {
        assert!(SearchResultType::Product.rank() < SearchResultType::Subcategory.rank());
        assert!(SearchResultType::Subcategory.rank() < SearchResultType::Category.rank());
        assert!(SearchResultType::Category.rank() < SearchResultType::NavbarCategory.rank());
    }
}
