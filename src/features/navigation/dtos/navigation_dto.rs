use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::products::dtos::RefSummary;

/// Top level of the navigation menu (a navbar category)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationGroup {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub categories: Vec<NavigationCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationCategory {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub subcategories: Vec<NavigationSubcategory>,
}

/// Leaf of the menu. Products are not loaded into the menu, so `products`
/// is always empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSubcategory {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub products: Vec<RefSummary>,
}
