pub mod auth;
pub mod categories;
pub mod files;
pub mod navbar_categories;
pub mod navigation;
pub mod products;
pub mod search;
pub mod subcategories;
