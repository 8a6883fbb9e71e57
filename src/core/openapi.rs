use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::files::handlers as files_handlers;
use crate::features::navbar_categories::{
    dtos as navbar_categories_dtos, handlers as navbar_categories_handlers,
};
use crate::features::navigation::{dtos as navigation_dtos, handlers as navigation_handlers};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::features::search::{dtos as search_dtos, handlers as search_handlers};
use crate::features::subcategories::{
    dtos as subcategories_dtos, handlers as subcategories_handlers,
};
use crate::shared::types::{ApiResponse, DeletedDto, IdBodyDto, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Navbar categories
        navbar_categories_handlers::list_navbar_categories,
        navbar_categories_handlers::get_navbar_category,
        navbar_categories_handlers::create_navbar_category,
        navbar_categories_handlers::update_navbar_category,
        navbar_categories_handlers::update_navbar_category_by_body,
        navbar_categories_handlers::delete_navbar_category,
        navbar_categories_handlers::delete_navbar_category_by_body,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Subcategories
        subcategories_handlers::list_subcategories,
        subcategories_handlers::get_subcategory,
        subcategories_handlers::create_subcategory,
        subcategories_handlers::update_subcategory,
        subcategories_handlers::delete_subcategory,
        // Products
        products_handlers::list_products,
        products_handlers::get_product,
        products_handlers::create_product,
        products_handlers::update_product,
        products_handlers::update_product_by_body,
        products_handlers::delete_product,
        products_handlers::delete_product_by_body,
        // Search & navigation (public)
        search_handlers::search,
        navigation_handlers::get_navigation,
        // Files
        files_handlers::serve_file,
    ),
    components(
        schemas(
            // Shared
            Meta,
            IdBodyDto,
            DeletedDto,
            ApiResponse<DeletedDto>,
            // Auth
            auth::model::AuthenticatedAdmin,
            // Navbar categories
            navbar_categories_dtos::CreateNavbarCategoryDto,
            navbar_categories_dtos::UpdateNavbarCategoryDto,
            navbar_categories_dtos::UpdateNavbarCategoryByIdDto,
            navbar_categories_dtos::NavbarCategoryResponseDto,
            ApiResponse<Vec<navbar_categories_dtos::NavbarCategoryResponseDto>>,
            ApiResponse<navbar_categories_dtos::NavbarCategoryResponseDto>,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryResponseDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            // Subcategories
            subcategories_dtos::CreateSubcategoryDto,
            subcategories_dtos::UpdateSubcategoryDto,
            subcategories_dtos::SubcategoryResponseDto,
            ApiResponse<Vec<subcategories_dtos::SubcategoryResponseDto>>,
            ApiResponse<subcategories_dtos::SubcategoryResponseDto>,
            // Products
            products_dtos::CreateProductDto,
            products_dtos::UpdateProductDto,
            products_dtos::UpdateProductByIdDto,
            products_dtos::RefSummary,
            products_dtos::ProductResponseDto,
            ApiResponse<Vec<products_dtos::ProductResponseDto>>,
            ApiResponse<products_dtos::ProductResponseDto>,
            // Search
            search_dtos::SearchResultType,
            search_dtos::SearchResult,
            ApiResponse<Vec<search_dtos::SearchResult>>,
            // Navigation
            navigation_dtos::NavigationGroup,
            navigation_dtos::NavigationCategory,
            navigation_dtos::NavigationSubcategory,
            ApiResponse<Vec<navigation_dtos::NavigationGroup>>,
        )
    ),
    tags(
        (name = "navbar-categories", description = "Top-level product groups shown in the navbar"),
        (name = "categories", description = "Categories within a navbar category"),
        (name = "subcategories", description = "Subcategories within a category"),
        (name = "products", description = "Catalog products"),
        (name = "search", description = "Name search across the whole catalog (public)"),
        (name = "navigation", description = "Navigation menu tree (public)"),
        (name = "files", description = "Stored image files"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Lovosis Catalog API",
        version = "0.1.0",
        description = "API documentation for the Lovosis product catalog",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_catalog_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/navbarcategories",
            "/api/navbarcategories/{id}",
            "/api/categories/{id}",
            "/api/subcategories",
            "/api/products",
            "/api/search",
            "/api/navigation",
            "/api/files/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Catalog".to_string(),
            version: "9.9.9".to_string(),
            description: "desc".to_string(),
        }
        .modify(&mut doc);
        assert_eq!(doc.info.title, "Catalog");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
