mod navbar_category_service;

pub use navbar_category_service::NavbarCategoryService;
