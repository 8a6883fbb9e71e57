pub mod navbar_category_dto;

pub use navbar_category_dto::{
    CreateNavbarCategoryDto, NavbarCategoryResponseDto, UpdateNavbarCategoryByIdDto,
    UpdateNavbarCategoryDto,
};
