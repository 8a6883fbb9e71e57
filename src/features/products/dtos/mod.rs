pub mod product_dto;

pub use product_dto::{
    CreateProductDto, ListProductsQuery, NewProduct, ProductResponseDto, RefSummary,
    UpdateProductByIdDto, UpdateProductDto,
};
