use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, NonEmptyJson};
use crate::features::auth::guards::RequireAdmin;
use crate::features::products::dtos::{
    CreateProductDto, ListProductsQuery, ProductResponseDto, UpdateProductByIdDto,
    UpdateProductDto,
};
use crate::features::products::services::ProductService;
use crate::shared::types::{ApiResponse, DeletedDto, IdBodyDto};
use crate::shared::validation::parse_object_id;

/// List products, optionally filtered by category
#[utoipa::path(
    get,
    path = "/api/products",
    params(ListProductsQuery),
    responses(
        (status = 200, description = "Products ordered by name", body = ApiResponse<Vec<ProductResponseDto>>),
        (status = 400, description = "Malformed categoryId"),
        (status = 404, description = "Category not found")
    ),
    tag = "products"
)]
pub async fn list_products(
    State(service): State<Arc<ProductService>>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let products = service.list(query.category_id()?).await?;
    Ok(Json(ApiResponse::list(products)))
}

/// Get product by id
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn get_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let id = parse_object_id("id", &id)?;
    let product = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

/// Create a product (admin only)
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Missing name or navbar category, or invalid field"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "products",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_product(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    NonEmptyJson(dto): NonEmptyJson<CreateProductDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(product), None, None)),
    ))
}

/// Update a product (admin only)
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Validation error or empty body"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    ),
    tag = "products",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_product(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<String>,
    NonEmptyJson(dto): NonEmptyJson<UpdateProductDto>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let id = parse_object_id("id", &id)?;
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

/// Update a product named by `_id` in the body (admin only)
#[utoipa::path(
    put,
    path = "/api/products",
    request_body = UpdateProductByIdDto,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Validation error or empty body"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    ),
    tag = "products",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_product_by_body(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    NonEmptyJson(dto): NonEmptyJson<UpdateProductByIdDto>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let id = parse_object_id("_id", &dto.id)?;
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = service.update(id, dto.changes).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

/// Delete a product (admin only)
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<DeletedDto>),
        (status = 400, description = "Malformed id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    ),
    tag = "products",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_product(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedDto>>> {
    let id = parse_object_id("id", &id)?;
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        Some(DeletedDto { deleted: true }),
        Some("Product deleted successfully".to_string()),
        None,
    )))
}

/// Delete a product named by `_id` in the body (admin only)
#[utoipa::path(
    delete,
    path = "/api/products",
    request_body = IdBodyDto,
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<DeletedDto>),
        (status = 400, description = "Malformed id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    ),
    tag = "products",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_product_by_body(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    AppJson(body): AppJson<IdBodyDto>,
) -> Result<Json<ApiResponse<DeletedDto>>> {
    let id = parse_object_id("_id", &body.id)?;
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        Some(DeletedDto { deleted: true }),
        Some("Product deleted successfully".to_string()),
        None,
    )))
}
