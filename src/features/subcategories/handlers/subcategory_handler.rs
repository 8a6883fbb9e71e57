use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::NonEmptyJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::subcategories::dtos::{
    SubcategoryResponseDto, CreateSubcategoryDto, UpdateSubcategoryDto,
};
use crate::features::subcategories::services::SubcategoryService;
use crate::shared::types::{ApiResponse, DeletedDto};
use crate::shared::validation::parse_object_id;

/// List all subcategories
#[utoipa::path(
    get,
    path = "/api/subcategories",
    responses(
        (status = 200, description = "Subcategories ordered by name", body = ApiResponse<Vec<SubcategoryResponseDto>>),
    ),
    tag = "subcategories"
)]
pub async fn list_subcategories(
    State(service): State<Arc<SubcategoryService>>,
) -> Result<Json<ApiResponse<Vec<SubcategoryResponseDto>>>> {
    let subcategories = service.list().await?;
    Ok(Json(ApiResponse::list(subcategories)))
}

/// Get subcategory by id
#[utoipa::path(
    get,
    path = "/api/subcategories/{id}",
    params(
        ("id" = String, Path, description = "Subcategory ID")
    ),
    responses(
        (status = 200, description = "Subcategory found", body = ApiResponse<SubcategoryResponseDto>),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Subcategory not found")
    ),
    tag = "subcategories"
)]
pub async fn get_subcategory(
    State(service): State<Arc<SubcategoryService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SubcategoryResponseDto>>> {
    let id = parse_object_id("id", &id)?;
    let subcategory = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(subcategory), None, None)))
}

/// Create a subcategory (admin only)
#[utoipa::path(
    post,
    path = "/api/subcategories",
    request_body = CreateSubcategoryDto,
    responses(
        (status = 201, description = "Subcategory created", body = ApiResponse<SubcategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "subcategories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_subcategory(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<SubcategoryService>>,
    NonEmptyJson(dto): NonEmptyJson<CreateSubcategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<SubcategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let subcategory = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(subcategory), None, None)),
    ))
}

/// Update a subcategory (admin only)
#[utoipa::path(
    put,
    path = "/api/subcategories/{id}",
    params(
        ("id" = String, Path, description = "Subcategory ID")
    ),
    request_body = UpdateSubcategoryDto,
    responses(
        (status = 200, description = "Subcategory updated", body = ApiResponse<SubcategoryResponseDto>),
        (status = 400, description = "Validation error or empty body"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Subcategory not found")
    ),
    tag = "subcategories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_subcategory(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<SubcategoryService>>,
    Path(id): Path<String>,
    NonEmptyJson(dto): NonEmptyJson<UpdateSubcategoryDto>,
) -> Result<Json<ApiResponse<SubcategoryResponseDto>>> {
    let id = parse_object_id("id", &id)?;
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let subcategory = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(subcategory), None, None)))
}

/// Delete a subcategory (admin only)
#[utoipa::path(
    delete,
    path = "/api/subcategories/{id}",
    params(
        ("id" = String, Path, description = "Subcategory ID")
    ),
    responses(
        (status = 200, description = "Subcategory deleted", body = ApiResponse<DeletedDto>),
        (status = 400, description = "Malformed id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Subcategory not found")
    ),
    tag = "subcategories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_subcategory(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<SubcategoryService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedDto>>> {
    let id = parse_object_id("id", &id)?;
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        Some(DeletedDto { deleted: true }),
        None,
        None,
    )))
}
