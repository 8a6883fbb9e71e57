use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, NonEmptyJson};
use crate::features::auth::guards::RequireAdmin;
use crate::features::navbar_categories::dtos::{
    CreateNavbarCategoryDto, NavbarCategoryResponseDto, UpdateNavbarCategoryByIdDto,
    UpdateNavbarCategoryDto,
};
use crate::features::navbar_categories::services::NavbarCategoryService;
use crate::shared::types::{ApiResponse, DeletedDto, IdBodyDto};
use crate::shared::validation::parse_object_id;

/// List all navbar categories
#[utoipa::path(
    get,
    path = "/api/navbarcategories",
    responses(
        (status = 200, description = "Navbar categories ordered by name", body = ApiResponse<Vec<NavbarCategoryResponseDto>>),
    ),
    tag = "navbar-categories"
)]
pub async fn list_navbar_categories(
    State(service): State<Arc<NavbarCategoryService>>,
) -> Result<Json<ApiResponse<Vec<NavbarCategoryResponseDto>>>> {
    let categories = service.list().await?;
    Ok(Json(ApiResponse::list(categories)))
}

/// Get navbar category by id
#[utoipa::path(
    get,
    path = "/api/navbarcategories/{id}",
    params(
        ("id" = String, Path, description = "Navbar category ID")
    ),
    responses(
        (status = 200, description = "Navbar category found", body = ApiResponse<NavbarCategoryResponseDto>),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Navbar category not found")
    ),
    tag = "navbar-categories"
)]
pub async fn get_navbar_category(
    State(service): State<Arc<NavbarCategoryService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<NavbarCategoryResponseDto>>> {
    let id = parse_object_id("id", &id)?;
    let category = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Create a navbar category (admin only)
#[utoipa::path(
    post,
    path = "/api/navbarcategories",
    request_body = CreateNavbarCategoryDto,
    responses(
        (status = 201, description = "Navbar category created", body = ApiResponse<NavbarCategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "navbar-categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_navbar_category(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<NavbarCategoryService>>,
    NonEmptyJson(dto): NonEmptyJson<CreateNavbarCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<NavbarCategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(category), None, None)),
    ))
}

/// Update a navbar category (admin only)
#[utoipa::path(
    put,
    path = "/api/navbarcategories/{id}",
    params(
        ("id" = String, Path, description = "Navbar category ID")
    ),
    request_body = UpdateNavbarCategoryDto,
    responses(
        (status = 200, description = "Navbar category updated", body = ApiResponse<NavbarCategoryResponseDto>),
        (status = 400, description = "Validation error or empty body"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Navbar category not found")
    ),
    tag = "navbar-categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_navbar_category(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<NavbarCategoryService>>,
    Path(id): Path<String>,
    NonEmptyJson(dto): NonEmptyJson<UpdateNavbarCategoryDto>,
) -> Result<Json<ApiResponse<NavbarCategoryResponseDto>>> {
    let id = parse_object_id("id", &id)?;
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Update a navbar category named by `_id` in the body (admin only)
#[utoipa::path(
    put,
    path = "/api/navbarcategories",
    request_body = UpdateNavbarCategoryByIdDto,
    responses(
        (status = 200, description = "Navbar category updated", body = ApiResponse<NavbarCategoryResponseDto>),
        (status = 400, description = "Validation error or empty body"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Navbar category not found")
    ),
    tag = "navbar-categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_navbar_category_by_body(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<NavbarCategoryService>>,
    NonEmptyJson(dto): NonEmptyJson<UpdateNavbarCategoryByIdDto>,
) -> Result<Json<ApiResponse<NavbarCategoryResponseDto>>> {
    let id = parse_object_id("_id", &dto.id)?;
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update(id, dto.changes).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Delete a navbar category (admin only)
///
/// Also removes the stored image file when `image` points at `/api/files/`.
#[utoipa::path(
    delete,
    path = "/api/navbarcategories/{id}",
    params(
        ("id" = String, Path, description = "Navbar category ID")
    ),
    responses(
        (status = 200, description = "Navbar category deleted", body = ApiResponse<DeletedDto>),
        (status = 400, description = "Malformed id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Navbar category not found")
    ),
    tag = "navbar-categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_navbar_category(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<NavbarCategoryService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedDto>>> {
    let id = parse_object_id("id", &id)?;
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        Some(DeletedDto { deleted: true }),
        Some("Category deleted successfully".to_string()),
        None,
    )))
}

/// Delete a navbar category named by `_id` in the body (admin only)
#[utoipa::path(
    delete,
    path = "/api/navbarcategories",
    request_body = IdBodyDto,
    responses(
        (status = 200, description = "Navbar category deleted", body = ApiResponse<DeletedDto>),
        (status = 400, description = "Malformed id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Navbar category not found")
    ),
    tag = "navbar-categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_navbar_category_by_body(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<NavbarCategoryService>>,
    AppJson(body): AppJson<IdBodyDto>,
) -> Result<Json<ApiResponse<DeletedDto>>> {
    let id = parse_object_id("_id", &body.id)?;
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        Some(DeletedDto { deleted: true }),
        Some("Category deleted successfully".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::features::files::FileService;
    use crate::features::navbar_categories::routes::routes;
    use crate::shared::test_helpers::{mint_admin_token, with_admin_validator};
    use axum_test::TestServer;
    use serde_json::json;

    fn server() -> TestServer {
        let pool = lazy_test_pool();
        let files = Arc::new(FileService::new(pool.clone()));
        let service = Arc::new(NavbarCategoryService::new(pool, files));
        TestServer::new(with_admin_validator(routes(service))).unwrap()
    }

    #[tokio::test]
    async fn test_create_without_token_is_unauthorized() {
        let response = server()
            .post("/api/navbarcategories")
            .json(&json!({ "name": "Sensors" }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_delete_with_forged_token_is_unauthorized() {
        let token = mint_admin_token("not-the-server-secret", uuid::Uuid::new_v4());
        let response = server()
            .delete(&format!("/api/navbarcategories/{}", uuid::Uuid::new_v4()))
            .authorization_bearer(token)
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_get_with_malformed_id_is_bad_request() {
        let response = server().get("/api/navbarcategories/not-an-id").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Invalid id");
    }
}
