//! Admin guard for mutation endpoints.
//!
//! Reads are public; every create/update/delete handler takes a
//! `RequireAdmin` argument so the request is rejected with 401 before any
//! body parsing or store access happens.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedAdmin;
use crate::features::auth::{extract_token, AdminTokenValidator};
use axum::{extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;

/// Guard for checking the request carries a valid admin token.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(admin): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedAdmin);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let validator = parts
            .extensions
            .get::<Arc<AdminTokenValidator>>()
            .cloned()
            .ok_or_else(|| AppError::Internal("Admin token validator not configured".to_string()))?;

        let token = extract_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("Unauthorized: No token provided".to_string()))?;

        let admin = validator.authenticate(&token).await?;
        Ok(RequireAdmin(admin))
    }
}
