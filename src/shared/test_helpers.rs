#[cfg(test)]
use crate::features::auth::{model::AdminClaims, AdminTokenValidator};

#[cfg(test)]
use axum::{Extension, Router};

#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
pub const TEST_JWT_SECRET: &str = "test-secret";

#[cfg(test)]
pub fn mint_admin_token(secret: &str, admin_id: Uuid) -> String {
    let claims = AdminClaims {
        id: admin_id.to_string(),
        username: "admin".to_string(),
        exp: None,
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token encodes")
}

/// Attach an admin token validator backed by a pool that never connects.
/// Requests without a valid token are rejected before any lookup.
#[cfg(test)]
pub fn with_admin_validator(router: Router) -> Router {
    let validator = AdminTokenValidator::new(
        TEST_JWT_SECRET,
        std::time::Duration::from_secs(0),
        crate::core::database::lazy_test_pool(),
    );
    router.layer(Extension(Arc::new(validator)))
}
