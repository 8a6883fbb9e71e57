use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Claims carried by an admin session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// Admin resolved from a verified token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow)]
pub struct AuthenticatedAdmin {
    pub id: Uuid,
    pub username: String,
}
