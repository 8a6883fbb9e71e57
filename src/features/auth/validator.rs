use super::model::{AdminClaims, AuthenticatedAdmin};
use crate::core::error::AppError;
use crate::shared::constants::ADMIN_TOKEN_COOKIE;
use axum::http::{header, HeaderMap};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use sqlx::PgPool;
use std::collections::HashSet;
use std::time::Duration;
use uuid::Uuid;

/// Verifies HS256 admin tokens and resolves them to a stored admin
pub struct AdminTokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    pool: PgPool,
}

impl AdminTokenValidator {
    pub fn new(secret: &str, leeway: Duration, pool: PgPool) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway.as_secs();
        // No claim is required; `exp` is checked only when present
        validation.required_spec_claims = HashSet::new();

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            pool,
        }
    }

    /// Check the signature and claims without touching the store
    pub fn decode_token(&self, token: &str) -> Result<AdminClaims, AppError> {
        decode::<AdminClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected admin token: {}", e);
                AppError::Unauthorized("Invalid token".to_string())
            })
    }

    /// Verify the token and make sure the admin it names still exists
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedAdmin, AppError> {
        let claims = self.decode_token(token)?;

        let admin_id = Uuid::parse_str(&claims.id)
            .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))?;

        let admin = sqlx::query_as::<_, AuthenticatedAdmin>(
            r#"
            SELECT id, username
            FROM admins
            WHERE id = $1
            "#,
        )
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await?;

        admin.ok_or_else(|| {
            tracing::warn!("Token names unknown admin {}", admin_id);
            AppError::Unauthorized("Unauthorized".to_string())
        })
    }
}

/// Pull the admin token from `Authorization: Bearer` or the session cookie
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == ADMIN_TOKEN_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::shared::test_helpers::{mint_admin_token, TEST_JWT_SECRET};
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn test_decode_valid_token() {
        let validator =
            AdminTokenValidator::new(TEST_JWT_SECRET, Duration::from_secs(0), lazy_test_pool());
        let id = Uuid::new_v4();
        let token = mint_admin_token(TEST_JWT_SECRET, id);

        let claims = validator.decode_token(&token).unwrap();
        assert_eq!(claims.id, id.to_string());
        assert_eq!(claims.username, "admin");
    }

    #[tokio::test]
    async fn test_decode_rejects_wrong_secret() {
        let validator =
            AdminTokenValidator::new(TEST_JWT_SECRET, Duration::from_secs(0), lazy_test_pool());
        let token = mint_admin_token("another-secret", Uuid::new_v4());

        assert!(matches!(
            validator.decode_token(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_decode_checks_exp_when_present() {
        let validator =
            AdminTokenValidator::new(TEST_JWT_SECRET, Duration::from_secs(0), lazy_test_pool());
        let claims = AdminClaims {
            id: Uuid::new_v4().to_string(),
            username: "admin".to_string(),
            exp: Some((chrono::Utc::now().timestamp() - 3600) as u64),
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            validator.decode_token(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_decode_rejects_garbage() {
        let validator =
            AdminTokenValidator::new(TEST_JWT_SECRET, Duration::from_secs(0), lazy_test_pool());
        assert!(validator.decode_token("not.a.jwt").is_err());
    }

    #[tokio::test]
    async fn test_authenticate_rejects_non_uuid_subject_before_lookup() {
        let validator =
            AdminTokenValidator::new(TEST_JWT_SECRET, Duration::from_secs(0), lazy_test_pool());
        let claims = AdminClaims {
            id: "64f1c0ffee".to_string(),
            username: "admin".to_string(),
            exp: None,
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            validator.authenticate(&token).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_extract_token_prefers_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(header::COOKIE, HeaderValue::from_static("token=xyz"));
        assert_eq!(extract_token(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn test_extract_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; token=xyz; lang=en"),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("xyz"));
    }

    #[test]
    fn test_extract_token_missing() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9v"));
        headers.insert(header::COOKIE, HeaderValue::from_static("token="));
        assert_eq!(extract_token(&headers), None);
    }
}
