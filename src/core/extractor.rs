use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;

/// Custom JSON extractor that provides consistent error responses
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppJsonRejection(rejection)),
        }
    }
}

pub struct AppJsonRejection(JsonRejection);

impl IntoResponse for AppJsonRejection {
    fn into_response(self) -> Response {
        let message = match self.0 {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err),
            JsonRejection::JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err),
            JsonRejection::MissingJsonContentType(err) => {
                format!("Missing JSON content type: {}", err)
            }
            _ => "Failed to parse JSON body".to_string(),
        };

        AppError::BadRequest(message).into_response()
    }
}

/// JSON extractor for write endpoints: rejects `{}`, `null` and `[]` bodies
/// before deserializing into `T`.
pub struct NonEmptyJson<T>(pub T);

impl<T, S> FromRequest<S> for NonEmptyJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let AppJson(value) = AppJson::<serde_json::Value>::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        if is_empty_body(&value) {
            return Err(
                AppError::BadRequest("Request body cannot be empty".to_string()).into_response(),
            );
        }

        serde_json::from_value(value)
            .map(Self)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON data: {}", e)).into_response())
    }
}

fn is_empty_body(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_bodies_detected() {
        assert!(is_empty_body(&json!({})));
        assert!(is_empty_body(&json!(null)));
        assert!(is_empty_body(&json!([])));
        assert!(!is_empty_body(&json!({ "name": "Sensors" })));
    }

    async fn echo(NonEmptyJson(body): NonEmptyJson<serde_json::Value>) -> Json<serde_json::Value> {
        Json(body)
    }

    fn server() -> axum_test::TestServer {
        let router = axum::Router::new().route("/echo", axum::routing::post(echo));
        axum_test::TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn test_empty_object_is_rejected() {
        let response = server().post("/echo").json(&json!({})).await;
        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Request body cannot be empty");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let response = server()
            .post("/echo")
            .content_type("application/json")
            .text("{ not json")
            .await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_non_empty_body_passes_through() {
        let response = server().post("/echo").json(&json!({ "name": "Sensors" })).await;
        response.assert_status_ok();
        assert_eq!(response.json::<serde_json::Value>()["name"], "Sensors");
    }
}
