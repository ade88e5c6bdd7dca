//! Error types for the cache server
//!
//! The cache engine itself never fails; these errors cover malformed
//! client input at the gateway.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Gateway Error Enum ==
/// Client input errors, reported before the cache is touched.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The set payload could not be decoded
    #[error("Invalid request body")]
    InvalidBody(#[source] serde_json::Error),

    /// The get key is missing or not an integer
    #[error("Invalid key")]
    InvalidKey(String),
}

impl GatewayError {
    /// HTTP status reported for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidBody(_) | GatewayError::InvalidKey(_) => StatusCode::BAD_REQUEST,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!(error = ?self, "Rejected client request");

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for gateway handlers.
pub type Result<T> = std::result::Result<T, GatewayError>;

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    fn body_error() -> GatewayError {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        GatewayError::InvalidBody(err)
    }

    #[test]
    fn test_error_status_codes() {
        let test_cases = vec![
            (body_error(), StatusCode::BAD_REQUEST),
            (GatewayError::InvalidKey("abc".to_string()), StatusCode::BAD_REQUEST),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.into_response().status(), expected_status);
        }
    }

    #[test]
    fn test_invalid_key_message_hides_input() {
        let error = GatewayError::InvalidKey("<script>".to_string());
        assert_eq!(error.to_string(), "Invalid key");
    }

    #[tokio::test]
    async fn test_error_response_format() {
        let response = body_error().into_response();

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.contains("application/json"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "Invalid request body");
    }
}
