//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP requests.

use serde::Deserialize;

use crate::error::{GatewayError, Result};

/// Request body for the SET operation (POST /cache/set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: i64,
    /// The value to store
    pub value: i64,
}

impl SetRequest {
    /// Decodes a request body, regardless of the declared content type.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(GatewayError::InvalidBody)
    }
}

/// Query parameters for the GET operation (GET /cache/get?key=N)
///
/// The key stays a raw string so a bad value is reported as an invalid
/// key rather than a generic query rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetParams {
    pub key: Option<String>,
}

impl GetParams {
    /// Parses the `key` parameter as an integer.
    pub fn parse_key(&self) -> Result<i64> {
        let raw = self.key.as_deref().unwrap_or_default();
        raw.trim()
            .parse()
            .map_err(|_| GatewayError::InvalidKey(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_request_decode() {
        let req = SetRequest::from_slice(br#"{"key": 1, "value": 42}"#).unwrap();
        assert_eq!(req, SetRequest { key: 1, value: 42 });
    }

    #[test]
    fn test_set_request_rejects_non_integer() {
        assert!(SetRequest::from_slice(br#"{"key": "a", "value": 42}"#).is_err());
        assert!(SetRequest::from_slice(br#"{"key": 1.5, "value": 42}"#).is_err());
        assert!(SetRequest::from_slice(br#"{"key": 1}"#).is_err());
        assert!(SetRequest::from_slice(b"").is_err());
    }

    #[test]
    fn test_get_params_parse_key() {
        let params = GetParams {
            key: Some("-7".to_string()),
        };
        assert_eq!(params.parse_key().unwrap(), -7);
    }

    #[test]
    fn test_get_params_invalid_key() {
        let missing = GetParams::default();
        assert!(matches!(missing.parse_key(), Err(GatewayError::InvalidKey(_))));

        let garbage = GetParams {
            key: Some("abc".to_string()),
        };
        assert!(matches!(garbage.parse_key(), Err(GatewayError::InvalidKey(_))));
    }
}
