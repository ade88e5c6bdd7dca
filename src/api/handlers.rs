//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. Handlers decode
//! and validate input before calling into the cache, so a rejected request
//! never touches cache state.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::cache::Cache;
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    GetParams, GetResponse, HealthResponse, SetRequest, SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The cache handle is cheap to clone and carries its own lock.
#[derive(Clone)]
pub struct AppState {
    pub cache: Cache<i64, i64>,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: Cache<i64, i64>) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Starts the cache's background sweeper, so this must run inside a
    /// Tokio runtime.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Cache::with_sweep_interval(
            config.max_entries,
            config.entry_ttl,
            config.sweep_interval,
        ))
    }
}

/// Handler for POST /cache/set
///
/// Decodes `{"key": int, "value": int}` from the raw body and stores it.
pub async fn set_handler(State(state): State<AppState>, body: Bytes) -> Result<Json<SetResponse>> {
    let req = SetRequest::from_slice(&body)?;
    state.cache.set(req.key, req.value);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for OPTIONS /cache/set
///
/// Answers a bare pre-flight without touching the cache.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

/// Handler for GET /cache/get?key=N
///
/// Returns the stored value, or `-1` on a miss, with an advisory
/// expiration of now plus the configured TTL.
pub async fn get_handler(
    State(state): State<AppState>,
    params: Option<Query<GetParams>>,
) -> Result<Json<GetResponse>> {
    let params = params.map(|Query(params)| params).unwrap_or_default();
    let key = params.parse_key()?;

    let value = state.cache.get(&key);

    Ok(Json(GetResponse::new(value, state.cache.ttl())))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(
        state.cache.stats(),
        state.cache.capacity(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::models::NOT_FOUND_SENTINEL;
    use std::time::Duration;

    fn test_state() -> AppState {
        AppState::new(Cache::new(100, Duration::from_secs(300)))
    }

    fn params(key: &str) -> Option<Query<GetParams>> {
        Some(Query(GetParams {
            key: Some(key.to_string()),
        }))
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state();

        let result = set_handler(
            State(state.clone()),
            Bytes::from_static(br#"{"key": 1, "value": 99}"#),
        )
        .await;
        assert_eq!(result.unwrap().key, 1);

        let response = get_handler(State(state.clone()), params("1")).await.unwrap();
        assert_eq!(response.value, 99);
        assert!(response.expiration > chrono::Utc::now().timestamp());
    }

    #[tokio::test]
    async fn test_get_missing_key_returns_sentinel() {
        let state = test_state();

        let response = get_handler(State(state.clone()), params("5")).await.unwrap();

        assert_eq!(response.value, NOT_FOUND_SENTINEL);
        assert_eq!(state.cache.stats().misses, 1);
    }

    #[tokio::test]
    async fn test_set_invalid_body_leaves_cache_untouched() {
        let state = test_state();

        let result = set_handler(State(state.clone()), Bytes::from_static(b"not json")).await;

        assert!(matches!(result, Err(GatewayError::InvalidBody(_))));
        assert!(state.cache.is_empty());
    }

    #[tokio::test]
    async fn test_get_invalid_key_leaves_cache_untouched() {
        let state = test_state();

        let result = get_handler(State(state.clone()), params("abc")).await;
        assert!(matches!(result, Err(GatewayError::InvalidKey(_))));

        let result = get_handler(State(state.clone()), None).await;
        assert!(matches!(result, Err(GatewayError::InvalidKey(_))));

        let stats = state.cache.stats();
        assert_eq!(stats.hits + stats.misses, 0);
    }

    #[tokio::test]
    async fn test_preflight_handler() {
        assert_eq!(preflight_handler().await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
        assert_eq!(response.capacity, 100);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
