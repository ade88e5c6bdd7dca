//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    get_handler, health_handler, preflight_handler, set_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /cache/set` - Store a key/value pair
/// - `OPTIONS /cache/set` - Pre-flight without touching the cache
/// - `GET /cache/get?key=N` - Retrieve a value by key
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// Any other method on these paths is answered with 405.
///
/// # Middleware
/// - CORS: Any origin, `GET`/`POST`/`OPTIONS`, `Content-Type` header
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/cache/set", post(set_handler).options(preflight_handler))
        .route("/cache/get", get(get_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
