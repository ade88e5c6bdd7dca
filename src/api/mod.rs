//! API Module
//!
//! HTTP gateway in front of the cache engine.
//!
//! # Endpoints
//! - `POST /cache/set` - Store an integer key/value pair
//! - `OPTIONS /cache/set` - Pre-flight, never touches the cache
//! - `GET /cache/get?key=N` - Retrieve a value by key
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
