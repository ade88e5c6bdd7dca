//! LRU Cache Server - An in-memory key/value cache
//!
//! Bounded-capacity cache with least-recently-used eviction and a sliding
//! idle TTL, reclaimed both lazily on read and by a background sweeper.
//! An HTTP gateway exposes integer set/get operations.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::Cache;
pub use config::Config;
