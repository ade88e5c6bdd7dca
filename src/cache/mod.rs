//! Cache Module
//!
//! Provides the in-memory cache engine with LRU eviction and sliding TTL
//! expiration.

mod engine;
mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use engine::Cache;
pub use entry::{Entry, SlotId};
pub use lru::RecencyList;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Interval between two background sweep passes.
pub const DEFAULT_SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(1);
