//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - TTL Sweeper: Removes idle cache entries at a fixed interval

mod sweeper;

pub use sweeper::{spawn_sweeper, Sweeper};
