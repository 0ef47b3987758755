//! Ephemeral Cache - A lazily expiring in-memory TTL cache
//!
//! Stores values under string keys with a per-entry time-to-live. Expired
//! entries are treated as misses and purged on access; nothing sweeps in
//! the background. A small axum server memoizes mock market index data
//! through the cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod market;
pub mod models;

pub use api::AppState;
pub use cache::{CacheStore, Clock, ManualClock, SharedCache, SystemClock, DEFAULT_TTL};
pub use config::Config;
pub use error::ApiError;
