//! Market Module
//!
//! Mock stock index data served through the cache.

mod indices;

pub use indices::{load_snapshot, IndexQuote, MarketSnapshot, SNAPSHOT_CACHE_KEY};
