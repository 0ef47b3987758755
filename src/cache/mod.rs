//! Cache Module
//!
//! Provides an in-memory key-value cache with lazily enforced TTL expiration.

use std::time::Duration;

mod clock;
mod entry;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Time-to-live applied by `set` when the caller gives none.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);
