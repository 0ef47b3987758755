//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
///
/// Timestamps are readings of the clock of the store that created the
/// entry and mean nothing against any other clock.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation timestamp
    pub created_at: Duration,
    /// Expiration timestamp
    pub expires_at: Duration,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry stamped at `now` that lives for `ttl`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `now` - Current clock reading
    /// * `ttl` - Time to live; zero yields an entry that is already expired
    pub fn new(value: V, now: Duration, ttl: Duration) -> Self {
        Self {
            value,
            created_at: now,
            expires_at: now.saturating_add(ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired once `now >= expires_at`, so the moment its TTL
    /// has fully elapsed it is already gone.
    pub fn is_expired_at(&self, now: Duration) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining lifetime at `now`, zero once expired.
    pub fn ttl_remaining_at(&self, now: Duration) -> Duration {
        self.expires_at.saturating_sub(now)
    }
}
