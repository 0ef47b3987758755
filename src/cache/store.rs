//! Cache Store Module
//!
//! Main cache engine: HashMap storage with lazily enforced TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock, DEFAULT_TTL};

// == Cache Store ==
/// Single-owner key-value cache with per-entry TTL.
///
/// Expired entries are never swept in the background. Reads treat them as
/// absent and remove them on the spot, which is why every read takes
/// `&mut self`.
#[derive(Debug)]
pub struct CacheStore<V, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// TTL applied by `set`
    default_ttl: Duration,
    /// Time source
    clock: C,
}

impl<V> CacheStore<V, SystemClock> {
    // == Constructor ==
    /// Creates a store on the system clock.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL for entries stored with `set`
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_clock(default_ttl, SystemClock::new())
    }
}

impl<V> Default for CacheStore<V, SystemClock> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl<V, C: Clock> CacheStore<V, C> {
    /// Creates a store reading time from `clock`.
    pub fn with_clock(default_ttl: Duration, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl,
            clock,
        }
    }

    // == Set ==
    /// Stores a value under `key` with the default TTL.
    ///
    /// Any existing entry for `key` is replaced and its TTL restarts.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let ttl = self.default_ttl;
        self.set_with_ttl(key, value, ttl);
    }

    /// Stores a value under `key` that lives for `ttl`.
    ///
    /// A zero `ttl` stores an entry that is already expired.
    pub fn set_with_ttl(&mut self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        let entry = CacheEntry::new(value, self.clock.now(), ttl);
        trace!(key = %key, expires_at = ?entry.expires_at, "storing cache entry");
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the value for `key` if it has a live entry.
    ///
    /// An expired entry is removed and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        if self.is_live_after_purge(key) {
            self.stats.record_hit();
            self.entries.get(key).map(|entry| &entry.value)
        } else {
            self.stats.record_miss();
            None
        }
    }

    // == Has ==
    /// Reports whether `key` has a live entry, purging it if expired.
    ///
    /// Does not count towards hits or misses.
    pub fn has(&mut self, key: &str) -> bool {
        self.is_live_after_purge(key)
    }

    /// Remaining lifetime of the live entry for `key`.
    pub fn ttl_remaining(&mut self, key: &str) -> Option<Duration> {
        if !self.is_live_after_purge(key) {
            return None;
        }
        let now = self.clock.now();
        self.entries
            .get(key)
            .map(|entry| entry.ttl_remaining_at(now))
    }

    // == Delete ==
    /// Removes the entry for `key`. Absent keys are a no-op.
    ///
    /// Returns `true` if a live entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        let Some(entry) = self.entries.remove(key) else {
            return false;
        };
        self.stats.set_total_entries(self.entries.len());

        let live = !entry.is_expired_at(self.clock.now());
        if !live {
            self.stats.record_expirations(1);
        }
        live
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        self.stats.set_total_entries(0);
        debug!("cleared {} cache entries", count);
    }

    // == Purge Expired ==
    /// Removes all expired entries at once.
    ///
    /// Nothing in the crate calls this on a schedule; it is there for hosts
    /// that hold many keys which are never read again.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - self.entries.len();

        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        if removed > 0 {
            debug!("purged {} expired cache entries", removed);
        }
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// TTL applied by `set`.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Length ==
    /// Returns the number of entries held, including expired entries that
    /// no read has purged yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `key` has a live entry. An expired entry is
    /// removed before returning `false`.
    fn is_live_after_purge(&mut self, key: &str) -> bool {
        let now = self.clock.now();
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(now),
            None => return false,
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
            debug!(key, "purged expired cache entry");
        }
        !expired
    }
}
