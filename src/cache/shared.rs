//! Shared Cache Module
//!
//! Cloneable, thread-safe handle around a [`CacheStore`].

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::{CacheStats, CacheStore, Clock, SystemClock};

// == Shared Cache ==
/// Thread-safe cache handle. Clones point at the same store.
///
/// Each call holds the lock for its whole read-then-write sequence, so a
/// lazy purge and a concurrent `set` on the same key cannot interleave.
#[derive(Debug)]
pub struct SharedCache<V, C = SystemClock> {
    inner: Arc<Mutex<CacheStore<V, C>>>,
}

impl<V, C> Clone for SharedCache<V, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> SharedCache<V, SystemClock> {
    /// Creates a shared cache on the system clock.
    pub fn new(default_ttl: Duration) -> Self {
        Self::from_store(CacheStore::new(default_ttl))
    }
}

impl<V, C: Clock> SharedCache<V, C> {
    /// Creates a shared cache reading time from `clock`.
    pub fn with_clock(default_ttl: Duration, clock: C) -> Self {
        Self::from_store(CacheStore::with_clock(default_ttl, clock))
    }

    /// Wraps an existing store.
    pub fn from_store(store: CacheStore<V, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Stores a value under `key` with the default TTL, replacing any entry.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.inner.lock().set(key, value);
    }

    /// Stores a value under `key` that lives for `ttl`.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.inner.lock().set_with_ttl(key, value, ttl);
    }

    /// Returns a copy of the live value for `key`.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Reports whether `key` has a live entry, purging it if expired.
    pub fn has(&self, key: &str) -> bool {
        self.inner.lock().has(key)
    }

    /// Remaining lifetime of the live entry for `key`.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.inner.lock().ttl_remaining(key)
    }

    /// Removes the entry for `key`; `true` if a live entry was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.inner.lock().delete(key)
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Removes all expired entries, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        self.inner.lock().purge_expired()
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Number of entries held, expired-but-unpurged included.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if no entries are held.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    // == Memoization ==
    /// Returns the live value for `key`, or computes, stores and returns a
    /// new one with the default TTL.
    ///
    /// `compute` runs while the lock is held, so concurrent callers for a
    /// cold key compute once. Keep it short and synchronous.
    pub fn get_or_insert_with<F>(&self, key: &str, compute: F) -> V
    where
        V: Clone,
        F: FnOnce() -> V,
    {
        let mut store = self.inner.lock();
        let ttl = store.default_ttl();
        Self::memoize(&mut store, key, ttl, compute)
    }

    /// Like [`get_or_insert_with`](Self::get_or_insert_with) with an explicit TTL.
    pub fn get_or_insert_with_ttl<F>(&self, key: &str, ttl: Duration, compute: F) -> V
    where
        V: Clone,
        F: FnOnce() -> V,
    {
        let mut store = self.inner.lock();
        Self::memoize(&mut store, key, ttl, compute)
    }

    fn memoize<F>(store: &mut CacheStore<V, C>, key: &str, ttl: Duration, compute: F) -> V
    where
        V: Clone,
        F: FnOnce() -> V,
    {
        if let Some(value) = store.get(key) {
            return value.clone();
        }
        let value = compute();
        store.set_with_ttl(key, value.clone(), ttl);
        value
    }
}
