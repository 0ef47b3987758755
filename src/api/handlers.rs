//! API Handlers
//!
//! HTTP request handlers serving the memoized market snapshot.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::{Clock, SharedCache, SystemClock};
use crate::error::{ApiError, Result};
use crate::market::{load_snapshot, MarketSnapshot, SNAPSHOT_CACHE_KEY};
use crate::models::{ClearResponse, HealthResponse, IndexResponse, IndicesResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// The snapshot cache is constructed by the caller and injected here; there
/// is no process-global instance.
#[derive(Debug)]
pub struct AppState<C = SystemClock> {
    /// Memoized market snapshots
    pub snapshots: SharedCache<MarketSnapshot, C>,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            snapshots: self.snapshots.clone(),
        }
    }
}

impl AppState<SystemClock> {
    /// Creates state whose snapshots live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self::with_cache(SharedCache::new(ttl))
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(config.default_ttl())
    }
}

impl<C: Clock> AppState<C> {
    pub fn with_cache(snapshots: SharedCache<MarketSnapshot, C>) -> Self {
        Self { snapshots }
    }

    /// Returns the memoized snapshot and whether it was served from cache.
    fn snapshot(&self) -> (MarketSnapshot, bool) {
        let mut rebuilt = false;
        let snapshot = self.snapshots.get_or_insert_with(SNAPSHOT_CACHE_KEY, || {
            rebuilt = true;
            load_snapshot()
        });
        (snapshot, !rebuilt)
    }
}

/// Handler for GET /api/indices
pub async fn indices_handler<C>(State(state): State<AppState<C>>) -> Json<IndicesResponse>
where
    C: Clock + Send + 'static,
{
    let (snapshot, cached) = state.snapshot();
    Json(IndicesResponse::new(snapshot, cached))
}

/// Handler for GET /api/indices/:symbol
///
/// Looks the symbol up in the memoized snapshot, so it shares the cache
/// with the full listing.
pub async fn index_handler<C>(
    State(state): State<AppState<C>>,
    Path(symbol): Path<String>,
) -> Result<Json<IndexResponse>>
where
    C: Clock + Send + 'static,
{
    let (snapshot, cached) = state.snapshot();
    let quote = snapshot
        .find(&symbol)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("index {}", symbol)))?;

    Ok(Json(IndexResponse::new(quote, snapshot.generated_at, cached)))
}

/// Handler for DELETE /api/cache
pub async fn clear_handler<C>(State(state): State<AppState<C>>) -> Json<ClearResponse>
where
    C: Clock + Send + 'static,
{
    state.snapshots.clear();
    info!("Snapshot cache cleared on request");
    Json(ClearResponse::new())
}

/// Handler for GET /stats
pub async fn stats_handler<C>(State(state): State<AppState<C>>) -> Json<StatsResponse>
where
    C: Clock + Send + 'static,
{
    Json(state.snapshots.stats().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    fn manual_state(ttl: Duration) -> (AppState<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let cache = SharedCache::with_clock(ttl, clock.clone());
        (AppState::with_cache(cache), clock)
    }

    #[tokio::test]
    async fn test_indices_handler_memoizes() {
        let state = AppState::new(Duration::from_secs(30));

        let first = indices_handler(State(state.clone())).await;
        let second = indices_handler(State(state.clone())).await;

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.generated_at, second.generated_at);
    }

    #[tokio::test]
    async fn test_indices_handler_rebuilds_after_ttl() {
        let (state, clock) = manual_state(Duration::from_millis(1000));

        indices_handler(State(state.clone())).await;
        clock.advance(Duration::from_millis(500));
        assert!(indices_handler(State(state.clone())).await.cached);

        clock.advance(Duration::from_millis(500));
        assert!(!indices_handler(State(state.clone())).await.cached);
    }

    #[tokio::test]
    async fn test_index_handler_found() {
        let state = AppState::new(Duration::from_secs(30));

        let response = index_handler(State(state), Path("ixic".to_string()))
            .await
            .unwrap();

        assert_eq!(response.quote.symbol, "^IXIC");
    }

    #[tokio::test]
    async fn test_index_handler_unknown_symbol() {
        let state = AppState::new(Duration::from_secs(30));

        let result = index_handler(State(state), Path("NOPE".to_string())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_clear_handler_drops_snapshot() {
        let state = AppState::new(Duration::from_secs(30));

        indices_handler(State(state.clone())).await;
        clear_handler(State(state.clone())).await;

        assert!(state.snapshots.is_empty());
        assert!(!indices_handler(State(state)).await.cached);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = AppState::new(Duration::from_secs(30));

        indices_handler(State(state.clone())).await; // miss
        indices_handler(State(state.clone())).await; // hit

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 1);
        assert_eq!(response.misses, 1);
        assert_eq!(response.total_entries, 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
