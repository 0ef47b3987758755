//! Response DTOs for the market cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::CacheStats;
use crate::market::{IndexQuote, MarketSnapshot};

/// Response body for GET /api/indices
#[derive(Debug, Clone, Serialize)]
pub struct IndicesResponse {
    /// All index quotes
    pub indices: Vec<IndexQuote>,
    /// When the snapshot was built
    pub generated_at: DateTime<Utc>,
    /// Whether the snapshot came from the cache
    pub cached: bool,
}

impl IndicesResponse {
    pub fn new(snapshot: MarketSnapshot, cached: bool) -> Self {
        Self {
            indices: snapshot.indices,
            generated_at: snapshot.generated_at,
            cached,
        }
    }
}

/// Response body for GET /api/indices/:symbol
#[derive(Debug, Clone, Serialize)]
pub struct IndexResponse {
    #[serde(flatten)]
    pub quote: IndexQuote,
    pub generated_at: DateTime<Utc>,
    pub cached: bool,
}

impl IndexResponse {
    pub fn new(quote: IndexQuote, generated_at: DateTime<Utc>, cached: bool) -> Self {
        Self {
            quote,
            generated_at,
            cached,
        }
    }
}

/// Response body for DELETE /api/cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
}

impl ClearResponse {
    pub fn new() -> Self {
        Self {
            message: "Cache cleared successfully".to_string(),
        }
    }
}

impl Default for ClearResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of expired entries purged
    pub expirations: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
