//! Stock Index Snapshot
//!
//! Builds a fixed set of index quotes. It stands in for an upstream market
//! data call, so callers memoize it rather than rebuilding it per request.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

/// Cache key under which the full snapshot is memoized.
pub const SNAPSHOT_CACHE_KEY: &str = "market:indices";

// == Index Quote ==
/// A single index level with its daily move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexQuote {
    /// Ticker symbol, e.g. `^GSPC`
    pub symbol: String,
    /// Display name
    pub name: String,
    /// Current index level
    pub value: f64,
    /// Absolute change since previous close
    pub change: f64,
    /// Percentage change since previous close
    pub change_percent: f64,
}

impl IndexQuote {
    fn new(symbol: &str, name: &str, value: f64, change: f64) -> Self {
        let previous_close = value - change;
        let change_percent = if previous_close == 0.0 {
            0.0
        } else {
            round2(change / previous_close * 100.0)
        };
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            value,
            change,
            change_percent,
        }
    }
}

// == Market Snapshot ==
/// All index quotes as of one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSnapshot {
    pub indices: Vec<IndexQuote>,
    pub generated_at: DateTime<Utc>,
}

impl MarketSnapshot {
    /// Looks up a quote by symbol, ignoring case. A leading `^` is optional.
    pub fn find(&self, symbol: &str) -> Option<&IndexQuote> {
        let wanted = symbol.trim_start_matches('^');
        self.indices
            .iter()
            .find(|quote| quote.symbol.trim_start_matches('^').eq_ignore_ascii_case(wanted))
    }
}

/// Builds a fresh snapshot of the mock index data.
pub fn load_snapshot() -> MarketSnapshot {
    debug!("building market index snapshot");
    MarketSnapshot {
        indices: vec![
            IndexQuote::new("^GSPC", "S&P 500", 5_234.18, 41.63),
            IndexQuote::new("^DJI", "Dow Jones Industrial Average", 39_512.84, 125.08),
            IndexQuote::new("^IXIC", "NASDAQ Composite", 16_340.87, 102.05),
            IndexQuote::new("^RUT", "Russell 2000", 2_062.43, -10.81),
            IndexQuote::new("^VIX", "CBOE Volatility Index", 12.55, -0.14),
        ],
        generated_at: Utc::now(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
