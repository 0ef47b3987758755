//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store against a simple model, with time
//! driven by a manual clock instead of sleeps.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheStore, ManualClock};

// == Test Configuration ==
const TEST_DEFAULT_TTL: Duration = Duration::from_secs(30);

fn test_store() -> (CacheStore<String, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    (CacheStore::with_clock(TEST_DEFAULT_TTL, clock.clone()), clock)
}

// == Strategies ==
/// Keys drawn from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-d]{1,2}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,32}"
}

fn ttl_strategy() -> impl Strategy<Value = u64> {
    1u64..5_000
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String, ttl_ms: u64 },
    Get { key: String },
    Has { key: String },
    Delete { key: String },
    Clear,
    Advance { ms: u64 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy(), ttl_strategy())
            .prop_map(|(key, value, ttl_ms)| CacheOp::Set { key, value, ttl_ms }),
        4 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        2 => key_strategy().prop_map(|key| CacheOp::Has { key }),
        2 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
        1 => Just(CacheOp::Clear),
        3 => (0u64..3_000).prop_map(|ms| CacheOp::Advance { ms }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Every read agrees with a model map of (value, expires_at).
    #[test]
    fn prop_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let (mut store, clock) = test_store();
        let mut model: HashMap<String, (String, u64)> = HashMap::new();
        let mut now = 0u64;
        let mut expected_hits = 0u64;
        let mut expected_misses = 0u64;

        for op in ops {
            match op {
                CacheOp::Set { key, value, ttl_ms } => {
                    store.set_with_ttl(key.clone(), value.clone(), Duration::from_millis(ttl_ms));
                    model.insert(key, (value, now + ttl_ms));
                }
                CacheOp::Get { key } => {
                    let expected = model
                        .get(&key)
                        .filter(|(_, expires_at)| now < *expires_at)
                        .map(|(value, _)| value.clone());
                    match &expected {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    }
                    prop_assert_eq!(store.get(&key).cloned(), expected);
                }
                CacheOp::Has { key } => {
                    let expected = model
                        .get(&key)
                        .is_some_and(|(_, expires_at)| now < *expires_at);
                    prop_assert_eq!(store.has(&key), expected);
                }
                CacheOp::Delete { key } => {
                    store.delete(&key);
                    model.remove(&key);
                }
                CacheOp::Clear => {
                    store.clear();
                    model.clear();
                }
                CacheOp::Advance { ms } => {
                    now += ms;
                    clock.advance(Duration::from_millis(ms));
                }
            }
            prop_assert!(store.len() <= model.len(), "store holds keys the model never had");
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, store.len(), "Total entries mismatch");
    }

    // A read inside the TTL returns the stored value.
    #[test]
    fn prop_live_until_ttl(
        key in key_strategy(),
        value in value_strategy(),
        ttl_ms in ttl_strategy(),
        elapsed_fraction in 0.0f64..1.0
    ) {
        let (mut store, clock) = test_store();
        store.set_with_ttl(key.clone(), value.clone(), Duration::from_millis(ttl_ms));

        let elapsed = ((ttl_ms as f64) * elapsed_fraction) as u64;
        clock.advance(Duration::from_millis(elapsed.min(ttl_ms - 1)));

        prop_assert!(store.has(&key));
        prop_assert_eq!(store.get(&key), Some(&value));
    }

    // Once the TTL has elapsed the entry is a miss and is gone from the store.
    #[test]
    fn prop_expired_entry_is_purged(
        key in key_strategy(),
        value in value_strategy(),
        ttl_ms in ttl_strategy(),
        overshoot in 0u64..10_000
    ) {
        let (mut store, clock) = test_store();
        store.set_with_ttl(key.clone(), value, Duration::from_millis(ttl_ms));

        clock.advance(Duration::from_millis(ttl_ms + overshoot));

        prop_assert_eq!(store.len(), 1);
        prop_assert!(store.get(&key).is_none());
        prop_assert_eq!(store.len(), 0);
        prop_assert!(!store.has(&key));
    }

    // Overwriting keeps one entry holding the last value.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let (mut store, _clock) = test_store();

        store.set(key.clone(), value1);
        store.set(key.clone(), value2.clone());

        prop_assert_eq!(store.get(&key), Some(&value2));
        prop_assert_eq!(store.len(), 1);
    }

    // Clearing everything leaves no key readable.
    #[test]
    fn prop_clear_empties_store(keys in prop::collection::hash_set(key_strategy(), 1..10)) {
        let (mut store, _clock) = test_store();
        for key in &keys {
            store.set(key.clone(), key.clone());
        }

        store.clear();

        prop_assert!(store.is_empty());
        for key in &keys {
            prop_assert!(!store.has(key));
        }
    }
}
