//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check lookup, overwrite and expiry behavior over
//! generated keys and payloads.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::TtlCache;

// == Test Configuration ==
const LONG_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates URL-shaped cache keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9-]{1,24}".prop_map(|path| format!("https://pokeapi.co/api/v2/{}", path))
}

/// Generates opaque response bodies, including empty ones
fn body_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Add { key: String, value: Vec<u8> },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), body_strategy()).prop_map(|(key, value)| CacheOp::Add { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

/// Runtime for constructing caches from synchronous proptest bodies.
fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_matches_model_map(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let rt = runtime();
        let _guard = rt.enter();
        let cache = TtlCache::new(LONG_TTL);
        let mut model: HashMap<String, Vec<u8>> = HashMap::new();
        let mut expected_hits = 0u64;
        let mut expected_misses = 0u64;

        for op in ops {
            match op {
                CacheOp::Add { key, value } => {
                    cache.add(key.clone(), value.clone());
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    let got = cache.get(&key);
                    prop_assert_eq!(&got, &model.get(&key).cloned());
                    if got.is_some() {
                        expected_hits += 1;
                    } else {
                        expected_misses += 1;
                    }
                }
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.total_entries, model.len());
    }

    #[test]
    fn prop_unknown_key_misses(
        added in prop::collection::vec((key_strategy(), body_strategy()), 0..20),
        probe in key_strategy()
    ) {
        prop_assume!(added.iter().all(|(key, _)| key != &probe));

        let rt = runtime();
        let _guard = rt.enter();
        let cache = TtlCache::new(LONG_TTL);
        for (key, value) in added {
            cache.add(key, value);
        }

        prop_assert_eq!(cache.get(&probe), None);
    }

    #[test]
    fn prop_last_write_wins(
        key in key_strategy(),
        first in body_strategy(),
        second in body_strategy()
    ) {
        let rt = runtime();
        let _guard = rt.enter();
        let cache = TtlCache::new(LONG_TTL);

        cache.add(key.clone(), first);
        cache.add(key.clone(), second.clone());

        prop_assert_eq!(cache.get(&key), Some(second));
        prop_assert_eq!(cache.len(), 1);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn prop_expired_entries_never_served(
        entries in prop::collection::vec((key_strategy(), body_strategy()), 1..20),
        ttl_ms in 1u64..500
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();

        rt.block_on(async {
            let ttl = Duration::from_millis(ttl_ms);
            // Reaper kept out of the way: expiry must hold on reads alone
            let cache = TtlCache::with_reap_interval(ttl, Duration::from_secs(3600));
            for (key, value) in &entries {
                cache.add(key.clone(), value.clone());
            }

            tokio::time::advance(ttl + Duration::from_millis(1)).await;

            for (key, _) in &entries {
                prop_assert_eq!(cache.get(key), None);
            }
            prop_assert!(cache.is_empty());
            Ok(())
        })?;
    }

    #[test]
    fn prop_concurrent_disjoint_keys(
        writers in 2usize..8,
        per_writer in 1usize..40
    ) {
        let rt = runtime();

        rt.block_on(async {
            let cache = Arc::new(TtlCache::new(LONG_TTL));
            let mut handles = Vec::new();

            for writer in 0..writers {
                let cache = Arc::clone(&cache);
                handles.push(tokio::spawn(async move {
                    for i in 0..per_writer {
                        let key = format!("https://pokeapi.co/api/v2/w{}/{}", writer, i);
                        let value = vec![writer as u8, i as u8];
                        cache.add(key.clone(), value.clone());
                        if cache.get(&key) != Some(value) {
                            return Err(format!("lost update for {}", key));
                        }
                        tokio::task::yield_now().await;
                    }
                    Ok(())
                }));
            }

            for handle in handles {
                let result = handle.await.expect("Task should not panic");
                prop_assert!(result.is_ok(), "Concurrent operation failed: {:?}", result);
            }

            prop_assert_eq!(cache.len(), writers * per_writer);
            Ok(())
        })?;
    }
}
