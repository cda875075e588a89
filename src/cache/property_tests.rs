//! Property-Based Tests for Cache Module
//!
//! Uses proptest to exercise the store facade with generated keys,
//! payloads and operation sequences.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::cache::CacheStore;
use crate::config::CacheConfig;
use crate::models::{CacheRequest, ResultCode};
use crate::storage::{MemoryMedium, StorageMedium};

// == Test Configuration ==
const TEST_CAPACITY: usize = 1 << 20;

fn fresh_store() -> CacheStore<MemoryMedium> {
    CacheStore::new(MemoryMedium::new(TEST_CAPACITY), CacheConfig::default())
}

// == Strategies ==
/// Generates valid cache keys (non-empty, word characters)
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,64}".prop_map(|s| s)
}

/// Generates JSON payloads of the shapes callers actually store
fn payload_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,64}".prop_map(Value::String),
        ("[a-z]{1,8}", "[a-zA-Z0-9 ]{0,32}").prop_map(|(k, v)| json!({ k: v })),
    ]
}

/// Generates plain strings another writer might keep in the medium.
///
/// Filtered so none of them accidentally parse as a JSON document.
fn foreign_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z ]{1,40}".prop_filter("must not parse as JSON", |s| {
        serde_json::from_str::<Value>(s).is_err()
    })
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Save { key: String, value: Value },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (valid_key_strategy(), payload_strategy())
            .prop_map(|(key, value)| CacheOp::Save { key, value }),
        valid_key_strategy().prop_map(|key| CacheOp::Get { key }),
        valid_key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any key and payload, saving and then reading the key returns
    // the exact payload that was stored.
    #[test]
    fn prop_roundtrip_storage(key in valid_key_strategy(), value in payload_strategy()) {
        let mut store = fresh_store();

        let saved = store
            .save(&CacheRequest::key(&key).with_value(value.clone()))
            .unwrap();
        prop_assert_eq!(saved.result, ResultCode::Json, "Save should succeed");

        let fetched = store.get(&CacheRequest::key(&key)).unwrap();
        prop_assert_eq!(fetched.result, ResultCode::Json);
        prop_assert_eq!(&fetched.data["value"], &value, "Round-trip payload mismatch");
    }

    // For any key, saving V1 and then V2 under it reads back V2.
    #[test]
    fn prop_overwrite_last_wins(
        key in valid_key_strategy(),
        value1 in payload_strategy(),
        value2 in payload_strategy()
    ) {
        let mut store = fresh_store();

        store.save(&CacheRequest::key(&key).with_value(value1)).unwrap();
        store.save(&CacheRequest::key(&key).with_value(value2.clone())).unwrap();

        let fetched = store.get(&CacheRequest::key(&key)).unwrap();
        prop_assert_eq!(&fetched.data["value"], &value2, "Overwrite should read back the new payload");
        prop_assert_eq!(store.medium().len(), 1, "Overwrite must not grow the medium");
    }

    // For any stored key, deleting it makes the next read a miss, and a
    // second delete still reports success.
    #[test]
    fn prop_delete_removes_entry(key in valid_key_strategy(), value in payload_strategy()) {
        let mut store = fresh_store();

        store.save(&CacheRequest::key(&key).with_value(value)).unwrap();
        prop_assert_eq!(
            store.get(&CacheRequest::key(&key)).unwrap().result,
            ResultCode::Json
        );

        let deleted = store.delete(&CacheRequest::key(&key)).unwrap();
        prop_assert_eq!(deleted.result, ResultCode::Json);

        prop_assert_eq!(
            store.get(&CacheRequest::key(&key)).unwrap().result,
            ResultCode::NotFound,
            "Key should be gone after delete"
        );

        let again = store.delete(&CacheRequest::key(&key)).unwrap();
        prop_assert_eq!(again.result, ResultCode::Json, "Deletes are idempotent");
    }

    // For any mix of foreign strings and own entries, a flush removes
    // every own entry and not a single foreign one.
    #[test]
    fn prop_flush_spares_foreign_data(
        foreign in prop::collection::hash_map("[a-z]{1,12}", foreign_value_strategy(), 1..8),
        own_keys in prop::collection::hash_set(valid_key_strategy(), 1..8),
        value in payload_strategy()
    ) {
        let mut medium = MemoryMedium::new(TEST_CAPACITY);
        for (key, raw) in &foreign {
            medium.set(&format!("ext_{key}"), raw).unwrap();
        }

        let mut store = CacheStore::new(medium, CacheConfig::default());
        for key in &own_keys {
            store.save(&CacheRequest::key(format!("own_{key}")).with_value(value.clone())).unwrap();
        }

        let removed = store.flush();
        prop_assert_eq!(removed, own_keys.len(), "Flush removes exactly the own entries");

        for (key, raw) in &foreign {
            let surviving = store.medium().get(&format!("ext_{key}"));
            prop_assert_eq!(
                surviving.as_deref(),
                Some(raw.as_str()),
                "Foreign value must survive a flush unchanged"
            );
        }
        for key in &own_keys {
            prop_assert!(
                store.medium().get(&format!("own_{key}")).is_none(),
                "Own entry must be gone after a flush"
            );
        }
    }

    // For any sequence of saves, the total size report equals the bytes
    // actually sitting in the medium.
    #[test]
    fn prop_size_matches_medium_bytes(
        entries in prop::collection::vec((valid_key_strategy(), payload_strategy()), 1..20)
    ) {
        let mut store = fresh_store();
        for (key, value) in &entries {
            store.save(&CacheRequest::key(key).with_value(value.clone())).unwrap();
        }

        let expected: u64 = store
            .medium()
            .keys()
            .iter()
            .filter_map(|key| store.medium().get(key))
            .map(|raw| raw.len() as u64)
            .sum();
        prop_assert_eq!(store.size(None), expected);
        prop_assert_eq!(store.size(None), store.medium().used_bytes() as u64);
    }

    // For any operation sequence, the store agrees with a plain map model:
    // reads hit exactly when the model holds the key, with the model's payload.
    #[test]
    fn prop_store_matches_map_model(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = fresh_store();
        let mut model: HashMap<String, Value> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Save { key, value } => {
                    let saved = store
                        .save(&CacheRequest::key(&key).with_value(value.clone()))
                        .unwrap();
                    prop_assert_eq!(saved.result, ResultCode::Json);
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    let fetched = store.get(&CacheRequest::key(&key)).unwrap();
                    match model.get(&key) {
                        Some(expected) => {
                            prop_assert_eq!(fetched.result, ResultCode::Json, "Model expects a hit");
                            prop_assert_eq!(&fetched.data["value"], expected);
                        }
                        None => {
                            prop_assert_eq!(fetched.result, ResultCode::NotFound, "Model expects a miss");
                        }
                    }
                }
                CacheOp::Delete { key } => {
                    let deleted = store.delete(&CacheRequest::key(&key)).unwrap();
                    prop_assert_eq!(deleted.result, ResultCode::Json);
                    model.remove(&key);
                }
            }
        }

        prop_assert_eq!(store.medium().len(), model.len(), "Entry count diverged from the model");
    }
}

// Separate block with fewer cases for tests that build timestamps
// relative to the wall clock
proptest! {
    #![proptest_config(ProptestConfig::with_cases(10))]

    // For any set of stale and fresh entries, a construction-time purge
    // with a zero threshold removes exactly the stale ones.
    #[test]
    fn prop_construction_purge_removes_only_stale(
        stale_keys in prop::collection::hash_set("[a-z]{1,10}", 1..6),
        fresh_keys in prop::collection::hash_set("[A-Z]{1,10}", 1..6)
    ) {
        use crate::cache::entry::CacheEntry;
        use crate::cache::expiry::format_timestamp;
        use chrono::{Duration, Local};

        let now = Local::now().naive_local();
        let mut medium = MemoryMedium::new(TEST_CAPACITY);

        for key in &stale_keys {
            let entry = CacheEntry::new(&json!(1), 0, format_timestamp(now - Duration::hours(1)))
                .unwrap();
            medium.set(&format!("stale_{key}"), &entry.encode().unwrap()).unwrap();
        }
        for key in &fresh_keys {
            let entry = CacheEntry::new(&json!(1), 0, format_timestamp(now + Duration::hours(1)))
                .unwrap();
            medium.set(&format!("fresh_{key}"), &entry.encode().unwrap()).unwrap();
        }

        let config = CacheConfig {
            clean_dirty_after: Some(0),
            ..Default::default()
        };
        let store = CacheStore::new(medium, config);

        for key in &stale_keys {
            prop_assert!(
                store.medium().get(&format!("stale_{key}")).is_none(),
                "Stale entry should be purged at construction"
            );
        }
        for key in &fresh_keys {
            prop_assert!(
                store.medium().get(&format!("fresh_{key}")).is_some(),
                "Fresh entry should survive the purge"
            );
        }
    }
}
