// ChainHashMap property tests (public API).
//
// Property 1: round trip and last write wins.
//  - Model: per-key last written value.
//  - Invariant: get(k) == model[k] for inserted keys; len == distinct keys.
//
// Property 2: growth.
//  - After N distinct inserts from capacity 16, bucket_count is the
//    smallest 16 * 2^k with N / bucket_count <= 0.75.
//  - Every key still maps to its value afterwards.
//
// Property 3: hashing is a pure function of (key, seed).
use chain_hashmap::{murmur3_32, ChainHashMap};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

fn smallest_sufficient(n: usize, initial: usize) -> usize {
    let mut count = initial;
    while n as f64 / count as f64 > 0.75 {
        count *= 2;
    }
    count
}

proptest! {
    #[test]
    fn prop_last_write_wins(
        writes in proptest::collection::vec(("[a-d]{0,3}", any::<u32>()), 1..200),
        probes in proptest::collection::vec("[a-e]{0,3}", 0..20),
    ) {
        let mut m = ChainHashMap::new().unwrap();
        let mut model: BTreeMap<String, u32> = BTreeMap::new();
        for (k, v) in &writes {
            let prev = m.insert(k, *v).unwrap();
            prop_assert_eq!(prev, model.insert(k.clone(), *v));
        }
        prop_assert_eq!(m.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(m.get(k), Some(*v));
        }
        for p in &probes {
            prop_assert_eq!(m.get(p), model.get(p).copied());
        }
    }

    #[test]
    fn prop_growth_to_smallest_sufficient_capacity(
        keys in proptest::collection::btree_set(proptest::collection::vec(any::<u8>(), 0..12), 0..400),
    ) {
        let keys: Vec<Vec<u8>> = keys.into_iter().collect();
        let mut m = ChainHashMap::with_capacity(16).unwrap();
        for (i, k) in keys.iter().enumerate() {
            prop_assert_eq!(m.insert(k, i as u32).unwrap(), None);
        }
        prop_assert_eq!(m.bucket_count(), smallest_sufficient(keys.len(), 16));
        for (i, k) in keys.iter().enumerate() {
            prop_assert_eq!(m.get(k), Some(i as u32));
        }
        let listed: BTreeSet<Vec<u8>> = m.iter().map(|(k, _)| k.to_vec()).collect();
        prop_assert_eq!(listed.len(), keys.len());
    }

    #[test]
    fn prop_hash_is_deterministic(key in proptest::collection::vec(any::<u8>(), 0..64), seed in any::<u32>()) {
        prop_assert_eq!(murmur3_32(&key, seed), murmur3_32(&key.clone(), seed));
    }
}
