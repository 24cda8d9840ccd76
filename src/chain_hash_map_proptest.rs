#![cfg(test)]

// Property tests for ChainHashMap kept inside the crate so they can reach
// chain-level diagnostics without widening the public API.

use crate::chain_hash_map::{ChainHashMap, Handle};
use crate::murmur3::KeyHasher;
use crate::MapConfig;
use hashbrown::HashMap;
use proptest::prelude::*;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, u32),
    Get(usize),
    Contains(Vec<u8>),
    Mutate(usize, u32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<OpI>)> {
    proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..=6), 1..=24).prop_flat_map(
        |pool| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let contains_pool = proptest::sample::select(pool.clone());
            let op = prop_oneof![
                3 => (idx.clone(), any::<u32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
                1 => idx.clone().prop_map(OpI::Get),
                1 => prop_oneof![
                    contains_pool,
                    proptest::collection::vec(any::<u8>(), 0..=6)
                ]
                .prop_map(OpI::Contains),
                1 => (idx.clone(), any::<u32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
                1 => Just(OpI::Iterate),
            ];
            proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
        },
    )
}

fn check_structure<H: KeyHasher>(sut: &ChainHashMap<H>) -> Result<(), TestCaseError> {
    // Every entry is linked into exactly one chain.
    let chained: usize = (0..sut.bucket_count())
        .map(|b| sut.chain_len(b).unwrap_or(0))
        .sum();
    prop_assert_eq!(chained, sut.len());
    // Bucket count is the initial capacity times a power of two.
    prop_assert_eq!(sut.bucket_count() % sut.initial_capacity(), 0);
    prop_assert!((sut.bucket_count() / sut.initial_capacity()).is_power_of_two());
    prop_assert!(sut.load_factor() <= sut.max_load_factor());
    Ok(())
}

fn run_scenario<H: KeyHasher>(
    mut sut: ChainHashMap<H>,
    pool: &[Vec<u8>],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Vec<u8>, u32> = HashMap::new();
    let mut handles: HashMap<Vec<u8>, Handle> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = &pool[i];
                let prev = sut.insert(k, v).expect("insert must not fail");
                prop_assert_eq!(prev, model.insert(k.clone(), v), "previous value parity");
                let h = sut.find(k).expect("inserted key resolves");
                if let Some(&old) = handles.get(k) {
                    prop_assert_eq!(h, old, "overwrite keeps the same entry");
                }
                handles.insert(k.clone(), h);
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k).copied());
            }
            OpI::Contains(k) => {
                prop_assert_eq!(sut.contains_key(&k), model.contains_key(&k));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(&h) = handles.get(k) {
                    match h.value_mut(&mut sut) {
                        Some(vr) => {
                            *vr = vr.wrapping_add(d);
                            if let Some(mv) = model.get_mut(k) {
                                *mv = mv.wrapping_add(d);
                            }
                        }
                        None => prop_assert!(false, "live handle should resolve"),
                    }
                } else {
                    prop_assert!(sut.get_mut(k).is_none());
                }
            }
            OpI::Iterate => {
                let seen: HashMap<Vec<u8>, u32> =
                    sut.iter().map(|(k, v)| (k.to_vec(), v)).collect();
                prop_assert_eq!(seen.len(), sut.len(), "no duplicates in iteration");
                prop_assert_eq!(&seen, &model);
            }
        }

        // Post-conditions after each op
        for (k, &h) in &handles {
            prop_assert_eq!(h.key(&sut), Some(k.as_slice()));
            prop_assert_eq!(h.value(&sut), model.get(k).copied());
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        check_structure(&sut)?;
    }
    Ok(())
}

// Property: State-machine equivalence against hashbrown::HashMap.
// Invariants exercised across random operation sequences:
// - insert returns the previous value exactly when the key was present.
// - get/contains_key parity with the model, including absent keys.
// - handles stay bound to their entry across overwrites and growth.
// - iteration yields each entry once; chains partition the entries.
// - bucket count stays initial * 2^k with load factor under the threshold.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let sut = ChainHashMap::with_capacity(2).unwrap();
        run_scenario(sut, &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_custom_config(
        (pool, ops) in arb_scenario(),
        capacity in 1usize..=5,
        lf in prop_oneof![Just(0.25f64), Just(0.75), Just(1.5), Just(4.0)],
    ) {
        let config = MapConfig::new().with_initial_capacity(capacity).with_max_load_factor(lf);
        let sut = ChainHashMap::with_config(config).unwrap();
        run_scenario(sut, &pool, ops)?;
    }
}

#[derive(Clone, Default)]
struct ConstHasher;
impl KeyHasher for ConstHasher {
    fn hash_key(&self, _key: &[u8]) -> u32 {
        0
    }
}

// Property: Same state-machine invariants as above, under worst-case
// collision behavior (constant hasher). Every entry shares one chain and
// only byte equality tells keys apart.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let sut = ChainHashMap::with_config_and_hasher(
            MapConfig::new().with_initial_capacity(4),
            ConstHasher,
        ).unwrap();
        run_scenario(sut, &pool, ops)?;
    }
}
