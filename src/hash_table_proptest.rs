#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can build
// tables with a pathological hasher.

use crate::error::ContainerError;
use crate::hash_table::{HashTable, Position, MAX_LOAD_FACTOR};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hasher};

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Ops index into a small key pool so shrinking converges on short scenarios.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    InsertOrAssign(usize, i32),
    Erase(usize),
    Find(usize),
    Contains(String),
    Mutate(usize, i32),
    Walk,
    Clear,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::InsertOrAssign(i, v)),
            2 => idx.clone().prop_map(OpI::Erase),
            1 => idx.clone().prop_map(OpI::Find),
            1 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Walk),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// State-machine equivalence against std::collections::HashMap:
// - duplicate inserts are rejected and keep the stored value;
// - `insert_or_assign` overwrites;
// - `find`/`contains` parity, and `find` of an absent key is the sentinel;
// - `erase` returns the owned pair and its position never resolves again;
// - a begin..end walk visits each live key once;
// - the load factor stays within bounds and the bucket count never drops.
fn run_scenario<S>(
    mut sut: HashTable<Key, i32, S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError>
where
    S: BuildHasher + Clone + Default,
{
    let mut model: HashMap<Key, i32> = HashMap::new();
    let mut stale: Vec<Position> = Vec::new();
    let mut buckets = sut.bucket_count();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = key_from(pool, i);
                let already = model.contains_key(&k);
                let (pos, inserted) = sut.insert(k.clone(), v).expect("allocation");
                prop_assert_eq!(inserted, !already);
                prop_assert_eq!(sut.key(pos), Ok(&k));
                let stored = *model.entry(k).or_insert(v);
                prop_assert_eq!(sut.value(pos), Ok(&stored));
            }
            OpI::InsertOrAssign(i, v) => {
                let k = key_from(pool, i);
                let already = model.contains_key(&k);
                let (pos, inserted) = sut.insert_or_assign(k.clone(), v).expect("allocation");
                prop_assert_eq!(inserted, !already);
                prop_assert_eq!(sut.value(pos), Ok(&v));
                model.insert(k, v);
            }
            OpI::Erase(i) => {
                let k = key_from(pool, i);
                let pos = sut.find(&k);
                if model.contains_key(&k) {
                    let (kk, vv) = sut.erase(pos).expect("found position erases");
                    prop_assert!(kk == k);
                    prop_assert_eq!(Some(vv), model.remove(&kk));
                    stale.push(pos);
                } else {
                    prop_assert!(pos.is_end());
                    prop_assert_eq!(sut.erase(pos), Err(ContainerError::PositionOutOfRange));
                }
            }
            OpI::Find(i) => {
                let k = key_from(pool, i);
                let pos = sut.find(&k);
                prop_assert_eq!(!pos.is_end(), model.contains_key(&k));
                prop_assert_eq!(sut.value(pos).ok(), model.get(&k));
            }
            OpI::Contains(s) => {
                let has = sut.contains(s.as_str());
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(has, has_model);
            }
            OpI::Mutate(i, d) => {
                let k = key_from(pool, i);
                if let Some(vr) = sut.get_mut(&k) {
                    *vr = vr.saturating_add(d);
                    let mv = model.get_mut(&k).expect("model has live key");
                    *mv = mv.saturating_add(d);
                } else {
                    prop_assert!(!model.contains_key(&k));
                }
            }
            OpI::Walk => {
                let mut seen = BTreeSet::new();
                let mut pos = sut.begin();
                while !pos.is_end() {
                    prop_assert!(seen.insert(sut.key(pos).expect("live").clone()));
                    pos = sut.next(pos).expect("live");
                }
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(seen, m_keys);
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
            }
        }

        for &p in &stale {
            prop_assert!(sut.value(p).is_err());
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.load_factor() <= MAX_LOAD_FACTOR);
        prop_assert!(sut.bucket_count() >= buckets);
        buckets = sut.bucket_count();
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(HashTable::new(), &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_small_start((pool, ops) in arb_scenario()) {
        run_scenario(HashTable::with_buckets(1), &pool, ops)?;
    }
}

// Collision variant: every key hashes to the same bucket, so equality alone
// resolves lookups.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_scenario(HashTable::with_hasher(ConstBuildHasher), &pool, ops)?;
    }
}
