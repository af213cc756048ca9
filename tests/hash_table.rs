// HashTable integration suite.
//
// Invariants exercised:
// - Uniqueness: a duplicate insert reports "already present" and keeps the
//   stored value; insert_or_assign overwrites.
// - Lookup: find/contains/at agree; absent keys map to the end sentinel or
//   KeyNotFound.
// - Growth: the load factor stays at or below MAX_LOAD_FACTOR, the bucket
//   count only grows, and entries stay reachable across rehashes.
// - Positions: begin..end walks visit each entry once; rehash, erase and
//   clear expire positions.
use chain_collections::{ContainerError, HashTable, DEFAULT_BUCKETS, MAX_LOAD_FACTOR};
use std::collections::BTreeMap;

// Test: the duplicate-insert scenario.
#[test]
fn duplicate_insert_keeps_first_value() {
    let mut t = HashTable::new();
    t.insert(1, "a").expect("alloc");
    t.insert(2, "b").expect("alloc");
    let (_, inserted) = t.insert(1, "c").expect("alloc");
    assert!(!inserted);
    assert_eq!(t.size(), 2);
    assert_eq!(t.at(&1), Ok(&"a"));
    assert_eq!(t.at(&2), Ok(&"b"));
}

// Test: insert_or_assign overwrites; erase(find(k)) removes exactly k.
#[test]
fn assign_then_erase() {
    let mut t: HashTable<String, u32> = HashTable::new();
    t.insert("k".into(), 1).expect("alloc");
    t.insert_or_assign("k".into(), 2).expect("alloc");
    assert_eq!(t.at("k"), Ok(&2));
    t.insert("other".into(), 3).expect("alloc");
    let before = t.len();
    let pos = t.find("k");
    assert_eq!(t.erase(pos), Ok(("k".to_string(), 2)));
    assert_eq!(t.len(), before - 1);
    assert!(!t.contains("k"));
    assert!(t.contains("other"));
}

// Test: growth keeps the load factor bounded and every key reachable.
#[test]
fn growth_bounds_load_factor() {
    let mut t = HashTable::new();
    assert_eq!(t.bucket_count(), DEFAULT_BUCKETS);
    let mut counts = vec![t.bucket_count()];
    for i in 0..1_000u64 {
        t.insert(i, i * i).expect("alloc");
        assert!(t.load_factor() <= MAX_LOAD_FACTOR);
        if *counts.last().unwrap() != t.bucket_count() {
            counts.push(t.bucket_count());
        }
    }
    assert!(counts.windows(2).all(|w| w[1] == w[0] * 2));
    for i in 0..1_000u64 {
        assert_eq!(t.at(&i), Ok(&(i * i)));
    }
}

// Test: index-or-insert builds values in place.
#[test]
fn get_or_insert_default_counts_words() {
    let mut t: HashTable<&str, usize> = HashTable::new();
    for w in "the cat saw the other cat and the dog".split(' ') {
        *t.get_or_insert_default(w).expect("alloc") += 1;
    }
    assert_eq!(t.at(&"the"), Ok(&3));
    assert_eq!(t.at(&"cat"), Ok(&2));
    assert_eq!(t.at(&"dog"), Ok(&1));
    assert_eq!(t.len(), 6);
}

// Test: iteration and the position walk agree with a model.
#[test]
fn walk_matches_iteration() {
    let mut t = HashTable::with_buckets(3);
    let mut model = BTreeMap::new();
    for i in 0..40u32 {
        t.insert(i * 13 % 37, i).expect("alloc");
        model.entry(i * 13 % 37).or_insert(i);
    }
    let from_iter: BTreeMap<u32, u32> = t.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(from_iter, model);
    assert_eq!(t.iter().len(), model.len());

    let mut from_walk = BTreeMap::new();
    let mut pos = t.begin();
    while pos != t.end() {
        let (k, v) = t.entry(pos).expect("live");
        assert!(from_walk.insert(*k, *v).is_none());
        pos = t.next(pos).expect("live");
    }
    assert_eq!(from_walk, model);
}

// Test: stale positions report Expired after rehash, erase and clear.
#[test]
fn stale_positions_are_rejected() {
    let mut t = HashTable::with_buckets(1);
    let (first, _) = t.insert('a', 1).expect("alloc");
    t.insert('b', 2).expect("alloc");
    assert_eq!(t.value(first), Err(ContainerError::Expired), "rehash");

    let b = t.find(&'b');
    t.erase(b).expect("live");
    assert_eq!(t.key(b), Err(ContainerError::Expired), "erase");

    let a = t.find(&'a');
    t.clear();
    assert_eq!(t.value(a), Err(ContainerError::Expired), "clear");
    assert_eq!(t.value(t.end()), Err(ContainerError::PositionOutOfRange));
}

// Test: values are editable through positions and iter_mut.
#[test]
fn mutate_through_positions() {
    let mut t: HashTable<u8, Vec<u8>> = HashTable::new();
    let (p, _) = t.insert(1, vec![]).expect("alloc");
    p.value_mut(&mut t).expect("live").push(10);
    t.value_mut(p).expect("live").push(11);
    for (_, v) in t.iter_mut() {
        v.push(12);
    }
    assert_eq!(t.get(&1), Some(&vec![10, 11, 12]));
    *t.get_mut(&1).expect("present") = vec![0];
    assert_eq!(p.value(&t), Ok(&vec![0]));
}

// Test: clone is deep; swap exchanges whole tables.
#[test]
fn clone_and_swap() {
    let mut a: HashTable<u32, String> = HashTable::new();
    a.insert(1, "one".into()).expect("alloc");
    let mut b = a.clone();
    b.insert_or_assign(1, "uno".into()).expect("alloc");
    assert_eq!(a.at(&1), Ok(&"one".to_string()));
    a.swap(&mut b);
    assert_eq!(a.at(&1), Ok(&"uno".to_string()));
    assert_eq!(b.at(&1), Ok(&"one".to_string()));
    assert_eq!(format!("{:?}", b), r#"{1: "one"}"#);
}
