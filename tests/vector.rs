// Vector integration suite.
//
// Invariants exercised:
// - Indexing: `at(i)` is the i-th pushed value; out-of-range access is
//   reported with the rejected index and the live length.
// - Growth: values survive every reallocation; capacity follows the
//   doubling policy and is never reduced by erase.
// - Positional edits: insert/erase shift the tail and round-trip.
use chain_collections::{ContainerError, Vector, GROWTH_FACTOR};

// Test: N pushes give size N with values in push order.
// Verifies: at(i) across several reallocations.
#[test]
fn push_back_then_index() {
    let mut v = Vector::new();
    for i in 0..100u32 {
        v.push_back(i * 3).expect("push");
    }
    assert_eq!(v.len(), 100);
    assert_eq!(v.size(), 100);
    for i in 0..100u32 {
        assert_eq!(v.at(i as usize), Ok(&(i * 3)));
    }
    assert!(v.capacity() >= 100);
    assert_eq!(v.capacity() % GROWTH_FACTOR, 0);
}

// Test: insertion shifts the tail right.
#[test]
fn insert_in_middle() {
    let mut v = Vector::from([1, 2, 3, 4, 5]);
    assert_eq!(v.insert(2, 99), Ok(2));
    assert_eq!(v.as_slice(), &[1, 2, 99, 3, 4, 5]);
    assert_eq!(v.insert(6, 7), Ok(6), "len is a valid insert position");
    assert_eq!(
        v.insert(9, 0),
        Err(ContainerError::IndexOutOfRange { index: 9, len: 7 })
    );
    assert_eq!(v.len(), 7);
}

// Test: erase then insert of the same value at the same index restores the
// original contents.
#[test]
fn erase_insert_round_trip() {
    let original = Vector::from(["a", "b", "c", "d"]);
    for pos in 0..original.len() {
        let mut v = original.clone();
        let removed = v.erase(pos).expect("in range");
        assert_eq!(v.len(), original.len() - 1);
        v.insert(pos, removed).expect("in range");
        assert_eq!(v, original);
    }
}

// Test: insert_many writes successive indices from the anchor.
#[test]
fn insert_many_at_front_and_back() {
    let mut v = Vector::from([3, 4]);
    assert_eq!(v.insert_many(0, [1, 2]), Ok(0));
    v.insert_many(v.len(), [5, 6]).expect("append");
    assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5, 6]);
    assert_eq!(v.insert_many(0, Vec::<i32>::new()), Ok(0));
    assert_eq!(v.len(), 6);
}

// Test: front/back/pop_back on an empty vector.
#[test]
fn empty_accessors_report_empty() {
    let mut v: Vector<String> = Vector::default();
    assert!(v.is_empty());
    assert_eq!(v.front(), Err(ContainerError::Empty));
    assert_eq!(v.back(), Err(ContainerError::Empty));
    assert_eq!(v.pop_back(), Err(ContainerError::Empty));
    assert_eq!(
        v.at(0),
        Err(ContainerError::IndexOutOfRange { index: 0, len: 0 })
    );
}

// Test: size + fill construction and clear keeps capacity.
#[test]
fn from_elem_and_clear() {
    let mut v = Vector::from_elem(4, 'x');
    assert_eq!(v.as_slice(), &['x'; 4]);
    assert_eq!(v.capacity(), 4);
    v.clear();
    assert!(v.is_empty());
    assert_eq!(v.capacity(), 4);
}

// Test: owned values move through reallocation intact.
#[test]
fn owned_values_survive_growth() {
    let mut v = Vector::with_capacity(1);
    for i in 0..33 {
        v.push_back(format!("s{}", i)).expect("push");
    }
    let joined: Vec<&str> = v.iter().map(String::as_str).collect();
    assert_eq!(joined.len(), 33);
    assert_eq!(joined[0], "s0");
    assert_eq!(joined[32], "s32");
    assert_eq!(v.pop_back(), Ok("s32".to_string()));
    assert_eq!(v.back(), Ok(&"s31".to_string()));
}

// Test: swap exchanges contents and capacities.
#[test]
fn swap_exchanges_everything() {
    let mut a = Vector::from([1, 2, 3]);
    let mut b = Vector::with_capacity(10);
    b.push_back(9).expect("push");
    a.swap(&mut b);
    assert_eq!(a.as_slice(), &[9]);
    assert_eq!(a.capacity(), 10);
    assert_eq!(b.as_slice(), &[1, 2, 3]);
    assert_eq!(b.capacity(), 3);
}

// Test: iteration by value, by shared and by mutable reference.
#[test]
fn into_iterator_variants() {
    let mut v: Vector<i32> = (1..=4).collect();
    for x in &mut v {
        *x *= 2;
    }
    let sum: i32 = (&v).into_iter().sum();
    assert_eq!(sum, 20);
    let owned: Vec<i32> = v.into_iter().rev().collect();
    assert_eq!(owned, vec![8, 6, 4, 2]);
}
