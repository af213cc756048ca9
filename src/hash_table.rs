//! HashTable: separate chaining over a `Vector` of `List` buckets.
//!
//! Each entry stores the full 64-bit hash computed at insertion. Bucket
//! selection is `hash mod bucket_count`, and a rehash redistributes entries
//! by their stored hash, so `K: Hash` is never invoked after insertion.
//!
//! Positions compose a bucket cursor with a position inside that bucket's
//! list. A rehash rebuilds every bucket and bumps the table generation, which
//! expires every position issued before it.

use crate::error::{ContainerError, Result};
use crate::list::{self, List};
use crate::vector::{Vector, GROWTH_FACTOR};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;
use log::debug;

/// Bucket count of a table built without an explicit one.
pub const DEFAULT_BUCKETS: usize = 10;

/// Upper bound on `len / bucket_count` after any insertion.
pub const MAX_LOAD_FACTOR: f64 = 0.7;

#[derive(Clone, Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    hash: u64,
}

type Bucket<K, V> = List<Entry<K, V>>;

/// Composite position: bucket cursor, table-end cursor and the position
/// inside the bucket.
///
/// The end sentinel has `bucket == table_end` and the end position of the
/// last bucket, so every sentinel of a table compares equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    bucket: usize,
    table_end: usize,
    entry: list::Position,
    generation: u64,
}

impl Position {
    pub fn is_end(&self) -> bool {
        self.bucket == self.table_end
    }

    /// Index of the bucket holding this entry.
    pub fn bucket(&self) -> usize {
        self.bucket
    }

    pub fn key<'a, K, V, S>(&self, table: &'a HashTable<K, V, S>) -> Result<&'a K>
    where
        K: Eq + Hash,
        S: BuildHasher + Clone + Default,
    {
        table.key(*self)
    }

    pub fn value<'a, K, V, S>(&self, table: &'a HashTable<K, V, S>) -> Result<&'a V>
    where
        K: Eq + Hash,
        S: BuildHasher + Clone + Default,
    {
        table.value(*self)
    }

    pub fn value_mut<'a, K, V, S>(&self, table: &'a mut HashTable<K, V, S>) -> Result<&'a mut V>
    where
        K: Eq + Hash,
        S: BuildHasher + Clone + Default,
    {
        table.value_mut(*self)
    }
}

pub struct HashTable<K, V, S = DefaultHashBuilder> {
    hasher: S,
    buckets: Vector<Bucket<K, V>>,
    len: usize,
    generation: u64,
}

impl<K, V> HashTable<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    pub fn with_buckets(buckets: usize) -> Self {
        Self::with_buckets_and_hasher(buckets, Default::default())
    }
}

impl<K, V> Default for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_buckets_and_hasher(DEFAULT_BUCKETS, hasher)
    }

    /// Table with `buckets` chains (at least one).
    pub fn with_buckets_and_hasher(buckets: usize, hasher: S) -> Self {
        let count = buckets.max(1);
        Self {
            hasher,
            buckets: (0..count).map(|_| List::new()).collect(),
            len: 0,
            generation: 0,
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    fn index_for(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    /// Bucket a key maps to under the current bucket count.
    pub fn bucket_index<Q>(&self, q: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        self.index_for(self.make_hash(q))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Alias of [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Alias of [`bucket_count`](Self::bucket_count).
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    fn find_hashed<Q>(&self, hash: u64, q: &Q) -> Option<Position>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let bucket = self.index_for(hash);
        self.buckets[bucket]
            .find_position(|e| e.hash == hash && e.key.borrow() == q)
            .map(|entry| self.position_in(bucket, entry))
    }

    /// Position of `q`, or the end sentinel when absent.
    pub fn find<Q>(&self, q: &Q) -> Position
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        self.find_hashed(hash, q).unwrap_or_else(|| self.end())
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        self.find_hashed(hash, q).is_some()
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.at(q).ok()
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.at_mut(q).ok()
    }

    pub fn at<Q>(&self, q: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let pos = self.find_hashed(hash, q).ok_or(ContainerError::KeyNotFound)?;
        self.value(pos)
    }

    pub fn at_mut<Q>(&mut self, q: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let pos = self.find_hashed(hash, q).ok_or(ContainerError::KeyNotFound)?;
        self.value_mut(pos)
    }

    /// Insert `key -> value` unless the key is already stored.
    ///
    /// Returns the entry's position and whether an insertion happened. An
    /// existing value is never overwritten.
    pub fn insert(&mut self, key: K, value: V) -> Result<(Position, bool)> {
        self.insert_with(key, || value)
    }

    /// Like [`insert`](Self::insert); `default` only runs when inserting.
    pub fn insert_with<F>(&mut self, key: K, default: F) -> Result<(Position, bool)>
    where
        F: FnOnce() -> V,
    {
        let hash = self.make_hash(&key);
        if let Some(pos) = self.find_hashed(hash, &key) {
            return Ok((pos, false));
        }
        let pos = self.insert_new(hash, key, default())?;
        Ok((pos, true))
    }

    /// Insert, or overwrite the stored value in place when the key is
    /// present.
    pub fn insert_or_assign(&mut self, key: K, value: V) -> Result<(Position, bool)> {
        let hash = self.make_hash(&key);
        let Some(pos) = self.find_hashed(hash, &key) else {
            let pos = self.insert_new(hash, key, value)?;
            return Ok((pos, true));
        };
        *self.value_mut(pos)? = value;
        Ok((pos, false))
    }

    /// Insert each pair in order.
    ///
    /// Room for the whole batch is reserved up front, so no rehash happens
    /// mid-batch and every returned position is valid.
    pub fn insert_many<I>(&mut self, pairs: I) -> Result<Vector<(Position, bool)>>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs: Vec<(K, V)> = pairs.into_iter().collect();
        self.reserve_for(pairs.len())?;
        let mut out = Vector::try_with_capacity(pairs.len())?;
        for (key, value) in pairs {
            out.push_back(self.insert(key, value)?)?;
        }
        Ok(out)
    }

    /// Value slot for `key`, inserting `V::default()` when absent.
    pub fn get_or_insert_default(&mut self, key: K) -> Result<&mut V>
    where
        V: Default,
    {
        let (pos, _) = self.insert_with(key, V::default)?;
        self.value_mut(pos)
    }

    /// Remove the entry at `pos` and return it.
    pub fn erase(&mut self, pos: Position) -> Result<(K, V)> {
        let bucket = self.live_bucket(pos)?;
        let entry = self.buckets[bucket].erase(pos.entry)?;
        self.len -= 1;
        Ok((entry.key, entry.value))
    }

    /// First entry in bucket order, or the end sentinel.
    pub fn begin(&self) -> Position {
        self.first_from(0)
    }

    pub fn end(&self) -> Position {
        let table_end = self.buckets.len();
        Position {
            bucket: table_end,
            table_end,
            entry: self.buckets[table_end - 1].end(),
            generation: self.generation,
        }
    }

    /// Step to the next entry, walking forward through empty buckets.
    pub fn next(&self, pos: Position) -> Result<Position> {
        let bucket = self.live_bucket(pos)?;
        let step = self.buckets[bucket].next(pos.entry)?;
        if !step.is_end() {
            return Ok(self.position_in(bucket, step));
        }
        Ok(self.first_from(bucket + 1))
    }

    pub fn key(&self, pos: Position) -> Result<&K> {
        self.entry_ref(pos).map(|e| &e.key)
    }

    pub fn value(&self, pos: Position) -> Result<&V> {
        self.entry_ref(pos).map(|e| &e.value)
    }

    pub fn value_mut(&mut self, pos: Position) -> Result<&mut V> {
        let bucket = self.live_bucket(pos)?;
        self.buckets[bucket]
            .get_mut(pos.entry)
            .map(|e| &mut e.value)
    }

    pub fn entry(&self, pos: Position) -> Result<(&K, &V)> {
        self.entry_ref(pos).map(|e| (&e.key, &e.value))
    }

    /// Remove every entry; the bucket count is kept and positions expire.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        self.len = 0;
    }

    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            current: None,
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let remaining = self.len;
        IterMut {
            buckets: self.buckets.iter_mut(),
            current: None,
            remaining,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    fn position_in(&self, bucket: usize, entry: list::Position) -> Position {
        Position {
            bucket,
            table_end: self.buckets.len(),
            entry,
            generation: self.generation,
        }
    }

    fn first_from(&self, start: usize) -> Position {
        (start..self.buckets.len())
            .find(|&i| !self.buckets[i].is_empty())
            .map(|i| self.position_in(i, self.buckets[i].begin()))
            .unwrap_or_else(|| self.end())
    }

    /// Bucket index of a non-sentinel position issued under the current
    /// generation.
    fn live_bucket(&self, pos: Position) -> Result<usize> {
        if pos.generation != self.generation || pos.table_end != self.buckets.len() {
            return Err(ContainerError::Expired);
        }
        if pos.is_end() {
            return Err(ContainerError::PositionOutOfRange);
        }
        Ok(pos.bucket)
    }

    fn entry_ref(&self, pos: Position) -> Result<&Entry<K, V>> {
        let bucket = self.live_bucket(pos)?;
        self.buckets[bucket].get(pos.entry)
    }

    fn insert_new(&mut self, hash: u64, key: K, value: V) -> Result<Position> {
        // Grow before picking the bucket so the entry lands in the new layout.
        self.reserve_for(1)?;
        let bucket = self.index_for(hash);
        let chain = &mut self.buckets[bucket];
        let entry = chain.insert(chain.end(), Entry { key, value, hash })?;
        self.len += 1;
        Ok(self.position_in(bucket, entry))
    }

    /// Grow so that `additional` more entries keep the load factor at or
    /// below `MAX_LOAD_FACTOR`.
    fn reserve_for(&mut self, additional: usize) -> Result<()> {
        let needed = self.len.saturating_add(additional);
        let mut count = self.buckets.len();
        while needed as f64 / count as f64 > MAX_LOAD_FACTOR {
            count = count
                .checked_mul(GROWTH_FACTOR)
                .ok_or(ContainerError::AllocationFailed {
                    capacity: usize::MAX,
                })?;
        }
        if count == self.buckets.len() {
            return Ok(());
        }
        self.rehash(count)
    }

    fn rehash(&mut self, count: usize) -> Result<()> {
        let mut fresh: Vector<Bucket<K, V>> = Vector::try_with_capacity(count)?;
        for _ in 0..count {
            fresh.push_back(List::new())?;
        }
        for bucket in self.buckets.iter_mut() {
            while let Ok(entry) = bucket.pop_front() {
                let i = (entry.hash % count as u64) as usize;
                fresh[i].push_back(entry);
            }
        }
        debug!(
            "hash table rehash: {} -> {} buckets ({} entries)",
            self.buckets.len(),
            count,
            self.len
        );
        self.buckets = fresh;
        self.generation += 1;
        Ok(())
    }
}

impl<K, V, S> Clone for HashTable<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            hasher: self.hasher.clone(),
            buckets: self.buckets.clone(),
            len: self.len,
            generation: self.generation,
        }
    }
}

impl<K, V, S> fmt::Debug for HashTable<K, V, S>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher + Clone + Default,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over entries in bucket order.
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Bucket<K, V>>,
    current: Option<list::Iter<'a, Entry<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.current.as_mut().and_then(|it| it.next()) {
                self.remaining -= 1;
                return Some((&e.key, &e.value));
            }
            self.current = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// Iterator over entries bucket by bucket with mutable values. Entries
/// within one bucket come in storage order, not chain order.
pub struct IterMut<'a, K, V> {
    buckets: core::slice::IterMut<'a, Bucket<K, V>>,
    current: Option<list::ValuesMut<'a, Entry<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.current.as_mut().and_then(|it| it.next()) {
                self.remaining -= 1;
                return Some((&e.key, &mut e.value));
            }
            self.current = Some(self.buckets.next()?.values_mut_unordered());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
