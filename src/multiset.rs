//! Multiset: key-only facade over `HashTable<K, K>`.
//!
//! Each key is stored as its own value. Duplicate insertions are rejected
//! exactly as the table rejects duplicate keys, so multiplicity is *not*
//! tracked: `count` reports presence (0 or 1), not occurrences. Modeling real
//! multiplicity would need a `key -> count` representation.

use crate::error::Result;
use crate::hash_table::{HashTable, Position};
use crate::vector::Vector;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

pub struct Multiset<K, S = DefaultHashBuilder> {
    table: HashTable<K, K, S>,
}

impl<K> Multiset<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            table: HashTable::new(),
        }
    }
}

impl<K> Default for Multiset<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> Multiset<K, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher + Clone + Default,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            table: HashTable::with_hasher(hasher),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn size(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn clear(&mut self) {
        self.table.clear()
    }

    pub fn begin(&self) -> Position {
        self.table.begin()
    }

    pub fn end(&self) -> Position {
        self.table.end()
    }

    pub fn next(&self, pos: Position) -> Result<Position> {
        self.table.next(pos)
    }

    /// Store `key`; a key already present is left alone and `false` returned.
    pub fn insert(&mut self, key: K) -> Result<(Position, bool)> {
        let value = key.clone();
        self.table.insert(key, value)
    }

    pub fn insert_many<I>(&mut self, keys: I) -> Result<Vector<(Position, bool)>>
    where
        I: IntoIterator<Item = K>,
    {
        self.table
            .insert_many(keys.into_iter().map(|k| (k.clone(), k)))
    }

    pub fn erase(&mut self, pos: Position) -> Result<K> {
        self.table.erase(pos).map(|(k, _)| k)
    }

    pub fn swap(&mut self, other: &mut Self) {
        self.table.swap(&mut other.table)
    }

    pub fn find<Q>(&self, key: &Q) -> Position
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.find(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.contains(key)
    }

    /// Presence as a count: 1 when stored, 0 otherwise.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        usize::from(self.table.contains(key))
    }

    pub fn key(&self, pos: Position) -> Result<&K> {
        self.table.key(pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.table.keys()
    }
}

impl<K, S> Clone for Multiset<K, S>
where
    K: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<K, S> fmt::Debug for Multiset<K, S>
where
    K: Eq + Hash + Clone + fmt::Debug,
    S: BuildHasher + Clone + Default,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> FromIterator<K> for Multiset<K>
where
    K: Eq + Hash + Clone,
{
    /// Panics if the bucket table cannot be allocated.
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        for key in iter {
            if let Err(e) = set.insert(key) {
                panic!("{}", e);
            }
        }
        set
    }
}

impl<K, const N: usize> From<[K; N]> for Multiset<K>
where
    K: Eq + Hash + Clone,
{
    fn from(items: [K; N]) -> Self {
        items.into_iter().collect()
    }
}
