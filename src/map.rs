//! Map: key/value facade over [`HashTable`].

use crate::error::Result;
use crate::hash_table::{self, HashTable, Position};
use crate::vector::Vector;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

pub struct Map<K, V, S = DefaultHashBuilder> {
    table: HashTable<K, V, S>,
}

impl<K, V> Map<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            table: HashTable::new(),
        }
    }
}

impl<K, V> Default for Map<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Map<K, V, S>
where
    K: Eq + Hash,
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

    pub fn at<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.at(key)
    }

    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.at_mut(key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.get(key)
    }

    /// Index-or-insert: the value slot for `key`, created with
    /// `V::default()` when absent.
    pub fn get_or_insert_default(&mut self, key: K) -> Result<&mut V>
    where
        V: Default,
    {
        self.table.get_or_insert_default(key)
    }

    pub fn erase(&mut self, pos: Position) -> Result<(K, V)> {
        self.table.erase(pos)
    }

    pub fn swap(&mut self, other: &mut Self) {
        self.table.swap(&mut other.table)
    }

    pub fn insert(&mut self, key: K, value: V) -> Result<(Position, bool)> {
        self.table.insert(key, value)
    }

    pub fn insert_or_assign(&mut self, key: K, value: V) -> Result<(Position, bool)> {
        self.table.insert_or_assign(key, value)
    }

    pub fn insert_many<I>(&mut self, pairs: I) -> Result<Vector<(Position, bool)>>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.table.insert_many(pairs)
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

    pub fn key(&self, pos: Position) -> Result<&K> {
        self.table.key(pos)
    }

    pub fn value(&self, pos: Position) -> Result<&V> {
        self.table.value(pos)
    }

    pub fn value_mut(&mut self, pos: Position) -> Result<&mut V> {
        self.table.value_mut(pos)
    }

    pub fn iter(&self) -> hash_table::Iter<'_, K, V> {
        self.table.iter()
    }

    pub fn iter_mut(&mut self) -> hash_table::IterMut<'_, K, V> {
        self.table.iter_mut()
    }
}

impl<K, V, S> Clone for Map<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<K, V, S> fmt::Debug for Map<K, V, S>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher + Clone + Default,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.table, f)
    }
}

impl<K, V> FromIterator<(K, V)> for Map<K, V>
where
    K: Eq + Hash,
{
    /// Later pairs overwrite earlier ones with the same key.
    ///
    /// Panics if the bucket table cannot be allocated.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            if let Err(e) = map.insert_or_assign(key, value) {
                panic!("{}", e);
            }
        }
        map
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Map<K, V>
where
    K: Eq + Hash,
{
    fn from(items: [(K, V); N]) -> Self {
        items.into_iter().collect()
    }
}

impl<'a, K, V, S> IntoIterator for &'a Map<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    type Item = (&'a K, &'a V);
    type IntoIter = hash_table::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.iter()
    }
}
