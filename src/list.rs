//! List: doubly linked sequence with generational, expiring positions.
//!
//! Nodes live in a per-list `SlotMap` arena owned by the list. Forward and
//! backward links are generational keys into that arena: they never keep a
//! node alive, and a link or position whose node has been removed fails the
//! liveness check instead of reading stale data.
//!
//! Every list carries an identity. A [`Position`] remembers the list that
//! issued it, so handing a position to the wrong list is reported rather
//! than silently aliasing an unrelated node.

use crate::error::{ContainerError, Result};
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use log::trace;
use slotmap::{SecondaryMap, SlotMap};

slotmap::new_key_type! {
    pub(crate) struct NodeKey;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct ListId(u64);

impl ListId {
    // Process-wide: lists move between threads, so a per-thread counter
    // could hand two live lists the same id.
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        ListId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Debug)]
struct Node<T> {
    value: T,
    next: Option<NodeKey>,
    // Navigation only; resolved through the arena on use.
    prev: Option<NodeKey>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Cursor {
    Node(NodeKey),
    End,
}

/// Bidirectional position in a [`List`]: a live node or the end sentinel.
///
/// Two end positions of the same list are equal no matter how they were
/// reached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    list: ListId,
    cursor: Cursor,
}

impl Position {
    pub fn is_end(&self) -> bool {
        self.cursor == Cursor::End
    }

    pub fn value<'a, T>(&self, list: &'a List<T>) -> Result<&'a T> {
        list.get(*self)
    }

    pub fn value_mut<'a, T>(&self, list: &'a mut List<T>) -> Result<&'a mut T> {
        list.get_mut(*self)
    }
}

pub struct List<T> {
    id: ListId,
    nodes: SlotMap<NodeKey, Node<T>>,
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
}

impl<T> List<T> {
    pub fn new() -> Self {
        Self {
            id: ListId::fresh(),
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    /// `n` copies of `value`.
    pub fn from_elem(n: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut list = Self::new();
        for _ in 0..n {
            list.push_back(value.clone());
        }
        list
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Alias of [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn max_size(&self) -> usize {
        // Arena indices are 32-bit; two are reserved.
        u32::MAX as usize - 1
    }

    pub fn front(&self) -> Result<&T> {
        let k = self.head.ok_or(ContainerError::Empty)?;
        Ok(&self.nodes[k].value)
    }

    pub fn back(&self) -> Result<&T> {
        let k = self.tail.ok_or(ContainerError::Empty)?;
        Ok(&self.nodes[k].value)
    }

    pub fn front_mut(&mut self) -> Result<&mut T> {
        let k = self.head.ok_or(ContainerError::Empty)?;
        Ok(&mut self.nodes[k].value)
    }

    pub fn back_mut(&mut self) -> Result<&mut T> {
        let k = self.tail.ok_or(ContainerError::Empty)?;
        Ok(&mut self.nodes[k].value)
    }

    pub fn push_back(&mut self, value: T) {
        self.link_back(value);
    }

    pub fn push_front(&mut self, value: T) {
        self.link_front(value);
    }

    /// Append each value in order.
    pub fn insert_many_back<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.link_back(value);
        }
    }

    /// Prepend the values as a run; the first value becomes the new head.
    pub fn insert_many_front<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        match self.head {
            Some(anchor) => {
                for value in values {
                    self.link_before(anchor, value);
                }
            }
            None => self.insert_many_back(values),
        }
    }

    pub fn pop_back(&mut self) -> Result<T> {
        let k = self.tail.ok_or(ContainerError::Empty)?;
        self.unlink(k)
    }

    pub fn pop_front(&mut self) -> Result<T> {
        let k = self.head.ok_or(ContainerError::Empty)?;
        self.unlink(k)
    }

    /// Position of the first element, or the end sentinel when empty.
    pub fn begin(&self) -> Position {
        self.position_for(self.head)
    }

    pub fn end(&self) -> Position {
        Position {
            list: self.id,
            cursor: Cursor::End,
        }
    }

    /// Position of the element at `index`; `index == len()` gives `end()`.
    pub fn position(&self, index: usize) -> Result<Position> {
        let len = self.len();
        if index > len {
            return Err(ContainerError::out_of_range(index, len));
        }
        let mut cur = self.head;
        for _ in 0..index {
            cur = cur.and_then(|k| self.nodes[k].next);
        }
        Ok(self.position_for(cur))
    }

    /// Position of the first element matching `pred`, if any.
    pub fn find_position<F>(&self, mut pred: F) -> Option<Position>
    where
        F: FnMut(&T) -> bool,
    {
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if pred(&node.value) {
                return Some(self.position_for(Some(k)));
            }
            cur = node.next;
        }
        None
    }

    /// Step forward. Stepping from the tail yields `end()`; stepping from
    /// `end()` fails.
    pub fn next(&self, pos: Position) -> Result<Position> {
        let k = self.live_key(pos)?;
        Ok(self.position_for(self.nodes[k].next))
    }

    /// Step backward. Stepping from `end()` exposes the current tail;
    /// stepping from the head fails.
    pub fn prev(&self, pos: Position) -> Result<Position> {
        match self.cursor(pos)? {
            Cursor::End => {
                let tail = self.tail.ok_or(ContainerError::PositionOutOfRange)?;
                Ok(self.position_for(Some(tail)))
            }
            Cursor::Node(_) => {
                let k = self.live_key(pos)?;
                let prev = self.nodes[k]
                    .prev
                    .ok_or(ContainerError::PositionOutOfRange)?;
                if !self.nodes.contains_key(prev) {
                    return Err(ContainerError::Expired);
                }
                Ok(self.position_for(Some(prev)))
            }
        }
    }

    pub fn get(&self, pos: Position) -> Result<&T> {
        let k = self.live_key(pos)?;
        Ok(&self.nodes[k].value)
    }

    pub fn get_mut(&mut self, pos: Position) -> Result<&mut T> {
        let k = self.live_key(pos)?;
        Ok(&mut self.nodes[k].value)
    }

    /// Insert `value` before `pos` and return the new element's position.
    pub fn insert(&mut self, pos: Position, value: T) -> Result<Position> {
        let key = match self.cursor(pos)? {
            Cursor::End => self.link_back(value),
            Cursor::Node(_) => {
                let at = self.live_key(pos)?;
                if Some(at) == self.head {
                    self.link_front(value)
                } else {
                    self.link_before(at, value)
                }
            }
        };
        Ok(self.position_for(Some(key)))
    }

    /// Insert each value before `pos`, keeping their order. Returns the
    /// position of the first inserted value, or `pos` when `values` is empty.
    pub fn insert_many<I>(&mut self, pos: Position, values: I) -> Result<Position>
    where
        I: IntoIterator<Item = T>,
    {
        if let Cursor::Node(_) = self.cursor(pos)? {
            self.live_key(pos)?;
        }
        let mut first = None;
        for value in values {
            let p = self.insert(pos, value)?;
            first.get_or_insert(p);
        }
        Ok(first.unwrap_or(pos))
    }

    /// Remove the element at `pos` and return it.
    pub fn erase(&mut self, pos: Position) -> Result<T> {
        let k = self.live_key(pos)?;
        if Some(k) == self.head {
            self.pop_front()
        } else if Some(k) == self.tail {
            self.pop_back()
        } else {
            self.unlink(k)
        }
    }

    /// Move every element of `other` in front of `pos`.
    ///
    /// `other` is left empty. When `self` is non-empty the moved elements
    /// get new positions and other's old ones expire. An empty `self` takes
    /// over other's storage and identity outright: other's positions stay
    /// valid against `self`, and positions `self` issued before become
    /// foreign.
    pub fn splice(&mut self, pos: Position, other: &mut List<T>) -> Result<()> {
        let at = match self.cursor(pos)? {
            Cursor::End => None,
            Cursor::Node(_) => Some(self.live_key(pos)?),
        };
        if other.is_empty() {
            return Ok(());
        }
        trace!("list splice: {} + {} nodes", self.len(), other.len());
        if self.is_empty() {
            self.take_over(other);
            return Ok(());
        }
        let Some((first, last)) = self.adopt(other) else {
            return Ok(());
        };
        match at {
            None => {
                let old_tail = self.tail;
                self.nodes[first].prev = old_tail;
                if let Some(t) = old_tail {
                    self.nodes[t].next = Some(first);
                }
                self.tail = Some(last);
            }
            Some(k) => {
                let prev = self.nodes[k].prev;
                self.nodes[first].prev = prev;
                self.nodes[last].next = Some(k);
                self.nodes[k].prev = Some(last);
                match prev {
                    Some(p) => self.nodes[p].next = Some(first),
                    None => self.head = Some(first),
                }
            }
        }
        Ok(())
    }

    /// Append all of `other` (left empty), then [`sort`](Self::sort).
    pub fn merge(&mut self, other: &mut List<T>)
    where
        T: PartialOrd,
    {
        trace!("list merge: {} + {} nodes", self.len(), other.len());
        if self.is_empty() {
            self.take_over(other);
        } else if let Some((first, last)) = self.adopt(other) {
            if let Some(t) = self.tail {
                self.nodes[t].next = Some(first);
            }
            self.nodes[first].prev = self.tail;
            self.tail = Some(last);
        }
        self.sort();
    }

    /// Bubble passes over the payloads until one pass makes no swap.
    ///
    /// Nodes are never relinked, so positions keep pointing at the same
    /// slots (which now hold possibly different values). Only strictly
    /// greater neighbours swap, so equal elements keep their order.
    pub fn sort(&mut self)
    where
        T: PartialOrd,
    {
        loop {
            let mut swapped = false;
            let mut cur = self.head;
            while let Some(a) = cur {
                let Some(b) = self.nodes[a].next else {
                    break;
                };
                if let Some([x, y]) = self.nodes.get_disjoint_mut([a, b]) {
                    if x.value > y.value {
                        core::mem::swap(&mut x.value, &mut y.value);
                        swapped = true;
                    }
                }
                cur = Some(b);
            }
            if !swapped {
                break;
            }
        }
    }

    /// Collapse each run of adjacent equal elements to its first element.
    pub fn unique(&mut self)
    where
        T: PartialEq,
    {
        let mut cur = self.head;
        while let Some(a) = cur {
            let mut next = self.nodes[a].next;
            while let Some(b) = next {
                if self.nodes[b].value != self.nodes[a].value {
                    break;
                }
                next = self.nodes[b].next;
                // `b` was reached through live links, so it cannot be expired.
                self.unlink(b).ok();
            }
            cur = next;
        }
    }

    /// Relink every node in the opposite direction.
    pub fn reverse(&mut self) {
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = &mut self.nodes[k];
            core::mem::swap(&mut node.next, &mut node.prev);
            cur = node.prev;
        }
        core::mem::swap(&mut self.head, &mut self.tail);
    }

    /// Replace the contents with `values`.
    pub fn assign<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.clear();
        self.insert_many_back(values);
    }

    /// Remove every element; all outstanding positions expire.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    /// Move the contents (and their positions) out, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let remaining = self.len();
        let (front, back) = (self.head, self.tail);
        let links = self
            .nodes
            .iter_mut()
            .map(|(k, node)| (k, (&mut node.value, node.next, node.prev)))
            .collect();
        IterMut {
            links,
            front,
            back,
            remaining,
        }
    }

    /// Mutable values in arena order rather than list order; no allocation.
    pub(crate) fn values_mut_unordered(&mut self) -> ValuesMut<'_, T> {
        ValuesMut {
            it: self.nodes.values_mut(),
        }
    }

    fn position_for(&self, key: Option<NodeKey>) -> Position {
        Position {
            list: self.id,
            cursor: key.map_or(Cursor::End, Cursor::Node),
        }
    }

    fn cursor(&self, pos: Position) -> Result<Cursor> {
        if pos.list != self.id {
            return Err(ContainerError::ForeignPosition);
        }
        Ok(pos.cursor)
    }

    /// Resolve `pos` to a live node key.
    fn live_key(&self, pos: Position) -> Result<NodeKey> {
        match self.cursor(pos)? {
            Cursor::End => Err(ContainerError::PositionOutOfRange),
            Cursor::Node(k) if self.nodes.contains_key(k) => Ok(k),
            Cursor::Node(_) => Err(ContainerError::Expired),
        }
    }

    fn link_back(&mut self, value: T) -> NodeKey {
        let key = self.nodes.insert(Node {
            value,
            next: None,
            prev: self.tail,
        });
        match self.tail {
            Some(t) => self.nodes[t].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        key
    }

    fn link_front(&mut self, value: T) -> NodeKey {
        let key = self.nodes.insert(Node {
            value,
            next: self.head,
            prev: None,
        });
        match self.head {
            Some(h) => self.nodes[h].prev = Some(key),
            None => self.tail = Some(key),
        }
        self.head = Some(key);
        key
    }

    fn link_before(&mut self, at: NodeKey, value: T) -> NodeKey {
        let Some(prev) = self.nodes[at].prev else {
            return self.link_front(value);
        };
        let key = self.nodes.insert(Node {
            value,
            next: Some(at),
            prev: Some(prev),
        });
        self.nodes[prev].next = Some(key);
        self.nodes[at].prev = Some(key);
        key
    }

    fn unlink(&mut self, key: NodeKey) -> Result<T> {
        let Node { value, next, prev } = self.nodes.remove(key).ok_or(ContainerError::Expired)?;
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
        Ok(value)
    }

    /// O(1) move of other's storage into an empty `self`.
    ///
    /// The identity moves with the arena; otherwise a stale position of
    /// `self` could match a slot version of an adopted node.
    fn take_over(&mut self, other: &mut List<T>) {
        debug_assert!(self.is_empty());
        core::mem::swap(&mut self.nodes, &mut other.nodes);
        self.head = other.head.take();
        self.tail = other.tail.take();
        self.id = other.id;
        other.id = ListId::fresh();
    }

    /// Move other's nodes, in order, into this arena as a detached chain.
    fn adopt(&mut self, other: &mut List<T>) -> Option<(NodeKey, NodeKey)> {
        let mut first = None;
        let mut last: Option<NodeKey> = None;
        while let Ok(value) = other.pop_front() {
            let key = self.nodes.insert(Node {
                value,
                next: None,
                prev: last,
            });
            match last {
                Some(l) => self.nodes[l].next = Some(key),
                None => first = Some(key),
            }
            last = Some(key);
        }
        Some((first?, last?))
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        Self {
            id: ListId::fresh(),
            nodes: self.nodes.clone(),
            head: self.head,
            tail: self.tail,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.insert_many_back(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_many_back(iter);
    }
}

/// Iterator over shared references in list order.
pub struct Iter<'a, T> {
    nodes: &'a SlotMap<NodeKey, Node<T>>,
    front: Option<NodeKey>,
    back: Option<NodeKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// Iterator over mutable references in list order.
pub struct IterMut<'a, T> {
    // Each node's value borrow, detached from its links so every borrow
    // can be handed out independently.
    links: SecondaryMap<NodeKey, (&'a mut T, Option<NodeKey>, Option<NodeKey>)>,
    front: Option<NodeKey>,
    back: Option<NodeKey>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (value, next, _) = self.links.remove(self.front?)?;
        self.front = next;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (value, _, prev) = self.links.remove(self.back?)?;
        self.back = prev;
        self.remaining -= 1;
        Some(value)
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

/// Mutable values in arena slot order.
pub(crate) struct ValuesMut<'a, T> {
    it: slotmap::basic::ValuesMut<'a, NodeKey, Node<T>>,
}

impl<'a, T> Iterator for ValuesMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|node| &mut node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

/// Owning iterator; pops from either end.
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
