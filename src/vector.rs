//! Vector: contiguous growable buffer with an explicit capacity policy.
//!
//! The logical capacity is tracked separately from the backing storage so
//! that growth follows `size * GROWTH_FACTOR` exactly. Every reallocation
//! allocates a fresh buffer, moves the live elements over and releases the
//! old one; a failed allocation leaves the vector untouched.

use crate::error::{ContainerError, Result};
use core::fmt;
use core::ops::{Index, IndexMut};
use log::trace;

/// Multiplier applied to the element count when an insertion finds the
/// buffer full.
pub const GROWTH_FACTOR: usize = 2;

pub struct Vector<T> {
    // Invariant: buf.len() <= cap <= buf.capacity().
    buf: Vec<T>,
    cap: usize,
}

impl<T> Vector<T> {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            cap: 0,
        }
    }

    /// Empty vector with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            cap: capacity,
        }
    }

    /// Empty vector with room for `capacity` elements, reporting allocation
    /// failure instead of aborting.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| ContainerError::AllocationFailed { capacity })?;
        Ok(Self { buf, cap: capacity })
    }

    /// `n` copies of `value`; capacity equals `n`.
    pub fn from_elem(n: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            buf: vec![value; n],
            cap: n,
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Alias of [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.buf.len()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn max_size(&self) -> usize {
        isize::MAX as usize / core::mem::size_of::<T>().max(1)
    }

    pub fn at(&self, pos: usize) -> Result<&T> {
        let len = self.buf.len();
        self.buf
            .get(pos)
            .ok_or(ContainerError::out_of_range(pos, len))
    }

    pub fn at_mut(&mut self, pos: usize) -> Result<&mut T> {
        let len = self.buf.len();
        self.buf
            .get_mut(pos)
            .ok_or(ContainerError::out_of_range(pos, len))
    }

    pub fn front(&self) -> Result<&T> {
        self.buf.first().ok_or(ContainerError::Empty)
    }

    pub fn back(&self) -> Result<&T> {
        self.buf.last().ok_or(ContainerError::Empty)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buf
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.buf.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.buf.iter_mut()
    }

    /// Append `value`, growing to `size * GROWTH_FACTOR` first when full.
    pub fn push_back(&mut self, value: T) -> Result<()> {
        if self.buf.len() == self.cap {
            self.grow()?;
        }
        self.buf.push(value);
        Ok(())
    }

    pub fn insert_many_back<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.push_back(value)?;
        }
        Ok(())
    }

    /// Insert `value` at index `pos` (`pos == len()` appends).
    ///
    /// Positions are plain indices, so they stay meaningful across the
    /// reallocation this may trigger. Returns `pos`.
    pub fn insert(&mut self, pos: usize, value: T) -> Result<usize> {
        let len = self.buf.len();
        if pos > len {
            return Err(ContainerError::out_of_range(pos, len));
        }
        if len == self.cap {
            self.grow()?;
        }
        self.buf.push(value);
        // Shift pos..len one slot right, bringing the new value to pos.
        self.buf[pos..].rotate_right(1);
        Ok(pos)
    }

    /// Insert each value at successive indices starting at `pos`.
    pub fn insert_many<I>(&mut self, pos: usize, values: I) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
    {
        let len = self.buf.len();
        if pos > len {
            return Err(ContainerError::out_of_range(pos, len));
        }
        for (offset, value) in values.into_iter().enumerate() {
            self.insert(pos + offset, value)?;
        }
        Ok(pos)
    }

    /// Remove and return the element at `pos`, shifting the tail left.
    /// Capacity is unchanged.
    pub fn erase(&mut self, pos: usize) -> Result<T> {
        let len = self.buf.len();
        if pos >= len {
            return Err(ContainerError::out_of_range(pos, len));
        }
        Ok(self.buf.remove(pos))
    }

    pub fn pop_back(&mut self) -> Result<T> {
        self.buf.pop().ok_or(ContainerError::Empty)
    }

    /// Reallocate to `size * factor` slots (never below `size`).
    ///
    /// Always reallocates, even when the current capacity already suffices
    /// or is larger than the request.
    pub fn reserve(&mut self, factor: usize) -> Result<()> {
        let len = self.buf.len();
        let target = len
            .checked_mul(factor)
            .ok_or(ContainerError::AllocationFailed {
                capacity: usize::MAX,
            })?
            .max(len);
        self.reallocate(target)
    }

    /// Reallocate to exactly `size` when there is spare capacity.
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        if self.buf.len() < self.cap {
            self.reallocate(self.buf.len())?;
        }
        Ok(())
    }

    /// Drop every element; capacity is kept.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    /// Move the contents out, leaving `self` empty with no storage.
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }

    fn grow(&mut self) -> Result<()> {
        let len = self.buf.len();
        // Multiplying an empty vector never grows it.
        let target = if len == 0 {
            1
        } else {
            len.checked_mul(GROWTH_FACTOR)
                .ok_or(ContainerError::AllocationFailed {
                    capacity: usize::MAX,
                })?
        };
        self.reallocate(target)
    }

    fn reallocate(&mut self, capacity: usize) -> Result<()> {
        debug_assert!(capacity >= self.buf.len());
        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(capacity)
            .map_err(|_| ContainerError::AllocationFailed { capacity })?;
        fresh.append(&mut self.buf);
        trace!(
            "vector reallocated: capacity {} -> {} ({} live)",
            self.cap,
            capacity,
            fresh.len()
        );
        self.buf = fresh;
        self.cap = capacity;
        Ok(())
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        let buf = self.buf.clone();
        let cap = buf.len();
        Self { buf, cap }
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.buf.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.buf == other.buf
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, pos: usize) -> &T {
        match self.at(pos) {
            Ok(v) => v,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, pos: usize) -> &mut T {
        match self.at_mut(pos) {
            Ok(v) => v,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(items: [T; N]) -> Self {
        Self {
            buf: Vec::from(items),
            cap: N,
        }
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(buf: Vec<T>) -> Self {
        let cap = buf.len();
        Self { buf, cap }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: growth doubles the element count; an empty vector grows to 1.
    #[test]
    fn growth_policy_doubles_and_guards_zero() {
        let mut v: Vector<i32> = Vector::new();
        assert_eq!(v.capacity(), 0);
        v.push_back(1).unwrap();
        assert_eq!(v.capacity(), 1);
        v.push_back(2).unwrap();
        assert_eq!(v.capacity(), 2);
        v.push_back(3).unwrap();
        assert_eq!(v.capacity(), 4);
        v.push_back(4).unwrap();
        assert_eq!(v.capacity(), 4);
        v.push_back(5).unwrap();
        assert_eq!(v.capacity(), 8);
        assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5]);
    }

    /// Invariant: `reserve` always reallocates to `size * factor`, even downward.
    #[test]
    fn reserve_always_reallocates() {
        let mut v = Vector::with_capacity(10);
        v.insert_many_back([1, 2, 3]).unwrap();
        assert_eq!(v.capacity(), 10);
        v.reserve(2).unwrap();
        assert_eq!(v.capacity(), 6);
        v.reserve(0).unwrap();
        assert_eq!(v.capacity(), 3, "never below size");
        assert_eq!(v.as_slice(), &[1, 2, 3]);
    }

    /// Invariant: `shrink_to_fit` brings capacity down to size and keeps values.
    #[test]
    fn shrink_to_fit_matches_size() {
        let mut v = Vector::with_capacity(16);
        v.insert_many_back(0..5).unwrap();
        v.shrink_to_fit().unwrap();
        assert_eq!(v.capacity(), 5);
        assert_eq!(v.len(), 5);
        assert_eq!(v.as_slice(), &[0, 1, 2, 3, 4]);
    }

    /// Invariant: erase shifts left without shrinking capacity.
    #[test]
    fn erase_keeps_capacity() {
        let mut v = Vector::from([1, 2, 3, 4]);
        let cap = v.capacity();
        assert_eq!(v.erase(1), Ok(2));
        assert_eq!(v.as_slice(), &[1, 3, 4]);
        assert_eq!(v.capacity(), cap);
        assert_eq!(
            v.erase(3),
            Err(ContainerError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    /// Invariant: clone is a deep copy sized to the live elements.
    #[test]
    fn clone_is_deep_and_tight() {
        let mut a = Vector::with_capacity(8);
        a.insert_many_back(["x".to_string(), "y".to_string()])
            .unwrap();
        let b = a.clone();
        assert_eq!(b.capacity(), 2);
        a[0].push('!');
        assert_eq!(b[0], "x");
        assert_eq!(a[0], "x!");
    }

    /// Invariant: `take` leaves the source empty with no storage.
    #[test]
    fn take_leaves_source_empty() {
        let mut a = Vector::from([1, 2, 3]);
        let b = a.take();
        assert_eq!(b.as_slice(), &[1, 2, 3]);
        assert!(a.is_empty());
        assert_eq!(a.capacity(), 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_panics_past_end() {
        let v = Vector::from([1]);
        let _ = v[1];
    }
}
