//! Array: a [`Vector`] fixed at `N` elements.
//!
//! The backing vector is sized once at construction and never grows or
//! shrinks afterwards.

use crate::error::Result;
use crate::vector::Vector;
use core::ops::{Index, IndexMut};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Array<T, const N: usize> {
    items: Vector<T>,
}

impl<T: Default, const N: usize> Array<T, N> {
    /// `N` default-valued elements.
    pub fn new() -> Self {
        Self {
            items: (0..N).map(|_| T::default()).collect(),
        }
    }
}

impl<T: Default, const N: usize> Default for Array<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Array<T, N> {
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn size(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn at(&self, pos: usize) -> Result<&T> {
        self.items.at(pos)
    }

    pub fn at_mut(&mut self, pos: usize) -> Result<&mut T> {
        self.items.at_mut(pos)
    }

    pub fn front(&self) -> Result<&T> {
        self.items.front()
    }

    pub fn back(&self) -> Result<&T> {
        self.items.back()
    }

    /// Overwrite every slot with `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.items.as_mut_slice().fill(value);
    }

    pub fn swap(&mut self, other: &mut Self) {
        self.items.swap(&mut other.items)
    }

    pub fn as_slice(&self) -> &[T] {
        self.items.as_slice()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<T, const N: usize> From<[T; N]> for Array<T, N> {
    fn from(items: [T; N]) -> Self {
        Self {
            items: Vector::from(items),
        }
    }
}

impl<T, const N: usize> Index<usize> for Array<T, N> {
    type Output = T;

    fn index(&self, pos: usize) -> &T {
        &self.items[pos]
    }
}

impl<T, const N: usize> IndexMut<usize> for Array<T, N> {
    fn index_mut(&mut self, pos: usize) -> &mut T {
        &mut self.items[pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContainerError;

    #[test]
    fn default_is_presized_and_fill_overwrites() {
        let mut a: Array<i32, 4> = Array::new();
        assert_eq!(a.as_slice(), &[0, 0, 0, 0]);
        a.fill(7);
        assert_eq!(a.as_slice(), &[7, 7, 7, 7]);
        a[2] = 1;
        assert_eq!(a.at(2), Ok(&1));
        assert_eq!(
            a.at(4),
            Err(ContainerError::IndexOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn zero_sized_array() {
        let a: Array<u8, 0> = Array::new();
        assert!(a.is_empty());
        assert_eq!(a.front(), Err(ContainerError::Empty));
    }
}
