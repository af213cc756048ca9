//! Queue: FIFO view of a [`List`]; push at the back, pop at the front.

use crate::error::Result;
use crate::list::List;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Queue<T> {
    items: List<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self { items: List::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn front(&self) -> Result<&T> {
        self.items.front()
    }

    pub fn back(&self) -> Result<&T> {
        self.items.back()
    }

    pub fn push(&mut self, value: T) {
        self.items.push_back(value)
    }

    pub fn insert_many<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.items.insert_many_back(values)
    }

    pub fn pop(&mut self) -> Result<T> {
        self.items.pop_front()
    }

    pub fn swap(&mut self, other: &mut Self) {
        self.items.swap(&mut other.items)
    }

    /// Move the contents out, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for Queue<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContainerError;

    #[test]
    fn first_in_first_out() {
        let mut q = Queue::from([1, 2]);
        q.insert_many([3, 4]);
        assert_eq!(q.front(), Ok(&1));
        assert_eq!(q.back(), Ok(&4));
        let drained: Vec<i32> = std::iter::from_fn(|| q.pop().ok()).collect();
        assert_eq!(drained, vec![1, 2, 3, 4]);
        assert_eq!(q.front(), Err(ContainerError::Empty));
    }
}
