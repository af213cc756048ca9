//! Stack: LIFO view of a [`List`], operating on its front.

use crate::error::Result;
use crate::list::List;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stack<T> {
    items: List<T>,
}

impl<T> Stack<T> {
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

    pub fn top(&self) -> Result<&T> {
        self.items.front()
    }

    pub fn top_mut(&mut self) -> Result<&mut T> {
        self.items.front_mut()
    }

    pub fn push(&mut self, value: T) {
        self.items.push_front(value)
    }

    /// Push each value in order; the last one ends up on top.
    pub fn insert_many<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.items.push_front(value);
        }
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

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Self::new();
        stack.insert_many(iter);
        stack
    }
}

impl<T, const N: usize> From<[T; N]> for Stack<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContainerError;

    #[test]
    fn last_in_first_out() {
        let mut s = Stack::from([1, 2, 3]);
        assert_eq!(s.top(), Ok(&3));
        s.push(4);
        assert_eq!(s.pop(), Ok(4));
        assert_eq!(s.pop(), Ok(3));
        assert_eq!(s.pop(), Ok(2));
        assert_eq!(s.pop(), Ok(1));
        assert_eq!(s.pop(), Err(ContainerError::Empty));
        assert_eq!(s.top(), Err(ContainerError::Empty));
    }
}
