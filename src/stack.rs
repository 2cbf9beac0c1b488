//! Fixed-capacity stack for reserved pieces

use crate::error::ContainerError;

/// LIFO stack holding at most `N` items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedStack<T, const N: usize> {
    slots: [Option<T>; N],
    /// Number of items; the top lives at `len - 1`
    len: usize,
}

impl<T, const N: usize> Default for BoundedStack<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> BoundedStack<T, N> {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Physical index of the top item, `None` when empty
    pub fn top_index(&self) -> Option<usize> {
        self.len.checked_sub(1)
    }

    pub fn push(&mut self, item: T) -> Result<(), ContainerError> {
        if self.is_full() {
            return Err(ContainerError::Full);
        }
        self.slots[self.len] = Some(item);
        self.len += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<T, ContainerError> {
        let top = self.top_index().ok_or(ContainerError::Empty)?;
        let item = self.slots[top].take().ok_or(ContainerError::Empty)?;
        self.len = top;
        Ok(item)
    }

    /// The item `depth` places below the top (0 = top)
    pub fn get(&self, depth: usize) -> Option<&T> {
        let top = self.top_index()?;
        let slot = top.checked_sub(depth)?;
        self.slots[slot].as_ref()
    }

    pub fn get_mut(&mut self, depth: usize) -> Option<&mut T> {
        let top = self.top_index()?;
        let slot = top.checked_sub(depth)?;
        self.slots[slot].as_mut()
    }

    pub fn top(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Top-to-base view (most recently pushed first)
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots[..self.len].iter().rev().filter_map(Option::as_ref)
    }
}
