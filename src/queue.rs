//! Fixed-capacity circular queue
//!
//! Backed by an inline array with a `head` index and a `count`; the tail is
//! implicit at `(head + count) % N`. Dequeue advances `head` instead of
//! shifting, so every operation is O(1).

use crate::error::ContainerError;

/// FIFO ring buffer holding at most `N` items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedQueue<T, const N: usize> {
    slots: [Option<T>; N],
    head: usize,
    count: usize,
}

impl<T, const N: usize> Default for BoundedQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> BoundedQueue<T, N> {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            head: 0,
            count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_full(&self) -> bool {
        self.count == N
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Append at the tail. A full queue is left untouched.
    pub fn enqueue(&mut self, item: T) -> Result<(), ContainerError> {
        if self.is_full() {
            return Err(ContainerError::Full);
        }
        let tail = (self.head + self.count) % N;
        self.slots[tail] = Some(item);
        self.count += 1;
        Ok(())
    }

    /// Remove and return the front item
    pub fn dequeue(&mut self) -> Result<T, ContainerError> {
        if self.is_empty() {
            return Err(ContainerError::Empty);
        }
        let item = self.slots[self.head].take().ok_or(ContainerError::Empty)?;
        self.head = (self.head + 1) % N;
        self.count -= 1;
        Ok(item)
    }

    /// Physical slot of the `index`-th item from the front
    fn slot(&self, index: usize) -> Option<usize> {
        (index < self.count).then(|| (self.head + index) % N)
    }

    /// The `index`-th item counting from the front (0 = front)
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slot(index).and_then(|slot| self.slots[slot].as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slot(index).and_then(|slot| self.slots[slot].as_mut())
    }

    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Front-to-back view of the queued items
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.count).filter_map(move |i| self.get(i))
    }
}
