//! Cursors over an array's contiguous storage.
//!
//! [`Iter`] and [`IterMut`] walk the live range of an
//! [`Array`](crate::Array) from either end. Both are plain cursors over
//! the storage slice: they carry no allocator awareness, and their
//! validity window is the borrow they hold on the array — any operation
//! that could reallocate or shift storage is rejected by the borrow
//! checker for as long as a cursor is alive.

use std::iter::FusedIterator;
use std::mem;

/// Immutable cursor over an array's live elements.
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    /// Elements not yet yielded, shrinking from both ends.
    remaining: &'a [T],
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(slice: &'a [T]) -> Self {
        Self { remaining: slice }
    }

    /// The elements not yet yielded, as a slice.
    pub fn as_slice(&self) -> &'a [T] {
        self.remaining
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let (first, rest) = self.remaining.split_first()?;
        self.remaining = rest;
        Some(first)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining.len(), Some(self.remaining.len()))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        let (last, rest) = self.remaining.split_last()?;
        self.remaining = rest;
        Some(last)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Mutable cursor over an array's live elements.
#[derive(Debug)]
pub struct IterMut<'a, T> {
    remaining: &'a mut [T],
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(slice: &'a mut [T]) -> Self {
        Self { remaining: slice }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        let (first, rest) = mem::take(&mut self.remaining).split_first_mut()?;
        self.remaining = rest;
        Some(first)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining.len(), Some(self.remaining.len()))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        let (last, rest) = mem::take(&mut self.remaining).split_last_mut()?;
        self.remaining = rest;
        Some(last)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_iteration_preserves_order() {
        let values = [1, 2, 3, 4, 5];
        let collected: Vec<i32> = Iter::new(&values).copied().collect();
        assert_eq!(collected, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn reverse_iteration_flips_order() {
        let values = [1, 2, 3, 4, 5];
        let collected: Vec<i32> = Iter::new(&values).rev().copied().collect();
        assert_eq!(collected, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn cursor_is_exact_size_and_fused() {
        let values = [10, 20];
        let mut iter = Iter::new(&values);
        assert_eq!(iter.len(), 2);
        iter.next();
        assert_eq!(iter.len(), 1);
        iter.next();
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn both_ends_meet_in_the_middle() {
        let values = [1, 2, 3];
        let mut iter = Iter::new(&values);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn mutable_cursor_writes_through() {
        let mut values = [1, 2, 3];
        for v in IterMut::new(&mut values) {
            *v *= 10;
        }
        assert_eq!(values, [10, 20, 30]);
    }
}
