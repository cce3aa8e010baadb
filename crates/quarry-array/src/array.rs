//! The allocator-backed growable array.

#![allow(unsafe_code)]

use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};
use std::ptr::{self, NonNull};

use quarry_alloc::{BlockSource, SystemSource};

use crate::error::ArrayError;
use crate::iter::{Iter, IterMut};

/// A contiguous growable array whose storage comes from a pluggable
/// [`BlockSource`].
///
/// The array owns its storage block and every live element in it; the
/// source is held by value, and a shared reference to any source is
/// itself a source, so several arrays can draw from one
/// [`BlockPool`](quarry_alloc::BlockPool):
///
/// ```
/// use quarry_alloc::BlockPool;
/// use quarry_array::Array;
///
/// let pool = BlockPool::new();
/// let mut a: Array<u32, &BlockPool> = Array::new_in(&pool);
/// let mut b: Array<u32, &BlockPool> = Array::new_in(&pool);
/// a.push(1);
/// b.push(2);
/// assert_eq!(pool.occupied_block_count(), 2);
/// ```
///
/// # Storage model
///
/// Slots `[0, len)` hold live elements; slots `[len, cap)` are
/// allocated but uninitialized. Capacity starts at
/// [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY) even for an empty
/// array, doubles when an insertion overflows it, and never shrinks
/// short of whole-value replacement ([`swap`](Self::swap) or dropping
/// the array). Growth relocates the live elements by bitwise move —
/// a Rust move cannot fail partway through, so an interrupted transfer
/// is impossible and growth is trivially exception-safe.
///
/// Capacity arithmetic is deliberately unchecked: doubling past
/// `usize::MAX` or a byte size past `isize::MAX` is the caller's
/// precondition violation, mirroring the unchecked-access policy.
///
/// Zero-sized element types never touch the source; their "storage" is
/// a dangling, well-aligned pointer and capacity is pure bookkeeping.
pub struct Array<T, S: BlockSource = SystemSource> {
    /// Number of live elements.
    len: usize,
    /// Number of allocated slots.
    cap: usize,
    /// Where the storage block is leased from.
    source: S,
    /// Start of the storage block.
    ptr: NonNull<T>,
}

impl<T, S: BlockSource + Default> Array<T, S> {
    /// Create an empty array with the default source.
    pub fn new() -> Self {
        Self::new_in(S::default())
    }

    /// Create an array of `len` default-constructed elements.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::with_len_in(len, S::default())
    }

    /// Create an array of `len` clones of `value`.
    pub fn filled(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::filled_in(len, value, S::default())
    }
}

impl<T, S: BlockSource> Array<T, S> {
    /// Capacity of a freshly constructed array, in elements.
    pub const DEFAULT_CAPACITY: usize = 10;

    /// Create an empty array backed by `source`.
    ///
    /// The default-capacity block is leased immediately, so even an
    /// empty array holds storage for its first ten elements.
    pub fn new_in(source: S) -> Self {
        Self::with_capacity_in(Self::DEFAULT_CAPACITY, source)
    }

    /// Create an empty array with room for at least `cap` elements.
    ///
    /// The capacity is clamped up to
    /// [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY).
    pub fn with_capacity_in(cap: usize, source: S) -> Self {
        let cap = cap.max(Self::DEFAULT_CAPACITY);
        let ptr = Self::lease(&source, cap);
        Self {
            len: 0,
            cap,
            source,
            ptr,
        }
    }

    /// Create an array of `len` default-constructed elements backed by
    /// `source`.
    pub fn with_len_in(len: usize, source: S) -> Self
    where
        T: Default,
    {
        let mut array = Self::with_capacity_in(len, source);
        for _ in 0..len {
            array.push(T::default());
        }
        array
    }

    /// Create an array of `len` clones of `value` backed by `source`.
    ///
    /// If a clone panics partway through, every element constructed so
    /// far is dropped and the storage block is released.
    pub fn filled_in(len: usize, value: T, source: S) -> Self
    where
        T: Clone,
    {
        let mut array = Self::with_capacity_in(len, source);
        for _ in 0..len {
            array.push(value.clone());
        }
        array
    }

    /// Create an array from an ordered sequence, backed by `source`.
    pub fn from_iter_in<I: IntoIterator<Item = T>>(iter: I, source: S) -> Self {
        let mut array = Self::new_in(source);
        array.extend(iter);
        array
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array holds no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// The source this array leases storage from.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Raw pointer to the storage block.
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Raw mutable pointer to the storage block.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` holds initialized elements of the block
        // this array owns.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as `as_slice`, and `&mut self` guarantees exclusivity.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Checked positional access.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfBounds`] if `index >= len`. The array is not
    /// mutated by a rejected call.
    pub fn at(&self, index: usize) -> Result<&T, ArrayError> {
        if index >= self.len {
            return Err(ArrayError::OutOfBounds {
                index,
                len: self.len,
            });
        }
        // SAFETY: bounds checked above.
        Ok(unsafe { &*self.ptr.as_ptr().add(index) })
    }

    /// Checked mutable positional access.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfBounds`] if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        if index >= self.len {
            return Err(ArrayError::OutOfBounds {
                index,
                len: self.len,
            });
        }
        // SAFETY: bounds checked above.
        Ok(unsafe { &mut *self.ptr.as_ptr().add(index) })
    }

    /// Unchecked positional access.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](Self::len).
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        // SAFETY: the caller guarantees `index < len`.
        unsafe { &*self.ptr.as_ptr().add(index) }
    }

    /// Unchecked mutable positional access.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](Self::len).
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        // SAFETY: the caller guarantees `index < len`.
        unsafe { &mut *self.ptr.as_ptr().add(index) }
    }

    /// The first live element, if any.
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// The first live element, mutably, if any.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// The last live element, if any.
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// The last live element, mutably, if any.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Append an element, growing the storage block if it is full.
    pub fn push(&mut self, value: T) {
        if self.len == self.cap {
            self.grow_to(self.cap * 2);
        }
        // SAFETY: `len < cap` after growth; the slot is allocated and
        // unoccupied.
        unsafe { ptr::write(self.ptr.as_ptr().add(self.len), value) };
        self.len += 1;
    }

    /// Remove and return the last element, if any.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot at the new `len` held a live element and is
        // now outside the live range, so nothing else will read it.
        Some(unsafe { ptr::read(self.ptr.as_ptr().add(self.len)) })
    }

    /// Insert `value` at `index`, shifting later elements one slot
    /// toward the tail.
    ///
    /// `index == len` appends.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfBounds`] if `index > len`. The array is not
    /// mutated by a rejected call.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), ArrayError> {
        if index > self.len {
            return Err(ArrayError::OutOfBounds {
                index,
                len: self.len,
            });
        }
        if self.len == self.cap {
            self.grow_to(self.cap * 2);
        }
        // SAFETY: `index <= len < cap`, so both the shifted range and
        // the gap stay inside the allocated block. The shift is a
        // bitwise move; the vacated slot is overwritten before anything
        // can observe it.
        unsafe {
            let base = self.ptr.as_ptr();
            ptr::copy(base.add(index), base.add(index + 1), self.len - index);
            ptr::write(base.add(index), value);
        }
        self.len += 1;
        Ok(())
    }

    /// Remove and return the element at `index`, shifting later
    /// elements one slot toward the head.
    ///
    /// Exactly one element leaves the array per successful call.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfBounds`] if `index >= len`. The array is not
    /// mutated by a rejected call.
    pub fn remove(&mut self, index: usize) -> Result<T, ArrayError> {
        if index >= self.len {
            return Err(ArrayError::OutOfBounds {
                index,
                len: self.len,
            });
        }
        // SAFETY: `index < len`; the element is read out before the
        // bitwise shift reuses its slot, and the trailing slot leaves
        // the live range via the length decrement.
        unsafe {
            let base = self.ptr.as_ptr();
            let value = ptr::read(base.add(index));
            ptr::copy(base.add(index + 1), base.add(index), self.len - index - 1);
            self.len -= 1;
            Ok(value)
        }
    }

    /// Grow the storage block to at least `new_cap` slots.
    ///
    /// The target is absolute, not additional. Requests at or below the
    /// current capacity are no-ops — capacity never shrinks.
    pub fn reserve(&mut self, new_cap: usize) {
        if new_cap > self.cap {
            self.grow_to(new_cap);
        }
    }

    /// Exchange contents with `other`: storage, length, capacity, and
    /// source all swap as one value.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Cursor over the live elements.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.as_slice())
    }

    /// Mutable cursor over the live elements.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.as_mut_slice())
    }

    /// Lease a block of `cap` slots from `source`.
    ///
    /// Zero-byte requests (empty capacity or zero-sized `T`) never
    /// reach the source.
    fn lease(source: &S, cap: usize) -> NonNull<T> {
        let bytes = cap * mem::size_of::<T>();
        if bytes == 0 {
            return NonNull::dangling();
        }
        source.allocate(bytes, mem::align_of::<T>()).cast()
    }

    /// Return the block at `ptr` (sized for `cap` slots) to `source`.
    ///
    /// # Safety
    ///
    /// `ptr` must be a block of `cap` slots leased from `source` and
    /// must not be used afterwards. Elements in it must already be
    /// moved out or dropped.
    unsafe fn release(source: &S, ptr: NonNull<T>, cap: usize) {
        let bytes = cap * mem::size_of::<T>();
        if bytes != 0 {
            // SAFETY: per this function's contract.
            unsafe { source.deallocate(ptr.cast(), bytes, mem::align_of::<T>()) };
        }
    }

    /// Relocate the live elements into a fresh block of `new_cap`
    /// slots and release the old one.
    fn grow_to(&mut self, new_cap: usize) {
        debug_assert!(new_cap > self.cap);
        let new_ptr = Self::lease(&self.source, new_cap);
        // SAFETY: both blocks are live and distinct; the relocation is
        // a bitwise move of `len` initialized elements, after which the
        // old block holds no live elements and can be released.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len);
            Self::release(&self.source, self.ptr, self.cap);
        }
        self.ptr = new_ptr;
        self.cap = new_cap;
    }
}

impl<T, S: BlockSource> Drop for Array<T, S> {
    fn drop(&mut self) {
        // SAFETY: `[0, len)` holds live elements exactly once; after
        // dropping them the block is element-free and goes back to the
        // source it was leased from.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len));
            Self::release(&self.source, self.ptr, self.cap);
        }
    }
}

impl<T, S: BlockSource + Default> Default for Array<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, S: BlockSource + Clone> Clone for Array<T, S> {
    /// Duplicate the array element by element.
    ///
    /// The clone leases fresh storage from a clone of the source
    /// (allocator propagation on copy); for shared-reference sources
    /// that is the same underlying pool. Built through `push`, so a
    /// panicking element clone unwinds with every already-constructed
    /// element dropped.
    fn clone(&self) -> Self {
        let mut clone = Self::with_capacity_in(self.cap, self.source.clone());
        for value in self.iter() {
            clone.push(value.clone());
        }
        clone
    }
}

impl<T, S: BlockSource> Index<usize> for Array<T, S> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T, S: BlockSource> IndexMut<usize> for Array<T, S> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T, S: BlockSource> Extend<T> for Array<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T, S: BlockSource + Default> FromIterator<T> for Array<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_in(iter, S::default())
    }
}

impl<T, S: BlockSource + Default, const N: usize> From<[T; N]> for Array<T, S> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T, S: BlockSource> IntoIterator for &'a Array<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, S: BlockSource> IntoIterator for &'a mut Array<T, S> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T: PartialEq, S: BlockSource, S2: BlockSource> PartialEq<Array<T, S2>> for Array<T, S> {
    fn eq(&self, other: &Array<T, S2>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq, S: BlockSource, const N: usize> PartialEq<[T; N]> for Array<T, S> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T: fmt::Debug, S: BlockSource> fmt::Debug for Array<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

// SAFETY: the array uniquely owns its elements and storage block;
// sending or sharing it is sending or sharing the elements plus the
// source handle, so the auto-trait bounds on `T` and `S` carry over.
unsafe impl<T: Send, S: BlockSource + Send> Send for Array<T, S> {}
// SAFETY: see above.
unsafe impl<T: Sync, S: BlockSource + Sync> Sync for Array<T, S> {}
