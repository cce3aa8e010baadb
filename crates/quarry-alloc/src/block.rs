//! Raw memory block descriptors.

use std::ptr::NonNull;

/// The address and length of a carved memory region.
///
/// A `Block` is pure bookkeeping — it does not own the bytes it points
/// at. Ownership of the underlying memory always rests with the pool
/// that carved it from the system heap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    /// First byte of the region.
    pub(crate) ptr: NonNull<u8>,
    /// Length of the region in bytes.
    pub(crate) size: usize,
}

impl Block {
    /// Create a descriptor for the region `[ptr, ptr + size)`.
    pub(crate) fn new(ptr: NonNull<u8>, size: usize) -> Self {
        Self { ptr, size }
    }

    /// First byte of the region.
    pub fn ptr(&self) -> NonNull<u8> {
        self.ptr
    }

    /// Length of the region in bytes.
    pub fn size(&self) -> usize {
        self.size
    }
}

/// A block obtained directly from the system heap.
///
/// Unlike [`Block`], a `HeapBlock` remembers the alignment it was
/// allocated with, because the system heap requires deallocation with
/// the same layout. Sub-blocks split off a heap block never carry their
/// own `HeapBlock` entry — only whole carve-outs do.
#[derive(Clone, Copy, Debug)]
pub(crate) struct HeapBlock {
    pub(crate) ptr: NonNull<u8>,
    pub(crate) size: usize,
    pub(crate) align: usize,
}

impl HeapBlock {
    /// The `(ptr, size)` identity used by the pool equality relation.
    pub(crate) fn identity(&self) -> (*mut u8, usize) {
        (self.ptr.as_ptr(), self.size)
    }
}
