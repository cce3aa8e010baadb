//! The allocation capability consumed by Quarry containers.

#![allow(unsafe_code)]

use std::ptr::NonNull;

/// A source of raw memory blocks.
///
/// This is the seam between containers and allocators: a container
/// requests exactly-sized blocks through this trait and never learns
/// how the source tracks them. Implemented by [`SystemSource`] (plain
/// system-heap allocation) and [`BlockPool`] (first-fit reuse).
///
/// All methods take `&self`; sources that need mutable bookkeeping use
/// interior mutability, which lets one source back any number of
/// containers at once. Sources are single-threaded by contract — none
/// of the provided implementations are `Sync`.
///
/// [`SystemSource`]: crate::SystemSource
/// [`BlockPool`]: crate::BlockPool
pub trait BlockSource {
    /// Lease a block of exactly `size` bytes aligned to `align`.
    ///
    /// Never returns an error: sources that bottom out in the system
    /// heap abort the process on exhaustion rather than reporting it.
    ///
    /// # Panics
    ///
    /// May panic (debug builds) if `size` is zero or `align` is not a
    /// power of two. Callers are expected to filter zero-sized requests
    /// before reaching the source.
    fn allocate(&self, size: usize, align: usize) -> NonNull<u8>;

    /// Return a previously leased block.
    ///
    /// `size` and `align` must describe the lease being returned.
    /// Pooling sources may ignore requests for pointers they do not
    /// recognise; see [`BlockPool`](crate::BlockPool) for the exact
    /// contract.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` on this source (or a
    /// source it [`is_same_source`](Self::is_same_source) with), with
    /// this `size` and `align`, and must not be used after this call.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize, align: usize);

    /// Whether storage leased from `self` may be released through
    /// `other`.
    ///
    /// Containers use this to decide if storage can be handed across an
    /// allocator boundary instead of copied element by element.
    fn is_same_source(&self, other: &Self) -> bool;
}

impl<S: BlockSource + ?Sized> BlockSource for &S {
    fn allocate(&self, size: usize, align: usize) -> NonNull<u8> {
        (**self).allocate(size, align)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize, align: usize) {
        // SAFETY: forwarded verbatim; the caller upholds the contract.
        unsafe { (**self).deallocate(ptr, size, align) }
    }

    fn is_same_source(&self, other: &Self) -> bool {
        (**self).is_same_source(other)
    }
}
