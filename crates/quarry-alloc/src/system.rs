//! Pass-through system-heap source.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use crate::source::BlockSource;

/// The default [`BlockSource`]: every request goes straight to the
/// system heap, every release goes straight back.
///
/// `SystemSource` is zero-sized and stateless; any two instances are
/// interchangeable, so [`is_same_source`](BlockSource::is_same_source)
/// is unconditionally true. Containers that need no pooling use this
/// source by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemSource;

impl BlockSource for SystemSource {
    fn allocate(&self, size: usize, align: usize) -> NonNull<u8> {
        debug_assert!(size > 0, "zero-sized requests must not reach the source");
        let layout = Layout::from_size_align(size, align)
            .expect("size and align describe a valid layout");
        // SAFETY: `layout` has non-zero size (asserted above).
        let raw = unsafe { alloc::alloc(layout) };
        match NonNull::new(raw) {
            Some(ptr) => ptr,
            None => alloc::handle_alloc_error(layout),
        }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize, align: usize) {
        let layout = Layout::from_size_align(size, align)
            .expect("size and align describe a valid layout");
        // SAFETY: the caller guarantees `ptr` was leased from a
        // `SystemSource` with exactly this layout.
        unsafe { alloc::dealloc(ptr.as_ptr(), layout) };
    }

    fn is_same_source(&self, _other: &Self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_lease() {
        let source = SystemSource;
        let ptr = source.allocate(64, 8);
        assert_eq!(ptr.as_ptr() as usize % 8, 0);
        unsafe { source.deallocate(ptr, 64, 8) };
    }

    #[test]
    fn all_instances_are_interchangeable() {
        assert!(SystemSource.is_same_source(&SystemSource));
    }

    #[test]
    fn leased_memory_is_writable() {
        let source = SystemSource;
        let ptr = source.allocate(4, 4);
        unsafe {
            let ints = ptr.as_ptr().cast::<u32>();
            ints.write(0xDEAD_BEEF);
            assert_eq!(ints.read(), 0xDEAD_BEEF);
            source.deallocate(ptr, 4, 4);
        }
    }
}
