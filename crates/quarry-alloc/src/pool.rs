//! First-fit block pool with split-on-reuse.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::cell::RefCell;
use std::fmt;
use std::ptr::NonNull;

use indexmap::IndexMap;

use crate::block::{Block, HeapBlock};
use crate::source::BlockSource;

/// A block allocator that reuses freed blocks via first-fit search.
///
/// Every block carved from the system heap stays under the pool's
/// ownership for the pool's whole lifetime: deallocation moves a block
/// to the free list, and only dropping the pool releases memory back to
/// the system. The free list is scanned in insertion order; the first
/// block large enough wins, and an oversized hit is split into an
/// exactly-sized lease plus a free remainder.
///
/// Adjacent free blocks are never coalesced. A pool serving mixed-size
/// churn therefore fragments monotonically — callers who need compact
/// reuse should feed the pool uniform request sizes.
///
/// Bookkeeping lives behind a `RefCell`, so a pool can back any number
/// of containers through shared references while remaining `!Sync`.
///
/// # Examples
///
/// ```
/// use quarry_alloc::{BlockPool, BlockSource};
///
/// let pool = BlockPool::new();
/// let a = pool.allocate(16, 1);
/// unsafe { pool.deallocate(a, 16, 1) };
/// // The freed 16-byte block satisfies the next smaller request.
/// let b = pool.allocate(10, 1);
/// assert_eq!(a, b);
/// assert_eq!(pool.free_bytes(), 6);
/// ```
pub struct BlockPool {
    state: RefCell<PoolState>,
}

/// The three block registries. Invariants:
///
/// - `all` is a superset (by pointer identity) of `occupied ∪ free`.
/// - `occupied` and `free` are disjoint.
/// - sum of sizes in `occupied` plus `free` equals the sum in `all`.
struct PoolState {
    /// Blocks currently leased to callers, keyed by pointer identity.
    occupied: IndexMap<*mut u8, usize>,
    /// Blocks available for reuse, scanned front to back.
    free: Vec<Block>,
    /// Every block ever carved from the system heap.
    all: Vec<HeapBlock>,
}

impl BlockPool {
    /// Create an empty pool. No memory is reserved up front; the pool
    /// grows on the first allocation miss.
    pub fn new() -> Self {
        Self {
            state: RefCell::new(PoolState {
                occupied: IndexMap::new(),
                free: Vec::new(),
                all: Vec::new(),
            }),
        }
    }

    /// Bytes currently sitting on the free list.
    pub fn free_bytes(&self) -> usize {
        self.state.borrow().free.iter().map(|b| b.size).sum()
    }

    /// Bytes currently leased to callers.
    pub fn occupied_bytes(&self) -> usize {
        self.state.borrow().occupied.values().sum()
    }

    /// Bytes carved from the system heap over the pool's lifetime.
    ///
    /// Always equals [`free_bytes`](Self::free_bytes) +
    /// [`occupied_bytes`](Self::occupied_bytes).
    pub fn total_bytes(&self) -> usize {
        self.state.borrow().all.iter().map(|b| b.size).sum()
    }

    /// Number of blocks on the free list.
    pub fn free_block_count(&self) -> usize {
        self.state.borrow().free.len()
    }

    /// Number of blocks currently leased.
    pub fn occupied_block_count(&self) -> usize {
        self.state.borrow().occupied.len()
    }

    /// Number of blocks carved from the system heap.
    pub fn heap_block_count(&self) -> usize {
        self.state.borrow().all.len()
    }
}

impl Default for BlockPool {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockSource for BlockPool {
    fn allocate(&self, size: usize, align: usize) -> NonNull<u8> {
        debug_assert!(size > 0, "zero-sized requests must not reach the pool");
        debug_assert!(align.is_power_of_two());
        let mut state = self.state.borrow_mut();

        // First fit: take the first free block that is large enough and
        // whose address satisfies the requested alignment. The address
        // check keeps reused blocks sound for the caller's type; the
        // scan order is strictly free-list insertion order.
        let hit = state
            .free
            .iter()
            .position(|b| b.size >= size && b.ptr.as_ptr() as usize % align == 0);
        if let Some(index) = hit {
            let block = state.free.remove(index);
            if block.size != size {
                // Split: the head becomes the lease, the tail goes to
                // the back of the free list.
                // SAFETY: `size < block.size`, so `ptr + size` is still
                // inside the carved region and non-null.
                let tail_ptr = unsafe { NonNull::new_unchecked(block.ptr.as_ptr().add(size)) };
                state.free.push(Block::new(tail_ptr, block.size - size));
            }
            state.occupied.insert(block.ptr.as_ptr(), size);
            return block.ptr;
        }

        // Miss: carve a fresh block of exactly `size` bytes.
        let layout = Layout::from_size_align(size, align)
            .expect("size and align describe a valid layout");
        // SAFETY: `layout` has non-zero size (asserted above).
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = match NonNull::new(raw) {
            Some(ptr) => ptr,
            None => alloc::handle_alloc_error(layout),
        };
        state.all.push(HeapBlock { ptr, size, align });
        state.occupied.insert(ptr.as_ptr(), size);
        ptr
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize, _align: usize) {
        let mut state = self.state.borrow_mut();
        // Lookup is by pointer identity; the recorded lease size is
        // authoritative. Unrecognised pointers (double free, foreign
        // pointer, already-freed block) are ignored without error.
        if let Some(recorded) = state.occupied.shift_remove(&ptr.as_ptr()) {
            debug_assert_eq!(recorded, size, "lease returned with a different size");
            state.free.push(Block::new(ptr, recorded));
        }
    }

    fn is_same_source(&self, other: &Self) -> bool {
        self == other
    }
}

/// Two pools are equal iff they have carved identical `(ptr, size)`
/// block sequences from the system heap. In practice only a pool and
/// itself (or two pools that have never allocated) compare equal.
impl PartialEq for BlockPool {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        let lhs = self.state.borrow();
        let rhs = other.state.borrow();
        lhs.all.len() == rhs.all.len()
            && lhs
                .all
                .iter()
                .zip(rhs.all.iter())
                .all(|(a, b)| a.identity() == b.identity())
    }
}

impl Eq for BlockPool {}

impl fmt::Debug for BlockPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("BlockPool")
            .field("occupied_blocks", &state.occupied.len())
            .field("free_blocks", &state.free.len())
            .field("heap_blocks", &state.all.len())
            .finish()
    }
}

impl Drop for BlockPool {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        // Every carved block goes back to the system heap, leased or
        // not. Containers borrow the pool, so the borrow checker has
        // already guaranteed none of them are still alive here.
        for heap in &state.all {
            let layout = Layout::from_size_align(heap.size, heap.align)
                .expect("recorded layout was valid at allocation time");
            // SAFETY: `heap.ptr` came from `alloc::alloc` with exactly
            // this layout and is released exactly once, here.
            unsafe { alloc::dealloc(heap.ptr.as_ptr(), layout) };
        }
    }
}
