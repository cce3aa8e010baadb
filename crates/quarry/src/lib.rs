//! Quarry: a first-fit block pool and the growable array it backs.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the Quarry sub-crates. For most users, adding `quarry` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```
//! use quarry::{Array, BlockPool};
//!
//! // One pool can back any number of arrays; freed storage is reused
//! // by first-fit search instead of going back to the system heap.
//! let pool = BlockPool::new();
//!
//! let mut values: Array<i32, &BlockPool> = Array::new_in(&pool);
//! for i in 0..100 {
//!     values.push(i);
//! }
//! assert_eq!(values.len(), 100);
//! assert_eq!(values.capacity(), 160); // 10 → 20 → 40 → 80 → 160
//!
//! // Outgrown storage blocks are on the pool's free list, not leaked.
//! assert_eq!(
//!     pool.free_bytes() + pool.occupied_bytes(),
//!     pool.total_bytes()
//! );
//! ```
//!
//! Arrays that need no pooling use the default
//! [`SystemSource`](alloc::SystemSource) and go straight to the system
//! heap:
//!
//! ```
//! use quarry::Array;
//!
//! let mut values: Array<&str> = Array::new();
//! values.push("hello");
//! values.push("world");
//! assert_eq!(values, ["hello", "world"]);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`alloc`] | `quarry-alloc` | `BlockSource` capability, `BlockPool`, `SystemSource` |
//! | [`array`] | `quarry-array` | `Array`, cursors, `ArrayError` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Block allocation: the `BlockSource` capability and its two
/// implementations (`quarry-alloc`).
pub use quarry_alloc as alloc;

/// The allocator-backed growable array and its cursors
/// (`quarry-array`).
pub use quarry_array as array;

pub use quarry_alloc::{BlockPool, BlockSource, SystemSource};
pub use quarry_array::{Array, ArrayError};
