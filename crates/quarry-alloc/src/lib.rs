//! First-fit block allocation for Quarry containers.
//!
//! This crate owns the lower half of the Quarry memory subsystem: raw
//! memory blocks carved from the system heap, and the bookkeeping that
//! lets freed blocks be reused instead of returned.
//!
//! # Architecture
//!
//! ```text
//! BlockSource (capability trait)
//! ├── SystemSource (pass-through to the system heap)
//! └── BlockPool (first-fit reuse over a free list)
//!     ├── occupied — blocks currently leased to callers
//!     ├── free     — blocks available for reuse, scanned in order
//!     └── all      — every block ever carved, released at teardown
//! ```
//!
//! # Reuse model
//!
//! [`BlockPool::allocate`] scans the free list front to back and takes
//! the first block large enough for the request, splitting off the
//! unused tail as a new free block. Freed blocks are never merged, so a
//! pool fragments monotonically under mixed-size churn — that is an
//! accepted property of the design, not something the pool repairs.
//!
//! Blocks go back to the system heap only when the pool itself is
//! dropped. Containers borrow the pool, so the borrow checker enforces
//! that no storage outlives it.
//!
//! This crate is one of two in the workspace permitted to contain
//! `unsafe` code (along with `quarry-array`); it is confined to the
//! modules that touch the system heap, with a `// SAFETY:` comment on
//! every block.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod block;
pub mod pool;
pub mod source;
pub mod system;

pub use block::Block;
pub use pool::BlockPool;
pub use source::BlockSource;
pub use system::SystemSource;
