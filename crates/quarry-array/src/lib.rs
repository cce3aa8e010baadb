//! Growable arrays backed by pluggable block allocation.
//!
//! [`Array<T, S>`] is a contiguous sequence whose storage is leased
//! exclusively through the [`BlockSource`] capability from
//! `quarry-alloc`. The default source is the system heap
//! ([`SystemSource`]); pointing `S` at a shared
//! [`BlockPool`](quarry_alloc::BlockPool) reference gives every
//! reallocation first-fit reuse instead.
//!
//! # Quick start
//!
//! ```
//! use quarry_array::Array;
//!
//! let mut values: Array<i32> = Array::from([1, 3, 4]);
//! values.insert(1, 2)?;
//! values.push(5);
//! assert_eq!(values, [1, 2, 3, 4, 5]);
//! assert_eq!(values.remove(0)?, 1);
//! # Ok::<(), quarry_array::ArrayError>(())
//! ```
//!
//! # Checked and unchecked access
//!
//! The array exposes three access tiers: [`Array::at`] returns
//! `Result` and never touches out-of-range memory; the `Index`
//! operator panics; [`Array::get_unchecked`] is `unsafe` and makes the
//! bounds obligation the caller's. Growth and shifting relocate
//! elements by bitwise move, which cannot fail partway, so every
//! mutating operation either completes or leaves the array untouched.
//!
//! `unsafe` code is confined to `array.rs` with a `// SAFETY:` comment
//! on every block.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
pub mod error;
pub mod iter;

pub use array::Array;
pub use error::ArrayError;
pub use iter::{Iter, IterMut};

pub use quarry_alloc::{BlockSource, SystemSource};
