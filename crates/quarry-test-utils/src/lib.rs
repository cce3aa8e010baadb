//! Test utilities for Quarry development.
//!
//! Provides [`Tracked`], an element type that counts its own
//! constructions, clones, and drops, for asserting that container
//! operations balance element lifetimes. The counters live on a shared
//! handle rather than in globals, so concurrently running tests never
//! observe each other's instances.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Lifetime counters shared by a family of [`Tracked`] values.
#[derive(Debug, Default)]
pub struct Counters {
    created: AtomicUsize,
    cloned: AtomicUsize,
    dropped: AtomicUsize,
}

impl Counters {
    /// Create a fresh counter handle for one test.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Values constructed so far (including clones).
    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    /// Values constructed via `Clone`.
    pub fn cloned(&self) -> usize {
        self.cloned.load(Ordering::Relaxed)
    }

    /// Values dropped so far.
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Whether every constructed value has been dropped.
    pub fn balanced(&self) -> bool {
        self.created() == self.dropped()
    }

    /// Values currently alive.
    pub fn live(&self) -> usize {
        self.created() - self.dropped()
    }
}

/// An element type that records its own lifetime events.
///
/// Construction (by any path) increments `created`; cloning also
/// increments `cloned`; dropping increments `dropped`. After a
/// container and all values extracted from it are gone, `created`
/// must equal `dropped` — anything else is a leaked or double-dropped
/// element.
#[derive(Debug)]
pub struct Tracked {
    pub value: i32,
    counters: Arc<Counters>,
}

impl Tracked {
    /// Create a tracked value reporting to `counters`.
    pub fn new(value: i32, counters: &Arc<Counters>) -> Self {
        counters.created.fetch_add(1, Ordering::Relaxed);
        Self {
            value,
            counters: Arc::clone(counters),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.counters.cloned.fetch_add(1, Ordering::Relaxed);
        Self::new(self.value, &self.counters)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.counters.dropped.fetch_add(1, Ordering::Relaxed);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Tracked {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_and_drop_balance() {
        let counters = Counters::new();
        {
            let _a = Tracked::new(1, &counters);
            let _b = Tracked::new(2, &counters);
            assert_eq!(counters.created(), 2);
            assert_eq!(counters.live(), 2);
        }
        assert_eq!(counters.dropped(), 2);
        assert!(counters.balanced());
    }

    #[test]
    fn clones_are_counted_twice() {
        let counters = Counters::new();
        let a = Tracked::new(7, &counters);
        let b = a.clone();
        assert_eq!(b.value, 7);
        assert_eq!(counters.created(), 2);
        assert_eq!(counters.cloned(), 1);
    }
}
