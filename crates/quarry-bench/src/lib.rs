//! Benchmark-only crate; see the `benches/` directory.
//!
//! Kept as a separate `publish = false` member so criterion and its
//! dependency tree stay out of the library crates.
