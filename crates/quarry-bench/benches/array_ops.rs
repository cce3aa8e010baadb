//! Criterion micro-benchmarks for array growth, access, and shifting.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quarry_alloc::BlockPool;
use quarry_array::Array;

/// Amortized-doubling growth against the system heap.
fn bench_push_system(c: &mut Criterion) {
    c.bench_function("array_push_1k_system", |b| {
        b.iter(|| {
            let mut values: Array<u64> = Array::new();
            for i in 0..1024u64 {
                values.push(black_box(i));
            }
            black_box(values.len())
        });
    });
}

/// The same growth ladder with pooled, reusable storage.
fn bench_push_pooled(c: &mut Criterion) {
    c.bench_function("array_push_1k_pooled", |b| {
        let pool = BlockPool::new();
        b.iter(|| {
            let mut values: Array<u64, &BlockPool> = Array::new_in(&pool);
            for i in 0..1024u64 {
                values.push(black_box(i));
            }
            black_box(values.len())
        });
    });
}

/// Checked access (`at`) vs the panicking index operator.
fn bench_access(c: &mut Criterion) {
    let values: Array<u64> = (0..1024u64).collect();
    c.bench_function("array_at_checked", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for i in 0..1024 {
                sum += values.at(black_box(i)).unwrap();
            }
            black_box(sum)
        });
    });
    c.bench_function("array_index", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for i in 0..1024 {
                sum += values[black_box(i)];
            }
            black_box(sum)
        });
    });
}

/// Head insertion: the full-shift worst case.
fn bench_insert_front(c: &mut Criterion) {
    c.bench_function("array_insert_front_256", |b| {
        b.iter(|| {
            let mut values: Array<u64> = Array::new();
            for i in 0..256u64 {
                values.insert(0, black_box(i)).unwrap();
            }
            black_box(values.len())
        });
    });
}

criterion_group!(
    benches,
    bench_push_system,
    bench_push_pooled,
    bench_access,
    bench_insert_front
);
criterion_main!(benches);
