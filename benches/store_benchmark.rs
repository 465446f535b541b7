//! Performance benchmarks for the durable store components
//!
//! Measures known-thread index adds and session map binds against the
//! in-memory backend, where every mutation re-serializes the whole record.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use superego::adapters::mock::InMemoryStorage;
use superego::store::{DurableStore, KnownThreadIndex, SessionMap};

fn store() -> DurableStore {
    DurableStore::new(Arc::new(InMemoryStorage::new()))
}

/// Index pre-filled with `size` threads.
fn filled_index(size: usize) -> KnownThreadIndex {
    let index = KnownThreadIndex::new(store());
    for i in 0..size {
        let _ = index.add(&format!("thread-{}", i));
    }
    index
}

/// Benchmark adding a new thread to indexes of growing size
fn bench_known_thread_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("known_thread_add");

    for size in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let index = filled_index(size);
            let mut next = size;
            b.iter(|| {
                next += 1;
                black_box(index.add(&format!("thread-{}", next)))
            });
        });
    }

    group.finish();
}

/// Benchmark re-adding a thread that is already indexed (no write)
fn bench_known_thread_add_existing(c: &mut Criterion) {
    let mut group = c.benchmark_group("known_thread_add_existing");

    for size in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let index = filled_index(size);
            b.iter(|| black_box(index.add("thread-0")));
        });
    }

    group.finish();
}

/// Benchmark binding sessions to threads
fn bench_session_bind(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_bind");

    for sessions in [1, 10, 100].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_sessions", sessions)),
            sessions,
            |b, &sessions| {
                let store = store();
                let map = SessionMap::new(store.clone(), KnownThreadIndex::new(store));
                for i in 0..sessions {
                    let _ = map.bind_thread(&format!("session-{}", i), "thread-0");
                }
                let mut turn = 0usize;
                b.iter(|| {
                    turn += 1;
                    let session = format!("session-{}", turn % sessions);
                    black_box(map.bind_thread(&session, &format!("thread-{}", turn % 50)))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_known_thread_add,
    bench_known_thread_add_existing,
    bench_session_bind,
);

criterion_main!(benches);
