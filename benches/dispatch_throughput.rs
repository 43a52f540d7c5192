//! Dispatch throughput benchmarks
//!
//! Run with: cargo bench --bench dispatch_throughput
//!
//! Measures how quickly a fixed transaction log is fully claimed and
//! queued under each partitioning strategy, holding the log and table size
//! fixed and only varying thread count.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use mvdcc::{Engine, EngineConfig, Table, Task, Transaction};

/// Fixed seed for a reproducible synthetic key-access pattern.
const BENCH_SEED: u64 = 0xDEAD_BEEF_CAFE_BABE;

fn lcg_next(state: &mut u64) -> u64 {
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
    *state
}

fn synthetic_log(tuple_count: usize, log_len: u64) -> Vec<Transaction> {
    let mut state = BENCH_SEED;
    (0..log_len)
        .map(|ts| {
            let key = lcg_next(&mut state) % tuple_count as u64;
            Transaction::new(ts, vec![Task::write(key)])
        })
        .collect()
}

fn bench_bohm(c: &mut Criterion) {
    let mut group = c.benchmark_group("bohm_dispatch");
    const TUPLE_COUNT: usize = 1000;
    const LOG_LEN: u64 = 5_000;

    for &thread_count in &[1usize, 2, 4, 8] {
        group.throughput(Throughput::Elements(LOG_LEN));
        group.bench_function(format!("threads_{thread_count}"), |b| {
            b.iter(|| {
                let config = EngineConfig {
                    thread_count,
                    tuple_count: TUPLE_COUNT,
                    batch_size: 50,
                    ..EngineConfig::default()
                };
                let table = Table::new(TUPLE_COUNT);
                let transactions = synthetic_log(TUPLE_COUNT, LOG_LEN);
                let engine = Engine::new_bohm(config, table, transactions).unwrap();
                black_box(engine.run_to_completion());
            });
        });
    }
    group.finish();
}

fn bench_gato(c: &mut Criterion) {
    let mut group = c.benchmark_group("gato_dispatch");
    const TUPLE_COUNT: usize = 1000;
    const LOG_LEN: u64 = 5_000;

    for &thread_count in &[1usize, 2, 4, 8] {
        group.throughput(Throughput::Elements(LOG_LEN));
        group.bench_function(format!("threads_{thread_count}"), |b| {
            b.iter(|| {
                let config = EngineConfig {
                    thread_count,
                    tuple_count: TUPLE_COUNT,
                    batch_size: 50,
                    ..EngineConfig::default()
                };
                let table = Table::new(TUPLE_COUNT);
                let transactions = synthetic_log(TUPLE_COUNT, LOG_LEN);
                let engine = Engine::new_gato(config, table, transactions).unwrap();
                black_box(engine.run_to_completion());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bohm, bench_gato);
criterion_main!(benches);
