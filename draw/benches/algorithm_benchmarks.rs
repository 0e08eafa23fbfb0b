// Copyright (c) 2024 Botho Foundation

//! Benchmarks for ticket algorithms.
//!
//! Measures performance of:
//! - Each algorithm over signatures of increasing length
//! - A full calculation with all algorithms and dedup enabled

use airdrop_draw::{
    execute_calculation, run_algorithm, Algorithm, CalculationOptions, Leaderboard,
    LeaderboardEntry, Signature,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Build a pseudo-random digit signature of the given length.
fn make_signature(len: usize) -> Signature {
    let mut state = 0x2545_f491_4f6c_dd1du64;
    let digits: String = (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            char::from(b'0' + (state % 10) as u8)
        })
        .collect();
    Signature::new(digits).expect("digits only")
}

fn make_leaderboard(owners: u64) -> Leaderboard {
    let width = 1_000_000_000 / owners;
    let entries = (0..owners)
        .map(|i| LeaderboardEntry::new(format!("1.2.{i}"), i * width, (i + 1) * width - 1))
        .collect();
    Leaderboard::new(entries).expect("disjoint ranges")
}

/// Benchmark every algorithm for a few signature lengths.
fn bench_algorithms(c: &mut Criterion) {
    for algorithm in Algorithm::ALL {
        let mut group = c.benchmark_group(algorithm.name());

        for len in [72, 144, 288] {
            let signature = make_signature(len);
            group.throughput(Throughput::Bytes(len as u64));
            group.bench_with_input(BenchmarkId::new("digits", len), &signature, |b, sig| {
                b.iter(|| black_box(run_algorithm(algorithm, sig)))
            });
        }

        group.finish();
    }
}

/// Benchmark a full calculation.
fn bench_calculation(c: &mut Criterion) {
    let signature = make_signature(144);
    let board = make_leaderboard(500);
    let names: Vec<&str> = Algorithm::ALL.iter().map(|a| a.name()).collect();
    let options = CalculationOptions {
        deduplicate: true,
        always_winning: true,
    };

    c.bench_function("execute_calculation_all", |b| {
        b.iter(|| black_box(execute_calculation(&signature, &names, options, &board)))
    });
}

criterion_group!(benches, bench_algorithms, bench_calculation);
criterion_main!(benches);
