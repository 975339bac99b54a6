//! Benchmarks for the look-ahead engine against plain std iterators.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use seqflow_core::prelude::*;

fn benchmark_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for size in [100, 1000, 10000] {
        let data: Vec<i64> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("cursor", size), &data, |b, data| {
            b.iter(|| {
                of(black_box(data.clone()))
                    .filter(|x| x % 3 == 0)
                    .to_vec()
            });
        });

        group.bench_with_input(BenchmarkId::new("std", size), &data, |b, data| {
            b.iter(|| {
                black_box(data.clone())
                    .into_iter()
                    .filter(|x| x % 3 == 0)
                    .collect::<Vec<_>>()
            });
        });
    }

    group.finish();
}

fn benchmark_has_next_polling(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_next_polling");

    for polls in [1, 2, 4] {
        group.bench_with_input(BenchmarkId::new("filter", polls), &polls, |b, &polls| {
            b.iter(|| {
                let mut cursor = range(0i32, 10_000).filter(|x| x % 2 == 0);
                let mut total = 0i64;
                loop {
                    let mut available = false;
                    for _ in 0..polls {
                        available = cursor.has_next();
                    }
                    if !available {
                        break;
                    }
                    total += i64::from(cursor.next().unwrap_or(0));
                }
                total
            });
        });
    }

    group.finish();
}

fn benchmark_chained(c: &mut Criterion) {
    let mut group = c.benchmark_group("chained");

    group.bench_function("filter_map_limit", |b| {
        b.iter(|| {
            range(0i64, black_box(100_000))
                .filter(|x| x % 7 == 0)
                .map(|x| x * x)
                .limit(1000)
                .count_all()
        });
    });

    group.bench_function("drop_take_scan", |b| {
        b.iter(|| {
            range(0i32, black_box(10_000))
                .drop_while(|x| *x < 100)
                .take_while(|x| *x < 9_000)
                .scan(|a, x| a.wrapping_add(x))
                .count_all()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_filter,
    benchmark_has_next_polling,
    benchmark_chained
);
criterion_main!(benches);
