use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use preemptive_btree::{TreeConfig, TreeMap};
use std::collections::BTreeMap;
use std::ops::ControlFlow;

const N: usize = 10_000;

// ─── Key sequences ──────────────────────────────────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Deterministic LCG sequence.
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn patterns() -> [(&'static str, Vec<i64>); 3] {
    [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ]
}

fn build<const ORDER: usize>(keys: &[i64]) -> TreeMap<i64, i64, ORDER> {
    let mut map = TreeMap::with_config(TreeConfig::new());
    for &k in keys {
        map.insert(k, k).expect("insert");
    }
    map
}

// ─── Map benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert(c: &mut Criterion) {
    for (pattern, keys) in patterns() {
        let mut group = c.benchmark_group(format!("map_insert_{pattern}"));

        group.bench_function(BenchmarkId::new("TreeMap<4>", N), |b| b.iter(|| build::<4>(&keys)));
        group.bench_function(BenchmarkId::new("TreeMap<16>", N), |b| b.iter(|| build::<16>(&keys)));
        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter(|| keys.iter().map(|&k| (k, k)).collect::<BTreeMap<_, _>>());
        });

        group.finish();
    }
}

fn bench_map_get(c: &mut Criterion) {
    for (pattern, keys) in patterns() {
        let small = build::<4>(&keys);
        let wide = build::<16>(&keys);
        let std_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let mut group = c.benchmark_group(format!("map_get_{pattern}"));

        group.bench_function(BenchmarkId::new("TreeMap<4>", N), |b| {
            b.iter(|| keys.iter().filter(|k| small.get(*k).is_some()).count());
        });
        group.bench_function(BenchmarkId::new("TreeMap<16>", N), |b| {
            b.iter(|| keys.iter().filter(|k| wide.get(*k).is_some()).count());
        });
        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter(|| keys.iter().filter(|k| std_map.get(*k).is_some()).count());
        });

        group.finish();
    }
}

fn bench_map_remove(c: &mut Criterion) {
    for (pattern, keys) in patterns() {
        let mut group = c.benchmark_group(format!("map_remove_{pattern}"));

        group.bench_function(BenchmarkId::new("TreeMap<4>", N), |b| {
            b.iter_batched(
                || build::<4>(&keys),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                BatchSize::LargeInput,
            );
        });
        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter_batched(
                || keys.iter().map(|&k| (k, k)).collect::<BTreeMap<_, _>>(),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                BatchSize::LargeInput,
            );
        });

        group.finish();
    }
}

fn bench_map_traverse(c: &mut Criterion) {
    let map = build::<4>(&random_keys(N));
    let mut group = c.benchmark_group("map_traverse");

    group.bench_function(BenchmarkId::new("for_each", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            let _: ControlFlow<()> = map.for_each(|_, &v| {
                sum = sum.wrapping_add(v);
                ControlFlow::Continue(())
            });
            black_box(sum)
        });
    });
    group.bench_function(BenchmarkId::new("iter", N), |b| {
        b.iter(|| black_box(map.values().fold(0i64, |sum, &v| sum.wrapping_add(v))));
    });

    group.finish();
}

criterion_group!(map_benches, bench_map_insert, bench_map_get, bench_map_remove, bench_map_traverse);

criterion_main!(map_benches);
