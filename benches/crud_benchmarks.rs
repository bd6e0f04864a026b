use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use splay_rank::SplayRankMap;
use std::collections::BTreeMap;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn splay_map_of(keys: &[i64]) -> SplayRankMap<i64, i64> {
    let mut map = SplayRankMap::new();
    for &k in keys {
        let _ = map.insert(k, k);
    }
    map
}

fn btree_map_of(keys: &[i64]) -> BTreeMap<i64, i64> {
    keys.iter().map(|&k| (k, k)).collect()
}

// ─── Insert Benchmarks ──────────────────────────────────────────────────────

fn bench_insert_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_ordered");

    group.bench_function(BenchmarkId::new("SplayRankMap", N), |b| {
        b.iter(|| {
            let mut map = SplayRankMap::new();
            for i in 0..N as i64 {
                map.insert(i, i).unwrap();
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for i in 0..N as i64 {
                map.insert(i, i);
            }
            map
        });
    });

    group.finish();
}

fn bench_insert_reverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_reverse");

    group.bench_function(BenchmarkId::new("SplayRankMap", N), |b| {
        b.iter(|| {
            let mut map = SplayRankMap::new();
            for i in (0..N as i64).rev() {
                map.insert(i, i).unwrap();
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for i in (0..N as i64).rev() {
                map.insert(i, i);
            }
            map
        });
    });

    group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("insert_random");

    group.bench_function(BenchmarkId::new("SplayRankMap", N), |b| {
        b.iter(|| splay_map_of(&keys));
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| btree_map_of(&keys));
    });

    group.finish();
}

// ─── Get Benchmarks ─────────────────────────────────────────────────────────
//
// Splay lookups restructure the tree, so the splay side uses `iter_batched`
// with a fresh tree per iteration instead of a shared prebuilt one.

fn bench_get_ordered(c: &mut Criterion) {
    let keys = ordered_keys(N);
    let bt_map = btree_map_of(&keys);

    let mut group = c.benchmark_group("get_ordered");

    group.bench_function(BenchmarkId::new("SplayRankMap", N), |b| {
        b.iter_batched(
            || splay_map_of(&keys),
            |mut map| {
                let mut sum = 0i64;
                for &k in &keys {
                    if let Some(&v) = map.get(&k) {
                        sum = sum.wrapping_add(v);
                    }
                }
                sum
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = bt_map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_get_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let bt_map = btree_map_of(&keys);

    let mut group = c.benchmark_group("get_random");

    group.bench_function(BenchmarkId::new("SplayRankMap", N), |b| {
        b.iter_batched(
            || splay_map_of(&keys),
            |mut map| {
                let mut sum = 0i64;
                for &k in &keys {
                    if let Some(&v) = map.get(&k) {
                        sum = sum.wrapping_add(v);
                    }
                }
                sum
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = bt_map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

/// The splay tree's home turf: a hot working set far smaller than the map.
fn bench_get_skewed(c: &mut Criterion) {
    let keys = ordered_keys(N);
    let hot: Vec<i64> = random_keys(N).iter().map(|k| k.rem_euclid(16)).collect();
    let bt_map = btree_map_of(&keys);

    let mut group = c.benchmark_group("get_skewed");

    group.bench_function(BenchmarkId::new("SplayRankMap", N), |b| {
        b.iter_batched(
            || splay_map_of(&keys),
            |mut map| {
                let mut sum = 0i64;
                for &k in &hot {
                    if let Some(&v) = map.get(&k) {
                        sum = sum.wrapping_add(v);
                    }
                }
                sum
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &hot {
                if let Some(&v) = bt_map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

// ─── Remove Benchmarks ──────────────────────────────────────────────────────

fn bench_remove_ordered(c: &mut Criterion) {
    let keys = ordered_keys(N);

    let mut group = c.benchmark_group("remove_ordered");

    group.bench_function(BenchmarkId::new("SplayRankMap", N), |b| {
        b.iter_batched(
            || splay_map_of(&keys),
            |mut map| {
                for &k in &keys {
                    map.remove(&k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || btree_map_of(&keys),
            |mut map| {
                for &k in &keys {
                    map.remove(&k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_remove_reverse(c: &mut Criterion) {
    let keys = ordered_keys(N);
    let reverse_keys = reverse_ordered_keys(N);

    let mut group = c.benchmark_group("remove_reverse");

    group.bench_function(BenchmarkId::new("SplayRankMap", N), |b| {
        b.iter_batched(
            || splay_map_of(&keys),
            |mut map| {
                for &k in &reverse_keys {
                    map.remove(&k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || btree_map_of(&keys),
            |mut map| {
                for &k in &reverse_keys {
                    map.remove(&k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("remove_random");

    group.bench_function(BenchmarkId::new("SplayRankMap", N), |b| {
        b.iter_batched(
            || splay_map_of(&keys),
            |mut map| {
                for &k in &keys {
                    map.remove(&k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || btree_map_of(&keys),
            |mut map| {
                for &k in &keys {
                    map.remove(&k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Rank Query Benchmarks ──────────────────────────────────────────────────
//
// BTreeMap has no positional access; `iter().nth()` is its honest stand-in.

fn bench_get_by_rank_random(c: &mut Criterion) {
    let keys = ordered_keys(N);
    let ranks: Vec<usize> = random_keys(N).iter().map(|k| k.rem_euclid(N as i64) as usize).collect();
    let bt_map = btree_map_of(&keys);

    let mut group = c.benchmark_group("get_by_rank_random");

    group.bench_function(BenchmarkId::new("SplayRankMap", N), |b| {
        b.iter_batched(
            || splay_map_of(&keys),
            |mut map| {
                let mut sum = 0i64;
                for &r in &ranks {
                    if let Ok((&k, _)) = map.get_by_rank(r) {
                        sum = sum.wrapping_add(k);
                    }
                }
                sum
            },
            criterion::BatchSize::SmallInput,
        );
    });

    // Only 100 lookups; the full N would take quadratic time here.
    group.bench_function(BenchmarkId::new("BTreeMap_nth", 100), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &r in ranks.iter().take(100) {
                if let Some((&k, _)) = bt_map.iter().nth(r) {
                    sum = sum.wrapping_add(k);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_rank_of_random(c: &mut Criterion) {
    let keys = ordered_keys(N);
    let probes: Vec<i64> = random_keys(N).iter().map(|k| k.rem_euclid(N as i64)).collect();
    let bt_map = btree_map_of(&keys);

    let mut group = c.benchmark_group("rank_of_random");

    group.bench_function(BenchmarkId::new("SplayRankMap", N), |b| {
        b.iter_batched(
            || splay_map_of(&keys),
            |mut map| {
                let mut sum = 0usize;
                for k in &probes {
                    if let Some(r) = map.rank_of(k) {
                        sum = sum.wrapping_add(r);
                    }
                }
                sum
            },
            criterion::BatchSize::SmallInput,
        );
    });

    // Only 100 probes; `range().count()` is linear per probe.
    group.bench_function(BenchmarkId::new("BTreeMap_range_count", 100), |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for k in probes.iter().take(100) {
                if bt_map.contains_key(k) {
                    sum = sum.wrapping_add(bt_map.range(..k).count());
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_rank_sweep(c: &mut Criterion) {
    let keys = ordered_keys(N);

    let mut group = c.benchmark_group("rank_sweep");

    group.bench_function(BenchmarkId::new("SplayRankMap", N), |b| {
        b.iter_batched(
            || splay_map_of(&keys),
            |mut map| {
                let mut sum = 0i64;
                for r in 0..N {
                    if let Ok((&k, _)) = map.get_by_rank(r) {
                        sum = sum.wrapping_add(k);
                    }
                }
                sum
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(insert_benches, bench_insert_ordered, bench_insert_reverse, bench_insert_random,);

criterion_group!(get_benches, bench_get_ordered, bench_get_random, bench_get_skewed,);

criterion_group!(remove_benches, bench_remove_ordered, bench_remove_reverse, bench_remove_random,);

criterion_group!(rank_benches, bench_get_by_rank_random, bench_rank_of_random, bench_rank_sweep,);

criterion_main!(insert_benches, get_benches, remove_benches, rank_benches,);
