use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use sgtree::{Natural, OrderedMap, PriorityQueue, Scapegoat, Tree};
use std::collections::{BTreeMap, BinaryHeap};
use std::cmp::Reverse;
use std::hint::black_box;

const N: usize = 10_000;

// ─── Key sequences ──────────────────────────────────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Deterministic LCG so runs are comparable.
    let mut x: u64 = 12345;
    (0..n)
        .map(|_| {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            (x >> 33) as i64
        })
        .collect()
}

fn key_orders() -> [(&'static str, Vec<i64>); 3] {
    [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ]
}

// ─── Map benchmarks ─────────────────────────────────────────────────────────

fn bench_map_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_put");

    for (order, keys) in key_orders() {
        group.bench_with_input(BenchmarkId::new("OrderedMap", order), &keys, |b, keys| {
            b.iter(|| {
                let mut map = OrderedMap::new();
                for &k in keys {
                    map.put(k, k);
                }
                map
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", order), &keys, |b, keys| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in keys {
                    map.insert(k, k);
                }
                map
            });
        });
    }

    group.finish();
}

fn bench_map_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_get");

    for (order, keys) in key_orders() {
        let sg_map: OrderedMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_with_input(BenchmarkId::new("OrderedMap", order), &keys, |b, keys| {
            b.iter(|| keys.iter().filter_map(|k| sg_map.get(k)).fold(0i64, |sum, &v| sum.wrapping_add(v)));
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", order), &keys, |b, keys| {
            b.iter(|| keys.iter().filter_map(|k| bt_map.get(k)).fold(0i64, |sum, &v| sum.wrapping_add(v)));
        });
    }

    group.finish();
}

fn bench_map_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_remove");

    for (order, keys) in key_orders() {
        let sg_map: OrderedMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_with_input(BenchmarkId::new("OrderedMap", order), &keys, |b, keys| {
            b.iter_batched(
                || sg_map.clone(),
                |mut map| {
                    for k in keys {
                        map.remove(k);
                    }
                    map
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", order), &keys, |b, keys| {
            b.iter_batched(
                || bt_map.clone(),
                |mut map| {
                    for k in keys {
                        map.remove(k);
                    }
                    map
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// ─── Tree benchmarks ────────────────────────────────────────────────────────

/// Sorted inserts across the balancing range, from near-perfect to never rebuilding.
fn bench_tree_alpha(c: &mut Criterion) {
    let keys = ordered_keys(N / 4);
    let mut group = c.benchmark_group("tree_add_ordered_by_alpha");

    for alpha in [0.5, 0.6, 0.7, 0.8, 0.9, 1.0] {
        group.bench_with_input(BenchmarkId::from_parameter(alpha), &keys, |b, keys| {
            b.iter(|| {
                let mut tree = Tree::with_balancer(Natural, Scapegoat::new(alpha));
                tree.extend(keys.iter().copied());
                black_box(tree.height())
            });
        });
    }

    group.finish();
}

// ─── Queue benchmarks ───────────────────────────────────────────────────────

fn bench_queue_push_pop(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("queue_push_pop");

    group.bench_function(BenchmarkId::new("PriorityQueue", N), |b| {
        b.iter(|| {
            let mut queue = PriorityQueue::new();
            queue.extend(keys.iter().copied());
            let mut sum = 0i64;
            while let Some(k) = queue.pop() {
                sum = sum.wrapping_add(k);
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BinaryHeap", N), |b| {
        b.iter(|| {
            let mut heap: BinaryHeap<Reverse<i64>> = keys.iter().copied().map(Reverse).collect();
            let mut sum = 0i64;
            while let Some(Reverse(k)) = heap.pop() {
                sum = sum.wrapping_add(k);
            }
            sum
        });
    });

    group.finish();
}

// ─── Criterion groups ───────────────────────────────────────────────────────

criterion_group!(map_benches, bench_map_put, bench_map_get, bench_map_remove);

criterion_group!(tree_benches, bench_tree_alpha);

criterion_group!(queue_benches, bench_queue_push_pop);

criterion_main!(map_benches, tree_benches, queue_benches);
