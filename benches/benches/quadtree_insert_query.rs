// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_quadtree::{QuadTree, Rect, SelectMode};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Rect::from_xywh(x0 + 1.0, y0 + 1.0, cell - 2.0, cell - 2.0));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_rects(count: usize, max_w: f64, max_h: f64, rect_w: f64, rect_h: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * (max_w - rect_w).max(1.0);
        let y0 = rng.next_f64() * (max_h - rect_h).max(1.0);
        out.push(Rect::from_xywh(x0, y0, rect_w, rect_h));
    }
    out
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Rect::from_point(cx + dx, cy + dy));
        }
    }
    out
}

fn build(rects: &[Rect], seed: Rect) -> QuadTree<Rect> {
    let mut tree = QuadTree::new(seed);
    for r in rects {
        let _ = tree.insert(*r);
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &[32usize, 64, 128] {
        let rects = gen_grid_rects(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_presized_n{}", n), |b| {
            let bound = Rect::new(0.0, 0.0, n as f64 * 10.0, n as f64 * 10.0);
            b.iter_batched(
                || QuadTree::<Rect>::new(bound),
                |mut tree| {
                    for r in &rects {
                        let _ = tree.insert(*r);
                    }
                    black_box(tree.len());
                },
                BatchSize::SmallInput,
            )
        });
        // Seeded with a tiny bound so the root grows repeatedly.
        group.bench_function(format!("grid_growing_n{}", n), |b| {
            b.iter_batched(
                || QuadTree::<Rect>::new(Rect::new(0.0, 0.0, 1.0, 1.0)),
                |mut tree| {
                    for r in &rects {
                        let _ = tree.insert(*r);
                    }
                    black_box(tree.depth());
                },
                BatchSize::SmallInput,
            )
        });
    }
    let points = gen_clustered_points(20, 500, 80.0);
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("clustered_points_batch", |b| {
        b.iter_batched(
            || points.clone(),
            |points| {
                let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 2000.0, 2000.0));
                let _ = tree.insert_batch(points);
                black_box(tree.node_count());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let rects = gen_random_rects(10_000, 2000.0, 2000.0, 12.0, 12.0);
    let tree = build(&rects, Rect::new(0.0, 0.0, 2000.0, 2000.0));
    let region = Rect::from_xywh(500.0, 500.0, 400.0, 400.0);
    for (name, mode) in [
        ("window", SelectMode::Contains),
        ("crossing", SelectMode::Intersects),
    ] {
        group.bench_function(format!("random_10k_{}", name), |b| {
            b.iter(|| {
                let hits = tree.query(black_box(region), mode).count();
                black_box(hits);
            })
        });
    }
    group.bench_function("remove_in_crossing", |b| {
        b.iter_batched(
            || build(&rects, Rect::new(0.0, 0.0, 2000.0, 2000.0)),
            |mut tree| {
                let removed = tree.remove_in(region, SelectMode::Intersects);
                black_box(removed.len());
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn bench_find_near(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_near");
    let points = gen_clustered_points(20, 500, 80.0);
    let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 2000.0, 2000.0));
    let _ = tree.insert_batch(points);
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    let probes: Vec<Rect> = (0..256)
        .map(|_| Rect::from_point(rng.next_f64() * 2000.0, rng.next_f64() * 2000.0))
        .collect();
    group.throughput(Throughput::Elements(probes.len() as u64));
    group.bench_function("clustered_points_256_probes", |b| {
        b.iter(|| {
            for p in &probes {
                black_box(tree.find_near_entity(*p));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_query, bench_find_near);
criterion_main!(benches);
