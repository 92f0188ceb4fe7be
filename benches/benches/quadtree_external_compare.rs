// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_quadtree::{QuadTree, Rect, SelectMode};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

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

fn to_rstar_rects(v: &[Rect]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|r| Rectangle::from_corners([r.min_x, r.min_y], [r.max_x, r.max_y]))
        .collect()
}

fn bench_quadtree_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_external_compare");
    for &n in &[64usize, 128] {
        let rects = gen_grid_rects(n, 10.0);
        let region = Rect::from_xywh(100.0, 100.0, 400.0, 400.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("quadtree_build_query_n{}", n), |b| {
            b.iter_batched(
                || QuadTree::<Rect>::new(Rect::new(0.0, 0.0, 10.0, 10.0)),
                |mut tree| {
                    for r in &rects {
                        let _ = tree.insert(*r);
                    }
                    let hits = tree.query(region, SelectMode::Intersects).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&rects),
                |rectangles| {
                    let mut tree = RTree::new();
                    for r in rectangles {
                        tree.insert(r);
                    }
                    let aabb = AABB::from_corners(
                        [region.min_x, region.min_y],
                        [region.max_x, region.max_y],
                    );
                    let hits = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&rects),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let aabb = AABB::from_corners(
                        [region.min_x, region.min_y],
                        [region.max_x, region.max_y],
                    );
                    let hits = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        let tree = {
            let mut t = QuadTree::new(Rect::new(0.0, 0.0, n as f64 * 10.0, n as f64 * 10.0));
            let _ = t.insert_batch(rects.iter().copied());
            t
        };
        let rtree = RTree::bulk_load(to_rstar_rects(&rects));
        let probe = [n as f64 * 5.0 + 0.5, n as f64 * 5.0 + 0.5];

        group.bench_function(format!("quadtree_nearest_n{}", n), |b| {
            b.iter(|| black_box(tree.find_near_entity(Rect::from_point(probe[0], probe[1]))))
        });

        group.bench_function(format!("rstar_nearest_n{}", n), |b| {
            b.iter(|| black_box(rtree.nearest_neighbor(&probe)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_quadtree_external_compare);
criterion_main!(benches);
