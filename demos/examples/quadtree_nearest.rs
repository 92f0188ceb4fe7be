// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest-entity lookup over a scatter of points.
//!
//! Run:
//! - `cargo run -p understory_quadtree_demos --example quadtree_nearest`

use kurbo::Point;
use understory_quadtree::{FindMode, QuadTree, Rect};

fn main() {
    let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 256.0, 256.0));

    // A deterministic scatter (a simple LCG keeps the demo dependency-free).
    let mut state = 0x2545_F491_u64;
    let mut next = || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (state >> 33) as f64 / f64::from(1_u32 << 31) * 256.0
    };
    let points: Vec<Point> = (0..200).map(|_| Point::new(next(), next())).collect();
    tree.insert_batch(points.iter().copied())
        .expect("finite bounds");

    for probe in [Point::new(10.0, 10.0), Point::new(128.0, 128.0), Point::new(250.0, 3.0)] {
        let near = tree.find_near_entity(Rect::from_point(probe.x, probe.y));
        let brute = points
            .iter()
            .min_by(|a, b| a.distance(probe).total_cmp(&b.distance(probe)));
        println!("probe {probe:?}: nearest {near:?} (brute force {brute:?})");

        #[allow(deprecated, reason = "Comparing against the structural lookup.")]
        let neighbor = tree.find_neighbor(Rect::from_point(probe.x, probe.y), FindMode::Right);
        println!("  structural neighbor to the right: {neighbor:?}");
    }
}
