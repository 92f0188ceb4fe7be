// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window versus crossing selection over a grid of cells, then removal by region.
//!
//! Run:
//! - `cargo run -p understory_quadtree_demos --example quadtree_selection`

use kurbo::Rect as KRect;
use understory_quadtree::{QuadTree, Rect, SelectMode};

const CELL: f64 = 10.0;

fn main() {
    let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    for y in 0..10 {
        for x in 0..10 {
            let x0 = f64::from(x) * CELL;
            let y0 = f64::from(y) * CELL;
            tree.insert(KRect::new(x0 + 1.0, y0 + 1.0, x0 + CELL - 1.0, y0 + CELL - 1.0))
                .expect("finite bounds");
        }
    }

    let region = Rect::new(5.0, 5.0, 35.0, 25.0);
    let window = tree.query(region, SelectMode::Contains).count();
    let crossing = tree.query(region, SelectMode::Intersects).count();
    println!("region {region:?}: window selects {window}, crossing selects {crossing}");

    let removed = tree.remove_in(region, SelectMode::Intersects);
    println!(
        "removed {} cells by crossing; {} remain in {} nodes",
        removed.len(),
        tree.len(),
        tree.node_count()
    );
}
