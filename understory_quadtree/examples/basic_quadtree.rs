// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory Quadtree: insert, grow, select, and remove.

use understory_quadtree::{QuadTree, Rect, SelectMode};

fn main() {
    let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    tree.insert(Rect::new(10.0, 10.0, 20.0, 20.0)).unwrap();
    tree.insert(Rect::new(60.0, 60.0, 70.0, 70.0)).unwrap();

    // Outside the initial bound; the root doubles until it fits.
    tree.insert(Rect::new(-250.0, 40.0, -240.0, 50.0)).unwrap();
    println!("bound after growth: {:?}", tree.bound());

    let window: Vec<_> = tree
        .query(Rect::new(0.0, 0.0, 50.0, 50.0), SelectMode::Contains)
        .collect();
    println!("window (0,0)-(50,50): {window:?}");

    let removed = tree.remove_in(Rect::new(55.0, 55.0, 65.0, 65.0), SelectMode::Intersects);
    println!("removed by crossing: {removed:?}, {} left", tree.len());
}
