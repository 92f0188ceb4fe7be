// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic quadtree usage with custom entities and batch insertion.
//!
//! Run:
//! - `cargo run -p understory_quadtree_demos --example quadtree_basics`

use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use understory_quadtree::{HasRect, QuadTree, Rect, SelectMode};

#[derive(Clone, Debug, PartialEq)]
struct Shape {
    name: &'static str,
    bounds: Rect,
    point: bool,
}

impl HasRect for Shape {
    fn rect(&self) -> Rect {
        self.bounds
    }

    fn is_point(&self) -> bool {
        self.point
    }
}

fn main() {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("logger already set");

    let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    let shapes = [
        Shape {
            name: "A",
            bounds: Rect::new(10.0, 10.0, 20.0, 20.0),
            point: false,
        },
        Shape {
            name: "B",
            bounds: Rect::new(60.0, 60.0, 70.0, 70.0),
            point: false,
        },
        Shape {
            name: "C",
            bounds: Rect::new(15.0, 15.0, 16.0, 16.0),
            point: true,
        },
    ];
    tree.insert_batch(shapes.iter().cloned())
        .expect("finite bounds");
    log::info!("{} shapes in {:?}", tree.len(), tree.bound());

    let window: Vec<_> = tree
        .query(Rect::new(0.0, 0.0, 50.0, 50.0), SelectMode::Contains)
        .map(|s| s.name)
        .collect();
    log::info!("window (0,0)-(50,50): {window:?}");

    let crossing: Vec<_> = tree
        .query(Rect::new(55.0, 55.0, 75.0, 75.0), SelectMode::Intersects)
        .map(|s| s.name)
        .collect();
    log::info!("crossing (55,55)-(75,75): {crossing:?}");

    if let Some(removed) = tree.remove(&shapes[0]) {
        log::info!("removed {}, {} left", removed.name, tree.len());
    }
}
