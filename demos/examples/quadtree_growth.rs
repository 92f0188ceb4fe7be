// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Root growth: inserting outside the bound doubles the root toward the entity.
//!
//! Run with growth steps logged:
//! - `cargo run -p understory_quadtree_demos --example quadtree_growth`

use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use understory_quadtree::{QuadTree, QuadTreeConfig, Rect};

fn main() {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("logger already set");

    let config = QuadTreeConfig::default().with_max_depth(8);
    let mut tree = QuadTree::with_config(Rect::new(0.0, 0.0, 10.0, 10.0), config);

    let mut extent = tree.bound();
    for r in [
        kurbo::Rect::new(1.0, 1.0, 2.0, 2.0),
        kurbo::Rect::new(35.0, 3.0, 36.0, 4.0),
        kurbo::Rect::new(-70.0, -70.0, -60.0, -60.0),
        kurbo::Rect::new(500.0, 500.0, 501.0, 501.0),
    ] {
        tree.insert(r).expect("finite bounds");
        extent = extent.union(&r.into());
        log::info!(
            "inserted {r:?}: bound {:?}, depth {}, {} nodes",
            tree.bound(),
            tree.depth(),
            tree.node_count()
        );
    }

    assert!(tree.bound().contains(&extent));

    // Print the populated part of the structure.
    tree.for_each(|n| {
        if n.count_subtree() > 0 {
            let indent = "  ".repeat(n.depth() as usize);
            println!("{indent}{:?} holds {}", n.bound(), n.entities().count());
        }
        false
    });
}
