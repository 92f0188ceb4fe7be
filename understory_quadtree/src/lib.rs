// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quadtree --heading-base-level=0

//! Understory Quadtree: a growing-root 2D quadtree for rectangle selection.
//!
//! Understory Quadtree indexes entities by their axis-aligned bounds without
//! needing the world extent up front.
//!
//! - Insert entities one at a time or in batches; the root doubles toward anything
//!   that falls outside it, keeping the existing structure as one of its quadrants.
//! - Query or remove by region with CAD-style selection: window ([`SelectMode::Contains`])
//!   or crossing ([`SelectMode::Intersects`]).
//! - Find the entity nearest to a rectangle, remove a specific entity, and walk every
//!   node with early exit.
//!
//! Entities implement [`HasRect`]. Each entity lives in exactly one node: the deepest
//! one whose single quadrant fully contains it. Anything that straddles a split line
//! stays in the parent, so there are no overlapping volumes and no duplicates.
//!
//! # Example
//!
//! ```rust
//! use understory_quadtree::{QuadTree, Rect, SelectMode};
//!
//! let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0));
//! tree.insert(Rect::new(10.0, 10.0, 20.0, 20.0)).unwrap();
//! tree.insert(Rect::new(60.0, 60.0, 70.0, 70.0)).unwrap();
//!
//! // Far outside the initial bound: the root grows to fit.
//! tree.insert(Rect::new(1000.0, 1000.0, 1001.0, 1001.0)).unwrap();
//! assert_eq!(tree.len(), 3);
//!
//! // Window selection only returns entities fully inside the region.
//! let window: Vec<_> = tree
//!     .query(Rect::new(0.0, 0.0, 50.0, 50.0), SelectMode::Contains)
//!     .collect();
//! assert_eq!(window, [&Rect::new(10.0, 10.0, 20.0, 20.0)]);
//!
//! // Crossing selection also picks up anything that touches it.
//! let crossing = tree
//!     .query(Rect::new(0.0, 0.0, 60.0, 60.0), SelectMode::Intersects)
//!     .count();
//! assert_eq!(crossing, 2);
//! ```
//!
//! Custom entities carry their own bounds and decide whether they are points.
//! Batch insertion places points last so they do not drive subdivision:
//!
//! ```rust
//! use understory_quadtree::{HasRect, QuadTree, Rect};
//!
//! #[derive(Debug, PartialEq)]
//! struct Marker {
//!     id: u32,
//!     x: f64,
//!     y: f64,
//! }
//!
//! impl HasRect for Marker {
//!     fn rect(&self) -> Rect {
//!         Rect::from_point(self.x, self.y)
//!     }
//! }
//!
//! let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 64.0, 64.0));
//! tree.insert_batch([
//!     Marker { id: 1, x: 4.0, y: 4.0 },
//!     Marker { id: 2, x: 40.0, y: 40.0 },
//! ])
//! .unwrap();
//!
//! let near = tree.find_near_entity(Rect::from_point(36.0, 38.0)).unwrap();
//! assert_eq!(near.id, 2);
//!
//! let removed = tree.remove(&Marker { id: 1, x: 4.0, y: 4.0 });
//! assert!(removed.is_some());
//! assert_eq!(tree.len(), 1);
//! ```
//!
//! ## Tuning
//!
//! Subdivision stops at [`QuadTreeConfig::max_depth`] or when a quadrant would be
//! smaller than [`QuadTreeConfig::min_width`] × [`QuadTreeConfig::min_height`].
//! Nodes are created lazily and never merged, so removals leave empty nodes behind;
//! [`QuadTree::clear`] resets the structure.
//!
//! ### Float semantics
//!
//! Entity bounds with NaN or infinite coordinates are rejected on insert.
//! The y axis points up: "top" is `max_y`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod entity;
pub mod error;
mod node;
pub mod tree;
pub mod types;

pub use config::QuadTreeConfig;
pub use entity::HasRect;
pub use error::QuadTreeError;
pub use node::NodeRef;
pub use tree::QuadTree;
pub use types::{FindMode, Quadrant, Quadrants, Rect, SelectMode};
