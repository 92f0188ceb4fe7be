// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Subdivision limits for a [`QuadTree`](crate::QuadTree).

/// Limits that stop a node from splitting further.
///
/// An entity that would otherwise descend into a quadrant stays in the current node
/// once one of these limits is reached.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadTreeConfig {
    /// Quadrants narrower than this are never created.
    pub min_width: f64,
    /// Quadrants shorter than this are never created.
    pub min_height: f64,
    /// Nodes at this depth keep entities locally.
    ///
    /// Depth is measured from the current root, so growing the root pushes existing
    /// nodes deeper; children that already exist are still used.
    pub max_depth: u32,
    /// Relative tolerance used when linking the old root into a grown root.
    pub tolerance: f64,
}

impl QuadTreeConfig {
    /// Default limits: no size floor, depth 24, tolerance `1e-9`.
    pub const DEFAULT: Self = Self {
        min_width: 0.0,
        min_height: 0.0,
        max_depth: 24,
        tolerance: 1e-9,
    };

    /// Set the minimum quadrant size.
    pub const fn with_min_size(mut self, min_width: f64, min_height: f64) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    /// Set the maximum node depth.
    pub const fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the relative tolerance for root growth.
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
