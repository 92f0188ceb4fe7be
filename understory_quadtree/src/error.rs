// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by fallible [`QuadTree`](crate::QuadTree) operations.

use crate::types::Rect;

/// Failure while inserting into a [`QuadTree`](crate::QuadTree).
///
/// Queries and removals never fail: a region outside the tree yields an empty result.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum QuadTreeError {
    /// Growing the root could not place the old root into a quadrant of the new one.
    ///
    /// The insert is aborted and the tree is left as it was before the call.
    #[error("cannot link root {root:?} into a quadrant of grown root {candidate:?}")]
    InvalidTopology {
        /// Bound of the root that was being re-parented.
        root: Rect,
        /// Bound of the rejected replacement root.
        candidate: Rect,
    },
    /// The root still did not contain the entity after growing.
    #[error("root {root:?} does not contain entity bounds {rect:?}")]
    OutsideRoot {
        /// Bound of the root at the time of the insert.
        root: Rect,
        /// The entity's bounds.
        rect: Rect,
    },
    /// The entity's bounds contain NaN or infinite coordinates, so no finite root can hold it.
    #[error("entity bounds {rect:?} are not finite")]
    NonFiniteRect {
        /// The offending bounds.
        rect: Rect,
    },
}
