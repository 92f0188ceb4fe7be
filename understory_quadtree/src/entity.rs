// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability trait for values stored in a [`QuadTree`](crate::QuadTree).

use crate::types::Rect;

/// A value with an axis-aligned bounding rectangle.
///
/// The tree reads the rectangle when an entity is inserted, queried, or removed
/// and never caches anything derived from it besides the node it was placed in.
/// If the geometry changes while the entity is stored, the tree goes stale:
/// remove the entity first, then insert it again with its new bounds.
pub trait HasRect {
    /// World-space bounds of the entity.
    fn rect(&self) -> Rect;

    /// Whether the entity is dimensionless.
    ///
    /// Point entities are placed after area-bearing ones by
    /// [`QuadTree::insert_batch`](crate::QuadTree::insert_batch) so they do not drive subdivision.
    /// The default treats any zero-area rectangle as a point.
    fn is_point(&self) -> bool {
        self.rect().is_point()
    }
}

impl HasRect for Rect {
    #[inline]
    fn rect(&self) -> Rect {
        *self
    }
}

impl HasRect for kurbo::Rect {
    #[inline]
    fn rect(&self) -> Rect {
        (*self).into()
    }
}

impl HasRect for kurbo::Point {
    #[inline]
    fn rect(&self) -> Rect {
        (*self).into()
    }

    fn is_point(&self) -> bool {
        true
    }
}

impl<E: HasRect + ?Sized> HasRect for &E {
    #[inline]
    fn rect(&self) -> Rect {
        (**self).rect()
    }

    #[inline]
    fn is_point(&self) -> bool {
        (**self).is_point()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kurbo_point_is_always_a_point() {
        let p = kurbo::Point::new(3.0, 4.0);
        assert!(p.is_point());
        assert_eq!(p.rect(), Rect::from_point(3.0, 4.0));
    }

    #[test]
    fn zero_area_rect_defaults_to_point() {
        assert!(Rect::new(1.0, 1.0, 5.0, 1.0).is_point());
        assert!(!Rect::new(1.0, 1.0, 5.0, 2.0).is_point());
        assert!(kurbo::Rect::new(0.0, 0.0, 0.0, 0.0).is_point());
    }
}
