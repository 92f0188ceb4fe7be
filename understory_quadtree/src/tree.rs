// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `QuadTree` API: the growing root and delegation to the node arena.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::config::QuadTreeConfig;
use crate::entity::HasRect;
use crate::error::QuadTreeError;
use crate::node::{Arena, NodeIdx, NodeRef};
use crate::types::{FindMode, Quadrant, Rect, SelectMode};

/// Direction the root grows in, named after where the new space is added.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Growth {
    UpRight,
    UpLeft,
    DownRight,
    DownLeft,
}

/// A quadtree whose root bound grows to fit whatever is inserted.
///
/// Every entity is stored in exactly one node: the deepest one whose single quadrant
/// fully contains its bounds. When an entity falls outside the root, the root is
/// doubled toward it (repeatedly if needed) with the old root becoming one quadrant
/// of the new one.
pub struct QuadTree<E> {
    arena: Arena<E>,
    root: NodeIdx,
    next_seq: u64,
}

impl<E> Debug for QuadTree<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let root = self.arena.get(self.root);
        f.debug_struct("QuadTree")
            .field("bound", &root.bound)
            .field("len", &root.count_subtree)
            .field("arena", &self.arena)
            .finish_non_exhaustive()
    }
}

impl<E> QuadTree<E> {
    /// Create an empty tree over `bound` with default limits.
    ///
    /// A zero width or height is widened to one unit so the root can grow.
    pub fn new(bound: Rect) -> Self {
        Self::with_config(bound, QuadTreeConfig::default())
    }

    /// Create an empty tree over `bound` with explicit subdivision limits.
    ///
    /// [`QuadTreeConfig::max_depth`] counts from the current root. Each growth step
    /// pushes the existing nodes one level deeper, so after enough doublings the
    /// original region sits at or past the limit: its existing children are still
    /// used, but no new ones are created there and further entities stay in the
    /// deepest existing node. Seed the tree with a bound close to the final extent
    /// or raise `max_depth` when inserts can land far away.
    pub fn with_config(bound: Rect, config: QuadTreeConfig) -> Self {
        let mut arena = Arena::new(config);
        let root = arena.push(widen_degenerate(bound), None, 0);
        Self {
            arena,
            root,
            next_seq: 0,
        }
    }

    /// Current root bound.
    pub fn bound(&self) -> Rect {
        self.arena.get(self.root).bound
    }

    /// Number of stored entities.
    pub fn len(&self) -> usize {
        self.arena.get(self.root).count_subtree
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes, including empty ones kept after removals.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Depth of the deepest node (0 for a lone root).
    pub fn depth(&self) -> u32 {
        let mut deepest = 0;
        self.arena.for_each(self.root, |_, n| {
            deepest = deepest.max(n.depth);
            false
        });
        deepest
    }

    /// Subdivision limits in effect.
    pub fn config(&self) -> &QuadTreeConfig {
        self.arena.config()
    }

    /// Drop every entity and node, keeping the current root bound.
    pub fn clear(&mut self) {
        let bound = self.bound();
        self.arena.clear();
        self.root = self.arena.push(bound, None, 0);
    }

    /// Visit every node depth-first, parents before children.
    ///
    /// Return `true` from `action` to stop early. Returns whether traversal was stopped.
    pub fn for_each<F>(&self, mut action: F) -> bool
    where
        F: FnMut(NodeRef<'_, E>) -> bool,
    {
        self.arena
            .for_each(self.root, |i, _| action(NodeRef::new(&self.arena, i)))
    }

    /// All stored entities, depth-first by node.
    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        let mut out = Vec::with_capacity(self.len());
        self.arena.for_each(self.root, |_, n| {
            out.extend(n.entities.iter().map(|s| &s.entity));
            false
        });
        out.into_iter()
    }
}

impl<E: HasRect> QuadTree<E> {
    /// Insert an entity, growing the root until it fits.
    ///
    /// On error the tree is unchanged.
    pub fn insert(&mut self, entity: E) -> Result<(), QuadTreeError> {
        let rect = entity.rect();
        if !rect.is_finite() {
            return Err(QuadTreeError::NonFiniteRect { rect });
        }
        while !self.bound().contains(&rect) {
            self.grow_towards(&rect)?;
        }
        let seq = self.next_seq;
        match self.arena.insert(self.root, seq, entity) {
            Ok(at) => {
                self.next_seq += 1;
                log::trace!("stored {rect:?} at depth {}", self.arena.get(at).depth);
                Ok(())
            }
            Err(_) => Err(QuadTreeError::OutsideRoot {
                root: self.bound(),
                rect,
            }),
        }
    }

    /// Insert many entities, area-bearing ones first and points last.
    ///
    /// Relative order is kept within each group. Stops at the first error; entities
    /// inserted before it stay in the tree.
    pub fn insert_batch<I>(&mut self, entities: I) -> Result<(), QuadTreeError>
    where
        I: IntoIterator<Item = E>,
    {
        let mut points = Vec::new();
        for e in entities {
            if e.is_point() {
                points.push(e);
            } else {
                self.insert(e)?;
            }
        }
        for p in points {
            self.insert(p)?;
        }
        Ok(())
    }

    /// Entities selected by `rect` under `mode`.
    ///
    /// A region outside the tree yields nothing.
    pub fn query(&self, rect: Rect, mode: SelectMode) -> impl Iterator<Item = &E> + '_ {
        let mut out = Vec::new();
        self.arena.query(self.root, &rect, mode, &mut out);
        out.into_iter()
    }

    /// Remove and return every entity selected by `rect` under `mode`.
    pub fn remove_in(&mut self, rect: Rect, mode: SelectMode) -> Vec<E> {
        self.arena.remove_in(self.root, &rect, mode)
    }

    /// The entity whose center is closest to the center of `rect`.
    ///
    /// Ties go to the entity inserted first. Returns `None` only for an empty tree.
    pub fn find_near_entity(&self, rect: Rect) -> Option<&E> {
        self.arena.find_near(self.root, &rect)
    }

    /// An entity from the node adjacent to `rect` in direction `mode`.
    ///
    /// This only looks at tree structure: the result is near `rect` but generally
    /// not the nearest, and it is `None` whenever the adjacent quadrant was never
    /// created.
    #[deprecated(note = "structural neighbor, not the nearest entity; use `find_near_entity`")]
    pub fn find_neighbor(&self, rect: Rect, mode: FindMode) -> Option<&E> {
        self.arena.find_neighbor(self.root, &rect, mode)
    }

    fn grow_towards(&mut self, rect: &Rect) -> Result<(), QuadTreeError> {
        let old = self.bound();
        let (w, h) = (old.width(), old.height());
        let growth = match (rect.min_y >= old.min_y, rect.min_x >= old.min_x) {
            (true, true) => Growth::UpRight,
            (true, false) => Growth::UpLeft,
            (false, true) => Growth::DownRight,
            (false, false) => Growth::DownLeft,
        };
        let candidate = match growth {
            Growth::UpRight => Rect::new(old.min_x, old.min_y, old.max_x + w, old.max_y + h),
            Growth::UpLeft => Rect::new(old.min_x - w, old.min_y, old.max_x, old.max_y + h),
            Growth::DownRight => Rect::new(old.min_x, old.min_y - h, old.max_x + w, old.max_y),
            Growth::DownLeft => Rect::new(old.min_x - w, old.min_y - h, old.max_x, old.max_y),
        };

        let eps = self.config().tolerance * w.max(h);
        let Some(slot) = Quadrant::ALL
            .into_iter()
            .find(|q| candidate.quadrant(*q).approx_eq(&old, eps))
        else {
            log::warn!("cannot link root {old:?} into grown root {candidate:?}");
            return Err(QuadTreeError::InvalidTopology {
                root: old,
                candidate,
            });
        };

        log::debug!("growing root {growth:?}: {old:?} -> {candidate:?}");
        let new_root = self.arena.push(candidate, None, 0);
        self.arena.graft(new_root, self.root, slot);
        self.root = new_root;
        Ok(())
    }
}

impl<E: HasRect + PartialEq> QuadTree<E> {
    /// Remove one stored entity equal to `entity` and return it.
    ///
    /// Looks along the path the entity's current bounds lead to, so an entity
    /// whose geometry changed since insertion is not found.
    pub fn remove(&mut self, entity: &E) -> Option<E> {
        self.arena.remove_entity(self.root, entity)
    }
}

fn widen_degenerate(mut bound: Rect) -> Rect {
    if bound.width() <= 0.0 {
        bound.max_x = bound.min_x + 1.0;
    }
    if bound.height() <= 0.0 {
        bound.max_y = bound.min_y + 1.0;
    }
    bound
}
