// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node arena and the recursive quadtree algorithms.
//!
//! Nodes live in a flat arena and refer to each other by `NodeIdx`. Child slots
//! are owning edges (a node is reachable from exactly one parent slot); the parent
//! handle is a plain back-reference used for upward walks. Nodes are never freed
//! individually, so handles stay valid until the arena is cleared.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::config::QuadTreeConfig;
use crate::entity::HasRect;
use crate::types::{FindMode, Quadrant, Quadrants, Rect, SelectMode};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

/// An entity together with its insertion sequence number.
#[derive(Clone, Debug)]
pub(crate) struct Stored<E> {
    pub(crate) seq: u64,
    pub(crate) entity: E,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<E> {
    pub(crate) bound: Rect,
    pub(crate) depth: u32,
    pub(crate) parent: Option<NodeIdx>,
    pub(crate) children: [Option<NodeIdx>; 4],
    pub(crate) entities: Vec<Stored<E>>,
    /// Entities stored here and in every descendant.
    pub(crate) count_subtree: usize,
}

impl<E> Node<E> {
    fn new(bound: Rect, parent: Option<NodeIdx>, depth: u32) -> Self {
        Self {
            bound,
            depth,
            parent,
            children: [None; 4],
            entities: Vec::new(),
            count_subtree: 0,
        }
    }

    fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }
}

pub(crate) struct Arena<E> {
    nodes: Vec<Node<E>>,
    config: QuadTreeConfig,
}

impl<E> Arena<E> {
    pub(crate) fn new(config: QuadTreeConfig) -> Self {
        Self {
            nodes: Vec::new(),
            config,
        }
    }

    pub(crate) fn config(&self) -> &QuadTreeConfig {
        &self.config
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    pub(crate) fn push(&mut self, bound: Rect, parent: Option<NodeIdx>, depth: u32) -> NodeIdx {
        let idx = NodeIdx::new(self.nodes.len());
        self.nodes.push(Node::new(bound, parent, depth));
        idx
    }

    pub(crate) fn get(&self, i: NodeIdx) -> &Node<E> {
        &self.nodes[i.get()]
    }

    /// Bound of quadrant `q` of node `at`: the child's own bound when it exists.
    fn child_bound(&self, at: NodeIdx, q: Quadrant) -> Rect {
        let n = &self.nodes[at.get()];
        match n.children[q.index()] {
            Some(c) => self.nodes[c.get()].bound,
            None => n.bound.quadrant(q),
        }
    }

    /// Quadrants of `at` whose bound fully contains `rect`.
    fn classify(&self, at: NodeIdx, rect: &Rect) -> Quadrants {
        let mut out = Quadrants::empty();
        for q in Quadrant::ALL {
            if self.child_bound(at, q).contains(rect) {
                out |= q.flag();
            }
        }
        out
    }

    fn can_split(&self, at: NodeIdx) -> bool {
        let n = &self.nodes[at.get()];
        n.depth < self.config.max_depth
            && n.bound.width() * 0.5 >= self.config.min_width
            && n.bound.height() * 0.5 >= self.config.min_height
    }

    fn child_or_create(&mut self, at: NodeIdx, q: Quadrant) -> NodeIdx {
        if let Some(c) = self.nodes[at.get()].children[q.index()] {
            return c;
        }
        let (bound, depth) = {
            let n = &self.nodes[at.get()];
            (n.bound.quadrant(q), n.depth + 1)
        };
        log::trace!("creating {q:?} child {bound:?} at depth {depth}");
        let c = self.push(bound, Some(at), depth);
        self.nodes[at.get()].children[q.index()] = Some(c);
        c
    }

    /// The existing child that `rect` alone falls into, if any.
    fn descend(&self, at: NodeIdx, rect: &Rect) -> Option<NodeIdx> {
        let q = self.classify(at, rect).single()?;
        self.nodes[at.get()].children[q.index()]
    }

    /// Deepest existing node whose single quadrant path contains `rect`.
    ///
    /// Falls back to `start` when `rect` is not inside it.
    pub(crate) fn locate(&self, start: NodeIdx, rect: &Rect) -> NodeIdx {
        let mut at = start;
        if !self.nodes[at.get()].bound.contains(rect) {
            return at;
        }
        while let Some(c) = self.descend(at, rect) {
            at = c;
        }
        at
    }

    fn add_to_counts(&mut self, from: NodeIdx, n: usize) {
        let mut cur = Some(from);
        while let Some(i) = cur {
            let node = &mut self.nodes[i.get()];
            node.count_subtree += n;
            cur = node.parent;
        }
    }

    fn sub_from_counts(&mut self, from: NodeIdx, n: usize) {
        let mut cur = Some(from);
        while let Some(i) = cur {
            let node = &mut self.nodes[i.get()];
            node.count_subtree -= n;
            cur = node.parent;
        }
    }

    /// Depth-first pre-order walk over the subtree at `start`.
    ///
    /// `f` returns `true` to stop; the return value reports whether it did.
    pub(crate) fn for_each<'a, F>(&'a self, start: NodeIdx, mut f: F) -> bool
    where
        F: FnMut(NodeIdx, &'a Node<E>) -> bool,
    {
        let mut stack = vec![start];
        while let Some(i) = stack.pop() {
            let n = &self.nodes[i.get()];
            if f(i, n) {
                return true;
            }
            stack.extend(n.children.iter().rev().flatten().copied());
        }
        false
    }

    /// Add `levels` to the depth of every node under `start`.
    fn deepen(&mut self, start: NodeIdx, levels: u32) {
        let mut ids = Vec::new();
        self.for_each(start, |i, _| {
            ids.push(i);
            false
        });
        for i in ids {
            self.nodes[i.get()].depth += levels;
        }
    }

    /// Attach `old_root` as the `q` child of `new_root`.
    pub(crate) fn graft(&mut self, new_root: NodeIdx, old_root: NodeIdx, q: Quadrant) {
        let count = self.nodes[old_root.get()].count_subtree;
        {
            let r = &mut self.nodes[new_root.get()];
            r.children[q.index()] = Some(old_root);
            r.count_subtree += count;
        }
        self.nodes[old_root.get()].parent = Some(new_root);
        let levels = self.nodes[new_root.get()].depth + 1 - self.nodes[old_root.get()].depth;
        self.deepen(old_root, levels);
    }

    fn slot_of(&self, parent: NodeIdx, child: NodeIdx) -> Option<Quadrant> {
        Quadrant::ALL
            .into_iter()
            .find(|q| self.nodes[parent.get()].children[q.index()] == Some(child))
    }

    /// Adjacent node of greater or equal size in direction `dir`.
    ///
    /// Only existing nodes are returned; a missing sibling slot yields `None`.
    fn neighbor(&self, at: NodeIdx, dir: FindMode) -> Option<NodeIdx> {
        let parent = self.nodes[at.get()].parent?;
        let q = self.slot_of(parent, at)?;
        let sibling = match dir {
            FindMode::Top if !q.is_top() => Some(q.flip_vertical()),
            FindMode::Bottom if q.is_top() => Some(q.flip_vertical()),
            FindMode::Left if !q.is_left() => Some(q.flip_horizontal()),
            FindMode::Right if q.is_left() => Some(q.flip_horizontal()),
            _ => None,
        };
        if let Some(s) = sibling {
            return self.nodes[parent.get()].children[s.index()];
        }
        let m = self.neighbor(parent, dir)?;
        let facing = match dir {
            FindMode::Top | FindMode::Bottom => q.flip_vertical(),
            FindMode::Left | FindMode::Right => q.flip_horizontal(),
        };
        Some(self.nodes[m.get()].children[facing.index()].unwrap_or(m))
    }
}

impl<E: HasRect> Arena<E> {
    /// Place `entity` at the deepest node under `start` whose single quadrant contains it.
    ///
    /// Hands the entity back if `start` does not contain it.
    pub(crate) fn insert(&mut self, start: NodeIdx, seq: u64, entity: E) -> Result<NodeIdx, E> {
        let rect = entity.rect();
        if !self.nodes[start.get()].bound.contains(&rect) {
            return Err(entity);
        }
        let mut at = start;
        while let Some(q) = self.classify(at, &rect).single() {
            at = match self.nodes[at.get()].children[q.index()] {
                Some(c) => c,
                None if self.can_split(at) => self.child_or_create(at, q),
                None => break,
            };
        }
        self.nodes[at.get()].entities.push(Stored { seq, entity });
        self.add_to_counts(at, 1);
        Ok(at)
    }

    pub(crate) fn query<'a>(
        &'a self,
        start: NodeIdx,
        rect: &Rect,
        mode: SelectMode,
        out: &mut Vec<&'a E>,
    ) {
        let mut stack = vec![start];
        while let Some(i) = stack.pop() {
            let n = &self.nodes[i.get()];
            if !n.bound.intersects(rect) {
                continue;
            }
            out.extend(
                n.entities
                    .iter()
                    .filter(|s| mode.matches(rect, &s.entity.rect()))
                    .map(|s| &s.entity),
            );
            stack.extend(n.children.iter().rev().flatten().copied());
        }
    }

    /// Remove every entity selected by `rect` under `mode`.
    pub(crate) fn remove_in(&mut self, start: NodeIdx, rect: &Rect, mode: SelectMode) -> Vec<E> {
        let mut hits = Vec::new();
        self.for_each(start, |i, n| {
            if n.bound.intersects(rect) {
                hits.push(i);
            }
            false
        });
        let mut removed = Vec::new();
        for i in hits {
            let bucket = core::mem::take(&mut self.nodes[i.get()].entities);
            let (gone, kept): (Vec<_>, Vec<_>) = bucket
                .into_iter()
                .partition(|s| mode.matches(rect, &s.entity.rect()));
            self.nodes[i.get()].entities = kept;
            if !gone.is_empty() {
                self.sub_from_counts(i, gone.len());
                removed.extend(gone.into_iter().map(|s| s.entity));
            }
        }
        removed
    }

    /// Find the closest entity to `rect` by center distance.
    ///
    /// Ties go to the entity inserted first.
    pub(crate) fn find_near<'a>(&'a self, root: NodeIdx, rect: &Rect) -> Option<&'a E> {
        let mut best: Option<(f64, u64, &'a E)> = None;
        let consider = |s: &'a Stored<E>, best: &mut Option<(f64, u64, &'a E)>| {
            let d = s.entity.rect().center_distance_sq(rect);
            if best.is_none_or(|(bd, bs, _)| d < bd || (d == bd && s.seq < bs)) {
                *best = Some((d, s.seq, &s.entity));
            }
        };

        // Widen from the tightest node until something turns up.
        let mut at = self.locate(root, rect);
        loop {
            self.for_each(at, |_, n| {
                for s in &n.entities {
                    consider(s, &mut best);
                }
                false
            });
            if best.is_some() {
                break;
            }
            at = self.nodes[at.get()].parent?;
        }

        // Any closer center lies in the square around the query center whose
        // half-size bounds the current best distance.
        let (_, _, found) = best?;
        let (cx, cy) = rect.center();
        let (fx, fy) = found.rect().center();
        let reach = abs(fx - cx) + abs(fy - cy);
        let window = Rect::from_point(cx, cy).inflate(reach, reach);
        let mut stack = vec![root];
        while let Some(i) = stack.pop() {
            let n = &self.nodes[i.get()];
            if !n.bound.intersects(&window) {
                continue;
            }
            for s in &n.entities {
                if s.entity.rect().intersects(&window) {
                    consider(s, &mut best);
                }
            }
            stack.extend(n.children.iter().rev().flatten().copied());
        }
        best.map(|(_, _, e)| e)
    }

    /// First entity, depth-first, in the node adjacent to `rect`'s node in direction `dir`.
    pub(crate) fn find_neighbor<'a>(
        &'a self,
        root: NodeIdx,
        rect: &Rect,
        dir: FindMode,
    ) -> Option<&'a E> {
        let at = self.locate(root, rect);
        let n = self.neighbor(at, dir)?;
        let mut found = None;
        self.for_each(n, |_, node| {
            found = node.entities.first().map(|s| &s.entity);
            found.is_some()
        });
        found
    }
}

impl<E: HasRect + PartialEq> Arena<E> {
    /// Remove the first stored entity equal to `entity`, searching its insertion path.
    pub(crate) fn remove_entity(&mut self, root: NodeIdx, entity: &E) -> Option<E> {
        let rect = entity.rect();
        if !self.nodes[root.get()].bound.contains(&rect) {
            return None;
        }
        let mut cur = Some(root);
        while let Some(at) = cur {
            let bucket = &mut self.nodes[at.get()].entities;
            if let Some(pos) = bucket.iter().position(|s| s.entity == *entity) {
                let s = bucket.remove(pos);
                self.sub_from_counts(at, 1);
                return Some(s.entity);
            }
            cur = self.descend(at, &rect);
        }
        None
    }
}

impl<E> Debug for Arena<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let leaves = self.nodes.iter().filter(|n| n.is_leaf()).count();
        f.debug_struct("Arena")
            .field("nodes", &self.nodes.len())
            .field("leaves", &leaves)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Read-only view of a node, handed to [`QuadTree::for_each`](crate::QuadTree::for_each).
pub struct NodeRef<'a, E> {
    arena: &'a Arena<E>,
    idx: NodeIdx,
}

impl<'a, E> NodeRef<'a, E> {
    pub(crate) fn new(arena: &'a Arena<E>, idx: NodeIdx) -> Self {
        Self { arena, idx }
    }

    fn node(&self) -> &'a Node<E> {
        self.arena.get(self.idx)
    }

    /// Spatial extent of the node.
    pub fn bound(&self) -> Rect {
        self.node().bound
    }

    /// Distance from the current root (the root has depth 0).
    pub fn depth(&self) -> u32 {
        self.node().depth
    }

    /// Entities stored directly in this node, in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &'a E> + 'a {
        self.node().entities.iter().map(|s| &s.entity)
    }

    /// Number of entities in this node and all of its descendants.
    pub fn count_subtree(&self) -> usize {
        self.node().count_subtree
    }

    /// True if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    /// The parent node, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.map(|p| Self::new(self.arena, p))
    }

    /// The child covering quadrant `q`, if it has been created.
    pub fn child(&self, q: Quadrant) -> Option<Self> {
        self.node().children[q.index()].map(|c| Self::new(self.arena, c))
    }
}

impl<E> Clone for NodeRef<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for NodeRef<'_, E> {}

impl<E> Debug for NodeRef<'_, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let n = self.node();
        f.debug_struct("NodeRef")
            .field("bound", &n.bound)
            .field("depth", &n.depth)
            .field("entities", &n.entities.len())
            .field("count_subtree", &n.count_subtree)
            .finish_non_exhaustive()
    }
}

#[inline]
fn abs(v: f64) -> f64 {
    if v < 0.0 { -v } else { v }
}
