// Copyright 2025 the Flourish Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, layout, world updates, queries.

use alloc::vec::Vec;
use kurbo::{Affine, Point, Rect, Size};

use crate::damage::Damage;
use crate::types::{Arrangement, LocalNode, NodeFlags, NodeId, Sizing};

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// A retained tree of sized, rotatable nodes.
pub struct Scene {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    removed: Vec<Rect>, // painted bounds of nodes removed since the last commit
    epoch: u64,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Scene")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

/// Results of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched node.
    pub node: NodeId,
    /// Path from root to node (inclusive).
    pub path: Vec<NodeId>,
    /// The hit point in the node's own coordinates.
    pub local: Point,
}

/// Filters applied during hit testing.
///
/// Used by [`Scene::hit_test_point`].
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryFilter {
    /// If true, only consider nodes that are visible, including all of their ancestors.
    pub visible_only: bool,
    /// If true, only consider nodes marked [`NodeFlags::PICKABLE`].
    pub pickable_only: bool,
}

#[derive(Clone, Debug, Default)]
struct WorldNode {
    world_transform: Affine,
    world_bounds: Rect, // AABB of the transformed layout box
    visible: bool,      // own VISIBLE flag and every ancestor's
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
    layout: Option<Rect>, // assigned by the last layout pass that reached this node
    world: WorldNode,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            layout: None,
            world: WorldNode::default(),
        }
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            removed: Vec::new(),
            epoch: 0,
        }
    }

    /// Insert a new node as a child of `parent` (or as a root if `None`).
    ///
    /// The node has no layout box until the next [`layout`](Self::layout) pass.
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent.filter(|p| self.is_alive(*p)) {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a node (and its subtree) from the scene.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        let (visible, bounds) = {
            let world = &self.node(id).world;
            (world.visible, world.world_bounds)
        };
        if visible && !bounds.is_zero_area() {
            self.removed.push(bounds);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Reparent `id` under `new_parent`, appending it after the existing children.
    ///
    /// The layout box is cleared; it is assigned again by the next layout pass.
    /// Moving a node under itself or one of its descendants is ignored.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id)
            || new_parent.is_some_and(|p| !self.is_alive(p) || self.is_ancestor_or_self(id, p))
        {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
        self.clear_layout(id);
    }

    /// Update the size request.
    pub fn set_sizing(&mut self, id: NodeId, sizing: Sizing) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.sizing = sizing;
        }
    }

    /// Update how children are placed.
    pub fn set_arrangement(&mut self, id: NodeId, arrangement: Arrangement) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.arrangement = arrangement;
        }
    }

    /// Update the rotation pivot (node coordinates).
    pub fn set_pivot(&mut self, id: NodeId, pivot: Point) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.pivot = pivot;
        }
    }

    /// Update the rotation in degrees.
    pub fn set_rotation(&mut self, id: NodeId, degrees: f64) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.rotation = degrees;
        }
    }

    /// Update z index.
    pub fn set_z_index(&mut self, id: NodeId, z: i32) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.z_index = z;
        }
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// See [`NodeId`] docs for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Local properties of a live node.
    pub fn local(&self, id: NodeId) -> Option<&LocalNode> {
        self.node_opt(id).map(|n| &n.local)
    }

    /// Parent of a live node, `None` for roots and stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Children of a live node in insertion order.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Layout box in parent coordinates, once a layout pass has reached the node.
    pub fn laid_out_bounds(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id).and_then(|n| n.layout)
    }

    /// World-space AABB as of the last [`commit`](Self::commit).
    pub fn world_bounds(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id).map(|n| n.world.world_bounds)
    }

    /// World transform as of the last [`commit`](Self::commit).
    pub fn world_transform(&self, id: NodeId) -> Option<Affine> {
        self.node_opt(id).map(|n| n.world.world_transform)
    }

    /// Whether the node and all of its ancestors were visible at the last commit.
    pub fn is_painted(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(|n| n.world.visible)
    }

    /// Returns the z-index of a node if the identifier is live.
    pub fn z_index(&self, id: NodeId) -> Option<i32> {
        self.node_opt(id).map(|n| n.local.z_index)
    }

    /// Assign layout boxes to every node reachable from a root.
    ///
    /// Roots sized [`Sizing::Fill`] have nothing to fill and get an empty box.
    pub fn layout(&mut self) {
        for root in self.roots() {
            let size = match self.node(root).local.sizing {
                Sizing::Fixed(size) => size,
                Sizing::Fill => Size::ZERO,
            };
            self.node_mut(root).layout = Some(Rect::from_origin_size(Point::ZERO, size));
            self.layout_children(root, size);
        }
    }

    /// Recompute world transforms and visibility and return coarse damage.
    pub fn commit(&mut self) -> Damage {
        self.epoch = self.epoch.wrapping_add(1);
        let mut damage = Damage {
            dirty_rects: core::mem::take(&mut self.removed),
        };
        for root in self.roots() {
            self.update_world_recursive(root, Affine::IDENTITY, true, &mut damage);
        }
        damage
    }

    /// Hit test a world-space point. Returns the topmost node.
    ///
    /// The point is mapped into each candidate's own coordinates, so rotated
    /// nodes are matched precisely rather than by their AABB.
    /// If multiple nodes overlap with the same `z_index`, the newer [`NodeId`] wins.
    pub fn hit_test_point(&self, pt: Point, filter: QueryFilter) -> Option<Hit> {
        let mut best: Option<(NodeId, i32, Point)> = None;
        for (i, slot) in self.nodes.iter().enumerate() {
            let Some(node) = slot.as_ref() else {
                continue;
            };
            if filter.visible_only && !node.world.visible {
                continue;
            }
            if filter.pickable_only && !node.local.flags.contains(NodeFlags::PICKABLE) {
                continue;
            }
            let Some(layout) = node.layout else {
                continue;
            };
            let local = node.world.world_transform.inverse() * pt;
            if !Rect::from_origin_size(Point::ZERO, layout.size()).contains(local) {
                continue;
            }
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            let id = NodeId::new(i as u32, node.generation);
            let z = node.local.z_index;
            let replace = match best {
                None => true,
                Some((best_id, z_best, _)) => {
                    z > z_best || (z == z_best && id.is_newer_than(best_id))
                }
            };
            if replace {
                best = Some((id, z, local));
            }
        }
        best.map(|(node, _, local)| Hit {
            node,
            path: self.path_to_root(node),
            local,
        })
    }

    // --- internals ---

    fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| match n {
                Some(n) if n.parent.is_none() =>
                {
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "NodeId uses 32-bit indices by design."
                    )]
                    Some(NodeId::new(i as u32, n.generation))
                }
                _ => None,
            })
            .collect()
    }

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    /// Whether `ancestor` is `node` or lies on its parent chain.
    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.parent_of(n);
        }
        false
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        let parent_node = self.node_mut(parent);
        parent_node.children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    fn clear_layout(&mut self, id: NodeId) {
        let children = {
            let n = self.node_mut(id);
            n.layout = None;
            n.children.clone()
        };
        for c in children {
            self.clear_layout(c);
        }
    }

    fn path_to_root(&self, mut id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        loop {
            out.push(id);
            match self.node(id).parent {
                Some(p) => id = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    fn layout_children(&mut self, id: NodeId, size: Size) {
        let (arrangement, children) = {
            let n = self.node(id);
            (n.local.arrangement, n.children.clone())
        };
        let mut cursor_y = 0.0;
        for child in children {
            let child_size = match (self.node(child).local.sizing, arrangement) {
                (Sizing::Fixed(s), _) => s,
                (Sizing::Fill, Arrangement::Overlay) => size,
                (Sizing::Fill, Arrangement::Column) => {
                    Size::new(size.width, (size.height - cursor_y).max(0.0))
                }
            };
            let origin = match arrangement {
                Arrangement::Overlay => Point::ZERO,
                Arrangement::Column => Point::new(0.0, cursor_y),
            };
            if arrangement == Arrangement::Column {
                cursor_y += child_size.height;
            }
            self.node_mut(child).layout = Some(Rect::from_origin_size(origin, child_size));
            self.layout_children(child, child_size);
        }
    }

    fn update_world_recursive(
        &mut self,
        id: NodeId,
        parent_tf: Affine,
        parent_visible: bool,
        damage: &mut Damage,
    ) {
        let (old, world, child_ids) = {
            let node = self.node_mut(id);
            let old = node.world.clone();
            let layout = node.layout.unwrap_or(Rect::ZERO);
            let local_tf = Affine::translate(layout.origin().to_vec2())
                * Affine::rotate_about(node.local.rotation.to_radians(), node.local.pivot);
            node.world.world_transform = parent_tf * local_tf;
            node.world.world_bounds = transform_rect_bbox(
                node.world.world_transform,
                Rect::from_origin_size(Point::ZERO, layout.size()),
            );
            node.world.visible = parent_visible && node.local.flags.contains(NodeFlags::VISIBLE);
            (old, node.world.clone(), node.children.clone())
        };

        if old.world_bounds != world.world_bounds || old.visible != world.visible {
            if old.visible && !old.world_bounds.is_zero_area() {
                damage.dirty_rects.push(old.world_bounds);
            }
            if world.visible && !world.world_bounds.is_zero_area() {
                damage.dirty_rects.push(world.world_bounds);
            }
        }

        for child in child_ids {
            self.update_world_recursive(child, world.world_transform, world.visible, damage);
        }
    }
}

/// Transform an axis-aligned `Rect` by an `Affine` and return a conservative
/// axis-aligned bounding box in world space.
fn transform_rect_bbox(affine: Affine, rect: Rect) -> Rect {
    let p0 = affine * Point::new(rect.x0, rect.y0);
    let p1 = affine * Point::new(rect.x1, rect.y0);
    let p2 = affine * Point::new(rect.x0, rect.y1);
    let p3 = affine * Point::new(rect.x1, rect.y1);
    let min_x = p0.x.min(p1.x).min(p2.x).min(p3.x);
    let min_y = p0.y.min(p1.y).min(p2.y).min(p3.y);
    let max_x = p0.x.max(p1.x).max(p2.x).max(p3.x);
    let max_y = p0.y.max(p1.y).max(p2.y).max(p3.y);
    Rect::new(min_x, min_y, max_x, max_y)
}
