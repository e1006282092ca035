// Copyright 2025 the Flourish Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, flags, sizing and local properties.

use kurbo::{Point, Size};

/// Identifier for a node in the scene.
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Newer
///
/// A `NodeId` is newer than another when it has a higher generation, or the same
/// generation and a higher slot index. [Hit testing](crate::Scene::hit_test_point)
/// uses this order to break ties between equal z-indices.
///
/// Use [`Scene::is_alive`](crate::Scene::is_alive) to check whether a `NodeId` still refers to a live node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn is_newer_than(self, other: Self) -> bool {
        (self.1 > other.1) || (self.1 == other.1 && self.0 > other.0)
    }
}

bitflags::bitflags! {
    /// Node flags controlling painting and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is painted. Hidden nodes also hide their subtree.
        const VISIBLE  = 0b0000_0001;
        /// Node is pickable (participates in hit testing).
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// How a container places its children during [`Scene::layout`](crate::Scene::layout).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Arrangement {
    /// Children are stacked on top of each other at the container origin.
    ///
    /// Only overlay containers can host children above their siblings by z-order.
    #[default]
    Overlay,
    /// Children flow top to bottom, one after another.
    Column,
}

/// How a node is sized by its parent.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Sizing {
    /// Fixed size in parent units.
    Fixed(Size),
    /// Take the space the parent offers: its full size in an overlay, the
    /// remaining height in a column.
    #[default]
    Fill,
}

/// Local properties for a node.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Size request used by the layout pass.
    pub sizing: Sizing,
    /// Placement policy for this node's children.
    pub arrangement: Arrangement,
    /// Rotation pivot in the node's own coordinates.
    pub pivot: Point,
    /// Rotation about [`pivot`](Self::pivot) in degrees; positive is clockwise (y-down).
    pub rotation: f64,
    /// Z-order. Higher is drawn on top.
    pub z_index: i32,
    /// Painting and picking flags.
    pub flags: NodeFlags,
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            sizing: Sizing::Fill,
            arrangement: Arrangement::Overlay,
            pivot: Point::ZERO,
            rotation: 0.0,
            z_index: 0,
            flags: NodeFlags::default(),
        }
    }
}
