// Copyright 2025 the Flourish Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Host`] over a [`flourish_scene::Scene`].
//!
//! ## Feature
//!
//! Enable with `scene_adapter`.
//!
//! ## Notes
//!
//! - Overlay support maps to [`Arrangement::Overlay`]; column containers are rejected.
//! - Layout descriptors are [`LocalNode`] templates. Inflating inserts a detached root.
//! - Attaching reparents the panel, forces [`Sizing::Fill`] and sets its z-index.
//!   The panel gets a size at the next [`Scene::layout`].
//! - Painting toggles both [`NodeFlags::VISIBLE`] and [`NodeFlags::PICKABLE`], so
//!   a hidden panel never wins a hit test.
//! - Rotation and pivot changes take effect in world space at the next [`Scene::commit`].

use flourish_scene::{Arrangement, LocalNode, NodeFlags, NodeId, Scene, Sizing};
use kurbo::{Point, Size};

use crate::host::Host;

impl Host for Scene {
    type Node = NodeId;
    type Layout = LocalNode;

    fn supports_overlay(&self, parent: NodeId) -> bool {
        self.local(parent)
            .is_some_and(|n| n.arrangement == Arrangement::Overlay)
    }

    fn inflate(&mut self, layout: &LocalNode) -> NodeId {
        self.insert(None, layout.clone())
    }

    fn attach_overlay(&mut self, parent: NodeId, panel: NodeId, z: i32) {
        self.reparent(panel, Some(parent));
        self.set_sizing(panel, Sizing::Fill);
        self.set_z_index(panel, z);
    }

    fn laid_out_size(&self, node: NodeId) -> Option<Size> {
        self.laid_out_bounds(node).map(|r| r.size())
    }

    fn set_pivot(&mut self, node: NodeId, pivot: Point) {
        Self::set_pivot(self, node, pivot);
    }

    fn set_rotation(&mut self, node: NodeId, degrees: f64) {
        Self::set_rotation(self, node, degrees);
    }

    fn set_paintable(&mut self, node: NodeId, paintable: bool) {
        let flags = self.local(node).map(|n| n.flags).unwrap_or_default();
        let toggled = NodeFlags::VISIBLE | NodeFlags::PICKABLE;
        let flags = if paintable {
            flags | toggled
        } else {
            flags - toggled
        };
        self.set_flags(node, flags);
    }
}
