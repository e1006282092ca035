// Copyright 2025 the Flourish Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording host used by the unit tests.

use alloc::vec::Vec;
use kurbo::{Point, Size};

use crate::host::Host;

#[derive(Clone, Debug, Default)]
pub(crate) struct TestNode {
    pub(crate) overlay: bool,
    pub(crate) fixed: Option<Size>,
    pub(crate) size: Option<Size>,
    pub(crate) parent: Option<u32>,
    pub(crate) layout: Option<&'static str>,
    pub(crate) z: i32,
    pub(crate) pivot: Option<Point>,
    pub(crate) pivot_sets: usize,
    pub(crate) rotations: Vec<f64>,
    pub(crate) paintable: bool,
}

/// Flat list of nodes; a node's id is its index.
#[derive(Debug, Default)]
pub(crate) struct TestHost {
    nodes: Vec<TestNode>,
}

impl TestHost {
    pub(crate) fn container(&mut self, overlay: bool, size: Size) -> u32 {
        self.push(TestNode {
            overlay,
            fixed: Some(size),
            paintable: true,
            ..Default::default()
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn node(&self, id: u32) -> &TestNode {
        &self.nodes[id as usize]
    }

    pub(crate) fn node_mut(&mut self, id: u32) -> &mut TestNode {
        &mut self.nodes[id as usize]
    }

    pub(crate) fn resize(&mut self, id: u32, size: Size) {
        self.node_mut(id).fixed = Some(size);
    }

    /// Containers keep their fixed size; attached panels fill their parent.
    pub(crate) fn layout(&mut self) {
        for i in 0..self.nodes.len() {
            let size = match (self.nodes[i].fixed, self.nodes[i].parent) {
                (Some(size), _) => Some(size),
                (None, Some(parent)) => self.nodes[parent as usize].fixed,
                (None, None) => None,
            };
            self.nodes[i].size = size;
        }
    }

    fn push(&mut self, node: TestNode) -> u32 {
        self.nodes.push(node);
        u32::try_from(self.nodes.len() - 1).expect("test host overflow")
    }
}

impl Host for TestHost {
    type Node = u32;
    type Layout = &'static str;

    fn supports_overlay(&self, parent: u32) -> bool {
        self.node(parent).overlay
    }

    fn inflate(&mut self, layout: &&'static str) -> u32 {
        self.push(TestNode {
            layout: Some(*layout),
            ..Default::default()
        })
    }

    fn attach_overlay(&mut self, parent: u32, panel: u32, z: i32) {
        let node = self.node_mut(panel);
        node.parent = Some(parent);
        node.z = z;
    }

    fn laid_out_size(&self, node: u32) -> Option<Size> {
        self.node(node).size
    }

    fn set_pivot(&mut self, node: u32, pivot: Point) {
        let node = self.node_mut(node);
        node.pivot = Some(pivot);
        node.pivot_sets += 1;
    }

    fn set_rotation(&mut self, node: u32, degrees: f64) {
        self.node_mut(node).rotations.push(degrees);
    }

    fn set_paintable(&mut self, node: u32, paintable: bool) {
        self.node_mut(node).paintable = paintable;
    }
}
