// Copyright 2025 the Flourish Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host capability a [`Flourish`](crate::Flourish) needs from a view tree.
//!
//! The controller never owns the view tree. It keeps node handles and borrows
//! the host mutably for each call that touches the panel.

use core::fmt::Debug;

use kurbo::{Point, Size};

/// View-tree operations used to attach, lay out and animate the panel.
///
/// Implementors decide what a node is; any small copyable handle works.
/// See [`adapters`](crate::adapters) for an implementation over a
/// `flourish_scene::Scene`.
pub trait Host {
    /// Handle of a node in the host tree.
    type Node: Copy + Eq + Debug;
    /// Descriptor the host can turn into a fresh panel node.
    type Layout: Clone + Debug;

    /// Whether `parent` can hold children stacked above their siblings by z-order.
    fn supports_overlay(&self, parent: Self::Node) -> bool;

    /// Create a detached node from a layout descriptor.
    fn inflate(&mut self, layout: &Self::Layout) -> Self::Node;

    /// Attach `panel` to `parent` as an overlay child filling the parent, at z-order `z`.
    fn attach_overlay(&mut self, parent: Self::Node, panel: Self::Node, z: i32);

    /// Size of `node` after layout, or `None` if no layout pass has reached it yet.
    fn laid_out_size(&self, node: Self::Node) -> Option<Size>;

    /// Anchor the rotation of `node` at `pivot` (node coordinates).
    fn set_pivot(&mut self, node: Self::Node, pivot: Point);

    /// Rotate `node` about its pivot; degrees, positive is clockwise (y-down).
    fn set_rotation(&mut self, node: Self::Node, degrees: f64);

    /// Toggle whether `node` is painted and can receive clicks.
    fn set_paintable(&mut self, node: Self::Node, paintable: bool);
}
