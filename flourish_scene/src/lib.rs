// Copyright 2025 the Flourish Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flourish Scene: a small, Kurbo-native retained scene tree.
//!
//! It is the host side of the Flourish overlay controller, and is usable on its own:
//!
//! - Represents a hierarchy of nodes with a size request, an arrangement for
//!   children, a rotation about a pivot, a z-index and flags.
//! - Runs a minimal layout pass ([`Scene::layout`]) that places children either
//!   stacked at the origin ([`Arrangement::Overlay`]) or top to bottom
//!   ([`Arrangement::Column`]).
//! - Computes world transforms, world-space AABBs and effective visibility in
//!   [`Scene::commit`], which yields coarse [`Damage`].
//! - Answers point queries with [`Scene::hit_test_point`], mapping the point into
//!   each node's own space so rotated nodes are picked precisely.
//!
//! ## Not a layout engine
//!
//! The layout pass only exists so a host has concrete sizes to report.
//! There is no measurement, padding or alignment.
//!
//! ## API overview
//!
//! - [`Scene`]: container managing nodes.
//! - [`LocalNode`]: per-node local data (sizing, arrangement, pivot, rotation, z, flags).
//! - [`NodeFlags`]: painting and picking controls.
//! - [`NodeId`]: generational handle of a node.
//! - [`QueryFilter`]: restricts hit results (visible/pickable).
//!
//! ## Example
//!
//! ```
//! use flourish_scene::{LocalNode, QueryFilter, Scene, Sizing};
//! use kurbo::{Point, Size};
//!
//! let mut scene = Scene::new();
//! let root = scene.insert(
//!     None,
//!     LocalNode { sizing: Sizing::Fixed(Size::new(200.0, 100.0)), ..Default::default() },
//! );
//! let overlay = scene.insert(Some(root), LocalNode { z_index: 10, ..Default::default() });
//!
//! scene.layout();
//! let _ = scene.commit();
//!
//! // The overlay fills the root and sits above it.
//! let filter = QueryFilter { visible_only: true, pickable_only: true };
//! let hit = scene.hit_test_point(Point::new(150.0, 50.0), filter).unwrap();
//! assert_eq!(hit.node, overlay);
//!
//! // A quarter turn about the top-left corner swings it out of the root.
//! scene.set_rotation(overlay, -90.0);
//! let _ = scene.commit();
//! let hit = scene.hit_test_point(Point::new(150.0, 50.0), filter).unwrap();
//! assert_eq!(hit.node, root);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod damage;
mod scene;
mod types;

pub use damage::Damage;
pub use scene::{Hit, QueryFilter, Scene};
pub use types::{Arrangement, LocalNode, NodeFlags, NodeId, Sizing};
