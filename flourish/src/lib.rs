// Copyright 2025 the Flourish Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flourish: a pivot-anchored reveal/dismiss controller for a single overlay panel.
//!
//! A [`Flourish`] owns one panel stacked above everything else in a parent
//! container. Showing the panel swings it into place by rotating it about one of
//! its corners; dismissing swings it back out through the same edge.
//!
//! - [`Orientation`] picks the anchored corner and with it the sign of the 90° sweep.
//! - [`AnimationCurve`] shapes the transition (linear, accelerate, bounce, overshoot).
//! - [`FlourishBuilder`] validates the parent, collects settings, and attaches the panel.
//! - [`Flourish::show`] / [`Flourish::dismiss`] request transitions; both are ignored while
//!   one is already running or when the panel is already in the requested state.
//!
//! ## Hosts
//!
//! The controller never touches a view system directly. Everything it needs from
//! the outside world goes through the [`Host`] trait: inflating a panel from a
//! layout descriptor, stacking it over the parent, reading laid-out sizes, and
//! applying pivot, rotation and paint state.
//!
//! The host also owns time. Nothing moves until the host calls
//! [`Flourish::tick`] with the elapsed frame time, and the pivot is resolved the
//! first time the host reports layout via [`Flourish::on_parent_laid_out`]. A
//! `show` requested before that is queued and starts once layout arrives.
//!
//! With the `scene_adapter` feature, `flourish_scene::Scene` implements [`Host`];
//! see [`adapters`].
//!
//! ## Features
//!
//! - `std` (default) / `libm`: float backend forwarded to Kurbo.
//! - `tracing`: emit `tracing` events for transitions and ignored requests.
//! - `serde`: derive serde traits on [`FlourishStyle`], [`Orientation`] and [`AnimationCurve`].
//! - `scene_adapter`: [`Host`] for `flourish_scene::Scene`.
//!
//! ## Minimal usage
//!
//! ```
//! use core::time::Duration;
//! use flourish::{FlourishBuilder, Host, Orientation};
//! use kurbo::{Point, Size};
//!
//! // A host with one 300×200 parent (node 0) and the panels it inflates.
//! #[derive(Default)]
//! struct Screen {
//!     rotation: f64,
//!     panels: u32,
//! }
//!
//! impl Host for Screen {
//!     type Node = u32;
//!     type Layout = ();
//!     fn supports_overlay(&self, parent: u32) -> bool { parent == 0 }
//!     fn inflate(&mut self, _: &()) -> u32 { self.panels += 1; self.panels }
//!     fn attach_overlay(&mut self, _: u32, _: u32, _: i32) {}
//!     fn laid_out_size(&self, _: u32) -> Option<Size> { Some(Size::new(300.0, 200.0)) }
//!     fn set_pivot(&mut self, _: u32, _: Point) {}
//!     fn set_rotation(&mut self, _: u32, degrees: f64) { self.rotation = degrees; }
//!     fn set_paintable(&mut self, _: u32, _: bool) {}
//! }
//!
//! let mut screen = Screen::default();
//! let mut flourish = FlourishBuilder::new(&screen, 0)?
//!     .panel_layout(())
//!     .orientation(Orientation::TopRight)
//!     .duration_ms(100)
//!     .build(&mut screen)?;
//! assert_eq!(screen.rotation, 90.0, "hidden panel starts swung out");
//!
//! flourish.on_parent_laid_out(&mut screen);
//! assert_eq!(flourish.pivot(), Some(Point::new(300.0, 0.0)));
//!
//! flourish.show(&mut screen);
//! while flourish.tick(&mut screen, Duration::from_millis(16)) {}
//! assert!(flourish.is_visible());
//! assert_eq!(screen.rotation, 0.0);
//! # Ok::<(), flourish::FlourishError>(())
//! ```

#![no_std]

extern crate alloc;

pub mod adapters;

mod animator;
mod builder;
mod curve;
mod error;
mod flourish;
mod host;
mod orientation;

#[cfg(test)]
mod test_host;

pub use animator::ValueAnimator;
pub use builder::{
    ChangeListener, ClickHandler, DEFAULT_DURATION, FlourishBuilder, FlourishConfig, FlourishStyle,
    OVERLAY_Z_INDEX, PanelSource,
};
pub use curve::AnimationCurve;
pub use error::FlourishError;
pub use flourish::{Completion, Flourish, FlourishState};
pub use host::Host;
pub use orientation::{Orientation, Resolved, SWEEP_MAGNITUDE};
