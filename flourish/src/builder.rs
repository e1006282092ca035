// Copyright 2025 the Flourish Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fluent configuration for a [`Flourish`].
//!
//! A [`FlourishBuilder`] checks the parent as soon as it is created, collects
//! settings through by-value setters, and validates the rest at
//! [`build`](FlourishBuilder::build). Every build snapshots the configuration,
//! so the builder can keep being adjusted and built again without affecting
//! controllers that already exist.

use alloc::rc::Rc;
use core::fmt;
use core::time::Duration;

use crate::curve::AnimationCurve;
use crate::error::FlourishError;
use crate::flourish::Flourish;
use crate::host::Host;
use crate::orientation::Orientation;

/// Z-order given to the panel so it covers every sibling in the parent.
pub const OVERLAY_Z_INDEX: i32 = 1000;

/// Default transition length.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

/// Called with `true` after each completed show and `false` after each completed dismiss.
pub type ChangeListener = Rc<dyn Fn(bool)>;

/// Called when the panel absorbs a click.
pub type ClickHandler = Rc<dyn Fn()>;

/// Plain-data part of the configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlourishStyle {
    /// Anchored corner; also picks the sweep direction.
    pub orientation: Orientation,
    /// Length of one transition.
    #[cfg_attr(feature = "serde", serde(rename = "duration_ms", with = "duration_ms"))]
    pub duration: Duration,
    /// Easing applied to both show and dismiss.
    pub curve: AnimationCurve,
    /// Show once the parent has been laid out.
    pub show_on_start: bool,
}

impl Default for FlourishStyle {
    fn default() -> Self {
        Self {
            orientation: Orientation::TopLeft,
            duration: DEFAULT_DURATION,
            curve: AnimationCurve::Normal,
            show_on_start: false,
        }
    }
}

#[cfg(feature = "serde")]
mod duration_ms {
    use core::time::Duration;

    pub(super) fn serialize<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let ms = <u64 as serde::Deserialize>::deserialize(d)?;
        Ok(Duration::from_millis(ms))
    }
}

/// Where the panel comes from.
pub enum PanelSource<H: Host> {
    /// An existing node. Every build attaches this same node.
    Node(H::Node),
    /// A descriptor inflated by the host. Every build inflates a fresh panel.
    Layout(H::Layout),
}

impl<H: Host> Clone for PanelSource<H> {
    fn clone(&self) -> Self {
        match self {
            Self::Node(n) => Self::Node(*n),
            Self::Layout(l) => Self::Layout(l.clone()),
        }
    }
}

impl<H: Host> fmt::Debug for PanelSource<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(n) => f.debug_tuple("Node").field(n).finish(),
            Self::Layout(l) => f.debug_tuple("Layout").field(l).finish(),
        }
    }
}

/// Everything a [`Flourish`] is built from.
pub struct FlourishConfig<H: Host> {
    /// Container the panel is attached to.
    pub parent: H::Node,
    /// Panel node or layout; required by [`FlourishBuilder::build`].
    pub panel: Option<PanelSource<H>>,
    /// Orientation, timing and start behavior.
    pub style: FlourishStyle,
    /// Invoked when the visible panel absorbs a click.
    pub on_click: Option<ClickHandler>,
    /// Invoked once per completed transition.
    pub on_changed: Option<ChangeListener>,
}

impl<H: Host> Clone for FlourishConfig<H> {
    fn clone(&self) -> Self {
        Self {
            parent: self.parent,
            panel: self.panel.clone(),
            style: self.style,
            on_click: self.on_click.clone(),
            on_changed: self.on_changed.clone(),
        }
    }
}

impl<H: Host> fmt::Debug for FlourishConfig<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlourishConfig")
            .field("parent", &self.parent)
            .field("panel", &self.panel)
            .field("style", &self.style)
            .field("on_click", &self.on_click.is_some())
            .field("on_changed", &self.on_changed.is_some())
            .finish()
    }
}

/// Chainable builder for a [`Flourish`].
///
/// ```
/// # use flourish::{FlourishBuilder, FlourishError, Host};
/// # use kurbo::{Point, Size};
/// # #[derive(Default)]
/// # struct Stub;
/// # impl Host for Stub {
/// #     type Node = u32;
/// #     type Layout = ();
/// #     fn supports_overlay(&self, parent: u32) -> bool { parent == 0 }
/// #     fn inflate(&mut self, _: &()) -> u32 { 7 }
/// #     fn attach_overlay(&mut self, _: u32, _: u32, _: i32) {}
/// #     fn laid_out_size(&self, _: u32) -> Option<Size> { None }
/// #     fn set_pivot(&mut self, _: u32, _: Point) {}
/// #     fn set_rotation(&mut self, _: u32, _: f64) {}
/// #     fn set_paintable(&mut self, _: u32, _: bool) {}
/// # }
/// use flourish::{AnimationCurve, Orientation};
///
/// let mut host = Stub;
/// // Node 1 is a linear-flow container.
/// assert_eq!(FlourishBuilder::new(&host, 1).unwrap_err(), FlourishError::InvalidParent);
///
/// let mut builder = FlourishBuilder::new(&host, 0)?
///     .orientation(Orientation::BottomRight)
///     .curve(AnimationCurve::Bounce)
///     .duration_ms(300);
/// assert_eq!(builder.build(&mut host).unwrap_err(), FlourishError::MissingPanel);
///
/// let flourish = builder.panel_layout(()).build(&mut host)?;
/// assert!(!flourish.is_visible());
/// # Ok::<(), FlourishError>(())
/// ```
pub struct FlourishBuilder<H: Host> {
    config: FlourishConfig<H>,
    // Set once a `PanelSource::Node` has been attached by `build`.
    node_attached: bool,
}

impl<H: Host> fmt::Debug for FlourishBuilder<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlourishBuilder")
            .field("config", &self.config)
            .field("node_attached", &self.node_attached)
            .finish()
    }
}

impl<H: Host> Clone for FlourishBuilder<H> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            node_attached: self.node_attached,
        }
    }
}

impl<H: Host> FlourishBuilder<H> {
    /// Start a configuration for a panel over `parent`.
    ///
    /// Fails with [`FlourishError::InvalidParent`] when the parent cannot hold
    /// overlay children.
    pub fn new(host: &H, parent: H::Node) -> Result<Self, FlourishError> {
        if !host.supports_overlay(parent) {
            #[cfg(feature = "tracing")]
            tracing::warn!(parent = ?parent, "rejected parent without overlay support");
            return Err(FlourishError::InvalidParent);
        }
        Ok(Self {
            config: FlourishConfig {
                parent,
                panel: None,
                style: FlourishStyle::default(),
                on_click: None,
                on_changed: None,
            },
            node_attached: false,
        })
    }

    /// Use an existing node as the panel.
    ///
    /// A node can only be attached once; see [`build`](Self::build).
    pub fn panel(mut self, node: H::Node) -> Self {
        self.config.panel = Some(PanelSource::Node(node));
        self.node_attached = false;
        self
    }

    /// Inflate the panel from a host layout descriptor on each build.
    pub fn panel_layout(mut self, layout: H::Layout) -> Self {
        self.config.panel = Some(PanelSource::Layout(layout));
        self.node_attached = false;
        self
    }

    /// Set the anchored corner.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.config.style.orientation = orientation;
        self
    }

    /// Set the transition length.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.config.style.duration = duration;
        self
    }

    /// Set the transition length in milliseconds.
    pub fn duration_ms(self, ms: u64) -> Self {
        self.duration(Duration::from_millis(ms))
    }

    /// Set the easing curve.
    pub fn curve(mut self, curve: AnimationCurve) -> Self {
        self.config.style.curve = curve;
        self
    }

    /// Show the panel once the parent has been laid out.
    pub fn show_on_start(mut self, show: bool) -> Self {
        self.config.style.show_on_start = show;
        self
    }

    /// Replace orientation, duration, curve and start behavior at once.
    pub fn style(mut self, style: FlourishStyle) -> Self {
        self.config.style = style;
        self
    }

    /// Handle clicks absorbed by the panel.
    pub fn on_click(mut self, handler: impl Fn() + 'static) -> Self {
        self.config.on_click = Some(Rc::new(handler));
        self
    }

    /// Listen for completed transitions.
    pub fn on_changed(mut self, listener: impl Fn(bool) + 'static) -> Self {
        self.config.on_changed = Some(Rc::new(listener));
        self
    }

    /// The configuration collected so far.
    pub fn config(&self) -> &FlourishConfig<H> {
        &self.config
    }

    /// Attach a panel to the parent and return its controller.
    ///
    /// Fails with [`FlourishError::MissingPanel`] when no panel source was set.
    /// The controller keeps its own copy of the configuration.
    ///
    /// A layout descriptor is inflated into a fresh panel on every build. A node
    /// given with [`panel`](Self::panel) belongs to the first controller built
    /// from it; later builds fail with [`FlourishError::PanelAlreadyAttached`]
    /// until another panel source is set.
    pub fn build(&mut self, host: &mut H) -> Result<Flourish<H>, FlourishError> {
        let by_node = matches!(self.config.panel, Some(PanelSource::Node(_)));
        if by_node && self.node_attached {
            #[cfg(feature = "tracing")]
            tracing::warn!(parent = ?self.config.parent, "panel node is already attached");
            return Err(FlourishError::PanelAlreadyAttached);
        }
        let flourish = Flourish::attach(host, self.config.clone())?;
        self.node_attached = by_node;
        Ok(flourish)
    }
}
