// Copyright 2025 the Flourish Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The reveal/dismiss controller.
//!
//! ## Lifecycle
//!
//! 1) [`FlourishBuilder::build`](crate::FlourishBuilder::build) attaches the panel to
//!    the parent, rotated to its hidden angle and not painted.
//! 2) After the host's layout pass, call [`Flourish::on_parent_laid_out`]. It resolves
//!    the pivot from the panel's size, exactly once, and starts a queued show.
//! 3) [`Flourish::show`] and [`Flourish::dismiss`] start a transition; each host frame
//!    calls [`Flourish::tick`] with the elapsed time until it returns `false`.
//!
//! ## Guard
//!
//! At most one transition is in flight. A `show` while visible or animating, and a
//! `dismiss` while hidden or animating, are ignored without error. There is no way
//! to cancel a running transition; it always runs to completion.

use alloc::boxed::Box;
use core::fmt;
use core::time::Duration;

use kurbo::Point;

use crate::animator::ValueAnimator;
use crate::builder::{FlourishConfig, FlourishStyle, OVERLAY_Z_INDEX, PanelSource};
use crate::error::FlourishError;
use crate::host::Host;

/// Callback run once a transition completes.
///
/// It receives the controller and the host, so it may start the next transition.
pub type Completion<H> = Box<dyn FnOnce(&mut Flourish<H>, &mut H)>;

/// Observable lifecycle state of a [`Flourish`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FlourishState {
    /// Not painted.
    Hidden,
    /// Unfolding into view.
    Showing,
    /// Fully shown.
    Visible,
    /// Folding out of view.
    Dismissing,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Direction {
    Show,
    Dismiss,
}

struct Transition<H: Host> {
    direction: Direction,
    animator: ValueAnimator,
    on_complete: Option<Completion<H>>,
}

/// A show requested before the pivot could be resolved.
struct QueuedShow<H: Host> {
    on_complete: Option<Completion<H>>,
}

/// Controller for one overlay panel.
pub struct Flourish<H: Host> {
    panel: H::Node,
    config: FlourishConfig<H>,
    pivot: Option<Point>,
    visible: bool,
    animating: bool,
    transition: Option<Transition<H>>,
    queued: Option<QueuedShow<H>>,
}

impl<H: Host> fmt::Debug for Flourish<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flourish")
            .field("panel", &self.panel)
            .field("state", &self.state())
            .field("pivot", &self.pivot)
            .field("queued_show", &self.queued.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<H: Host> Flourish<H> {
    pub(crate) fn attach(host: &mut H, config: FlourishConfig<H>) -> Result<Self, FlourishError> {
        let panel = match &config.panel {
            Some(PanelSource::Node(node)) => *node,
            Some(PanelSource::Layout(layout)) => host.inflate(layout),
            None => return Err(FlourishError::MissingPanel),
        };
        host.set_rotation(panel, config.style.orientation.sweep_degrees());
        host.set_paintable(panel, false);
        host.attach_overlay(config.parent, panel, OVERLAY_Z_INDEX);
        #[cfg(feature = "tracing")]
        tracing::debug!(panel = ?panel, parent = ?config.parent, style = ?config.style, "panel attached");

        let queued = config
            .style
            .show_on_start
            .then_some(QueuedShow { on_complete: None });
        Ok(Self {
            panel,
            config,
            pivot: None,
            visible: false,
            animating: false,
            transition: None,
            queued,
        })
    }

    /// Resolve the pivot now that the host has laid out the panel.
    ///
    /// The pivot is assigned on the first call that finds a laid-out size and
    /// kept for every later transition. A show requested earlier (or by
    /// `show_on_start`) starts here.
    ///
    /// Returns whether the pivot is resolved; `false` means the host has not
    /// given the panel a non-empty size yet and the call should be repeated
    /// after layout.
    pub fn on_parent_laid_out(&mut self, host: &mut H) -> bool {
        if self.pivot.is_some() {
            return true;
        }
        // An empty box means layout has not produced a real size yet.
        let Some(size) = host
            .laid_out_size(self.panel)
            .filter(|size| !size.is_zero_area())
        else {
            return false;
        };
        let pivot = self.config.style.orientation.pivot(size);
        host.set_pivot(self.panel, pivot);
        self.pivot = Some(pivot);
        #[cfg(feature = "tracing")]
        tracing::debug!(panel = ?self.panel, ?pivot, "pivot resolved");

        if let Some(QueuedShow { on_complete }) = self.queued.take() {
            self.start(host, Direction::Show, on_complete);
        }
        true
    }

    /// Unfold the panel into view.
    pub fn show(&mut self, host: &mut H) {
        self.request_show(host, None);
    }

    /// Unfold the panel into view and run `on_complete` afterwards.
    pub fn show_then(&mut self, host: &mut H, on_complete: impl FnOnce(&mut Self, &mut H) + 'static) {
        self.request_show(host, Some(Box::new(on_complete)));
    }

    /// Fold the panel out of view.
    pub fn dismiss(&mut self, host: &mut H) {
        self.request_dismiss(host, None);
    }

    /// Fold the panel out of view and run `on_complete` afterwards.
    pub fn dismiss_then(
        &mut self,
        host: &mut H,
        on_complete: impl FnOnce(&mut Self, &mut H) + 'static,
    ) {
        self.request_dismiss(host, Some(Box::new(on_complete)));
    }

    /// Deliver one animation frame, `dt` after the previous one.
    ///
    /// The last frame of a transition updates the state, notifies the listener
    /// and then runs the completion callback.
    /// Returns whether a transition is still in flight afterwards.
    pub fn tick(&mut self, host: &mut H, dt: Duration) -> bool {
        let sweep = self.config.style.orientation.sweep_degrees();
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };
        let value = transition.animator.tick(dt);
        host.set_rotation(self.panel, sweep * value);
        if !transition.animator.is_finished() {
            return true;
        }
        if let Some(Transition {
            direction,
            on_complete,
            ..
        }) = self.transition.take()
        {
            self.finish(host, direction, on_complete);
        }
        self.animating
    }

    /// Deliver a click that landed on the panel.
    ///
    /// While painted the panel absorbs every click, calling the click handler if
    /// one is configured, and returns `true`. A hidden panel returns `false` so
    /// the click can go to whatever lies underneath.
    pub fn click(&self) -> bool {
        if !(self.visible || self.animating) {
            return false;
        }
        if let Some(handler) = &self.config.on_click {
            handler();
        }
        true
    }

    /// Whether the panel is fully shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether a transition is in flight.
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Current lifecycle state.
    pub fn state(&self) -> FlourishState {
        match (self.visible, self.animating) {
            (false, false) => FlourishState::Hidden,
            (false, true) => FlourishState::Showing,
            (true, false) => FlourishState::Visible,
            (true, true) => FlourishState::Dismissing,
        }
    }

    /// Whether the pivot has been resolved.
    pub fn is_laid_out(&self) -> bool {
        self.pivot.is_some()
    }

    /// Resolved pivot in panel coordinates.
    pub fn pivot(&self) -> Option<Point> {
        self.pivot
    }

    /// The panel node.
    pub fn panel(&self) -> H::Node {
        self.panel
    }

    /// The parent node.
    pub fn parent(&self) -> H::Node {
        self.config.parent
    }

    /// Orientation, timing and start behavior this controller was built with.
    pub fn style(&self) -> &FlourishStyle {
        &self.config.style
    }

    // --- internals ---

    fn request_show(&mut self, host: &mut H, on_complete: Option<Completion<H>>) {
        if self.visible || self.animating || self.queued.is_some() {
            #[cfg(feature = "tracing")]
            tracing::trace!(panel = ?self.panel, state = ?self.state(), "show ignored");
            return;
        }
        if self.pivot.is_none() {
            #[cfg(feature = "tracing")]
            tracing::debug!(panel = ?self.panel, "show queued until layout");
            self.queued = Some(QueuedShow { on_complete });
            return;
        }
        self.start(host, Direction::Show, on_complete);
    }

    fn request_dismiss(&mut self, host: &mut H, on_complete: Option<Completion<H>>) {
        if !self.visible || self.animating {
            #[cfg(feature = "tracing")]
            tracing::trace!(panel = ?self.panel, state = ?self.state(), "dismiss ignored");
            return;
        }
        self.start(host, Direction::Dismiss, on_complete);
    }

    fn start(&mut self, host: &mut H, direction: Direction, on_complete: Option<Completion<H>>) {
        // Animated value is the fraction of the sweep still applied: 1 is hidden, 0 is shown.
        let (from, to) = match direction {
            Direction::Show => (1.0, 0.0),
            Direction::Dismiss => (0.0, 1.0),
        };
        let style = self.config.style;
        let animator = ValueAnimator::new(from, to, style.duration, style.curve);
        self.animating = true;
        if direction == Direction::Show {
            host.set_paintable(self.panel, true);
        }
        host.set_rotation(self.panel, style.orientation.sweep_degrees() * animator.value());
        #[cfg(feature = "tracing")]
        tracing::debug!(panel = ?self.panel, ?direction, duration = ?style.duration, "transition started");
        self.transition = Some(Transition {
            direction,
            animator,
            on_complete,
        });
    }

    fn finish(&mut self, host: &mut H, direction: Direction, on_complete: Option<Completion<H>>) {
        let showing = direction == Direction::Show;
        self.animating = false;
        self.visible = showing;
        if !showing {
            host.set_paintable(self.panel, false);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(panel = ?self.panel, ?direction, "transition finished");
        if let Some(listener) = self.config.on_changed.clone() {
            listener(showing);
        }
        if let Some(on_complete) = on_complete {
            on_complete(self, host);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::FlourishBuilder;
    use crate::curve::AnimationCurve;
    use crate::orientation::Orientation;
    use crate::test_host::TestHost;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};
    use kurbo::Size;

    const FRAME: Duration = Duration::from_millis(16);

    struct Fixture {
        host: TestHost,
        flourish: Flourish<TestHost>,
        events: Rc<RefCell<Vec<bool>>>,
    }

    fn fixture(configure: impl FnOnce(FlourishBuilder<TestHost>) -> FlourishBuilder<TestHost>) -> Fixture {
        let mut host = TestHost::default();
        let parent = host.container(true, Size::new(200.0, 100.0));
        let events: Rc<RefCell<Vec<bool>>> = Rc::default();
        let sink = events.clone();
        let builder = FlourishBuilder::new(&host, parent)
            .unwrap()
            .panel_layout("panel")
            .duration_ms(100)
            .on_changed(move |showing| sink.borrow_mut().push(showing));
        let flourish = configure(builder).build(&mut host).unwrap();
        Fixture {
            host,
            flourish,
            events,
        }
    }

    fn laid_out() -> Fixture {
        let mut f = fixture(|b| b);
        f.host.layout();
        assert!(f.flourish.on_parent_laid_out(&mut f.host));
        f
    }

    fn run(f: &mut Fixture) -> usize {
        run_at(f, FRAME)
    }

    fn run_at(f: &mut Fixture, dt: Duration) -> usize {
        let mut frames = 0;
        while f.flourish.tick(&mut f.host, dt) {
            frames += 1;
            assert!(frames < 1000, "transition never finished");
        }
        frames + 1
    }

    #[test]
    fn show_runs_to_visible() {
        let mut f = laid_out();
        assert_eq!(f.flourish.state(), FlourishState::Hidden);
        f.flourish.show(&mut f.host);
        assert_eq!(f.flourish.state(), FlourishState::Showing);
        assert!(f.host.node(f.flourish.panel()).paintable);
        let frames = run(&mut f);
        assert_eq!(frames, 7, "100ms at 16ms per frame");
        assert_eq!(f.flourish.state(), FlourishState::Visible);
        assert_eq!(*f.events.borrow(), [true]);
        assert_eq!(f.host.node(f.flourish.panel()).rotations.last().copied(), Some(0.0));
    }

    #[test]
    fn second_show_while_showing_is_ignored() {
        let mut f = laid_out();
        f.flourish.show(&mut f.host);
        let _ = f.flourish.tick(&mut f.host, FRAME);
        let rotations_before = f.host.node(f.flourish.panel()).rotations.len();
        f.flourish.show(&mut f.host);
        assert_eq!(
            f.host.node(f.flourish.panel()).rotations.len(),
            rotations_before,
            "ignored show must not restart the animation"
        );
        let _ = run(&mut f);
        assert!(f.flourish.is_visible());
        assert_eq!(*f.events.borrow(), [true]);
    }

    #[test]
    fn show_while_visible_is_ignored() {
        let mut f = laid_out();
        f.flourish.show(&mut f.host);
        let _ = run(&mut f);
        f.flourish.show(&mut f.host);
        assert!(!f.flourish.is_animating());
        assert!(!f.flourish.tick(&mut f.host, FRAME));
        assert_eq!(*f.events.borrow(), [true]);
    }

    #[test]
    fn dismiss_while_hidden_is_ignored() {
        let mut f = laid_out();
        let rotations_before = f.host.node(f.flourish.panel()).rotations.len();
        f.flourish.dismiss(&mut f.host);
        assert!(!f.flourish.is_animating());
        assert!(!f.flourish.tick(&mut f.host, FRAME), "nothing to animate");
        assert!(!f.flourish.is_visible());
        assert!(f.events.borrow().is_empty());
        assert_eq!(f.host.node(f.flourish.panel()).rotations.len(), rotations_before);
    }

    #[test]
    fn show_dismiss_show_notifies_in_order() {
        let mut f = laid_out();
        f.flourish.show(&mut f.host);
        let _ = run(&mut f);
        f.flourish.dismiss(&mut f.host);
        assert_eq!(f.flourish.state(), FlourishState::Dismissing);
        let _ = run(&mut f);
        assert!(!f.host.node(f.flourish.panel()).paintable);
        f.flourish.show(&mut f.host);
        let _ = run(&mut f);
        assert_eq!(*f.events.borrow(), [true, false, true]);
        assert!(f.flourish.is_visible());
    }

    #[test]
    fn back_to_back_show_and_dismiss_only_runs_show() {
        let mut f = laid_out();
        f.flourish.show(&mut f.host);
        f.flourish.dismiss(&mut f.host);
        let _ = run(&mut f);
        assert!(f.flourish.is_visible());
        assert_eq!(*f.events.borrow(), [true]);
    }

    #[test]
    fn animating_only_between_start_and_completion() {
        let mut f = laid_out();
        assert!(!f.flourish.is_animating());
        let seen = Rc::new(Cell::new(None));
        let probe = seen.clone();
        f.flourish.show_then(&mut f.host, move |fl, _| {
            probe.set(Some((fl.is_animating(), fl.is_visible())));
        });
        assert!(f.flourish.is_animating());
        let _ = f.flourish.tick(&mut f.host, FRAME);
        assert!(f.flourish.is_animating());
        let _ = run(&mut f);
        assert!(!f.flourish.is_animating());
        assert_eq!(
            seen.get(),
            Some((false, true)),
            "flags are final before the callback runs"
        );
    }

    #[test]
    fn completion_runs_after_listener() {
        let mut f = laid_out();
        let events = f.events.clone();
        let order = Rc::new(Cell::new(0_usize));
        let probe = order.clone();
        f.flourish.show_then(&mut f.host, move |_, _| {
            probe.set(events.borrow().len());
        });
        let _ = run(&mut f);
        assert_eq!(order.get(), 1, "listener fired before completion");
    }

    #[test]
    fn completion_can_start_next_transition() {
        let mut f = laid_out();
        f.flourish.show(&mut f.host);
        let _ = run(&mut f);
        f.flourish.dismiss_then(&mut f.host, |fl, host| fl.show(host));
        assert!(f.flourish.tick(&mut f.host, Duration::from_millis(100)), "show started from the callback");
        assert_eq!(f.flourish.state(), FlourishState::Showing);
        let _ = run(&mut f);
        assert_eq!(*f.events.borrow(), [true, false, true]);
        assert!(f.flourish.is_visible());
    }

    #[test]
    fn rotation_runs_from_sweep_to_zero_and_back() {
        for orientation in Orientation::ALL {
            let sweep = orientation.sweep_degrees();
            let mut f = fixture(|b| b.orientation(orientation));
            f.host.layout();
            let _ = f.flourish.on_parent_laid_out(&mut f.host);
            let panel = f.flourish.panel();
            f.host.node_mut(panel).rotations.clear();

            // Frames that divide the duration evenly, so both directions sample the same angles.
            let dt = Duration::from_millis(20);
            f.flourish.show(&mut f.host);
            let _ = run_at(&mut f, dt);
            let shown: Vec<f64> = core::mem::take(&mut f.host.node_mut(panel).rotations);
            assert_eq!(shown.first().copied(), Some(sweep), "{orientation:?}");
            assert_eq!(shown.last().map(|r| r.abs()), Some(0.0), "{orientation:?}");

            f.flourish.dismiss(&mut f.host);
            let _ = run_at(&mut f, dt);
            let dismissed: Vec<f64> = f.host.node(panel).rotations.clone();
            assert_eq!(dismissed.first().map(|r| r.abs()), Some(0.0), "{orientation:?}");
            assert_eq!(dismissed.last().copied(), Some(sweep), "{orientation:?}");

            // Same path, opposite direction.
            assert_eq!(shown.len(), dismissed.len(), "{orientation:?}");
            for (a, b) in shown.iter().zip(dismissed.iter().rev()) {
                assert!((a - b).abs() < 1e-9, "{orientation:?}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn empty_layout_defers_pivot() {
        let mut host = TestHost::default();
        let parent = host.container(true, Size::ZERO);
        let mut flourish = FlourishBuilder::new(&host, parent)
            .unwrap()
            .panel_layout("panel")
            .orientation(Orientation::BottomRight)
            .show_on_start(true)
            .build(&mut host)
            .unwrap();

        host.layout();
        assert!(!flourish.on_parent_laid_out(&mut host), "empty size is not a layout");
        assert_eq!(flourish.pivot(), None);
        assert!(!flourish.is_animating(), "queued show still waits");

        host.resize(parent, Size::new(300.0, 200.0));
        host.layout();
        assert!(flourish.on_parent_laid_out(&mut host));
        assert_eq!(flourish.pivot(), Some(Point::new(300.0, 200.0)));
        assert_eq!(host.node(flourish.panel()).pivot_sets, 1);
        assert!(flourish.is_animating());
    }

    #[test]
    fn pivot_resolves_once() {
        let mut f = fixture(|b| b.orientation(Orientation::BottomRight));
        let panel = f.flourish.panel();
        assert!(!f.flourish.on_parent_laid_out(&mut f.host), "no layout yet");
        assert!(!f.flourish.is_laid_out());

        f.host.layout();
        assert!(f.flourish.on_parent_laid_out(&mut f.host));
        assert_eq!(f.flourish.pivot(), Some(Point::new(200.0, 100.0)));
        assert_eq!(f.host.node(panel).pivot, Some(Point::new(200.0, 100.0)));

        f.host.resize(f.flourish.parent(), Size::new(50.0, 50.0));
        f.host.layout();
        assert!(f.flourish.on_parent_laid_out(&mut f.host));
        assert_eq!(f.host.node(panel).pivot_sets, 1);
        assert_eq!(f.flourish.pivot(), Some(Point::new(200.0, 100.0)));
    }

    #[test]
    fn show_before_layout_is_queued() {
        let mut f = fixture(|b| b);
        let done = Rc::new(Cell::new(false));
        let probe = done.clone();
        f.flourish.show_then(&mut f.host, move |_, _| probe.set(true));
        assert_eq!(f.flourish.state(), FlourishState::Hidden);
        assert!(!f.flourish.tick(&mut f.host, FRAME), "nothing runs before layout");

        // Further calls are ignored while the show is queued.
        f.flourish.show(&mut f.host);
        f.flourish.dismiss(&mut f.host);

        f.host.layout();
        assert!(f.flourish.on_parent_laid_out(&mut f.host));
        assert_eq!(f.flourish.state(), FlourishState::Showing);
        let _ = run(&mut f);
        assert!(done.get());
        assert_eq!(*f.events.borrow(), [true]);
    }

    #[test]
    fn dismiss_before_layout_is_ignored() {
        let mut f = fixture(|b| b);
        f.flourish.dismiss(&mut f.host);
        f.host.layout();
        let _ = f.flourish.on_parent_laid_out(&mut f.host);
        assert_eq!(f.flourish.state(), FlourishState::Hidden);
    }

    #[test]
    fn show_on_start_waits_for_layout() {
        let mut f = fixture(|b| b.show_on_start(true).curve(AnimationCurve::Bounce));
        assert!(!f.flourish.is_animating());
        f.host.layout();
        let _ = f.flourish.on_parent_laid_out(&mut f.host);
        assert!(f.flourish.is_animating());
        let _ = run(&mut f);
        assert!(f.flourish.is_visible());
        assert_eq!(*f.events.borrow(), [true]);
    }

    #[test]
    fn clicks_are_absorbed_only_while_painted() {
        let clicks = Rc::new(Cell::new(0_u32));
        let counter = clicks.clone();
        let mut f = fixture(move |b| b.on_click(move || counter.set(counter.get() + 1)));
        f.host.layout();
        let _ = f.flourish.on_parent_laid_out(&mut f.host);

        assert!(!f.flourish.click(), "hidden panel lets clicks through");
        f.flourish.show(&mut f.host);
        assert!(f.flourish.click());
        let _ = run(&mut f);
        assert!(f.flourish.click());
        assert_eq!(clicks.get(), 2);

        f.flourish.dismiss(&mut f.host);
        let _ = run(&mut f);
        assert!(!f.flourish.click());
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn clicks_without_handler_are_still_absorbed() {
        let mut f = laid_out();
        f.flourish.show(&mut f.host);
        let _ = run(&mut f);
        assert!(f.flourish.click());
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let mut f = fixture(|b| b.duration(Duration::ZERO));
        f.host.layout();
        let _ = f.flourish.on_parent_laid_out(&mut f.host);
        f.flourish.show(&mut f.host);
        assert!(!f.flourish.tick(&mut f.host, Duration::ZERO));
        assert!(f.flourish.is_visible());
    }
}
