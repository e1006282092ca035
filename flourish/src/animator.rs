// Copyright 2025 the Flourish Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single time-driven value animation.
//!
//! The animator does not own a clock. The host advances it with the elapsed
//! time of each frame, and every [`tick`](ValueAnimator::tick) yields one sample.

use core::time::Duration;

use crate::curve::AnimationCurve;

/// Interpolates from `from` to `to` over `duration`, eased by a curve.
///
/// Elapsed time accumulates as a [`Duration`], so many small ticks land
/// exactly on the end without float drift.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ValueAnimator {
    from: f64,
    to: f64,
    duration: Duration,
    curve: AnimationCurve,
    elapsed: Duration,
    ticked: bool,
}

impl ValueAnimator {
    /// Create an animator at progress zero.
    pub fn new(from: f64, to: f64, duration: Duration, curve: AnimationCurve) -> Self {
        Self {
            from,
            to,
            duration,
            curve,
            elapsed: Duration::ZERO,
            ticked: false,
        }
    }

    /// Advance by `dt` and return the new value.
    ///
    /// Time past the end is discarded; the value stays at `to`.
    pub fn tick(&mut self, dt: Duration) -> f64 {
        self.ticked = true;
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.value()
    }

    /// Linear progress in `[0, 1]`, before easing.
    ///
    /// A zero-length animation reports `0` until its first tick, then `1`.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return if self.ticked { 1.0 } else { 0.0 };
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Current eased value.
    pub fn value(&self) -> f64 {
        self.from + (self.to - self.from) * self.curve.apply(self.progress())
    }

    /// Whether the final sample has been delivered.
    pub fn is_finished(&self) -> bool {
        self.ticked && self.elapsed >= self.duration
    }

    /// Total duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}
