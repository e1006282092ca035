// Copyright 2025 the Flourish Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interpolation curves applied to animation progress.

/// Interpolation applied to the `[0, 1]` progress of a transition.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AnimationCurve {
    /// Constant speed.
    #[default]
    Normal,
    /// Starts slow and speeds up (quadratic).
    Accelerate,
    /// Lands with a few decaying bounces.
    Bounce,
    /// Flings past the end and settles back.
    Overshoot,
}

/// Tension used by [`AnimationCurve::Overshoot`].
const OVERSHOOT_TENSION: f64 = 2.0;

impl AnimationCurve {
    /// Map progress `t` to the eased fraction.
    ///
    /// `t` is clamped to `[0, 1]`. Every curve maps `0` to `0` and `1` to `1`;
    /// only [`Overshoot`](Self::Overshoot) leaves `[0, 1]` in between.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Normal => t,
            Self::Accelerate => t * t,
            // The last bounce lands a hair past 1; snap so the final frame is exact.
            Self::Bounce if t >= 1.0 => 1.0,
            Self::Bounce => bounce(t),
            Self::Overshoot => {
                let s = t - 1.0;
                s * s * ((OVERSHOOT_TENSION + 1.0) * s + OVERSHOOT_TENSION) + 1.0
            }
        }
    }
}

fn bounce(t: f64) -> f64 {
    fn parabola(t: f64) -> f64 {
        t * t * 8.0
    }
    let t = t * 1.1226;
    if t < 0.3535 {
        parabola(t)
    } else if t < 0.7408 {
        parabola(t - 0.54719) + 0.7
    } else if t < 0.9644 {
        parabola(t - 0.8526) + 0.9
    } else {
        parabola(t - 1.0435) + 0.95
    }
}
