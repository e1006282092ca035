// Copyright 2025 the Flourish Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Orientation resolver: pivot corner and sweep angle per orientation.

use kurbo::{Point, Size};

/// Magnitude of the rotation between the hidden and the shown panel, in degrees.
pub const SWEEP_MAGNITUDE: f64 = 90.0;

/// Corner of the panel that stays anchored while it unfolds.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Orientation {
    /// Anchored at the top-left corner.
    #[default]
    TopLeft,
    /// Anchored at the top-right corner.
    TopRight,
    /// Anchored at the bottom-left corner.
    BottomLeft,
    /// Anchored at the bottom-right corner.
    BottomRight,
}

/// Pivot and sweep resolved for a concrete panel size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolved {
    /// Rotation pivot in the panel's own coordinates.
    pub pivot: Point,
    /// Rotation of the fully hidden panel, in degrees (positive is clockwise, y-down).
    pub sweep_degrees: f64,
}

impl Orientation {
    /// All orientations, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// The anchored corner of a panel of the given size.
    pub fn pivot(self, size: Size) -> Point {
        match self {
            Self::TopLeft => Point::new(0.0, 0.0),
            Self::TopRight => Point::new(size.width, 0.0),
            Self::BottomLeft => Point::new(0.0, size.height),
            Self::BottomRight => Point::new(size.width, size.height),
        }
    }

    /// Signed rotation of the fully hidden panel.
    ///
    /// The sign swings the panel out through the parent edge next to the pivot:
    /// upwards for the top corners, downwards for the bottom ones.
    /// Show and dismiss both travel between this angle and zero.
    pub fn sweep_degrees(self) -> f64 {
        match self {
            Self::TopLeft | Self::BottomRight => -SWEEP_MAGNITUDE,
            Self::TopRight | Self::BottomLeft => SWEEP_MAGNITUDE,
        }
    }

    /// Resolve pivot and sweep together.
    pub fn resolve(self, size: Size) -> Resolved {
        Resolved {
            pivot: self.pivot(size),
            sweep_degrees: self.sweep_degrees(),
        }
    }
}
