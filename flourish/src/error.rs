// Copyright 2025 the Flourish Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported while configuring a [`Flourish`](crate::Flourish).

use core::fmt;

/// Reasons a [`FlourishBuilder`](crate::FlourishBuilder) cannot produce a controller.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FlourishError {
    /// The parent cannot hold overlay children (for example a linear-flow container).
    InvalidParent,
    /// Neither a panel node nor a panel layout was supplied.
    MissingPanel,
    /// The panel node was already attached by an earlier build.
    PanelAlreadyAttached,
}

impl fmt::Display for FlourishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParent => f.write_str("parent does not support overlay children"),
            Self::MissingPanel => f.write_str("no panel or panel layout was set"),
            Self::PanelAlreadyAttached => {
                f.write_str("panel node is already attached to a controller")
            }
        }
    }
}

impl core::error::Error for FlourishError {}
