// Copyright 2025 the Flourish Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Host`](crate::Host) implementations for concrete view trees.
//!
//! Enabled via feature flags to keep the core small and `no_std` by default.

#[cfg(feature = "scene_adapter")]
pub mod scene;
