// Copyright 2025 the Undersheet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named scroll sensitivity levels.
//!
//! Sensitivity is the hysteresis factor in `[0, 1]` controlling how far a
//! drag must travel past a stop before the gesture snaps to the neighboring
//! stop. `0.0` switches to the neighbor at the first unit of travel toward
//! it (maximal sensitivity); `1.0` never switches early and requires
//! reaching the neighbor's own height (minimal sensitivity).

/// Never snap early; the drag must reach the neighboring stop's height.
pub const NONE: f64 = 1.0;

/// Snap after three quarters of the distance to the neighbor.
pub const LOW: f64 = 0.75;

/// Snap past the midpoint between adjacent stops.
pub const MEDIUM: f64 = 0.5;

/// Snap after a quarter of the distance to the neighbor.
pub const HIGH: f64 = 0.25;

/// Snap at the first unit of travel toward the neighbor.
pub const ULTRA: f64 = 0.0;
