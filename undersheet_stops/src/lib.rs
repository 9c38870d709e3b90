// Copyright 2025 the Undersheet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Undersheet Stops: the snap-stop data model for a draggable sheet surface.
//!
//! A sheet rests at one of a small set of heights, its *stops*. This crate
//! provides:
//!
//! - [`Stop`]: an immutable snap target, described either as a fixed length
//!   or as a percentage of the runtime available height, with an optional
//!   upper-bound flag.
//! - [`StopContext`]: the owner of the active stop set and the current stop.
//!   It calibrates the set against the available height (measure, sort,
//!   truncate past the first upper bound), validates move targets, and
//!   commits stop transitions.
//!
//! The crate knows nothing about views, gestures, or animation. Host
//! frameworks measure the available height themselves and feed it in; every
//! operation is total over its input domain, so degenerate input (empty stop
//! lists, out-of-range percentages, stale stop references) is absorbed by
//! clamping or substitution rather than reported as an error. This matters
//! because calibration typically runs inside animation and gesture callbacks
//! where an error has no recovery path.
//!
//! ## Minimal example
//!
//! ```rust
//! use undersheet_stops::{Stop, StopContext};
//!
//! let stops = [Stop::fixed(100.0), Stop::percentage(0.5), Stop::full()];
//! let mut context = StopContext::new(&stops, None);
//!
//! // Calibrate against the height the host currently has to offer.
//! context.calibrate(800.0);
//! assert_eq!(context.min_stop().height(), 100.0);
//! assert_eq!(context.max_stop().height(), 800.0);
//!
//! // Commit a transition; the previous stop comes back exactly once.
//! let target = context.calibrate_target(Stop::percentage(0.5));
//! assert!(context.can_move(target, true));
//! let previous = context.invalidate(target);
//! assert_eq!(previous, Some(Stop::closed()));
//! assert_eq!(context.invalidate(target), None);
//! ```
//!
//! ## Upper bounds
//!
//! A stop flagged as an upper bound is a caller-declared ceiling: after
//! calibration the stop set never extends past the first upper-bound stop,
//! so stops that measure higher are unreachable and dropped.
//!
//! ```rust
//! use undersheet_stops::{Stop, StopContext};
//!
//! let stops = [
//!     Stop::fixed(100.0),
//!     Stop::fixed(400.0).upper_bound(),
//!     Stop::fixed(700.0),
//! ];
//! let mut context = StopContext::new(&stops, None);
//! context.calibrate(1000.0);
//!
//! assert_eq!(context.stops().len(), 2);
//! assert_eq!(context.max_stop().height(), 400.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod context;
mod stop;

pub use context::StopContext;
pub use stop::{Stop, StopKind};
