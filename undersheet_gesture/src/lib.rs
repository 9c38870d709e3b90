// Copyright 2025 the Undersheet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Undersheet Gesture: the per-gesture pan/scroll state machine.
//!
//! A [`ScrollContext`] converts raw pointer movement along the vertical axis
//! into a live sheet height and, when the gesture ends, into a target
//! [`Stop`](undersheet_stops::Stop). One instance persists across gestures;
//! [`ScrollContext::make_snapshot`] re-arms it at every gesture begin with
//! the start position, the sheet height at that moment, and a copy of the
//! active [`StopContext`](undersheet_stops::StopContext). The copy is the
//! gesture's frame of reference: even if another source mutates the live
//! stop set mid-gesture (say, a text box growing), the gesture in flight
//! completes against the stops it started with.
//!
//! Three calculations live here:
//!
//! - [`ScrollContext::compute_live_position`]: the height to render while
//!   the finger is down, with a damped rubber-band overshoot beyond the stop
//!   range instead of a hard clamp.
//! - [`ScrollContext::resolve_target_stop`]: the stop to settle at on
//!   release, using a direction-aware hysteresis threshold scaled by the
//!   [`sensitivity`] level so a stalled drag near a boundary does not
//!   jitter between neighbors.
//! - [`ScrollContext::is_bouncing_back`]: whether the release height is out
//!   of range, in which case the committed stop does not change but the host
//!   should still fire a bounce notification.
//!
//! ```rust
//! use undersheet_gesture::{ScrollContext, sensitivity};
//! use undersheet_stops::{Stop, StopContext};
//!
//! let mut stops = StopContext::new(&[Stop::fixed(100.0), Stop::fixed(400.0)], None);
//! stops.calibrate(1000.0);
//!
//! let mut gesture = ScrollContext::new(sensitivity::MEDIUM);
//! gesture.make_snapshot(0.0, 100.0, &stops);
//!
//! // Finger moves 200 units up the screen: position decreases.
//! gesture.update_position(-200.0);
//! assert_eq!(gesture.compute_live_position(), 300.0);
//!
//! // Past the midpoint while dragging upward: snap to the larger stop.
//! let target = gesture.resolve_target_stop(300.0);
//! assert_eq!(target, Stop::fixed(400.0));
//! ```
//!
//! The gesture/content arbitration flags ([`ScrollContext::is_interaction_enabled`],
//! [`ScrollContext::last_nested_scroll_offset`]) also live on the context so
//! a coordinator policy can toggle them between move events; see the
//! `undersheet_coordinator` crate.
//!
//! This crate is `no_std`.

#![no_std]

mod scroll_context;
pub mod sensitivity;

pub use scroll_context::{DEFAULT_BOUNCE_FACTOR, ScrollContext};
