// Copyright 2025 the Undersheet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Undersheet Controller: the orchestrating layer of a snap-stop bottom
//! sheet.
//!
//! A [`SheetController`] ties the lower layers together: the live
//! [`StopContext`](undersheet_stops::StopContext), the per-gesture
//! [`ScrollContext`](undersheet_gesture::ScrollContext), an arbitration
//! [`Coordinator`](undersheet_coordinator::Coordinator), and a stack of
//! [`SheetContent`]s. It owns no views and runs no animations; the host
//! feeds it pointer translations and nested scroll offsets, and in return
//! gets the height to render, [`MoveRequest`]s to animate, and a queue of
//! [`SheetEvent`]s to react to.
//!
//! The central contract is the move handshake: every path that changes the
//! sheet's stop hands the host a [`MoveRequest`], and nothing commits until
//! the host reports the animation outcome through
//! [`SheetController::complete_move`]. Interrupted or superseded animations
//! therefore never leave the controller believing the sheet is somewhere it
//! is not.
//!
//! ```rust
//! use kurbo::Point;
//! use undersheet_controller::{PanPhase, SheetController, SheetEvent, SheetStyle};
//! use undersheet_stops::Stop;
//!
//! let mut controller = SheetController::new(SheetStyle::default());
//! controller.set_available_height(1000.0);
//!
//! let request = controller.update_stops(
//!     &[Stop::fixed(100.0), Stop::percentage(0.8)],
//!     Some(Stop::fixed(100.0)),
//! );
//! assert_eq!(request.height, 100.0);
//! controller.complete_move(true);
//! assert_eq!(controller.current_height(), 100.0);
//!
//! // Drag 400 units up the screen and release: past the midpoint, the
//! // sheet settles at the large stop.
//! controller.on_pan(PanPhase::Began, Point::new(0.0, 700.0));
//! controller.on_pan(PanPhase::Changed, Point::new(0.0, 300.0));
//! let request = controller.on_pan(PanPhase::Ended, Point::new(0.0, 300.0)).unwrap();
//! assert_eq!(request.target, Stop::percentage(0.8));
//! controller.complete_move(true);
//!
//! assert!(controller.take_events().iter().any(|event| matches!(
//!     event,
//!     SheetEvent::DidMove { .. },
//! )));
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): use the standard library for floating
//!   point arithmetic.
//! - `libm`: use floating point implementations from [libm][]. Enable this
//!   for `no_std` targets without `std`.
//!
//! [libm]: https://crates.io/crates/libm

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod content;
mod controller;
mod events;
mod style;

pub use content::{ContentId, SheetContent};
pub use controller::{MoveRequest, PanPhase, SheetController};
pub use events::SheetEvent;
pub use style::SheetStyle;
