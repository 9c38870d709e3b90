// Copyright 2025 the Undersheet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Undersheet Coordinator: who owns the current drag, the sheet or its
//! nested scrollable content?
//!
//! When a sheet hosts a scrollable region, both want the same vertical
//! gesture. Without arbitration they fight over it: the list scrolls while
//! the sheet also moves, or neither reacts. A [`Coordinator`] is the policy
//! that settles the fight using only two signals, the sign of the nested
//! scroll offset delta and the sheet's position relative to its stop range:
//!
//! - When nested scrolling begins, the content owns the gesture and sheet
//!   interaction is disabled.
//! - Scrolling toward the content's top edge (offset at or below zero)
//!   hands the gesture back to the sheet and clamps the nested offset to
//!   zero, so further downward drag collapses the sheet instead of
//!   over-scrolling the content.
//! - Scrolling deeper into the content while the sheet has not reached its
//!   maximum height also hands the gesture back and clamps, so the sheet
//!   finishes expanding before the content is allowed to scroll.
//! - When nested scrolling ends, the sheet unconditionally regains
//!   interaction for the next drag.
//!
//! The coordinator never touches the host's scroll region directly; when a
//! clamp is required it returns [`NestedScrollAction::ClampToTop`] and the
//! host applies it. All state it toggles lives on the
//! [`ScrollContext`](undersheet_gesture::ScrollContext) passed into each
//! call, so policies themselves can stay stateless.
//!
//! [`DefaultCoordinator`] implements the policy above. Hosts with special
//! needs (for example, a map view that should always own horizontal pans)
//! implement [`Coordinator`] themselves and install it on the controller.
//!
//! ```rust
//! use undersheet_coordinator::{Coordinator, DefaultCoordinator, NestedScrollAction};
//! use undersheet_gesture::{ScrollContext, sensitivity};
//! use undersheet_stops::{Stop, StopContext};
//!
//! let mut stops = StopContext::new(&[Stop::fixed(100.0), Stop::fixed(400.0)], None);
//! stops.calibrate(1000.0);
//! let mut gesture = ScrollContext::new(sensitivity::MEDIUM);
//! gesture.make_snapshot(0.0, 400.0, &stops);
//!
//! let mut coordinator = DefaultCoordinator;
//! coordinator.on_nested_scroll_began(&mut gesture, 0.0);
//! assert!(!gesture.is_interaction_enabled());
//!
//! // Pulling the content past its top edge returns the gesture to the sheet.
//! let action = coordinator.on_nested_scroll_changed(&mut gesture, 400.0, -12.0);
//! assert_eq!(action, NestedScrollAction::ClampToTop);
//! assert!(gesture.is_interaction_enabled());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use undersheet_gesture::ScrollContext;

/// What the host should do with its nested scroll region after an
/// arbitration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedScrollAction {
    /// Let the nested scroll proceed as the content reported it.
    Proceed,
    /// Reset the nested scroll offset to zero; the sheet absorbs the rest of
    /// the gesture.
    ClampToTop,
}

/// The interaction target a gesture starts on, as resolved by the host's
/// hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureTarget {
    /// Whether the target lies inside a nested scrollable region.
    pub is_scroll_region: bool,
}

impl GestureTarget {
    /// A target inside a nested scrollable region.
    #[must_use]
    pub const fn scroll_region() -> Self {
        Self {
            is_scroll_region: true,
        }
    }

    /// A target outside any nested scrollable region.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            is_scroll_region: false,
        }
    }
}

/// Arbitration policy between a sheet and its nested scrollable content.
///
/// A policy decides whether the sheet claims a fresh gesture for itself and
/// relays the nested content's scroll lifecycle into the interaction-enabled
/// flag on the [`ScrollContext`]. The context is passed into every call
/// rather than held by the policy, so the controller stays the single owner
/// of gesture state.
pub trait Coordinator {
    /// Whether the sheet should claim a gesture beginning on `target`.
    fn should_handle_gesture(&self, target: GestureTarget) -> bool;

    /// The nested content began scrolling at `offset`.
    fn on_nested_scroll_began(&mut self, scroll: &mut ScrollContext, offset: f64);

    /// The nested content scrolled to `offset` while the sheet stands at
    /// `current_height`. Returns the adjustment the host must apply.
    fn on_nested_scroll_changed(
        &mut self,
        scroll: &mut ScrollContext,
        current_height: f64,
        offset: f64,
    ) -> NestedScrollAction;

    /// The nested content finished scrolling (including deceleration).
    fn on_nested_scroll_ended(&mut self, scroll: &mut ScrollContext);
}

/// The stock arbitration policy described in the crate documentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCoordinator;

impl Coordinator for DefaultCoordinator {
    /// The sheet drags as a whole unless the pointer starts inside
    /// scrollable content.
    fn should_handle_gesture(&self, target: GestureTarget) -> bool {
        !target.is_scroll_region
    }

    fn on_nested_scroll_began(&mut self, scroll: &mut ScrollContext, offset: f64) {
        scroll.set_last_nested_scroll_offset(offset);
        scroll.set_interaction_enabled(false);
    }

    fn on_nested_scroll_changed(
        &mut self,
        scroll: &mut ScrollContext,
        current_height: f64,
        offset: f64,
    ) -> NestedScrollAction {
        let last = scroll.last_nested_scroll_offset();
        let mut action = NestedScrollAction::Proceed;
        let mut settled_offset = offset;

        if last > offset {
            // Scrolling toward the content's top edge.
            if offset <= 0.0 {
                settled_offset = 0.0;
                action = NestedScrollAction::ClampToTop;
                scroll.set_interaction_enabled(true);
            }
        } else if last < offset {
            // Scrolling deeper into the content.
            if current_height < scroll.max_height() {
                settled_offset = 0.0;
                action = NestedScrollAction::ClampToTop;
                scroll.set_interaction_enabled(true);
            } else {
                scroll.set_interaction_enabled(false);
            }
        }

        scroll.set_last_nested_scroll_offset(settled_offset);
        action
    }

    fn on_nested_scroll_ended(&mut self, scroll: &mut ScrollContext) {
        scroll.set_interaction_enabled(true);
    }
}
