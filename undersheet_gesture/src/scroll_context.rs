// Copyright 2025 the Undersheet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`ScrollContext`]: pan position tracking and stop resolution.

use undersheet_stops::{Stop, StopContext};

/// Default damping applied to drags past the stop range.
///
/// Observed configurations range from `0.02` to `0.07`; the overshoot should
/// be visible but clearly damped.
pub const DEFAULT_BOUNCE_FACTOR: f64 = 0.06;

/// Which way the accumulated pan is heading along the height axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    TowardLarger,
    TowardSmaller,
}

/// Per-gesture snapshot of pan state against a stable stop set.
///
/// The context is idle until [`ScrollContext::make_snapshot`] arms it at
/// gesture begin; every value read afterwards derives from that snapshot, so
/// an aborted gesture (one that never receives an end event) needs no
/// explicit cancellation. The next snapshot simply re-arms it.
///
/// Positions are measured along the pointer's vertical axis, where moving
/// the pointer up (toward smaller position values) drags the sheet toward a
/// larger height. The accumulated `panning_delta` is therefore
/// `start_position - current_position`: positive means the sheet is growing.
#[derive(Debug, Clone)]
pub struct ScrollContext {
    sensitivity: f64,
    bounce_factor: f64,
    start_position: f64,
    current_position: f64,
    base_height: f64,
    stop_context: StopContext,
    is_interaction_enabled: bool,
    last_nested_scroll_offset: f64,
}

impl ScrollContext {
    /// Creates a context with the given hysteresis sensitivity (clamped to
    /// `[0, 1]`, see [`crate::sensitivity`]) and the default bounce factor.
    #[must_use]
    pub fn new(sensitivity: f64) -> Self {
        Self::with_bounce_factor(sensitivity, DEFAULT_BOUNCE_FACTOR)
    }

    /// Creates a context with an explicit bounce factor.
    #[must_use]
    pub fn with_bounce_factor(sensitivity: f64, bounce_factor: f64) -> Self {
        Self {
            sensitivity: sensitivity.clamp(0.0, 1.0),
            bounce_factor,
            start_position: 0.0,
            current_position: 0.0,
            base_height: 0.0,
            stop_context: StopContext::default(),
            is_interaction_enabled: true,
            last_nested_scroll_offset: 0.0,
        }
    }

    /// Arms the context for a new gesture.
    ///
    /// `start_position` is the pointer position at gesture begin,
    /// `current_height` the sheet height at that moment. The stop context is
    /// copied so the gesture resolves against the stops it started with even
    /// if the live set mutates mid-gesture.
    pub fn make_snapshot(
        &mut self,
        start_position: f64,
        current_height: f64,
        stop_context: &StopContext,
    ) {
        self.start_position = start_position;
        self.current_position = start_position;
        self.base_height = current_height;
        self.stop_context = stop_context.clone();
    }

    /// Records the pointer position for the current move event.
    pub fn update_position(&mut self, position: f64) {
        self.current_position = position;
    }

    /// Re-bases the start position without changing the accumulated height.
    ///
    /// Used while sheet interaction is disabled (the nested content owns the
    /// gesture): the start keeps following the pointer so tracking resumes
    /// cleanly from a zero delta once control returns to the sheet.
    pub fn update_start_position(&mut self, position: f64) {
        self.start_position = position;
    }

    /// The accumulated pan distance; positive means dragging toward a larger
    /// sheet height.
    #[must_use]
    pub fn panning_delta(&self) -> f64 {
        self.start_position - self.current_position
    }

    /// The highest reachable height in this gesture's frame of reference.
    #[must_use]
    pub fn max_height(&self) -> f64 {
        self.stop_context.max_stop().height()
    }

    /// The lowest reachable height in this gesture's frame of reference.
    #[must_use]
    pub fn min_height(&self) -> f64 {
        self.stop_context.min_stop().height()
    }

    /// The stop set snapshot taken at gesture begin.
    #[must_use]
    pub fn stop_context(&self) -> &StopContext {
        &self.stop_context
    }

    /// Whether the sheet currently owns drag input (as opposed to a nested
    /// scrollable region). Toggled by the coordinator policy.
    #[must_use]
    pub fn is_interaction_enabled(&self) -> bool {
        self.is_interaction_enabled
    }

    /// Sets whether the sheet owns drag input.
    pub fn set_interaction_enabled(&mut self, enabled: bool) {
        self.is_interaction_enabled = enabled;
    }

    /// The nested content's scroll offset as of the last nested-scroll event.
    #[must_use]
    pub fn last_nested_scroll_offset(&self) -> f64 {
        self.last_nested_scroll_offset
    }

    /// Records the nested content's scroll offset.
    pub fn set_last_nested_scroll_offset(&mut self, offset: f64) {
        self.last_nested_scroll_offset = offset;
    }

    /// The height to render for the current pan position.
    ///
    /// Inside the stop range this is simply the base height plus the
    /// accumulated delta, unclamped and unrounded. Past either end of the
    /// range the overshoot is replaced by `bounce_factor * delta`, producing
    /// a damped-but-visible rubber-band rather than a hard stop.
    #[must_use]
    pub fn compute_live_position(&self) -> f64 {
        let delta = self.panning_delta();
        let final_height = self.base_height + delta;
        let bounce_offset = self.bounce_factor * delta;
        if final_height >= self.max_height() {
            self.max_height() + bounce_offset
        } else if final_height <= self.min_height() {
            self.min_height() + bounce_offset
        } else {
            final_height
        }
    }

    /// Resolves the stop to settle at when the gesture ends at `height`.
    ///
    /// With fewer than two stops in the snapshot there is nothing to choose;
    /// the single stop (or the snapshot's current stop) wins. Otherwise the
    /// adjacent pair whose range contains `height` decides, with a threshold
    /// of `sensitivity * gap` measured from the stop the drag is moving away
    /// from. The decision depends on the drag direction, not just proximity,
    /// which keeps a stalled drag near a boundary from jittering between
    /// neighbors.
    #[must_use]
    pub fn resolve_target_stop(&self, height: f64) -> Stop {
        let stops = self.stop_context.stops();
        if stops.len() < 2 {
            return stops.first().copied().unwrap_or(self.stop_context.stop());
        }

        for pair in stops.windows(2) {
            let (stop, next) = (pair[0], pair[1]);
            if height > next.height() {
                continue;
            }
            let threshold = self.sensitivity * (next.height() - stop.height());
            return match self.direction() {
                Direction::TowardLarger => {
                    if height >= stop.height() + threshold {
                        next
                    } else {
                        stop
                    }
                }
                Direction::TowardSmaller => {
                    if height <= next.height() - threshold {
                        stop
                    } else {
                        next
                    }
                }
            };
        }
        self.stop_context.max_stop()
    }

    /// `true` when `height` is outside the snapshot's stop range.
    ///
    /// A release from out of range rubber-bands back without changing the
    /// committed stop, but a bounce notification should still fire.
    #[must_use]
    pub fn is_bouncing_back(&self, height: f64) -> bool {
        height > self.max_height() || height < self.min_height()
    }

    /// A zero delta counts as dragging toward a larger height.
    fn direction(&self) -> Direction {
        if self.panning_delta() >= 0.0 {
            Direction::TowardLarger
        } else {
            Direction::TowardSmaller
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensitivity;

    fn armed_context(sensitivity: f64, base_height: f64) -> ScrollContext {
        let stops = [Stop::fixed(100.0), Stop::fixed(400.0), Stop::fixed(800.0)];
        let mut stop_context = StopContext::new(&stops, Some(Stop::fixed(100.0)));
        stop_context.calibrate(1000.0);

        let mut context = ScrollContext::new(sensitivity);
        context.make_snapshot(0.0, base_height, &stop_context);
        context
    }

    fn drag_to_delta(context: &mut ScrollContext, delta: f64) {
        // Pointer moving up the screen (negative position) grows the sheet.
        context.update_position(-delta);
    }

    #[test]
    fn live_position_tracks_delta_within_range() {
        let mut context = armed_context(sensitivity::MEDIUM, 100.0);
        drag_to_delta(&mut context, 150.0);
        assert_eq!(context.compute_live_position(), 250.0);

        drag_to_delta(&mut context, -50.0);
        // Base 100 - 50 = 50 is below the minimum stop: bounce applies.
        assert_eq!(context.compute_live_position(), 100.0 + 0.06 * -50.0);
    }

    #[test]
    fn live_position_overshoots_past_max_with_damping() {
        let stops = [Stop::fixed(100.0), Stop::fixed(800.0)];
        let mut stop_context = StopContext::new(&stops, None);
        stop_context.calibrate(1000.0);

        let mut context = ScrollContext::with_bounce_factor(sensitivity::MEDIUM, 0.05);
        context.make_snapshot(0.0, 500.0, &stop_context);
        drag_to_delta(&mut context, 600.0);

        // 500 + 600 exceeds 800, so the result is max + 0.05 * delta.
        assert_eq!(context.compute_live_position(), 830.0);
        assert!(context.is_bouncing_back(830.0));
        assert!(!context.is_bouncing_back(500.0));
    }

    #[test]
    fn resolve_snaps_past_the_midpoint_when_dragging_up() {
        let mut context = armed_context(sensitivity::MEDIUM, 100.0);
        drag_to_delta(&mut context, 160.0);

        // Pair (100, 400), threshold 150: 260 >= 250 snaps to 400.
        assert_eq!(context.resolve_target_stop(260.0), Stop::fixed(400.0));
        // 240 < 250 stays at 100.
        assert_eq!(context.resolve_target_stop(240.0), Stop::fixed(100.0));
    }

    #[test]
    fn resolve_holds_the_upper_stop_when_dragging_down_short_of_threshold() {
        let mut context = armed_context(sensitivity::MEDIUM, 400.0);
        drag_to_delta(&mut context, -140.0);

        // Dragging down, threshold from the top: 400 - 150 = 250.
        assert_eq!(context.resolve_target_stop(260.0), Stop::fixed(400.0));
        assert_eq!(context.resolve_target_stop(240.0), Stop::fixed(100.0));
    }

    #[test]
    fn resolve_is_direction_asymmetric_at_the_same_height() {
        // With a sensitivity other than the midpoint, the same release
        // height resolves differently depending on drag direction.
        let mut up = armed_context(sensitivity::HIGH, 100.0);
        drag_to_delta(&mut up, 160.0);
        // Threshold 0.25 * 300 = 75 from the lower stop: 260 >= 175.
        assert_eq!(up.resolve_target_stop(260.0), Stop::fixed(400.0));

        let mut down = armed_context(sensitivity::HIGH, 400.0);
        drag_to_delta(&mut down, -140.0);
        // Threshold from the upper stop: 400 - 75 = 325, and 260 <= 325.
        assert_eq!(down.resolve_target_stop(260.0), Stop::fixed(100.0));
    }

    #[test]
    fn resolve_with_a_single_stop_returns_it() {
        let mut stop_context = StopContext::new(&[Stop::fixed(300.0)], None);
        stop_context.calibrate(1000.0);

        let mut context = ScrollContext::new(sensitivity::MEDIUM);
        context.make_snapshot(0.0, 300.0, &stop_context);
        assert_eq!(context.resolve_target_stop(500.0), Stop::fixed(300.0));
    }

    #[test]
    fn resolve_above_every_stop_returns_max() {
        let mut context = armed_context(sensitivity::MEDIUM, 800.0);
        drag_to_delta(&mut context, 100.0);
        assert_eq!(context.resolve_target_stop(900.0), Stop::fixed(800.0));
    }

    #[test]
    fn resolve_at_zero_delta_counts_as_upward() {
        let context = armed_context(sensitivity::NONE, 100.0);
        // Sensitivity 1.0 requires reaching the neighbor's own height.
        assert_eq!(context.resolve_target_stop(399.0), Stop::fixed(100.0));
        assert_eq!(context.resolve_target_stop(400.0), Stop::fixed(400.0));
    }

    #[test]
    fn rebasing_start_position_resumes_from_zero_delta() {
        let mut context = armed_context(sensitivity::MEDIUM, 100.0);
        context.set_interaction_enabled(false);

        // While the nested content owns the gesture, only the start moves.
        context.update_start_position(-80.0);
        context.update_position(-80.0);
        assert_eq!(context.panning_delta(), 0.0);
        assert_eq!(context.compute_live_position(), 100.0);

        // Control returns to the sheet; tracking picks up from here.
        context.set_interaction_enabled(true);
        context.update_position(-130.0);
        assert_eq!(context.compute_live_position(), 150.0);
    }

    #[test]
    fn snapshot_isolates_the_gesture_from_live_stop_mutation() {
        let stops = [Stop::fixed(100.0), Stop::fixed(400.0)];
        let mut live = StopContext::new(&stops, None);
        live.calibrate(1000.0);

        let mut context = ScrollContext::new(sensitivity::MEDIUM);
        context.make_snapshot(0.0, 100.0, &live);

        // The live set shrinks mid-gesture; the snapshot is unaffected.
        live.make_snapshot(&[Stop::fixed(100.0)], None, 1000.0);
        assert_eq!(context.max_height(), 400.0);
        assert_eq!(context.resolve_target_stop(300.0), Stop::fixed(400.0));
    }
}
