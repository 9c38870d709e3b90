// Copyright 2025 the Undersheet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`StopContext`]: owner of the active stop set and the current stop.

use smallvec::SmallVec;

use crate::Stop;

/// Stop sets are tiny in practice (two to four entries), so keep them inline.
type StopSet = SmallVec<[Stop; 4]>;

/// Tracks the active stop set and the sheet's current stop.
///
/// The context is the single authority for which stops are reachable and
/// where the sheet currently rests. [`StopContext::calibrate`] re-measures
/// the set against the runtime available height, sorts it ascending, and
/// truncates it at the first upper-bound stop; after calibration the set is
/// never empty (a degenerate input falls back to the [`Stop::closed`]
/// sentinel alone).
///
/// Transitions go through [`StopContext::can_move`] (validation),
/// [`StopContext::calibrate_target`] (stale-reference substitution), and
/// [`StopContext::invalidate`] (commit). None of these can fail: invalid
/// requests are absorbed by substitution or no-ops, because they run inside
/// animation callbacks where an error has no recovery path.
#[derive(Debug, Clone)]
pub struct StopContext {
    stops: StopSet,
    stop: Stop,
    /// The height used by the last calibration. Kept so that stops handed in
    /// after calibration (for example a move target) can be measured against
    /// the same frame of reference.
    available_height: f64,
}

impl StopContext {
    /// Creates a context over `stops`, resting at `stop`.
    ///
    /// A `None` stop defaults to [`Stop::closed`]. The context is
    /// uncalibrated until [`StopContext::calibrate`] is called; queries that
    /// depend on measured heights return zeros until then.
    #[must_use]
    pub fn new(stops: &[Stop], stop: Option<Stop>) -> Self {
        Self {
            stops: StopSet::from_slice(stops),
            stop: stop.unwrap_or(Stop::closed()),
            available_height: 0.0,
        }
    }

    /// `true` when the sheet rests at the [`Stop::closed`] sentinel.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.stop == Stop::closed()
    }

    /// The current stop.
    #[must_use]
    pub fn stop(&self) -> Stop {
        self.stop
    }

    /// The active stop set, sorted ascending by measured height after
    /// calibration.
    #[must_use]
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// The highest reachable stop, falling back to the current stop when the
    /// set is empty (possible only before the first calibration).
    #[must_use]
    pub fn max_stop(&self) -> Stop {
        self.stops.last().copied().unwrap_or(self.stop)
    }

    /// The lowest reachable stop, with the same fallback as
    /// [`StopContext::max_stop`].
    #[must_use]
    pub fn min_stop(&self) -> Stop {
        self.stops.first().copied().unwrap_or(self.stop)
    }

    /// `true` when the sheet rests at [`StopContext::max_stop`].
    ///
    /// Combine with [`StopContext::is_hidden`] when you need "visible and
    /// fully expanded": a closed sheet whose set has shrunk to the sentinel
    /// alone reports `true` here as well.
    #[must_use]
    pub fn has_reached_max_stop(&self) -> bool {
        self.max_stop() == self.stop
    }

    /// `true` when the sheet rests at [`StopContext::min_stop`].
    #[must_use]
    pub fn has_reached_min_stop(&self) -> bool {
        self.min_stop() == self.stop
    }

    /// The height used by the most recent calibration.
    #[must_use]
    pub fn available_height(&self) -> f64 {
        self.available_height
    }

    /// Re-measures every stop (including the current one) against
    /// `available_height`, sorts the set ascending, and truncates it past the
    /// first upper-bound stop.
    ///
    /// Idempotent: calibrating twice with the same height yields the same
    /// set and stop.
    pub fn calibrate(&mut self, available_height: f64) {
        self.available_height = available_height;
        self.stop = self.stop.measured(available_height);
        let mut measured: StopSet = self
            .stops
            .iter()
            .map(|stop| stop.measured(available_height))
            .collect();
        measured.sort_by(Stop::cmp_measured);
        if let Some(index) = measured.iter().position(|stop| stop.is_upper_bound()) {
            measured.truncate(index + 1);
        }
        if measured.is_empty() {
            measured.push(Stop::closed().measured(available_height));
        }
        self.stops = measured;
    }

    /// Replaces the stop set (and optionally the current stop) and calibrates
    /// in one step.
    pub fn make_snapshot(&mut self, stops: &[Stop], stop: Option<Stop>, available_height: f64) {
        self.stops = StopSet::from_slice(stops);
        if let Some(stop) = stop {
            self.stop = stop;
        }
        self.calibrate(available_height);
    }

    /// Whether `target` is a legal move destination.
    ///
    /// A target is legal when it is the [`Stop::closed`] sentinel or a member
    /// of the active set. With `distinct`, moving to the current stop is
    /// additionally rejected so callers can suppress redundant transitions.
    #[must_use]
    pub fn can_move(&self, target: Stop, distinct: bool) -> bool {
        self.is_reachable(target) && (!distinct || self.stop != target)
    }

    /// Resolves a possibly stale stop reference against the active set.
    ///
    /// Returns the measured member equal to `target`, or the measured
    /// sentinel for [`Stop::closed`]. Any other non-member substitutes
    /// [`StopContext::max_stop`]; a caller holding a stop from before a live
    /// set shrink gets the closest still-valid ceiling instead of a silent
    /// failure.
    #[must_use]
    pub fn calibrate_target(&self, target: Stop) -> Stop {
        if target == Stop::closed() {
            return target.measured(self.available_height);
        }
        self.stops
            .iter()
            .find(|stop| **stop == target)
            .copied()
            .unwrap_or_else(|| self.max_stop())
    }

    /// Commits a stop transition.
    ///
    /// Returns the previous stop when the transition is a real change, or
    /// `None` when `target` already is the current stop, letting the caller
    /// fire a moved notification exactly once per change.
    pub fn invalidate(&mut self, target: Stop) -> Option<Stop> {
        if self.stop == target {
            return None;
        }
        let previous = self.stop;
        self.stop = target;
        Some(previous)
    }

    fn is_reachable(&self, stop: Stop) -> bool {
        stop == Stop::closed() || self.stops.contains(&stop)
    }
}

impl Default for StopContext {
    /// A context holding only the [`Stop::closed`] sentinel.
    fn default() -> Self {
        Self::new(&[Stop::closed()], None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_stop_context() -> StopContext {
        let stops = [Stop::fixed(100.0), Stop::fixed(400.0), Stop::fixed(800.0)];
        let mut context = StopContext::new(&stops, Some(Stop::fixed(100.0)));
        context.calibrate(1000.0);
        context
    }

    #[test]
    fn calibrate_sorts_ascending_by_measured_height() {
        let stops = [Stop::fixed(800.0), Stop::percentage(0.1), Stop::fixed(400.0)];
        let mut context = StopContext::new(&stops, None);
        context.calibrate(1000.0);

        let heights: alloc::vec::Vec<f64> =
            context.stops().iter().map(|s| s.height()).collect();
        assert_eq!(heights, [100.0, 400.0, 800.0]);
    }

    #[test]
    fn calibrate_truncates_past_the_upper_bound() {
        let stops = [
            Stop::fixed(100.0),
            Stop::fixed(400.0).upper_bound(),
            Stop::fixed(300.0),
            Stop::fixed(700.0),
        ];
        let mut context = StopContext::new(&stops, None);
        context.calibrate(1000.0);

        assert_eq!(context.stops().len(), 3);
        let ceiling = context.max_stop();
        assert!(ceiling.is_upper_bound());
        for stop in context.stops() {
            assert!(
                stop.height() <= ceiling.height(),
                "no stop may exceed the upper bound"
            );
        }
    }

    #[test]
    fn calibrate_keeps_equal_height_stops_under_the_ceiling() {
        // Both fixed stops cap at the available height; the upper bound must
        // still end up last so it stays the authoritative maximum.
        let stops = [Stop::fixed(500.0), Stop::fixed(600.0).upper_bound()];
        let mut context = StopContext::new(&stops, None);
        context.calibrate(300.0);

        assert_eq!(context.stops().len(), 2);
        assert!(context.max_stop().is_upper_bound());
        assert_eq!(context.max_stop().height(), 300.0);
    }

    #[test]
    fn calibrate_empty_set_falls_back_to_closed() {
        let mut context = StopContext::new(&[], None);
        context.calibrate(1000.0);

        assert_eq!(context.stops(), &[Stop::closed()]);
        assert!(context.is_hidden());
    }

    #[test]
    fn calibrate_is_idempotent() {
        let mut context = three_stop_context();
        let stops_before: alloc::vec::Vec<Stop> = context.stops().to_vec();
        let stop_before = context.stop();

        context.calibrate(1000.0);
        assert_eq!(context.stops(), &stops_before[..]);
        assert_eq!(context.stop(), stop_before);
    }

    #[test]
    fn make_snapshot_replaces_and_calibrates() {
        let mut context = three_stop_context();
        context.make_snapshot(
            &[Stop::fixed(200.0), Stop::fixed(600.0)],
            Some(Stop::fixed(600.0)),
            1000.0,
        );

        assert_eq!(context.stops().len(), 2);
        assert_eq!(context.stop(), Stop::fixed(600.0));
        assert_eq!(context.stop().height(), 600.0);
    }

    #[test]
    fn invalidate_returns_previous_once() {
        let mut context = three_stop_context();
        let target = context.calibrate_target(Stop::fixed(400.0));

        assert_eq!(context.invalidate(target), Some(Stop::fixed(100.0)));
        assert_eq!(context.invalidate(target), None);
        assert_eq!(context.stop(), Stop::fixed(400.0));
    }

    #[test]
    fn can_move_to_closed_regardless_of_the_set() {
        let context = three_stop_context();
        assert!(can_move_closed(&context));

        let mut single = StopContext::new(&[Stop::percentage(0.9)], Some(Stop::percentage(0.9)));
        single.calibrate(500.0);
        assert!(can_move_closed(&single));
    }

    fn can_move_closed(context: &StopContext) -> bool {
        context.can_move(Stop::closed(), true)
    }

    #[test]
    fn redundant_hide_requests_are_suppressed_by_distinct() {
        // The sentinel is always reachable, but a closed sheet asked to
        // close again is still a redundant transition.
        let mut context = StopContext::new(&[Stop::fixed(100.0)], None);
        context.calibrate(1000.0);
        assert!(context.is_hidden());

        assert!(!context.can_move(Stop::closed(), true));
        assert!(context.can_move(Stop::closed(), false));
    }

    #[test]
    fn can_move_rejects_non_members_and_redundant_moves() {
        let context = three_stop_context();
        assert!(!context.can_move(Stop::fixed(500.0), true));
        assert!(!context.can_move(Stop::fixed(100.0), true));
        assert!(context.can_move(Stop::fixed(100.0), false));
        assert!(context.can_move(Stop::fixed(800.0), true));
    }

    #[test]
    fn calibrate_target_substitutes_max_for_stale_stops() {
        let context = three_stop_context();

        let member = context.calibrate_target(Stop::fixed(400.0));
        assert_eq!(member.height(), 400.0);

        let stale = context.calibrate_target(Stop::fixed(999.0));
        assert_eq!(stale, Stop::fixed(800.0));

        let closed = context.calibrate_target(Stop::closed());
        assert_eq!(closed, Stop::closed());
    }

    #[test]
    fn reach_queries_track_the_current_stop() {
        let mut context = three_stop_context();
        assert!(context.has_reached_min_stop());
        assert!(!context.has_reached_max_stop());
        assert!(!context.is_hidden());

        let target = context.calibrate_target(Stop::fixed(800.0));
        context.invalidate(target);
        assert!(context.has_reached_max_stop());
    }
}
