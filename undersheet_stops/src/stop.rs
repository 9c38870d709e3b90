// Copyright 2025 the Undersheet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Stop`] value type: one snap target a sheet can rest at.

use core::cmp::Ordering;

/// How a [`Stop`] derives its concrete height from the available height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopKind {
    /// A fraction of the available height (for example `0.9 * available`).
    ///
    /// The fraction is clamped to `[0, 1]` at construction.
    Percentage(f64),
    /// An absolute length, capped at the available height when measured.
    Fixed(f64),
}

impl StopKind {
    /// Resolves this kind against an available height.
    ///
    /// A negative available height is treated as zero.
    #[must_use]
    pub fn resolve(self, available_height: f64) -> f64 {
        let available = available_height.max(0.0);
        match self {
            Self::Percentage(value) => value * available,
            Self::Fixed(value) => value.min(available),
        }
    }
}

/// One snap target the sheet can rest at.
///
/// A stop is an immutable value. Construction records the *description* of
/// the target (kind, raw value, upper-bound flag); [`Stop::measured`] returns
/// a new stop that additionally carries the concrete height resolved against
/// the runtime available height. Until then [`Stop::height`] is zero and
/// meaningless.
///
/// Two stops are equal when they have the same kind, raw value, and
/// upper-bound flag. The measured height is derived state and deliberately
/// excluded from identity, so a freshly constructed stop compares equal to
/// its measured counterpart in the active set.
#[derive(Debug, Clone, Copy)]
pub struct Stop {
    kind: StopKind,
    is_upper_bound: bool,
    height: f64,
}

impl Stop {
    /// Creates a stop at an absolute length.
    #[must_use]
    pub const fn fixed(value: f64) -> Self {
        Self {
            kind: StopKind::Fixed(value),
            is_upper_bound: false,
            height: 0.0,
        }
    }

    /// Creates a stop at a fraction of the available height.
    ///
    /// The fraction is clamped to `[0, 1]`.
    #[must_use]
    pub fn percentage(value: f64) -> Self {
        Self {
            kind: StopKind::Percentage(value.clamp(0.0, 1.0)),
            is_upper_bound: false,
            height: 0.0,
        }
    }

    /// Returns this stop flagged as the upper bound of its stop set.
    ///
    /// During calibration the stop set is truncated at the first upper-bound
    /// stop, so anything measuring higher becomes unreachable and is dropped.
    #[must_use]
    pub const fn upper_bound(mut self) -> Self {
        self.is_upper_bound = true;
        self
    }

    /// The sentinel stop for a fully hidden sheet.
    #[must_use]
    pub const fn closed() -> Self {
        Self::fixed(0.0)
    }

    /// A stop at half of the available height.
    #[must_use]
    pub fn half() -> Self {
        Self::percentage(0.5)
    }

    /// A stop at the full available height, flagged as the upper bound.
    #[must_use]
    pub fn full() -> Self {
        Self::percentage(1.0).upper_bound()
    }

    /// How this stop derives its height.
    #[must_use]
    pub const fn kind(self) -> StopKind {
        self.kind
    }

    /// Whether this stop is a caller-declared ceiling for its stop set.
    #[must_use]
    pub const fn is_upper_bound(self) -> bool {
        self.is_upper_bound
    }

    /// The concrete height of this stop.
    ///
    /// Zero until [`Stop::measured`] has been applied.
    #[must_use]
    pub const fn height(self) -> f64 {
        self.height
    }

    /// Returns a new stop carrying the height resolved against
    /// `available_height`.
    #[must_use]
    pub fn measured(self, available_height: f64) -> Self {
        Self {
            kind: self.kind,
            is_upper_bound: self.is_upper_bound,
            height: self.kind.resolve(available_height),
        }
    }

    /// Orders two already-measured stops.
    ///
    /// The primary key is the measured height, ascending. On equal height a
    /// non-upper-bound stop sorts before an upper-bound one, so the ceiling
    /// stays the authoritative maximum after truncation even when several
    /// stops collapse onto the same height (for example, fixed stops capped
    /// at a small available height).
    #[must_use]
    pub fn cmp_measured(&self, other: &Self) -> Ordering {
        self.height
            .total_cmp(&other.height)
            .then(self.is_upper_bound.cmp(&other.is_upper_bound))
    }

    /// Orders two stops by the heights they would measure at
    /// `available_height`, with the same tie rule as [`Stop::cmp_measured`].
    #[must_use]
    pub fn compare(a: &Self, b: &Self, available_height: f64) -> Ordering {
        a.measured(available_height)
            .cmp_measured(&b.measured(available_height))
    }
}

impl PartialEq for Stop {
    fn eq(&self, other: &Self) -> bool {
        self.is_upper_bound == other.is_upper_bound && self.kind == other.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_measures_to_min_of_value_and_available() {
        let stop = Stop::fixed(200.0).measured(300.0);
        assert_eq!(stop.height(), 200.0);

        let stop = Stop::fixed(1000.0).measured(1000.0);
        assert_eq!(stop.height(), 1000.0);

        let stop = Stop::fixed(500.0).measured(300.0);
        assert_eq!(stop.height(), 300.0);
    }

    #[test]
    fn percentage_measures_to_fraction_of_available() {
        let stop = Stop::percentage(0.5).measured(500.0);
        assert_eq!(stop.height(), 250.0);
    }

    #[test]
    fn percentage_is_clamped_at_construction() {
        let stop = Stop::percentage(2.0).measured(500.0);
        assert_eq!(stop.height(), 500.0);

        let stop = Stop::percentage(-1.0).measured(500.0);
        assert_eq!(stop.height(), 0.0);
    }

    #[test]
    fn negative_available_height_measures_as_zero() {
        assert_eq!(Stop::fixed(200.0).measured(-50.0).height(), 0.0);
        assert_eq!(Stop::percentage(0.5).measured(-50.0).height(), 0.0);
    }

    #[test]
    fn equality_ignores_measured_height() {
        let raw = Stop::fixed(200.0);
        let measured = raw.measured(1000.0);
        assert_eq!(raw, measured);
    }

    #[test]
    fn equality_respects_upper_bound_flag() {
        assert_ne!(Stop::fixed(200.0), Stop::fixed(200.0).upper_bound());
        assert_ne!(Stop::fixed(200.0), Stop::percentage(0.2));
    }

    #[test]
    fn measured_ordering_breaks_height_ties_by_upper_bound() {
        let plain = Stop::fixed(400.0).measured(300.0);
        let ceiling = Stop::fixed(500.0).upper_bound().measured(300.0);
        // Both cap at 300; the ceiling sorts after the plain stop.
        assert_eq!(plain.cmp_measured(&ceiling), Ordering::Less);
        assert_eq!(ceiling.cmp_measured(&plain), Ordering::Greater);
    }

    #[test]
    fn compare_measures_both_sides() {
        let a = Stop::fixed(100.0);
        let b = Stop::percentage(0.5);
        assert_eq!(Stop::compare(&a, &b, 1000.0), Ordering::Less);
        assert_eq!(Stop::compare(&a, &b, 100.0), Ordering::Greater);
    }

    #[test]
    fn closed_is_a_zero_height_fixed_stop() {
        let closed = Stop::closed().measured(1000.0);
        assert_eq!(closed.height(), 0.0);
        assert_eq!(closed, Stop::closed());
    }

    #[test]
    fn full_is_an_upper_bound() {
        assert!(Stop::full().is_upper_bound());
        assert_eq!(Stop::full().measured(640.0).height(), 640.0);
    }
}
