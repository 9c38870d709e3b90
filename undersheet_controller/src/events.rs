// Copyright 2025 the Undersheet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications emitted by the controller.

use undersheet_stops::Stop;

/// A notification queued by the controller, drained via
/// [`SheetController::take_events`](crate::SheetController::take_events).
///
/// Move events fire exactly once per committed stop change: `WillMove` when
/// the transition is requested, `DidMove` when the host reports the
/// animation finished. A gesture released within the stop range that settles
/// back on its starting stop produces neither.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetEvent {
    /// A transition to a different stop was requested.
    WillMove {
        /// The stop the sheet is leaving.
        from: Stop,
        /// The stop the sheet is heading to.
        to: Stop,
    },
    /// A transition to a different stop was committed.
    DidMove {
        /// The stop the sheet left.
        from: Stop,
        /// The stop the sheet now rests at.
        to: Stop,
    },
    /// A gesture was released above the highest stop and rubber-bands back.
    DidBounceToMax,
    /// A gesture was released below the lowest stop and rubber-bands back.
    DidBounceToMin,
}
