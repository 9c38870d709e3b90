// Copyright 2025 the Undersheet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content hosted inside a sheet.

use undersheet_stops::{Stop, StopContext};

/// Stable identity of a registered content, handed out by
/// [`SheetController::set_root_content`](crate::SheetController::set_root_content)
/// and [`SheetController::push_content`](crate::SheetController::push_content).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(u64);

impl ContentId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// A unit of content the sheet can display.
///
/// Contents form a stack. When a new content is pushed, the outgoing top
/// receives the live [`StopContext`] through
/// [`SheetContent::save_stop_context`]; when it becomes the top again the
/// controller asks for it back through
/// [`SheetContent::take_saved_stop_context`] so the sheet returns to where
/// that content left it. All methods have no-op defaults; a content that
/// neither prefers stops nor reacts to moves implements nothing.
pub trait SheetContent {
    /// The stop context this content wants applied when it becomes the top.
    ///
    /// Returning `None` keeps whatever context is active.
    fn preferred_stop_context(&self, available_height: f64) -> Option<StopContext> {
        let _ = available_height;
        None
    }

    /// Stores the live stop context before this content is covered.
    fn save_stop_context(&mut self, context: StopContext) {
        let _ = context;
    }

    /// Returns the context stored by
    /// [`SheetContent::save_stop_context`], if any.
    fn take_saved_stop_context(&mut self) -> Option<StopContext> {
        None
    }

    /// The sheet committed a move from one stop to another.
    ///
    /// Every content in the stack is notified, not just the top; covered
    /// contents often need to resize against the stop they will be uncovered
    /// at.
    fn on_sheet_moved(&mut self, from: Stop, to: Stop) {
        let _ = (from, to);
    }
}
