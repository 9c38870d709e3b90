// Copyright 2025 the Undersheet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`SheetController`]: gesture handling, move lifecycle, content stack.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use kurbo::Point;
use log::debug;
use undersheet_coordinator::{Coordinator, DefaultCoordinator, GestureTarget, NestedScrollAction};
use undersheet_gesture::ScrollContext;
use undersheet_stops::{Stop, StopContext};

use crate::content::{ContentId, SheetContent};
use crate::events::SheetEvent;
use crate::style::SheetStyle;

/// Lifecycle phase of a pan gesture, as reported by the host's gesture
/// recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanPhase {
    /// The pointer went down on the sheet.
    Began,
    /// The pointer moved.
    Changed,
    /// The pointer was released (or the gesture was cancelled by the host).
    Ended,
}

/// An animated transition the host must perform.
///
/// The controller never animates; it hands out a request naming the target
/// stop and the height to animate the sheet to, and the host calls
/// [`SheetController::complete_move`] when the animation finishes (or is
/// interrupted). Only that completion commits the stop change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRequest {
    /// The stop the sheet should settle at.
    pub target: Stop,
    /// The measured height to animate to.
    pub height: f64,
}

/// Orchestrates a snap-stop sheet.
///
/// The controller owns the live [`StopContext`], the per-gesture
/// [`ScrollContext`], the arbitration [`Coordinator`], and a stack of
/// [`SheetContent`]s. It is renderer-agnostic: the host feeds it pointer
/// translations and nested scroll offsets, and reads back heights, move
/// requests, and queued [`SheetEvent`]s.
///
/// Moves follow a request/commit handshake. Every move path
/// ([`SheetController::move_to`], a released pan, a stop set update, a
/// content switch) returns a [`MoveRequest`]; the host animates to
/// `request.height` and then calls [`SheetController::complete_move`]. A
/// request abandoned without completion (for example, superseded by a new
/// gesture) simply never commits.
pub struct SheetController {
    style: SheetStyle,
    stop_context: StopContext,
    scroll_context: ScrollContext,
    coordinator: Box<dyn Coordinator>,
    contents: HashMap<ContentId, Box<dyn SheetContent>>,
    stack: Vec<ContentId>,
    next_content_id: u64,
    available_height: f64,
    current_height: f64,
    pending_move: Option<MoveRequest>,
    events: Vec<SheetEvent>,
}

impl SheetController {
    /// Creates a controller with the [`DefaultCoordinator`] policy.
    #[must_use]
    pub fn new(style: SheetStyle) -> Self {
        Self::with_coordinator(style, Box::new(DefaultCoordinator))
    }

    /// Creates a controller with a custom arbitration policy.
    #[must_use]
    pub fn with_coordinator(style: SheetStyle, coordinator: Box<dyn Coordinator>) -> Self {
        let scroll_context = ScrollContext::new(style.scroll_sensitivity);
        Self {
            style,
            stop_context: StopContext::default(),
            scroll_context,
            coordinator,
            contents: HashMap::new(),
            stack: Vec::new(),
            next_content_id: 0,
            available_height: 0.0,
            current_height: 0.0,
            pending_move: None,
            events: Vec::new(),
        }
    }

    /// The style this controller was created with.
    #[must_use]
    pub fn style(&self) -> &SheetStyle {
        &self.style
    }

    /// The live stop context.
    #[must_use]
    pub fn stop_context(&self) -> &StopContext {
        &self.stop_context
    }

    /// The height the sheet should currently render at. Tracks the finger
    /// during a gesture, and the committed stop otherwise.
    #[must_use]
    pub fn current_height(&self) -> f64 {
        self.current_height
    }

    /// `true` when the sheet rests at the [`Stop::closed`] sentinel.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.stop_context.is_hidden()
    }

    /// `true` when the sheet rests at its highest reachable stop.
    #[must_use]
    pub fn has_reached_max_stop(&self) -> bool {
        self.stop_context.has_reached_max_stop()
    }

    /// `true` when the sheet rests at its lowest reachable stop.
    #[must_use]
    pub fn has_reached_min_stop(&self) -> bool {
        self.stop_context.has_reached_min_stop()
    }

    /// Drains the queued notifications, oldest first.
    pub fn take_events(&mut self) -> Vec<SheetEvent> {
        core::mem::take(&mut self.events)
    }

    /// Sets the vertical space available to the sheet, recalibrating every
    /// stop against it.
    ///
    /// Call once before the first move and again on every host resize. The
    /// rendered height snaps to the re-measured current stop; a resize
    /// mid-gesture loses the gesture, matching hosts that cancel recognizers
    /// on layout changes.
    pub fn set_available_height(&mut self, available_height: f64) {
        self.available_height = available_height;
        self.stop_context.calibrate(available_height);
        self.current_height = self.stop_context.stop().height();
    }

    /// Replaces the stop set and requests a move to `stop` (or to the
    /// re-calibrated current stop when `None`).
    ///
    /// The move is non-distinct: a request is returned even when the target
    /// equals the current stop, because recalibration may have changed its
    /// measured height.
    pub fn update_stops(&mut self, stops: &[Stop], stop: Option<Stop>) -> MoveRequest {
        self.stop_context
            .make_snapshot(stops, None, self.available_height);
        let target = stop.unwrap_or_else(|| self.stop_context.stop());
        self.begin_move(target)
    }

    /// Requests an animated move to `target`.
    ///
    /// Returns `None` when the target is unreachable or already current;
    /// otherwise the host animates and completes the returned request.
    pub fn move_to(&mut self, target: Stop) -> Option<MoveRequest> {
        if !self.stop_context.can_move(target, true) {
            debug!("rejected move to {target:?}");
            return None;
        }
        Some(self.begin_move(target))
    }

    /// Commits a move to `target` immediately, without animation.
    ///
    /// Returns `false` when the target is unreachable. Any pending animated
    /// request is dropped.
    pub fn jump_to(&mut self, target: Stop) -> bool {
        if !self.stop_context.can_move(target, false) {
            return false;
        }
        self.pending_move = None;
        let target = self.stop_context.calibrate_target(target);
        self.commit(MoveRequest {
            target,
            height: target.height(),
        });
        true
    }

    /// Reports the outcome of the animation for the outstanding
    /// [`MoveRequest`].
    ///
    /// `finished` commits the stop change and fires
    /// [`SheetEvent::DidMove`]; an unfinished animation leaves the previous
    /// stop in place. A call with no request outstanding is a no-op.
    pub fn complete_move(&mut self, finished: bool) {
        let Some(request) = self.pending_move.take() else {
            return;
        };
        if finished {
            self.commit(request);
        }
    }

    /// Feeds one pan gesture event. `translation` is the pointer's
    /// accumulated translation since the gesture began; only its vertical
    /// component matters.
    ///
    /// Returns a [`MoveRequest`] on [`PanPhase::Ended`], settling the sheet
    /// at the resolved stop.
    pub fn on_pan(&mut self, phase: PanPhase, translation: Point) -> Option<MoveRequest> {
        match phase {
            PanPhase::Began => {
                self.scroll_context
                    .make_snapshot(translation.y, self.current_height, &self.stop_context);
                None
            }
            PanPhase::Changed => {
                if self.scroll_context.is_interaction_enabled() {
                    self.scroll_context.update_position(translation.y);
                    self.current_height = self.scroll_context.compute_live_position();
                } else {
                    // The nested content owns the gesture; keep the start
                    // pinned to the pointer so tracking resumes from a zero
                    // delta once control returns to the sheet.
                    self.scroll_context.update_start_position(translation.y);
                    self.scroll_context.update_position(translation.y);
                }
                None
            }
            PanPhase::Ended => {
                self.scroll_context.update_position(translation.y);
                let height = self.scroll_context.compute_live_position();
                self.current_height = height;
                if self.scroll_context.is_bouncing_back(height) {
                    let event = if height > self.scroll_context.max_height() {
                        SheetEvent::DidBounceToMax
                    } else {
                        SheetEvent::DidBounceToMin
                    };
                    self.events.push(event);
                }
                let target = self.scroll_context.resolve_target_stop(height);
                Some(self.begin_move(target))
            }
        }
    }

    /// Builds a stop sized to `content_height` plus the style's top bar
    /// extent.
    ///
    /// `circuit_breaker` caps the result: when the sized stop would measure
    /// taller than the breaker, the breaker is returned instead. Use it to
    /// keep self-sizing content from pushing the sheet past a sensible
    /// maximum.
    #[must_use]
    pub fn make_stop(
        &self,
        content_height: f64,
        circuit_breaker: Option<Stop>,
        is_upper_bound: bool,
    ) -> Stop {
        let mut stop = Stop::fixed(content_height + self.style.top_bar_extent());
        if is_upper_bound {
            stop = stop.upper_bound();
        }
        match circuit_breaker {
            Some(breaker) if Stop::compare(&stop, &breaker, self.available_height).is_gt() => {
                breaker
            }
            _ => stop,
        }
    }

    /// Whether the sheet should claim a gesture beginning on `target`,
    /// per the installed [`Coordinator`].
    #[must_use]
    pub fn should_handle_gesture(&self, target: GestureTarget) -> bool {
        self.coordinator.should_handle_gesture(target)
    }

    /// Relays a nested scroll begin to the arbitration policy.
    pub fn nested_scroll_began(&mut self, offset: f64) {
        self.coordinator
            .on_nested_scroll_began(&mut self.scroll_context, offset);
    }

    /// Relays a nested scroll change; the host must apply the returned
    /// [`NestedScrollAction`] to its scroll region.
    pub fn nested_scroll_changed(&mut self, offset: f64) -> NestedScrollAction {
        self.coordinator.on_nested_scroll_changed(
            &mut self.scroll_context,
            self.current_height,
            offset,
        )
    }

    /// Relays a nested scroll end to the arbitration policy.
    pub fn nested_scroll_ended(&mut self) {
        self.coordinator
            .on_nested_scroll_ended(&mut self.scroll_context);
    }

    /// Replaces the entire content stack with `content`.
    ///
    /// Returns the content's identity and, when it prefers a stop context, a
    /// move request toward that context's stop.
    pub fn set_root_content(
        &mut self,
        content: Box<dyn SheetContent>,
    ) -> (ContentId, Option<MoveRequest>) {
        self.contents.clear();
        self.stack.clear();
        self.install_content(content)
    }

    /// Pushes `content` on top of the stack.
    ///
    /// The outgoing top content is handed the live stop context for
    /// safekeeping; it gets it back when [`SheetController::pop_content`]
    /// uncovers it.
    pub fn push_content(
        &mut self,
        content: Box<dyn SheetContent>,
    ) -> (ContentId, Option<MoveRequest>) {
        if let Some(&top) = self.stack.last()
            && let Some(outgoing) = self.contents.get_mut(&top)
        {
            outgoing.save_stop_context(self.stop_context.clone());
        }
        self.install_content(content)
    }

    /// Pops the top content, restoring the stop context the uncovered
    /// content saved.
    ///
    /// The root content cannot be popped; that is the only `None` case.
    /// Otherwise returns the popped content's identity and, when the
    /// uncovered content had saved a stop context, a move request back
    /// toward it.
    pub fn pop_content(&mut self) -> Option<(ContentId, Option<MoveRequest>)> {
        if self.stack.len() <= 1 {
            return None;
        }
        let id = self.stack.pop()?;
        self.contents.remove(&id);
        debug!("popped content {id:?}");
        let top = *self.stack.last()?;
        let restored = self
            .contents
            .get_mut(&top)
            .and_then(|content| content.take_saved_stop_context());
        let request = restored.map(|restored| self.apply_stop_context(restored));
        Some((id, request))
    }

    /// The identity of the content currently on top, if any.
    #[must_use]
    pub fn top_content(&self) -> Option<ContentId> {
        self.stack.last().copied()
    }

    /// `true` when `id` is the content currently on top.
    #[must_use]
    pub fn is_top(&self, id: ContentId) -> bool {
        self.top_content() == Some(id)
    }

    fn install_content(
        &mut self,
        content: Box<dyn SheetContent>,
    ) -> (ContentId, Option<MoveRequest>) {
        let id = ContentId::new(self.next_content_id);
        self.next_content_id += 1;
        let request = content
            .preferred_stop_context(self.available_height)
            .map(|preferred| self.apply_stop_context(preferred));
        self.contents.insert(id, content);
        self.stack.push(id);
        debug!("installed content {id:?}");
        (id, request)
    }

    fn apply_stop_context(&mut self, mut context: StopContext) -> MoveRequest {
        context.calibrate(self.available_height);
        let target = context.stop();
        self.stop_context = context;
        self.begin_move(target)
    }

    /// Stages a move request, substituting a stale target and firing
    /// [`SheetEvent::WillMove`] for real changes.
    fn begin_move(&mut self, target: Stop) -> MoveRequest {
        let target = self.stop_context.calibrate_target(target);
        let from = self.stop_context.stop();
        if target != from {
            debug!("moving from {from:?} to {target:?}");
            self.events.push(SheetEvent::WillMove { from, to: target });
        }
        let request = MoveRequest {
            target,
            height: target.height(),
        };
        self.pending_move = Some(request);
        request
    }

    fn commit(&mut self, request: MoveRequest) {
        self.current_height = request.height;
        if let Some(previous) = self.stop_context.invalidate(request.target) {
            self.events.push(SheetEvent::DidMove {
                from: previous,
                to: request.target,
            });
            for id in &self.stack {
                if let Some(content) = self.contents.get_mut(id) {
                    content.on_sheet_moved(previous, request.target);
                }
            }
        }
    }
}

impl fmt::Debug for SheetController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetController")
            .field("style", &self.style)
            .field("stop_context", &self.stop_context)
            .field("current_height", &self.current_height)
            .field("stack", &self.stack)
            .field("pending_move", &self.pending_move)
            .finish_non_exhaustive()
    }
}
