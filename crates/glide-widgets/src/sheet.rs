//! Bottom sheet with drag-to-dismiss.
//!
//! The sheet's vertical offset is 0 when fully open and `hidden_offset` when
//! fully hidden (by default the measured sheet height). A drag on an open
//! sheet writes the offset 1:1; on release the sheet's
//! [`DismissPolicy`](glide_core::DismissPolicy) decides between closing and
//! springing back.
//!
//! ```text
//! Closed -> Opening -> Open -> Dragging -> Closing -> Closed
//!                       ^          |
//!                       +----------+  (spring back)
//! ```

use crate::config::SheetConfig;
use glide_core::{
    ActivationAxis, AnimatedValue, AnimationHandle, AxisBounds, GestureRelease, GestureSample,
    GestureTracker, Overdrag, Point, Rect,
};
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SheetPhase {
    /// Hidden and inert
    #[default]
    Closed,
    /// Sliding in
    Opening,
    /// Resting open (possibly springing back after a drag)
    Open,
    /// Following a drag
    Dragging,
    /// Sliding out
    Closing,
}

/// Who owns the open state, chosen once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetOwnership {
    /// The owner holds `open`; requests go out as events and the owner
    /// answers with [`SheetController::set_open`].
    Controlled {
        /// Last state the owner set
        open: bool,
    },
    /// The sheet holds its own state.
    Uncontrolled,
}

/// Notifications for the surrounding screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetEvent {
    /// Finished opening
    Opened,
    /// Finished closing
    Closed,
    /// Controlled sheets only: the user asked to change the open state
    OpenChangeRequested(bool),
}

/// Per-frame render values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetStyle {
    /// Vertical offset of the sheet
    pub translate_y: f32,
    /// Backdrop opacity in `[0, 1]`
    pub backdrop_opacity: f32,
    /// Whether the sheet needs to be mounted
    pub visible: bool,
}

/// Observable state, for comparing a sheet against an earlier moment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetSnapshot {
    /// Phase
    pub phase: SheetPhase,
    /// Current drag offset
    pub drag_offset: f32,
    /// Sheet offset
    pub offset: f32,
    /// Backdrop opacity
    pub backdrop_opacity: f32,
}

impl SheetSnapshot {
    /// Exact equality including the sign of zero.
    #[must_use]
    pub fn bit_eq(&self, other: &Self) -> bool {
        self.phase == other.phase
            && self.drag_offset.to_bits() == other.drag_offset.to_bits()
            && self.offset.to_bits() == other.offset.to_bits()
            && self.backdrop_opacity.to_bits() == other.backdrop_opacity.to_bits()
    }
}

/// Owns a bottom sheet's lifecycle and its two animated values.
#[derive(Debug)]
pub struct SheetController {
    config: SheetConfig,
    ownership: SheetOwnership,
    phase: SheetPhase,
    offset: AnimatedValue,
    backdrop: AnimatedValue,
    tracker: GestureTracker,
    drag_offset: f32,
    hidden_offset: f32,
    sheet_bounds: Rect,
    transition: Option<AnimationHandle>,
}

impl SheetController {
    /// Create a sheet with the given ownership.
    ///
    /// A controlled sheet created with `open: true` starts fully open.
    #[must_use]
    pub fn new(config: SheetConfig, ownership: SheetOwnership) -> Self {
        let hidden_offset = config.hidden_offset;
        let tracker = GestureTracker::with_config(ActivationAxis::Vertical, config.gesture)
            .with_bounds_y(drag_bounds(&config));
        let mut sheet = Self {
            config,
            ownership,
            phase: SheetPhase::Closed,
            offset: AnimatedValue::new(hidden_offset),
            backdrop: AnimatedValue::new(0.0),
            tracker,
            drag_offset: 0.0,
            hidden_offset,
            sheet_bounds: Rect::default(),
            transition: None,
        };
        if matches!(ownership, SheetOwnership::Controlled { open: true }) {
            sheet.phase = SheetPhase::Open;
            sheet.offset.set(0.0);
            sheet.backdrop.set(1.0);
        }
        sheet
    }

    /// Sheet that owns its own open state.
    #[must_use]
    pub fn uncontrolled(config: SheetConfig) -> Self {
        Self::new(config, SheetOwnership::Uncontrolled)
    }

    /// Sheet whose open state is owned by the caller.
    #[must_use]
    pub fn controlled(config: SheetConfig, open: bool) -> Self {
        Self::new(config, SheetOwnership::Controlled { open })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> SheetPhase {
        self.phase
    }

    /// Ownership mode.
    #[must_use]
    pub const fn ownership(&self) -> SheetOwnership {
        self.ownership
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Current drag offset (0 outside a drag).
    #[must_use]
    pub const fn drag_offset(&self) -> f32 {
        self.drag_offset
    }

    /// Offset at which the sheet is fully hidden.
    #[must_use]
    pub const fn hidden_offset(&self) -> f32 {
        self.hidden_offset
    }

    /// Whether the sheet is open or on its way there.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(
            self.phase,
            SheetPhase::Opening | SheetPhase::Open | SheetPhase::Dragging
        )
    }

    /// Render values for this frame.
    #[must_use]
    pub fn style(&self) -> SheetStyle {
        SheetStyle {
            translate_y: self.offset.value(),
            backdrop_opacity: self.backdrop.value().clamp(0.0, 1.0),
            visible: self.phase != SheetPhase::Closed,
        }
    }

    /// Current observable state.
    #[must_use]
    pub fn snapshot(&self) -> SheetSnapshot {
        SheetSnapshot {
            phase: self.phase,
            drag_offset: self.drag_offset,
            offset: self.offset.value(),
            backdrop_opacity: self.backdrop.value(),
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Measured bounds of the open sheet.
    ///
    /// The sheet height becomes the hidden offset. Unmeasured bounds are
    /// ignored.
    pub fn set_sheet_bounds(&mut self, bounds: Rect) {
        if !bounds.size().is_measured() || !bounds.origin().is_finite() {
            tracing::trace!(?bounds, "ignoring unmeasured sheet bounds");
            return;
        }
        self.sheet_bounds = bounds;
        if bounds.height == self.hidden_offset {
            return;
        }
        self.hidden_offset = bounds.height;
        if self.phase == SheetPhase::Closed {
            self.offset.set(self.hidden_offset);
        }
    }

    /// Touch area of the drag handle for a sheet laid out at `sheet_bounds`.
    ///
    /// Larger than the visible handle by `handle_hit_slop` on every side, and
    /// moved with the sheet's current offset.
    #[must_use]
    pub fn drag_region(&self, sheet_bounds: Rect) -> Rect {
        let size = self.config.handle_size;
        let handle = Rect::new(
            sheet_bounds.center().x - size.width / 2.0,
            sheet_bounds.y + self.config.handle_inset + self.offset.value(),
            size.width,
            size.height,
        );
        handle.outset(self.config.handle_hit_slop)
    }

    // =========================================================================
    // Open / close
    // =========================================================================

    /// Ask the sheet to open.
    ///
    /// Controlled sheets return a request for the owner and change nothing.
    pub fn open(&mut self) -> Option<SheetEvent> {
        match self.ownership {
            SheetOwnership::Controlled { open } => {
                (!open).then_some(SheetEvent::OpenChangeRequested(true))
            }
            SheetOwnership::Uncontrolled => {
                self.animate_open();
                None
            }
        }
    }

    /// Ask the sheet to close.
    pub fn close(&mut self) -> Option<SheetEvent> {
        match self.ownership {
            SheetOwnership::Controlled { open } => {
                open.then_some(SheetEvent::OpenChangeRequested(false))
            }
            SheetOwnership::Uncontrolled => {
                self.animate_close();
                None
            }
        }
    }

    /// Open when closed, close otherwise.
    pub fn toggle(&mut self) -> Option<SheetEvent> {
        let open = match self.ownership {
            SheetOwnership::Controlled { open } => open,
            SheetOwnership::Uncontrolled => self.is_open(),
        };
        if open {
            self.close()
        } else {
            self.open()
        }
    }

    /// Owner-driven state change for controlled sheets.
    ///
    /// Animates exactly like the uncontrolled path. On an uncontrolled sheet
    /// this behaves like `open`/`close`.
    pub fn set_open(&mut self, open: bool) {
        if let SheetOwnership::Controlled { open: ref mut current } = self.ownership {
            *current = open;
        }
        if open {
            self.animate_open();
        } else {
            self.animate_close();
        }
    }

    /// Tap on the backdrop.
    pub fn on_backdrop_press(&mut self) -> Option<SheetEvent> {
        if !self.config.close_on_backdrop_press || !self.is_open() {
            return None;
        }
        self.close()
    }

    fn animate_open(&mut self) {
        if self.phase != SheetPhase::Closed {
            return;
        }
        self.drag_offset = 0.0;
        self.offset.set(self.hidden_offset);
        let handle = self.offset.animate_to(0.0, self.config.open_timing);
        self.backdrop.set(0.0);
        self.backdrop.animate_to(1.0, self.config.open_timing);
        self.transition = Some(handle);
        self.enter(SheetPhase::Opening);
    }

    fn animate_close(&mut self) {
        if matches!(self.phase, SheetPhase::Closed | SheetPhase::Closing) {
            return;
        }
        // A finger that is down but not yet dragging must not take over the
        // close animation.
        self.tracker.reset();
        // Offset and backdrop run side by side with the same timing.
        let handle = self
            .offset
            .animate_to(self.hidden_offset, self.config.close_timing);
        self.backdrop.animate_to(0.0, self.config.close_timing);
        self.transition = Some(handle);
        self.enter(SheetPhase::Closing);
    }

    // =========================================================================
    // Drag
    // =========================================================================

    /// Finger down at `point`. Returns whether the sheet will track it.
    pub fn on_drag_start(&mut self, point: Point) -> bool {
        if self.phase != SheetPhase::Open {
            return false;
        }
        if self.config.drag_from_handle_only
            && !self.drag_region(self.sheet_bounds).contains_point(&point)
        {
            return false;
        }
        self.tracker.on_start(Point::new(0.0, self.offset.value()));
        true
    }

    /// Finger moved. Returns the displayed offset while dragging.
    pub fn on_drag_update(&mut self, sample: &GestureSample) -> Option<f32> {
        if !matches!(self.phase, SheetPhase::Open | SheetPhase::Dragging) {
            self.tracker.reset();
            return None;
        }
        let translation = self.tracker.on_update(sample)?;
        if self.phase == SheetPhase::Open {
            // Cancels a running spring-back.
            self.offset.stop();
            self.enter(SheetPhase::Dragging);
        }
        self.follow(translation.y);
        Some(self.drag_offset)
    }

    /// Finger lifted.
    ///
    /// Controlled sheets that commit return a close request; the sheet starts
    /// closing right away.
    pub fn on_drag_end(&mut self, sample: &GestureSample) -> Option<SheetEvent> {
        let release = self.tracker.on_end(sample)?;
        self.release(release)
    }

    /// Platform cancelled the drag. Resolves like a release that does not
    /// commit.
    pub fn on_drag_cancel(&mut self) {
        if let Some(release) = self.tracker.on_cancel() {
            self.release(release);
        }
    }

    fn follow(&mut self, offset: f32) {
        self.drag_offset = offset;
        self.offset.set(offset);
        let opacity = if self.hidden_offset > 0.0 {
            1.0 - offset / self.hidden_offset
        } else {
            1.0
        };
        self.backdrop.set(opacity.clamp(0.0, 1.0));
    }

    fn release(&mut self, release: GestureRelease) -> Option<SheetEvent> {
        if self.phase != SheetPhase::Dragging {
            return None;
        }
        let commit = !release.cancelled
            && self
                .config
                .dismiss
                .should_commit(release.translation, release.velocity);
        tracing::debug!(
            offset = release.translation.y,
            velocity = release.velocity.y,
            commit,
            "sheet drag released"
        );

        if commit {
            self.animate_close();
            return match self.ownership {
                SheetOwnership::Controlled { ref mut open } => {
                    // The sheet is already closing; a later `toggle` must ask
                    // to reopen even if the owner never echoes this request.
                    *open = false;
                    Some(SheetEvent::OpenChangeRequested(false))
                }
                SheetOwnership::Uncontrolled => None,
            };
        }

        self.drag_offset = 0.0;
        self.offset
            .spring(0.0, self.config.snap_back, Some(release.velocity.y));
        self.backdrop.animate_to(1.0, self.config.open_timing);
        self.transition = None;
        self.enter(SheetPhase::Open);
        None
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Advance animations by `dt` seconds.
    ///
    /// Returns `Opened` or `Closed` on the frame the transition finishes.
    pub fn tick(&mut self, dt: f32) -> Option<SheetEvent> {
        self.backdrop.tick(dt);
        let finished = self.offset.tick(dt)?;
        if self.transition != Some(finished.handle) {
            return None;
        }
        self.transition = None;
        match self.phase {
            SheetPhase::Opening => {
                self.enter(SheetPhase::Open);
                Some(SheetEvent::Opened)
            }
            SheetPhase::Closing => {
                if self.backdrop.is_animating() || self.backdrop.value() != 0.0 {
                    self.backdrop.set(0.0);
                }
                self.drag_offset = 0.0;
                self.enter(SheetPhase::Closed);
                Some(SheetEvent::Closed)
            }
            SheetPhase::Closed | SheetPhase::Open | SheetPhase::Dragging => {
                tracing::trace!(phase = ?self.phase, "dropping completion outside a transition");
                None
            }
        }
    }

    fn enter(&mut self, phase: SheetPhase) {
        if self.phase != phase {
            tracing::debug!(from = ?self.phase, to = ?phase, "sheet phase");
            self.phase = phase;
        }
    }
}

fn drag_bounds(config: &SheetConfig) -> AxisBounds {
    AxisBounds::FREE
        .min(0.0, Overdrag::Clamp)
        .max(config.max_drag, Overdrag::RubberBand)
}

// =============================================================================
// Tests
// =============================================================================
