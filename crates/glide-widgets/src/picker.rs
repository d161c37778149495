//! Flick-to-select wheel picker.
//!
//! Rows are `item_extent` tall; an offset of `-i * item_extent` centers row
//! `i`. A drag moves the wheel 1:1 (rubber-banding past either end), and the
//! release hands its velocity to a decay that finishes with a spring onto the
//! nearest row.

use crate::config::PickerConfig;
use glide_core::{
    ActivationAxis, AnimatedValue, AnimationHandle, AxisBounds, DecayConfig, GestureSample,
    GestureTracker, Overdrag, Point, Snap,
};
use serde::{Deserialize, Serialize};

/// Notifications for the surrounding screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickerEvent {
    /// A flick settled on a row
    Selected {
        /// Row index
        index: usize,
    },
}

/// Per-frame render values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickerStyle {
    /// Wheel offset
    pub offset: f32,
    /// Row nearest the center right now
    pub centered_index: usize,
}

/// A vertical wheel of `count` rows.
#[derive(Debug)]
pub struct WheelPicker {
    config: PickerConfig,
    count: usize,
    offset: AnimatedValue,
    tracker: GestureTracker,
    selected: usize,
    pending: Option<AnimationHandle>,
}

impl WheelPicker {
    /// Create a wheel showing row 0.
    #[must_use]
    pub fn new(config: PickerConfig, count: usize) -> Self {
        let mut picker = Self {
            config,
            count,
            offset: AnimatedValue::new(0.0),
            tracker: GestureTracker::with_config(ActivationAxis::Vertical, config.gesture),
            selected: 0,
            pending: None,
        };
        picker.update_bounds();
        picker
    }

    /// Number of rows.
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.count
    }

    /// Last settled row.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Whether the wheel is moving on its own.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.offset.is_animating()
    }

    /// Allowed offset range, `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> (f32, f32) {
        let last = self.count.saturating_sub(1) as f32;
        (-last * self.config.item_extent, 0.0)
    }

    /// Render values for this frame.
    #[must_use]
    pub fn style(&self) -> PickerStyle {
        PickerStyle {
            offset: self.offset.value(),
            centered_index: self.index_at(self.offset.value()),
        }
    }

    /// Replace the configuration.
    ///
    /// A running flick keeps the parameters it started with; the new values
    /// apply from the next drag or selection.
    pub fn set_config(&mut self, config: PickerConfig) {
        self.config = config;
        self.tracker = GestureTracker::with_config(ActivationAxis::Vertical, config.gesture);
        self.update_bounds();
    }

    /// Change the number of rows. The selection is clamped into range.
    pub fn set_item_count(&mut self, count: usize) {
        self.count = count;
        self.update_bounds();
        let last = count.saturating_sub(1);
        if self.selected > last {
            self.selected = last;
            self.pending = None;
            self.offset.set(self.row_offset(last));
        }
    }

    /// Spring straight to `index` (clamped). Emits nothing.
    pub fn select(&mut self, index: usize) {
        let index = index.min(self.count.saturating_sub(1));
        self.selected = index;
        self.pending = None;
        self.offset
            .spring(self.row_offset(index), self.config.snap_spring, None);
    }

    /// Finger down. Returns whether the wheel will track it.
    pub fn on_drag_start(&mut self) -> bool {
        if self.count == 0 {
            return false;
        }
        self.tracker.on_start(Point::new(0.0, self.offset.value()));
        true
    }

    /// Finger moved. Returns the wheel offset while dragging.
    pub fn on_drag_update(&mut self, sample: &GestureSample) -> Option<f32> {
        let was_active = self.tracker.is_active();
        let translation = self.tracker.on_update(sample)?;
        if !was_active {
            // Grabbing the wheel stops a running flick.
            self.pending = None;
            self.offset.stop();
        }
        self.offset.set(translation.y);
        Some(translation.y)
    }

    /// Finger lifted: flick with the release velocity.
    pub fn on_drag_end(&mut self, sample: &GestureSample) {
        if let Some(release) = self.tracker.on_end(sample) {
            self.flick(release.velocity.y);
        }
    }

    /// Platform cancelled the drag: settle on the nearest row.
    pub fn on_drag_cancel(&mut self) {
        if self.tracker.on_cancel().is_some() {
            self.flick(0.0);
        }
    }

    fn flick(&mut self, velocity: f32) {
        let (min, max) = self.bounds();
        let decay = DecayConfig {
            deceleration: self.config.deceleration,
            velocity_floor: self.config.velocity_floor,
            ..DecayConfig::default()
        }
        .with_bounds(min, max)
        .with_snap(Snap::new(
            self.config.item_extent,
            0.0,
            self.config.snap_spring,
        ));
        tracing::debug!(velocity, "picker flick");
        self.pending = Some(self.offset.decay(velocity, decay));
    }

    /// Advance the wheel by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> Option<PickerEvent> {
        let finished = self.offset.tick(dt)?;
        if self.pending.take() != Some(finished.handle) {
            return None;
        }
        let index = self.index_at(finished.value);
        self.selected = index;
        tracing::debug!(index, "picker settled");
        Some(PickerEvent::Selected { index })
    }

    fn update_bounds(&mut self) {
        let (min, max) = self.bounds();
        self.tracker.set_bounds_y(
            AxisBounds::FREE
                .min(min, Overdrag::RubberBand)
                .max(max, Overdrag::RubberBand),
        );
    }

    fn row_offset(&self, index: usize) -> f32 {
        -(index as f32) * self.config.item_extent
    }

    fn index_at(&self, offset: f32) -> usize {
        if self.count == 0 || self.config.item_extent <= 0.0 || !offset.is_finite() {
            return 0;
        }
        let row = (-offset / self.config.item_extent).round().max(0.0) as usize;
        row.min(self.count - 1)
    }
}
