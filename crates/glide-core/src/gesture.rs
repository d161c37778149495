//! Drag tracking: activation gating, additive translation and rubber-banding.
//!
//! A [`GestureTracker`] sits between the platform's pan samples and the
//! [`AnimatedValue`](crate::AnimatedValue) a controller drives. At gesture
//! start it captures the value's *current* position as a baseline, so a drag
//! that interrupts a running spring continues from where the spring was, not
//! from its target.

use crate::event::{GesturePhase, GestureSample};
use crate::geometry::{finite_or_zero, Point};
use serde::{Deserialize, Serialize};

/// Exponent applied to the distance dragged past a rubber-band bound.
pub const RUBBER_BAND_EXPONENT: f32 = 0.8;

/// Sub-linear resistance past a bound: `overflow^0.8`.
#[must_use]
pub fn rubber_band(overflow: f32) -> f32 {
    overflow.max(0.0).powf(RUBBER_BAND_EXPONENT)
}

/// Gesture recognition thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Primary-axis displacement that activates the gesture
    pub activation_distance: f32,
    /// Cross-axis displacement that fails the gesture before activation
    pub fail_distance: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            activation_distance: 5.0,
            fail_distance: 20.0,
        }
    }
}

/// Which axis has to move for the gesture to activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ActivationAxis {
    /// Horizontal drags; vertical motion fails the gesture
    Horizontal,
    /// Vertical drags; horizontal motion fails the gesture
    #[default]
    Vertical,
    /// Either axis activates; nothing fails
    Any,
}

/// Recognition state of the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GateState {
    /// No gesture in progress
    #[default]
    Idle,
    /// Moving, but not far enough to decide
    Undetermined,
    /// Recognized; samples drive the value
    Active,
    /// Rejected; the rest of the gesture is ignored
    Failed,
}

/// What happens when a drag passes a bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Overdrag {
    /// Hard stop at the bound
    Clamp,
    /// Keep following with `overflow^0.8` resistance
    RubberBand,
}

/// One edge of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    /// Position of the edge
    pub at: f32,
    /// Behaviour past the edge
    pub overdrag: Overdrag,
}

/// Optional lower and upper edges on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct AxisBounds {
    /// Lower edge
    pub min: Option<Bound>,
    /// Upper edge
    pub max: Option<Bound>,
}

impl AxisBounds {
    /// No bounds.
    pub const FREE: Self = Self {
        min: None,
        max: None,
    };

    /// Set the lower edge.
    #[must_use]
    pub const fn min(mut self, at: f32, overdrag: Overdrag) -> Self {
        self.min = Some(Bound { at, overdrag });
        self
    }

    /// Set the upper edge.
    #[must_use]
    pub const fn max(mut self, at: f32, overdrag: Overdrag) -> Self {
        self.max = Some(Bound { at, overdrag });
        self
    }

    /// Apply the bounds to a raw position.
    #[must_use]
    pub fn apply(&self, raw: f32) -> f32 {
        if let Some(max) = self.max {
            if raw > max.at {
                return match max.overdrag {
                    Overdrag::Clamp => max.at,
                    Overdrag::RubberBand => max.at + rubber_band(raw - max.at),
                };
            }
        }
        if let Some(min) = self.min {
            if raw < min.at {
                return match min.overdrag {
                    Overdrag::Clamp => min.at,
                    Overdrag::RubberBand => min.at - rubber_band(min.at - raw),
                };
            }
        }
        raw
    }
}

/// Final state of a recognized gesture, handed to the decision layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureRelease {
    /// Displayed translation at release (baseline included, bounds applied)
    pub translation: Point,
    /// Finger displacement since start, without baseline or bounds
    pub delta: Point,
    /// Exit velocity in units per second
    pub velocity: Point,
    /// Whether the platform cancelled the gesture
    pub cancelled: bool,
}

/// Converts pan samples into a bounded translation.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    config: GestureConfig,
    axis: ActivationAxis,
    bounds_x: AxisBounds,
    bounds_y: AxisBounds,
    baseline: Point,
    delta: Point,
    translation: Point,
    gate: GateState,
}

impl GestureTracker {
    /// Create a tracker gated on `axis`.
    #[must_use]
    pub fn new(axis: ActivationAxis) -> Self {
        Self::with_config(axis, GestureConfig::default())
    }

    /// Create a tracker with custom thresholds.
    #[must_use]
    pub fn with_config(axis: ActivationAxis, config: GestureConfig) -> Self {
        Self {
            config,
            axis,
            ..Self::default()
        }
    }

    /// Bound the horizontal translation.
    #[must_use]
    pub const fn with_bounds_x(mut self, bounds: AxisBounds) -> Self {
        self.bounds_x = bounds;
        self
    }

    /// Bound the vertical translation.
    #[must_use]
    pub const fn with_bounds_y(mut self, bounds: AxisBounds) -> Self {
        self.bounds_y = bounds;
        self
    }

    /// Replace the vertical bounds (e.g. after a layout change).
    pub fn set_bounds_y(&mut self, bounds: AxisBounds) {
        self.bounds_y = bounds;
    }

    /// Replace the horizontal bounds.
    pub fn set_bounds_x(&mut self, bounds: AxisBounds) {
        self.bounds_x = bounds;
    }

    /// Thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Recognition state.
    #[must_use]
    pub const fn gate(&self) -> GateState {
        self.gate
    }

    /// Whether the gesture is recognized.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.gate == GateState::Active
    }

    /// Displayed translation of the current gesture.
    #[must_use]
    pub const fn translation(&self) -> Point {
        self.translation
    }

    /// Begin a gesture from `baseline`, the driven value's current position.
    pub fn on_start(&mut self, baseline: Point) {
        self.baseline = baseline.finite_or_zero();
        self.delta = Point::ORIGIN;
        self.translation = self.baseline;
        self.gate = GateState::Undetermined;
    }

    /// Feed a move sample.
    ///
    /// Returns the displayed translation while the gesture is active. A sample
    /// with a non-finite translation counts as "no movement".
    pub fn on_update(&mut self, sample: &GestureSample) -> Option<Point> {
        match self.gate {
            GateState::Idle | GateState::Failed => return None,
            GateState::Undetermined | GateState::Active => {}
        }
        if sample.translation.is_finite() {
            self.delta = sample.translation;
        } else {
            tracing::trace!(?sample, "non-finite gesture sample treated as zero delta");
        }

        if self.gate == GateState::Undetermined {
            self.gate = self.evaluate_gate();
            match self.gate {
                GateState::Active => tracing::trace!(delta = ?self.delta, "gesture activated"),
                GateState::Failed => {
                    tracing::trace!(delta = ?self.delta, "gesture failed activation");
                    return None;
                }
                GateState::Idle | GateState::Undetermined => return None,
            }
        }

        let raw = self.baseline + self.delta;
        self.translation = Point::new(self.bounds_x.apply(raw.x), self.bounds_y.apply(raw.y));
        Some(self.translation)
    }

    /// Finish the gesture. `None` when it never activated.
    pub fn on_end(&mut self, sample: &GestureSample) -> Option<GestureRelease> {
        if sample.phase == GesturePhase::Cancel {
            return self.on_cancel();
        }
        if self.gate == GateState::Active {
            self.on_update(sample);
        }
        let active = self.finish();
        active.then(|| GestureRelease {
            translation: self.translation,
            delta: self.delta,
            velocity: sample.velocity.finite_or_zero(),
            cancelled: false,
        })
    }

    /// Platform cancel: released in place with zero velocity.
    pub fn on_cancel(&mut self) -> Option<GestureRelease> {
        let active = self.finish();
        active.then(|| GestureRelease {
            translation: self.translation,
            delta: self.delta,
            velocity: Point::ORIGIN,
            cancelled: true,
        })
    }

    /// Drop the gesture without reporting anything.
    pub fn reset(&mut self) {
        self.gate = GateState::Idle;
        self.delta = Point::ORIGIN;
    }

    fn finish(&mut self) -> bool {
        let active = self.gate == GateState::Active;
        self.gate = GateState::Idle;
        active
    }

    fn evaluate_gate(&self) -> GateState {
        let (primary, cross) = match self.axis {
            ActivationAxis::Horizontal => (self.delta.x.abs(), self.delta.y.abs()),
            ActivationAxis::Vertical => (self.delta.y.abs(), self.delta.x.abs()),
            ActivationAxis::Any => {
                let moved = finite_or_zero(self.delta.x.abs().max(self.delta.y.abs()));
                return if moved > self.config.activation_distance {
                    GateState::Active
                } else {
                    GateState::Undetermined
                };
            }
        };
        if cross > self.config.fail_distance {
            GateState::Failed
        } else if primary > self.config.activation_distance {
            GateState::Active
        } else {
            GateState::Undetermined
        }
    }
}
