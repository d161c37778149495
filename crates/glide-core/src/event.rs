//! Input samples delivered by the platform.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Phase of a continuous gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GesturePhase {
    /// Finger went down
    #[default]
    Start,
    /// Finger moved
    Update,
    /// Finger lifted
    End,
    /// Platform interrupted the gesture (system alert, palm rejection)
    Cancel,
}

/// One frame of pan input: translation since the gesture began plus the
/// platform's velocity estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GestureSample {
    /// Finger translation since `Start`
    pub translation: Point,
    /// Velocity in units per second
    pub velocity: Point,
    /// Gesture phase
    pub phase: GesturePhase,
}

impl GestureSample {
    /// Sample with the given phase.
    #[must_use]
    pub const fn new(translation: Point, velocity: Point, phase: GesturePhase) -> Self {
        Self {
            translation,
            velocity,
            phase,
        }
    }

    /// `Update` sample with zero velocity.
    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::new(Point::new(x, y), Point::ORIGIN, GesturePhase::Update)
    }

    /// `End` sample.
    #[must_use]
    pub const fn released(translation: Point, velocity: Point) -> Self {
        Self::new(translation, velocity, GesturePhase::End)
    }
}

/// A raw pointer position with its timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Position in view coordinates
    pub position: Point,
    /// Timestamp in seconds on the platform's monotonic clock
    pub time: f64,
}

impl PointerSample {
    /// Create a pointer sample.
    #[must_use]
    pub const fn new(position: Point, time: f64) -> Self {
        Self { position, time }
    }
}

/// Content offset reported by a scroll view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScrollSample {
    /// Vertical content offset
    pub offset_y: f32,
}

impl ScrollSample {
    /// Create a scroll sample.
    #[must_use]
    pub const fn new(offset_y: f32) -> Self {
        Self { offset_y }
    }
}
