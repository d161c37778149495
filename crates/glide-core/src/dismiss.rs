//! Commit-or-cancel decision at the end of a drag.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Direction in which a drag dismisses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DismissDirection {
    /// Positive y
    #[default]
    Down,
    /// Negative y
    Up,
    /// Negative x
    Left,
    /// Positive x
    Right,
}

impl DismissDirection {
    /// Component of `v` pointing in this direction (negative when opposite).
    #[must_use]
    pub fn project(self, v: Point) -> f32 {
        match self {
            Self::Down => v.y,
            Self::Up => -v.y,
            Self::Left => -v.x,
            Self::Right => v.x,
        }
    }
}

/// Distance and fling thresholds, either of which commits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DismissPolicy {
    /// Dismiss direction
    pub direction: DismissDirection,
    /// Distance past which a release commits
    pub distance_threshold: f32,
    /// Velocity (units/s) past which a release commits
    pub velocity_threshold: f32,
}

impl Default for DismissPolicy {
    fn default() -> Self {
        Self::sheet()
    }
}

impl DismissPolicy {
    /// Create a policy.
    #[must_use]
    pub const fn new(
        direction: DismissDirection,
        distance_threshold: f32,
        velocity_threshold: f32,
    ) -> Self {
        Self {
            direction,
            distance_threshold,
            velocity_threshold,
        }
    }

    /// Bottom sheets: 140 units or an 800 units/s fling.
    #[must_use]
    pub const fn sheet() -> Self {
        Self::new(DismissDirection::Down, 140.0, 800.0)
    }

    /// Lower fling bar for light, short-travel surfaces: 140 units or
    /// 300 units/s.
    #[must_use]
    pub const fn lenient() -> Self {
        Self::new(DismissDirection::Down, 140.0, 300.0)
    }

    /// Same thresholds, different direction.
    #[must_use]
    pub const fn with_direction(mut self, direction: DismissDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Whether a release with this translation and velocity commits.
    ///
    /// Only motion in the dismiss direction counts. Non-finite input never
    /// commits.
    #[must_use]
    pub fn should_commit(&self, translation: Point, velocity: Point) -> bool {
        if !translation.is_finite() || !velocity.is_finite() {
            tracing::trace!(?translation, ?velocity, "non-finite release, not committing");
            return false;
        }
        let distance = self.direction.project(translation);
        let speed = self.direction.project(velocity);
        distance > self.distance_threshold || speed > self.velocity_threshold
    }
}
