//! Turns raw pointer positions into [`GestureSample`]s.
//!
//! Platforms that only deliver positions (no velocity) feed a
//! [`PointerTracker`]; it keeps the pointer's start position and estimates
//! velocity from the samples of the last 100 ms.

use crate::event::{GesturePhase, GestureSample, PointerSample};
use crate::geometry::Point;
use std::collections::VecDeque;

/// Samples older than this are not used for velocity.
const VELOCITY_WINDOW: f64 = 0.1;
/// Spans shorter than this give no usable velocity.
const MIN_SPAN: f64 = 0.001;

/// Windowed velocity estimator.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: VecDeque<PointerSample>,
}

impl VelocityTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample. Out-of-order or non-finite samples are dropped.
    pub fn push(&mut self, sample: PointerSample) {
        if !sample.position.is_finite() || !sample.time.is_finite() {
            return;
        }
        if self.samples.back().is_some_and(|last| sample.time < last.time) {
            return;
        }
        self.samples.push_back(sample);
        while self
            .samples
            .front()
            .is_some_and(|first| sample.time - first.time > VELOCITY_WINDOW)
        {
            self.samples.pop_front();
        }
    }

    /// Velocity in units per second across the window.
    #[must_use]
    pub fn velocity(&self) -> Point {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return Point::ORIGIN;
        };
        let dt = last.time - first.time;
        if dt < MIN_SPAN {
            return Point::ORIGIN;
        }
        let dt = dt as f32;
        Point::new(
            (last.position.x - first.position.x) / dt,
            (last.position.y - first.position.y) / dt,
        )
    }

    /// Forget all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Tracks one pointer from down to up.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    start: Option<Point>,
    last: Point,
    velocity: VelocityTracker,
}

impl PointerTracker {
    /// Create an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a pointer is down.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Pointer down.
    pub fn down(&mut self, sample: PointerSample) -> GestureSample {
        self.velocity.clear();
        self.velocity.push(sample);
        let position = sample.position.finite_or_zero();
        self.start = Some(position);
        self.last = position;
        GestureSample::new(Point::ORIGIN, Point::ORIGIN, GesturePhase::Start)
    }

    /// Pointer moved. `None` when no pointer is down.
    pub fn moved(&mut self, sample: PointerSample) -> Option<GestureSample> {
        let start = self.start?;
        self.record(sample);
        Some(GestureSample::new(
            self.last - start,
            self.velocity.velocity(),
            GesturePhase::Update,
        ))
    }

    /// Pointer lifted. `None` when no pointer is down.
    pub fn up(&mut self, sample: PointerSample) -> Option<GestureSample> {
        let start = self.start.take()?;
        self.record(sample);
        let release = GestureSample::new(
            self.last - start,
            self.velocity.velocity(),
            GesturePhase::End,
        );
        self.velocity.clear();
        Some(release)
    }

    /// Platform cancelled the pointer.
    pub fn cancel(&mut self) -> Option<GestureSample> {
        let start = self.start.take()?;
        self.velocity.clear();
        Some(GestureSample::new(
            self.last - start,
            Point::ORIGIN,
            GesturePhase::Cancel,
        ))
    }

    fn record(&mut self, sample: PointerSample) {
        if sample.position.is_finite() {
            self.last = sample.position;
        }
        self.velocity.push(sample);
    }
}
