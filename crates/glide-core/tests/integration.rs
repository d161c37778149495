//! Integration tests for glide-core.
//!
//! These tests drive the public API the way a controller does: pointer
//! samples into a tracker, tracker output into an animated value, release
//! into the dismiss policy.

use glide_core::{
    ActivationAxis, AnimatedValue, AxisBounds, DismissPolicy, DriverKind, Easing, GestureTracker,
    Overdrag, Point, PointerSample, PointerTracker, SpringConfig, Timing,
};
use std::cell::Cell;
use std::rc::Rc;

const FRAME: f32 = 1.0 / 60.0;

fn vertical_tracker(max: f32) -> GestureTracker {
    GestureTracker::new(ActivationAxis::Vertical).with_bounds_y(
        AxisBounds::FREE
            .min(0.0, Overdrag::Clamp)
            .max(max, Overdrag::RubberBand),
    )
}

// =============================================================================
// Pointer -> Gesture -> Policy
// =============================================================================

#[test]
fn test_fast_flick_from_raw_pointer_commits() {
    let mut pointer = PointerTracker::new();
    let mut tracker = vertical_tracker(400.0);
    let policy = DismissPolicy::sheet();

    pointer.down(PointerSample::new(Point::new(50.0, 100.0), 0.0));
    tracker.on_start(Point::ORIGIN);

    let mut time = 0.0;
    let mut y = 100.0;
    for _ in 0..4 {
        time += 0.01;
        y += 15.0;
        let sample = pointer
            .moved(PointerSample::new(Point::new(50.0, y), time))
            .expect("pointer down");
        tracker.on_update(&sample);
    }
    let release = pointer
        .up(PointerSample::new(Point::new(50.0, y + 15.0), time + 0.01))
        .expect("pointer down");
    let release = tracker.on_end(&release).expect("gesture active");

    // 75 units in 50 ms: short but fast.
    assert!(release.translation.y < 140.0);
    assert!(release.velocity.y > 800.0);
    assert!(policy.should_commit(release.translation, release.velocity));
}

#[test]
fn test_slow_drag_from_raw_pointer_cancels() {
    let mut pointer = PointerTracker::new();
    let mut tracker = vertical_tracker(400.0);

    pointer.down(PointerSample::new(Point::new(0.0, 0.0), 0.0));
    tracker.on_start(Point::ORIGIN);
    for i in 1..=10 {
        let sample = pointer
            .moved(PointerSample::new(
                Point::new(0.0, i as f32 * 4.0),
                f64::from(i) * 0.05,
            ))
            .expect("pointer down");
        tracker.on_update(&sample);
    }
    let sample = pointer
        .up(PointerSample::new(Point::new(0.0, 40.0), 0.6))
        .expect("pointer down");
    let release = tracker.on_end(&sample).expect("gesture active");
    assert!(!DismissPolicy::sheet().should_commit(release.translation, release.velocity));
}

// =============================================================================
// Gesture interrupting an animation
// =============================================================================

#[test]
fn test_gesture_starts_from_current_animated_value() {
    let mut offset = AnimatedValue::new(200.0);
    offset.spring(0.0, SpringConfig::SNAP_BACK, None);
    for _ in 0..3 {
        offset.tick(FRAME);
    }
    let mid_flight = offset.value();
    assert!(mid_flight > 0.0 && mid_flight < 200.0);

    let mut tracker = vertical_tracker(400.0);
    tracker.on_start(Point::new(0.0, offset.value()));
    offset.stop();

    let shown = tracker
        .on_update(&glide_core::GestureSample::moved(0.0, 10.0))
        .expect("active");
    offset.set(shown.y);
    assert!((offset.value() - (mid_flight + 10.0)).abs() < 1e-3);
    assert_eq!(offset.kind(), DriverKind::None);
}

#[test]
fn test_superseded_callback_never_fires() {
    let mut value = AnimatedValue::new(0.0);
    let stale = Rc::new(Cell::new(0));
    let fresh = Rc::new(Cell::new(0));

    value.animate_to(300.0, Timing::new(0.4, Easing::EaseOut));
    let counter = Rc::clone(&stale);
    value.on_complete(move |_| counter.set(counter.get() + 1));
    value.tick(FRAME);

    let handle = value.spring(0.0, SpringConfig::STIFF, Some(-500.0));
    let counter = Rc::clone(&fresh);
    value.on_complete(move |_| counter.set(counter.get() + 1));

    let mut reports = Vec::new();
    for _ in 0..600 {
        if let Some(done) = value.tick(FRAME) {
            reports.push(done);
        }
    }
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].handle, handle);
    assert_eq!(stale.get(), 0);
    assert_eq!(fresh.get(), 1);
    assert_eq!(value.value(), 0.0);
}
