//! Benchmarks for the per-frame physics paths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glide_core::{
    AnimatedValue, AxisBounds, DecayConfig, GestureSample, GestureTracker, ActivationAxis,
    Overdrag, Point, Snap, Spring, SpringConfig,
};

const FRAME: f32 = 1.0 / 60.0;

// =============================================================================
// Spring Benchmarks
// =============================================================================

fn bench_spring_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("spring_step");

    for dt in [FRAME, 0.05, 0.25] {
        group.bench_with_input(BenchmarkId::from_parameter(dt), &dt, |b, &dt| {
            b.iter(|| {
                let mut spring = Spring::new(0.0, SpringConfig::STIFF);
                spring.set_target(500.0);
                spring.step(black_box(dt));
                spring.value()
            });
        });
    }

    group.finish();
}

fn bench_spring_settle(c: &mut Criterion) {
    c.bench_function("animated_value_spring_settle", |b| {
        b.iter(|| {
            let mut value = AnimatedValue::new(black_box(400.0));
            value.spring(0.0, SpringConfig::SNAP_BACK, Some(1200.0));
            while value.tick(FRAME).is_none() {}
            value.value()
        });
    });
}

// =============================================================================
// Decay Benchmarks
// =============================================================================

fn bench_decay_with_snap(c: &mut Criterion) {
    let config = DecayConfig::default()
        .with_bounds(-2000.0, 0.0)
        .with_snap(Snap::new(40.0, 0.0, SpringConfig::STIFF));

    c.bench_function("decay_snap_settle", |b| {
        b.iter(|| {
            let mut value = AnimatedValue::new(0.0);
            value.decay(black_box(-2500.0), config);
            while value.tick(FRAME).is_none() {}
            value.value()
        });
    });
}

// =============================================================================
// Gesture Benchmarks
// =============================================================================

fn bench_gesture_update(c: &mut Criterion) {
    let bounds = AxisBounds::FREE
        .min(0.0, Overdrag::Clamp)
        .max(300.0, Overdrag::RubberBand);

    c.bench_function("gesture_update_rubber_band", |b| {
        let mut tracker = GestureTracker::new(ActivationAxis::Vertical).with_bounds_y(bounds);
        tracker.on_start(Point::ORIGIN);
        tracker.on_update(&GestureSample::moved(0.0, 10.0));
        b.iter(|| tracker.on_update(&GestureSample::moved(0.0, black_box(520.0))));
    });
}

criterion_group!(
    benches,
    bench_spring_step,
    bench_spring_settle,
    bench_decay_with_snap,
    bench_gesture_update,
);
criterion_main!(benches);
