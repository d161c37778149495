//! Benchmarks for per-frame controller work.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glide_core::{GestureSample, Point, ScrollSample, Size};
use glide_widgets::{
    PickerConfig, ScrollHeaderController, SheetConfig, SheetController, ThumbnailGrid,
    TransitionConfig, TransitionCoordinator, VisibilityTracker, WheelPicker,
};

const FRAME: f32 = 1.0 / 60.0;

// =============================================================================
// Sheet Benchmarks
// =============================================================================

fn bench_sheet_drag(c: &mut Criterion) {
    c.bench_function("sheet_drag_update", |b| {
        let mut sheet = SheetController::uncontrolled(SheetConfig::default());
        sheet.open();
        while sheet.tick(FRAME).is_none() {}
        sheet.on_drag_start(Point::ORIGIN);
        sheet.on_drag_update(&GestureSample::moved(0.0, 10.0));
        b.iter(|| sheet.on_drag_update(&GestureSample::moved(0.0, black_box(120.0))));
    });

    c.bench_function("sheet_open_close_cycle", |b| {
        b.iter(|| {
            let mut sheet = SheetController::uncontrolled(SheetConfig::default());
            sheet.open();
            while sheet.tick(FRAME).is_none() {}
            sheet.close();
            while sheet.tick(FRAME).is_none() {}
            sheet.snapshot()
        });
    });
}

// =============================================================================
// Header Benchmarks
// =============================================================================

fn bench_header_scroll(c: &mut Criterion) {
    c.bench_function("header_scroll_and_tick", |b| {
        let mut header = ScrollHeaderController::default();
        header.set_header_height(56.0);
        let mut y = 100.0;
        b.iter(|| {
            y += 3.0;
            header.on_scroll(ScrollSample::new(black_box(y)));
            header.tick(FRAME);
            header.style()
        });
    });
}

// =============================================================================
// Visibility Benchmarks
// =============================================================================

fn bench_most_visible(c: &mut Criterion) {
    let mut group = c.benchmark_group("most_visible_index");

    for count in [10usize, 100, 1000] {
        let mut tracker = VisibilityTracker::new();
        for i in 0..count {
            tracker.set_item_height(i, 80.0 + (i % 7) as f32 * 10.0);
        }
        tracker.set_viewport_height(800.0);
        tracker.set_scroll_offset(count as f32 * 40.0);
        group.bench_with_input(BenchmarkId::from_parameter(count), &tracker, |b, tracker| {
            b.iter(|| black_box(tracker).most_visible_index());
        });
    }

    group.finish();
}

// =============================================================================
// Transition and Picker Benchmarks
// =============================================================================

fn bench_transition_cycle(c: &mut Criterion) {
    let grid = ThumbnailGrid::new(Point::ORIGIN, 3, Size::new(120.0, 120.0), 4.0);

    c.bench_function("transition_expand_collapse", |b| {
        b.iter(|| {
            let mut transition = TransitionCoordinator::new(TransitionConfig::default(), grid);
            transition.set_screen_size(Size::new(390.0, 844.0));
            transition.on_select(black_box(4), Point::new(124.0, 124.0));
            while transition.tick(FRAME).is_none() {}
            transition.on_dismiss();
            while transition.tick(FRAME).is_none() {}
            transition.style()
        });
    });
}

fn bench_picker_flick(c: &mut Criterion) {
    c.bench_function("picker_flick_settle", |b| {
        b.iter(|| {
            let mut picker = WheelPicker::new(PickerConfig::default(), 100);
            picker.on_drag_start();
            picker.on_drag_update(&GestureSample::moved(0.0, -20.0));
            picker.on_drag_end(&GestureSample::released(
                Point::new(0.0, -20.0),
                Point::new(0.0, black_box(-3000.0)),
            ));
            while picker.tick(FRAME).is_none() {}
            picker.selected()
        });
    });
}

criterion_group!(
    benches,
    bench_sheet_drag,
    bench_header_scroll,
    bench_most_visible,
    bench_transition_cycle,
    bench_picker_flick,
);
criterion_main!(benches);
