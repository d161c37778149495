//! Shared-element transition between a grid thumbnail and a full-screen list.
//!
//! One `progress` value (0 thumbnail, 1 full screen) drives scale, corner
//! radius and the offset from the thumbnail's position. While expanded, a pan
//! moves the element with the finger and shrinks it slightly; releasing
//! either collapses it back into the grid or snaps it back to full screen.
//!
//! Children of the full-screen list may capture pinch-zoom. While one does,
//! the coordinator ignores pans and the list should not scroll.

use crate::config::TransitionConfig;
use crate::visibility::VisibilityTracker;
use glide_core::{
    interpolate, ActivationAxis, AnimatedValue, AnimationHandle, DismissDirection, DismissPolicy,
    GestureRelease, GestureSample, GestureTracker, Point, Size,
};
use serde::{Deserialize, Serialize};

/// Where the thumbnail for a list item sits on screen.
pub trait SourceLocator {
    /// Top-left of the thumbnail for `index`, `None` when not laid out.
    fn source_for(&self, index: usize) -> Option<Point>;
}

/// Uniform grid of thumbnails laid out row by row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailGrid {
    /// Top-left of cell 0
    pub origin: Point,
    /// Cells per row
    pub columns: usize,
    /// Size of one cell
    pub cell: Size,
    /// Gap between cells in both directions
    pub spacing: f32,
}

impl ThumbnailGrid {
    /// Create a grid.
    #[must_use]
    pub const fn new(origin: Point, columns: usize, cell: Size, spacing: f32) -> Self {
        Self {
            origin,
            columns,
            cell,
            spacing,
        }
    }
}

impl Default for ThumbnailGrid {
    fn default() -> Self {
        Self::new(Point::ORIGIN, 3, Size::ZERO, 0.0)
    }
}

impl SourceLocator for ThumbnailGrid {
    fn source_for(&self, index: usize) -> Option<Point> {
        if self.columns == 0 || !self.cell.is_measured() {
            return None;
        }
        let column = (index % self.columns) as f32;
        let row = (index / self.columns) as f32;
        Some(Point::new(
            column.mul_add(self.cell.width + self.spacing, self.origin.x),
            row.mul_add(self.cell.height + self.spacing, self.origin.y),
        ))
    }
}

/// Lifecycle phase of the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransitionPhase {
    /// Nothing mounted
    #[default]
    Idle,
    /// Growing from the thumbnail
    Expanding,
    /// Full screen (possibly snapping back after a drag)
    Expanded,
    /// Following a pan
    Dragging,
    /// Shrinking back into the grid
    Collapsing,
}

/// Notifications for the surrounding screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionEvent {
    /// Finished expanding
    Expanded,
    /// Finished collapsing; `index` is the item the grid should reveal
    Dismissed {
        /// Item that was most visible when the collapse finished
        index: usize,
    },
}

/// Per-frame render values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionStyle {
    /// Uniform scale
    pub scale: f32,
    /// Corner radius
    pub corner_radius: f32,
    /// Offset from the full-screen position
    pub translate: Point,
    /// Opacity in `[0, 1]`
    pub opacity: f32,
    /// Whether the full-screen layer needs to be mounted
    pub visible: bool,
}

/// Drives the expand/collapse transition and its drag-to-dismiss gesture.
#[derive(Debug)]
pub struct TransitionCoordinator<L = ThumbnailGrid> {
    config: TransitionConfig,
    locator: L,
    phase: TransitionPhase,
    progress: AnimatedValue,
    opacity: AnimatedValue,
    translate_x: AnimatedValue,
    translate_y: AnimatedValue,
    source: Point,
    selected_index: usize,
    screen: Size,
    tracker: GestureTracker,
    visibility: VisibilityTracker,
    zooming_child_index: Option<usize>,
    pending: Option<AnimationHandle>,
}

impl<L: SourceLocator> TransitionCoordinator<L> {
    /// Create an idle coordinator.
    #[must_use]
    pub fn new(config: TransitionConfig, locator: L) -> Self {
        Self {
            config,
            locator,
            phase: TransitionPhase::Idle,
            progress: AnimatedValue::new(0.0),
            opacity: AnimatedValue::new(0.0),
            translate_x: AnimatedValue::new(0.0),
            translate_y: AnimatedValue::new(0.0),
            source: Point::ORIGIN,
            selected_index: 0,
            screen: Size::ZERO,
            tracker: GestureTracker::with_config(ActivationAxis::Any, config.gesture),
            visibility: VisibilityTracker::new(),
            zooming_child_index: None,
            pending: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Current progress (0 thumbnail, 1 full screen).
    #[must_use]
    pub const fn progress(&self) -> f32 {
        self.progress.value()
    }

    /// Thumbnail position the transition animates from and to.
    #[must_use]
    pub const fn source(&self) -> Point {
        self.source
    }

    /// Live drag offset.
    #[must_use]
    pub const fn drag_translation(&self) -> Point {
        Point::new(self.translate_x.value(), self.translate_y.value())
    }

    /// Item that opened the transition.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Child currently capturing pinch-zoom.
    #[must_use]
    pub const fn zooming_child_index(&self) -> Option<usize> {
        self.zooming_child_index
    }

    /// Whether the full-screen list may scroll.
    #[must_use]
    pub const fn list_scroll_enabled(&self) -> bool {
        self.zooming_child_index.is_none()
    }

    /// Whether a pan may start now.
    #[must_use]
    pub fn pan_enabled(&self) -> bool {
        self.zooming_child_index.is_none()
            && self.phase == TransitionPhase::Expanded
            && self.screen.is_measured()
    }

    /// Visibility of the full-screen list's items.
    #[must_use]
    pub const fn visibility(&self) -> &VisibilityTracker {
        &self.visibility
    }

    /// Thumbnail locator.
    #[must_use]
    pub const fn locator(&self) -> &L {
        &self.locator
    }

    /// Mutable thumbnail locator, for grid layout changes.
    pub fn locator_mut(&mut self) -> &mut L {
        &mut self.locator
    }

    /// Render values for this frame.
    #[must_use]
    pub fn style(&self) -> TransitionStyle {
        let p = self.progress.value();
        let range = (0.0, 1.0);
        TransitionStyle {
            scale: interpolate(p, range, (self.config.thumbnail_scale, 1.0)),
            corner_radius: interpolate(
                p,
                range,
                (
                    self.config.thumbnail_corner_radius,
                    self.config.expanded_corner_radius,
                ),
            ),
            translate: self.source * (1.0 - p.clamp(0.0, 1.0)) + self.drag_translation(),
            opacity: self.opacity.value().clamp(0.0, 1.0),
            visible: self.phase != TransitionPhase::Idle,
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Screen size from layout. Pans need a measured width.
    pub fn set_screen_size(&mut self, size: Size) {
        if size.is_measured() {
            self.screen = size;
        }
    }

    /// Height of a full-screen list item from layout.
    pub fn set_item_height(&mut self, index: usize, height: f32) {
        self.visibility.set_item_height(index, height);
    }

    /// Full-screen list viewport height from layout.
    pub fn set_viewport_height(&mut self, height: f32) {
        self.visibility.set_viewport_height(height);
    }

    /// Full-screen list scrolled.
    pub fn on_list_scroll(&mut self, offset: f32) {
        self.visibility.set_scroll_offset(offset);
    }

    // =========================================================================
    // Select / dismiss
    // =========================================================================

    /// A thumbnail at `source` was tapped.
    pub fn on_select(&mut self, index: usize, source: Point) {
        if self.phase != TransitionPhase::Idle {
            return;
        }
        self.selected_index = index;
        self.source = source.finite_or_zero();
        self.translate_x.set(0.0);
        self.translate_y.set(0.0);
        self.opacity.set(1.0);
        self.progress.set(0.0);
        self.pending = Some(self.progress.animate_to(1.0, self.config.expand_timing));
        self.enter(TransitionPhase::Expanding);
    }

    /// Close programmatically, e.g. from a back button.
    pub fn on_dismiss(&mut self) {
        match self.phase {
            TransitionPhase::Idle | TransitionPhase::Collapsing => {}
            TransitionPhase::Expanding | TransitionPhase::Expanded | TransitionPhase::Dragging => {
                self.collapse();
            }
        }
    }

    fn collapse(&mut self) {
        // Drops a pan that started but never activated as well.
        self.tracker.reset();
        let timing = self.config.collapse_timing;
        self.translate_x.animate_to(0.0, timing);
        self.translate_y.animate_to(0.0, timing);
        self.opacity.animate_to(0.0, timing);
        self.pending = Some(self.progress.animate_to(0.0, timing));
        self.enter(TransitionPhase::Collapsing);
    }

    // =========================================================================
    // Pan
    // =========================================================================

    /// Pan began. Returns whether the coordinator will track it.
    pub fn on_pan_start(&mut self) -> bool {
        if !self.pan_enabled() {
            return false;
        }
        self.tracker.on_start(self.drag_translation());
        true
    }

    /// Pan moved. Returns the drag translation while dragging.
    pub fn on_pan_update(&mut self, sample: &GestureSample) -> Option<Point> {
        if self.zooming_child_index.is_some()
            || !matches!(
                self.phase,
                TransitionPhase::Expanded | TransitionPhase::Dragging
            )
        {
            return None;
        }
        let translation = self.tracker.on_update(sample)?;
        if self.phase == TransitionPhase::Expanded {
            // Cancels a running snap-back.
            self.progress.stop();
            self.translate_x.stop();
            self.translate_y.stop();
            self.pending = None;
            self.enter(TransitionPhase::Dragging);
        }
        self.translate_x.set(translation.x);
        self.translate_y.set(translation.y);
        self.progress.set(self.drag_progress(translation));
        Some(translation)
    }

    /// Pan ended.
    pub fn on_pan_end(&mut self, sample: &GestureSample) {
        if let Some(release) = self.tracker.on_end(sample) {
            self.release(release);
        }
    }

    /// Platform cancelled the pan. Resolves like a release that does not
    /// commit.
    pub fn on_pan_cancel(&mut self) {
        if let Some(release) = self.tracker.on_cancel() {
            self.release(release);
        }
    }

    /// Progress shown for a drag: a small continuous shrink.
    fn drag_progress(&self, translation: Point) -> f32 {
        let reach = self.screen.width * self.config.drag_shrink_distance;
        if reach <= 0.0 {
            return 1.0;
        }
        1.0 - (translation.length() / reach).clamp(0.0, self.config.drag_shrink)
    }

    fn should_commit(&self, release: &GestureRelease) -> bool {
        if release.cancelled {
            return false;
        }
        let fling = self.config.fling_velocity;
        let distance = self.screen.width * self.config.commit_distance;
        // Horizontal distance commits either way; only rightward and downward
        // flings do.
        [
            DismissPolicy::new(DismissDirection::Right, distance, fling),
            DismissPolicy::new(DismissDirection::Left, distance, f32::INFINITY),
            DismissPolicy::new(DismissDirection::Down, f32::INFINITY, fling),
        ]
        .iter()
        .any(|policy| policy.should_commit(release.translation, release.velocity))
    }

    fn release(&mut self, release: GestureRelease) {
        if self.phase != TransitionPhase::Dragging {
            return;
        }
        let commit = self.should_commit(&release);
        tracing::debug!(
            translation = ?release.translation,
            velocity = ?release.velocity,
            commit,
            "transition pan released"
        );
        if commit {
            self.collapse();
        } else {
            self.snap_back(release.velocity);
        }
    }

    fn snap_back(&mut self, velocity: Point) {
        let spring = self.config.snap_back;
        self.progress.spring(1.0, spring, None);
        self.translate_x.spring(0.0, spring, Some(velocity.x));
        self.translate_y.spring(0.0, spring, Some(velocity.y));
        self.pending = None;
        self.enter(TransitionPhase::Expanded);
    }

    // =========================================================================
    // Child zoom
    // =========================================================================

    /// A list child started pinch-zooming. Returns `false` when another
    /// child already holds the zoom.
    pub fn on_child_zoom_start(&mut self, index: usize) -> bool {
        match self.zooming_child_index {
            Some(current) => current == index,
            None => {
                self.zooming_child_index = Some(index);
                if self.phase == TransitionPhase::Dragging {
                    self.tracker.reset();
                    self.snap_back(Point::ORIGIN);
                }
                tracing::debug!(index, "child zoom captured input");
                true
            }
        }
    }

    /// A list child finished pinch-zooming.
    pub fn on_child_zoom_end(&mut self, index: usize) {
        if self.zooming_child_index == Some(index) {
            self.zooming_child_index = None;
            tracing::debug!(index, "child zoom released input");
        }
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Advance animations by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> Option<TransitionEvent> {
        self.translate_x.tick(dt);
        self.translate_y.tick(dt);
        self.opacity.tick(dt);
        let finished = self.progress.tick(dt)?;
        if self.pending != Some(finished.handle) {
            return None;
        }
        self.pending = None;
        match self.phase {
            TransitionPhase::Expanding => {
                self.enter(TransitionPhase::Expanded);
                Some(TransitionEvent::Expanded)
            }
            TransitionPhase::Collapsing => Some(self.finish_collapse()),
            TransitionPhase::Idle | TransitionPhase::Expanded | TransitionPhase::Dragging => None,
        }
    }

    fn finish_collapse(&mut self) -> TransitionEvent {
        for value in [
            &mut self.translate_x,
            &mut self.translate_y,
            &mut self.opacity,
        ] {
            if value.is_animating() {
                value.set(0.0);
            }
        }
        let index = self
            .visibility
            .most_visible_index()
            .unwrap_or(self.selected_index);
        match self.locator.source_for(index) {
            Some(source) => self.source = source,
            None => tracing::trace!(index, "no thumbnail position, keeping source"),
        }
        self.selected_index = index;
        self.enter(TransitionPhase::Idle);
        TransitionEvent::Dismissed { index }
    }

    fn enter(&mut self, phase: TransitionPhase) {
        if self.phase != phase {
            tracing::debug!(from = ?self.phase, to = ?phase, "transition phase");
            self.phase = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn grid() -> ThumbnailGrid {
        ThumbnailGrid::new(Point::new(0.0, 100.0), 3, Size::new(120.0, 120.0), 10.0)
    }

    fn coordinator() -> TransitionCoordinator {
        let mut c = TransitionCoordinator::new(TransitionConfig::default(), grid());
        c.set_screen_size(Size::new(400.0, 800.0));
        c
    }

    fn settle(c: &mut TransitionCoordinator) -> Vec<TransitionEvent> {
        (0..600).filter_map(|_| c.tick(FRAME)).collect()
    }

    fn expanded() -> TransitionCoordinator {
        let mut c = coordinator();
        c.on_select(4, Point::new(130.0, 230.0));
        assert_eq!(settle(&mut c), vec![TransitionEvent::Expanded]);
        c
    }

    fn pan(c: &mut TransitionCoordinator, to: Point, velocity: Point) {
        assert!(c.on_pan_start());
        c.on_pan_update(&GestureSample::moved(to.x / 2.0, to.y / 2.0));
        c.on_pan_update(&GestureSample::moved(to.x, to.y));
        c.on_pan_end(&GestureSample::released(to, velocity));
    }

    // -------------------------------------------------------------------------
    // Grid
    // -------------------------------------------------------------------------

    #[test]
    fn test_grid_source() {
        let grid = grid();
        assert_eq!(grid.source_for(0), Some(Point::new(0.0, 100.0)));
        assert_eq!(grid.source_for(4), Some(Point::new(130.0, 230.0)));
        assert_eq!(ThumbnailGrid::default().source_for(1), None);
    }

    // -------------------------------------------------------------------------
    // Expand / collapse
    // -------------------------------------------------------------------------

    #[test]
    fn test_style_at_thumbnail() {
        let mut c = coordinator();
        c.on_select(4, Point::new(130.0, 230.0));
        let style = c.style();
        assert!((style.scale - 0.333).abs() < 1e-6);
        assert_eq!(style.corner_radius, 20.0);
        assert_eq!(style.translate, Point::new(130.0, 230.0));
        assert_eq!(style.opacity, 1.0);
        assert!(style.visible);
    }

    #[test]
    fn test_expand_reaches_full_screen() {
        let c = expanded();
        assert_eq!(c.phase(), TransitionPhase::Expanded);
        let style = c.style();
        assert!((style.scale - 1.0).abs() < 1e-6);
        assert!((style.corner_radius - 40.0).abs() < 1e-4);
        assert_eq!(style.translate, Point::ORIGIN);
    }

    #[test]
    fn test_redundant_select_is_noop() {
        let mut c = expanded();
        c.on_select(7, Point::new(1.0, 2.0));
        assert_eq!(c.selected_index(), 4);
        assert_eq!(c.source(), Point::new(130.0, 230.0));
    }

    #[test]
    fn test_programmatic_dismiss() {
        let mut c = expanded();
        c.on_dismiss();
        assert_eq!(c.phase(), TransitionPhase::Collapsing);
        assert_eq!(settle(&mut c), vec![TransitionEvent::Dismissed { index: 4 }]);
        assert_eq!(c.phase(), TransitionPhase::Idle);
        let style = c.style();
        assert_eq!(style.opacity, 0.0);
        assert!(!style.visible);

        c.on_dismiss();
        assert_eq!(c.phase(), TransitionPhase::Idle);
    }

    #[test]
    fn test_dismiss_recomputes_source_from_most_visible() {
        let mut c = expanded();
        for i in 0..10 {
            c.set_item_height(i, 800.0);
        }
        c.set_viewport_height(800.0);
        // Item 5 fills the viewport.
        c.on_list_scroll(4000.0);
        c.on_dismiss();
        assert_eq!(settle(&mut c), vec![TransitionEvent::Dismissed { index: 5 }]);
        assert_eq!(c.source(), Point::new(260.0, 230.0));
        assert_eq!(c.selected_index(), 5);
    }

    // -------------------------------------------------------------------------
    // Pan
    // -------------------------------------------------------------------------

    #[test]
    fn test_drag_progress_shrinks_a_little() {
        let mut c = expanded();
        assert!(c.on_pan_start());
        c.on_pan_update(&GestureSample::moved(20.0, 0.0));
        assert_eq!(c.phase(), TransitionPhase::Dragging);
        assert!((c.progress() - 0.9).abs() < 1e-6);
        assert_eq!(c.drag_translation(), Point::new(20.0, 0.0));

        c.on_pan_update(&GestureSample::moved(0.0, 100.0));
        assert!((c.progress() - 0.85).abs() < 1e-6);
        let expected = Point::new(0.0, 100.0) + c.source() * 0.15;
        assert!(c.style().translate.distance(&expected) < 1e-3);
    }

    #[test]
    fn test_horizontal_distance_commits() {
        let mut c = expanded();
        pan(&mut c, Point::new(150.0, 0.0), Point::ORIGIN);
        assert_eq!(c.phase(), TransitionPhase::Collapsing);
        assert_eq!(settle(&mut c), vec![TransitionEvent::Dismissed { index: 4 }]);
        assert_eq!(c.drag_translation(), Point::ORIGIN);
    }

    #[test]
    fn test_fling_down_commits() {
        let mut c = expanded();
        pan(&mut c, Point::new(0.0, 30.0), Point::new(0.0, 900.0));
        assert_eq!(c.phase(), TransitionPhase::Collapsing);
    }

    #[test]
    fn test_short_drag_snaps_back() {
        let mut c = expanded();
        pan(&mut c, Point::new(-80.0, -40.0), Point::new(-300.0, 0.0));
        assert_eq!(c.phase(), TransitionPhase::Expanded);
        assert!(settle(&mut c).is_empty());
        assert_eq!(c.progress(), 1.0);
        assert_eq!(c.drag_translation(), Point::ORIGIN);
    }

    #[test]
    fn test_leftward_distance_commits() {
        let mut c = expanded();
        pan(&mut c, Point::new(-150.0, 0.0), Point::ORIGIN);
        assert_eq!(c.phase(), TransitionPhase::Collapsing);
    }

    #[test]
    fn test_leftward_fling_alone_snaps_back() {
        let mut c = expanded();
        pan(&mut c, Point::new(-40.0, 0.0), Point::new(-2000.0, 0.0));
        assert_eq!(c.phase(), TransitionPhase::Expanded);
    }

    #[test]
    fn test_pan_cancel_snaps_back() {
        let mut c = expanded();
        assert!(c.on_pan_start());
        c.on_pan_update(&GestureSample::moved(200.0, 0.0));
        c.on_pan_cancel();
        assert_eq!(c.phase(), TransitionPhase::Expanded);
    }

    #[test]
    fn test_pan_needs_screen_width() {
        let mut c = TransitionCoordinator::new(TransitionConfig::default(), grid());
        c.on_select(0, Point::ORIGIN);
        settle(&mut c);
        assert!(!c.on_pan_start());
    }

    // -------------------------------------------------------------------------
    // Dismiss during a pan
    // -------------------------------------------------------------------------

    fn assert_dismisses_cleanly(c: &mut TransitionCoordinator) {
        assert!(c.on_pan_update(&GestureSample::moved(30.0, 0.0)).is_none());
        c.on_pan_end(&GestureSample::released(
            Point::new(30.0, 0.0),
            Point::new(200.0, 0.0),
        ));
        assert_eq!(settle(c), vec![TransitionEvent::Dismissed { index: 4 }]);
        assert_eq!(c.phase(), TransitionPhase::Idle);
        assert!(!c.style().visible);
        assert_eq!(c.drag_translation(), Point::ORIGIN);
    }

    #[test]
    fn test_dismiss_before_pan_activates() {
        let mut c = expanded();
        assert!(c.on_pan_start());
        c.on_dismiss();
        assert_eq!(c.phase(), TransitionPhase::Collapsing);
        assert_dismisses_cleanly(&mut c);
    }

    #[test]
    fn test_dismiss_mid_pan() {
        let mut c = expanded();
        assert!(c.on_pan_start());
        c.on_pan_update(&GestureSample::moved(20.0, 0.0));
        assert_eq!(c.phase(), TransitionPhase::Dragging);
        c.on_dismiss();
        assert_dismisses_cleanly(&mut c);
    }

    #[test]
    fn test_pan_while_expanding_is_ignored() {
        let mut c = coordinator();
        c.on_select(4, Point::new(130.0, 230.0));
        assert!(!c.on_pan_start());
        assert!(c.on_pan_update(&GestureSample::moved(30.0, 0.0)).is_none());
        assert_eq!(settle(&mut c), vec![TransitionEvent::Expanded]);
    }

    // -------------------------------------------------------------------------
    // Child zoom
    // -------------------------------------------------------------------------

    #[test]
    fn test_child_zoom_blocks_pan_and_scroll() {
        let mut c = expanded();
        assert!(c.on_child_zoom_start(2));
        assert!(!c.on_child_zoom_start(3));
        assert_eq!(c.zooming_child_index(), Some(2));
        assert!(!c.list_scroll_enabled());
        assert!(!c.on_pan_start());

        c.on_child_zoom_end(3);
        assert_eq!(c.zooming_child_index(), Some(2));
        c.on_child_zoom_end(2);
        assert!(c.list_scroll_enabled());
        assert!(c.on_pan_start());
    }

    #[test]
    fn test_child_zoom_mid_drag_snaps_back() {
        let mut c = expanded();
        assert!(c.on_pan_start());
        c.on_pan_update(&GestureSample::moved(60.0, 0.0));
        assert!(c.on_child_zoom_start(1));
        assert_eq!(c.phase(), TransitionPhase::Expanded);
        assert!(c.on_pan_update(&GestureSample::moved(90.0, 0.0)).is_none());
        settle(&mut c);
        assert_eq!(c.drag_translation(), Point::ORIGIN);
    }
}
