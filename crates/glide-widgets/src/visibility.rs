// Visibility tracking for a vertically scrolling list
//
// Layout reports item heights one at a time, in any order. Until an item is
// measured it takes no space. The tracker answers which item currently
// covers the most of the viewport.

/// Cumulative item heights against a scroll offset.
#[derive(Debug, Clone, Default)]
pub struct VisibilityTracker {
    /// Measured heights; unreported slots are 0
    item_heights: Vec<f32>,
    /// Current content offset
    scroll_offset: f32,
    /// Viewport height, 0 until measured
    viewport_height: f32,
}

impl VisibilityTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of item slots seen so far.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_heights.len()
    }

    /// Current scroll offset.
    #[must_use]
    pub const fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Record an item's height. Invalid heights count as unmeasured.
    pub fn set_item_height(&mut self, index: usize, height: f32) {
        let height = if height.is_finite() && height > 0.0 {
            height
        } else {
            tracing::trace!(index, height, "item height treated as unmeasured");
            0.0
        };
        if index >= self.item_heights.len() {
            self.item_heights.resize(index + 1, 0.0);
        }
        self.item_heights[index] = height;
    }

    /// Drop all item heights.
    pub fn clear(&mut self) {
        self.item_heights.clear();
    }

    /// Record the scroll offset. Non-finite offsets are ignored.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        if offset.is_finite() {
            self.scroll_offset = offset;
        }
    }

    /// Record the viewport height. Invalid heights mean unmeasured.
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = if height.is_finite() && height > 0.0 {
            height
        } else {
            0.0
        };
    }

    /// Top edge of item `index` in content coordinates.
    #[must_use]
    pub fn item_position(&self, index: usize) -> f32 {
        self.item_heights.iter().take(index).sum()
    }

    /// How much of item `index` is inside the viewport.
    #[must_use]
    pub fn visible_extent(&self, index: usize) -> f32 {
        let Some(&height) = self.item_heights.get(index) else {
            return 0.0;
        };
        let top = self.item_position(index);
        self.extent(top, height)
    }

    /// Item with the largest visible extent. The first one wins ties.
    ///
    /// `None` while the viewport or every visible item is unmeasured.
    #[must_use]
    pub fn most_visible_index(&self) -> Option<usize> {
        if self.viewport_height <= 0.0 {
            return None;
        }
        let mut best: Option<(usize, f32)> = None;
        let mut top = 0.0;
        for (index, &height) in self.item_heights.iter().enumerate() {
            let extent = self.extent(top, height);
            if extent > 0.0 && best.map_or(true, |(_, e)| extent > e) {
                best = Some((index, extent));
            }
            top += height;
        }
        best.map(|(index, _)| index)
    }

    fn extent(&self, top: f32, height: f32) -> f32 {
        let view_top = self.scroll_offset;
        let view_bottom = self.scroll_offset + self.viewport_height;
        ((top + height).min(view_bottom) - top.max(view_top)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn list(heights: &[f32], viewport: f32) -> VisibilityTracker {
        let mut tracker = VisibilityTracker::new();
        for (i, &h) in heights.iter().enumerate() {
            tracker.set_item_height(i, h);
        }
        tracker.set_viewport_height(viewport);
        tracker
    }

    #[test]
    fn test_unmeasured_is_none() {
        assert_eq!(VisibilityTracker::new().most_visible_index(), None);
        let tracker = list(&[100.0, 100.0], 0.0);
        assert_eq!(tracker.most_visible_index(), None);
        let tracker = list(&[0.0, f32::NAN], 500.0);
        assert_eq!(tracker.most_visible_index(), None);
    }

    #[test]
    fn test_largest_extent_wins() {
        let mut tracker = list(&[300.0, 300.0, 300.0], 400.0);
        assert_eq!(tracker.most_visible_index(), Some(0));
        tracker.set_scroll_offset(250.0);
        // Item 0: 50 visible, item 1: 300, item 2: 50.
        assert_eq!(tracker.most_visible_index(), Some(1));
        tracker.set_scroll_offset(500.0);
        assert_eq!(tracker.most_visible_index(), Some(2));
    }

    #[test]
    fn test_first_wins_ties() {
        let mut tracker = list(&[200.0, 200.0], 200.0);
        tracker.set_scroll_offset(100.0);
        assert_eq!(tracker.most_visible_index(), Some(0));
    }

    #[test]
    fn test_unreported_items_take_no_space() {
        let mut tracker = VisibilityTracker::new();
        tracker.set_viewport_height(300.0);
        tracker.set_item_height(3, 250.0);
        assert_eq!(tracker.item_count(), 4);
        assert_eq!(tracker.item_position(3), 0.0);
        assert_eq!(tracker.most_visible_index(), Some(3));
        tracker.set_item_height(0, 200.0);
        assert_eq!(tracker.item_position(3), 200.0);
        // Item 0 now covers 200 of the viewport, item 3 only 100.
        assert_eq!(tracker.most_visible_index(), Some(0));
    }

    #[test]
    fn test_visible_extent() {
        let mut tracker = list(&[100.0, 100.0], 150.0);
        tracker.set_scroll_offset(f32::NAN);
        assert_eq!(tracker.scroll_offset(), 0.0);
        assert_eq!(tracker.visible_extent(0), 100.0);
        assert_eq!(tracker.visible_extent(1), 50.0);
        assert_eq!(tracker.visible_extent(7), 0.0);
    }

    proptest! {
        #[test]
        fn prop_most_visible_is_measured(
            heights in prop::collection::vec(prop_oneof![Just(0.0f32), 10.0f32..400.0], 1..30),
            offset in 0.0f32..4000.0,
        ) {
            let mut tracker = list(&heights, 600.0);
            tracker.set_scroll_offset(offset);
            if let Some(index) = tracker.most_visible_index() {
                prop_assert!(heights[index] > 0.0);
                let best = tracker.visible_extent(index);
                for i in 0..heights.len() {
                    prop_assert!(tracker.visible_extent(i) <= best);
                }
            }
        }
    }
}
