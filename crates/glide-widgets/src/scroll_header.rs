//! Header that hides while scrolling down and returns while scrolling up.

use crate::config::HeaderConfig;
use glide_core::{AnimatedValue, ScrollSample};
use serde::{Deserialize, Serialize};

/// Last significant scroll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScrollDirection {
    /// Content moving down (offset decreasing)
    #[default]
    Up,
    /// Content moving up (offset increasing)
    Down,
}

/// Per-frame render values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeaderStyle {
    /// 0 fully shown, `-header_height` fully hidden
    pub translate_y: f32,
    /// Fraction of the header on screen, in `[0, 1]`
    pub visible_fraction: f32,
}

/// Owns a header's vertical offset.
#[derive(Debug)]
pub struct ScrollHeaderController {
    config: HeaderConfig,
    translate_y: AnimatedValue,
    last_scroll_y: f32,
    direction: ScrollDirection,
    header_height: Option<f32>,
}

impl Default for ScrollHeaderController {
    fn default() -> Self {
        Self::new(HeaderConfig::default())
    }
}

impl ScrollHeaderController {
    /// Create a shown header whose height is not known yet.
    #[must_use]
    pub fn new(config: HeaderConfig) -> Self {
        Self {
            config,
            translate_y: AnimatedValue::new(0.0),
            last_scroll_y: 0.0,
            direction: ScrollDirection::Up,
            header_height: None,
        }
    }

    /// Measured header height, `None` until layout reports a valid one.
    #[must_use]
    pub const fn header_height(&self) -> Option<f32> {
        self.header_height
    }

    /// Last significant scroll direction.
    #[must_use]
    pub const fn direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Offset of the previous scroll sample.
    #[must_use]
    pub const fn last_scroll_y(&self) -> f32 {
        self.last_scroll_y
    }

    /// Whether the header is moving.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.translate_y.is_animating()
    }

    /// Where the header is headed: the running animation's target, or the
    /// current offset when idle.
    #[must_use]
    pub fn resting_target(&self) -> f32 {
        self.translate_y
            .target()
            .unwrap_or_else(|| self.translate_y.value())
    }

    /// Render values for this frame.
    #[must_use]
    pub fn style(&self) -> HeaderStyle {
        let translate_y = self.translate_y.value();
        let visible_fraction = match self.header_height {
            Some(height) => (1.0 + translate_y / height).clamp(0.0, 1.0),
            None => 1.0,
        };
        HeaderStyle {
            translate_y,
            visible_fraction,
        }
    }

    /// Layout reported the header height. 0 or non-finite means unknown.
    pub fn set_header_height(&mut self, height: f32) {
        if !(height.is_finite() && height > 0.0) {
            tracing::trace!(height, "header height unknown");
            self.header_height = None;
            return;
        }
        let previous = self.header_height.replace(height);
        if let Some(previous) = previous {
            if !self.translate_y.is_animating() && self.translate_y.value() == -previous {
                self.translate_y.set(-height);
            }
        }
    }

    /// Feed the list's content offset.
    pub fn on_scroll(&mut self, sample: ScrollSample) {
        let y = sample.offset_y;
        if !y.is_finite() {
            tracing::trace!(y, "ignoring non-finite scroll offset");
            return;
        }
        let delta = y - self.last_scroll_y;
        self.last_scroll_y = y;

        if y <= self.config.near_top_threshold {
            if self.resting_target() != 0.0 {
                tracing::debug!(y, "near top, showing header");
                self.translate_y.spring(0.0, self.config.show_spring, None);
            }
            return;
        }

        if delta.abs() <= self.config.noise_floor {
            return;
        }
        self.direction = if delta > 0.0 {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        };
        let Some(height) = self.header_height else {
            return;
        };
        let target = match self.direction {
            ScrollDirection::Down => -height,
            ScrollDirection::Up => 0.0,
        };
        if self.translate_y.is_animating() || target == self.resting_target() {
            return;
        }

        tracing::debug!(direction = ?self.direction, target, "header visibility change");
        match self.direction {
            ScrollDirection::Down => {
                self.translate_y.animate_to(target, self.config.hide_timing);
            }
            ScrollDirection::Up => {
                self.translate_y.spring(target, self.config.show_spring, None);
            }
        }
    }

    /// Advance the header animation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.translate_y.tick(dt);
    }
}
