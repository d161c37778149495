//! Motion configuration, loadable from YAML.
//!
//! ```yaml
//! sheet:
//!   max_drag: 320
//!   close_on_backdrop_press: false
//! header:
//!   near_top_threshold: 24
//! picker:
//!   item_extent: 44
//! ```
//!
//! Every field has a default, so a partial document is valid.

use crate::error::ConfigError;
use glide_core::{DismissPolicy, Easing, GestureConfig, Size, SpringConfig, Timing};
use serde::{Deserialize, Serialize};

/// Configuration for every controller in one place.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Bottom sheet
    pub sheet: SheetConfig,
    /// Scroll-reactive header
    pub header: HeaderConfig,
    /// Shared-element transition
    pub transition: TransitionConfig,
    /// Wheel picker
    pub picker: PickerConfig,
}

impl MotionConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sheet.validate()?;
        self.header.validate()?;
        self.transition.validate()?;
        self.picker.validate()
    }
}

/// Bottom sheet behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Slide-in and backdrop fade-in
    pub open_timing: Timing,
    /// Slide-out and backdrop fade-out
    pub close_timing: Timing,
    /// Spring back to open after a cancelled drag
    pub snap_back: SpringConfig,
    /// Commit thresholds for drag-to-dismiss
    pub dismiss: DismissPolicy,
    /// Drag activation thresholds
    pub gesture: GestureConfig,
    /// Drag offset past which the sheet rubber-bands
    pub max_drag: f32,
    /// Offset of the fully hidden sheet until its height is measured
    pub hidden_offset: f32,
    /// Tapping the backdrop closes the sheet
    pub close_on_backdrop_press: bool,
    /// Drags only start on the handle
    pub drag_from_handle_only: bool,
    /// Visual size of the drag handle
    pub handle_size: Size,
    /// Gap between the sheet's top edge and the handle
    pub handle_inset: f32,
    /// Extra touch area around the handle on every side
    pub handle_hit_slop: f32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            open_timing: Timing::new(0.3, Easing::CubicOut),
            close_timing: Timing::new(0.25, Easing::CubicIn),
            snap_back: SpringConfig::SNAP_BACK,
            dismiss: DismissPolicy::sheet(),
            gesture: GestureConfig::default(),
            max_drag: 400.0,
            hidden_offset: 1000.0,
            close_on_backdrop_press: true,
            drag_from_handle_only: false,
            handle_size: Size::new(40.0, 5.0),
            handle_inset: 8.0,
            handle_hit_slop: 20.0,
        }
    }
}

impl SheetConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_timing("sheet.open_timing", self.open_timing)?;
        check_timing("sheet.close_timing", self.close_timing)?;
        check_spring("sheet.snap_back", self.snap_back)?;
        check_policy("sheet.dismiss", self.dismiss)?;
        check_gesture("sheet.gesture", self.gesture)?;
        check_non_negative("sheet.max_drag", self.max_drag)?;
        check_positive("sheet.hidden_offset", self.hidden_offset)?;
        check_non_negative("sheet.handle_size.width", self.handle_size.width)?;
        check_non_negative("sheet.handle_size.height", self.handle_size.height)?;
        check_non_negative("sheet.handle_inset", self.handle_inset)?;
        check_non_negative("sheet.handle_hit_slop", self.handle_hit_slop)
    }
}

/// Scroll-reactive header behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Offsets at or below this always show the header
    pub near_top_threshold: f32,
    /// Scroll deltas at or below this are ignored
    pub noise_floor: f32,
    /// Slide-out when scrolling down
    pub hide_timing: Timing,
    /// Spring back in when scrolling up
    pub show_spring: SpringConfig,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            near_top_threshold: 20.0,
            noise_floor: 1.0,
            hide_timing: Timing::new(0.2, Easing::EaseOut),
            show_spring: SpringConfig::STIFF,
        }
    }
}

impl HeaderConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("header.near_top_threshold", self.near_top_threshold)?;
        check_non_negative("header.noise_floor", self.noise_floor)?;
        check_timing("header.hide_timing", self.hide_timing)?;
        check_spring("header.show_spring", self.show_spring)
    }
}

/// Shared-element transition behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Thumbnail to full screen
    pub expand_timing: Timing,
    /// Full screen back to the thumbnail
    pub collapse_timing: Timing,
    /// Snap back after a drag that did not commit
    pub snap_back: SpringConfig,
    /// Scale of the thumbnail relative to full screen
    pub thumbnail_scale: f32,
    /// Corner radius at progress 0
    pub thumbnail_corner_radius: f32,
    /// Corner radius at progress 1
    pub expanded_corner_radius: f32,
    /// Largest progress loss while dragging
    pub drag_shrink: f32,
    /// Drag distance, as a fraction of screen width, that reaches full shrink
    pub drag_shrink_distance: f32,
    /// Horizontal drag, as a fraction of screen width, that commits
    pub commit_distance: f32,
    /// Right or down fling speed (units/s) that commits
    pub fling_velocity: f32,
    /// Pan activation thresholds
    pub gesture: GestureConfig,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            expand_timing: Timing::new(0.35, Easing::CubicOut),
            collapse_timing: Timing::new(0.3, Easing::CubicInOut),
            snap_back: SpringConfig::SNAP_BACK,
            thumbnail_scale: 0.333,
            thumbnail_corner_radius: 20.0,
            expanded_corner_radius: 40.0,
            drag_shrink: 0.15,
            drag_shrink_distance: 0.5,
            commit_distance: 0.3,
            fling_velocity: 800.0,
            gesture: GestureConfig::default(),
        }
    }
}

impl TransitionConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_timing("transition.expand_timing", self.expand_timing)?;
        check_timing("transition.collapse_timing", self.collapse_timing)?;
        check_spring("transition.snap_back", self.snap_back)?;
        check_positive("transition.thumbnail_scale", self.thumbnail_scale)?;
        check_non_negative(
            "transition.thumbnail_corner_radius",
            self.thumbnail_corner_radius,
        )?;
        check_non_negative(
            "transition.expanded_corner_radius",
            self.expanded_corner_radius,
        )?;
        check_unit("transition.drag_shrink", self.drag_shrink)?;
        check_positive("transition.drag_shrink_distance", self.drag_shrink_distance)?;
        check_positive("transition.commit_distance", self.commit_distance)?;
        check_non_negative("transition.fling_velocity", self.fling_velocity)?;
        check_gesture("transition.gesture", self.gesture)
    }
}

/// Wheel picker behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Height of one row
    pub item_extent: f32,
    /// Fraction of velocity kept per millisecond of a flick
    pub deceleration: f32,
    /// Flick speed (units/s) under which the wheel snaps
    pub velocity_floor: f32,
    /// Spring settling onto a row
    pub snap_spring: SpringConfig,
    /// Drag activation thresholds
    pub gesture: GestureConfig,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            item_extent: 40.0,
            deceleration: 0.998,
            velocity_floor: 20.0,
            snap_spring: SpringConfig::STIFF,
            gesture: GestureConfig::default(),
        }
    }
}

impl PickerConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("picker.item_extent", self.item_extent)?;
        if !(self.deceleration > 0.0 && self.deceleration < 1.0) {
            return Err(ConfigError::invalid(
                "picker.deceleration",
                "must be in (0, 1)",
            ));
        }
        check_non_negative("picker.velocity_floor", self.velocity_floor)?;
        check_spring("picker.snap_spring", self.snap_spring)?;
        check_gesture("picker.gesture", self.gesture)
    }
}

// =============================================================================
// Range checks
// =============================================================================

fn check_positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be finite and > 0, got {value}")))
    }
}

fn check_non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be finite and >= 0, got {value}")))
    }
}

fn check_unit(field: &str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be in [0, 1], got {value}")))
    }
}

fn check_timing(field: &str, timing: Timing) -> Result<(), ConfigError> {
    check_positive(&format!("{field}.duration"), timing.duration)
}

fn check_spring(field: &str, spring: SpringConfig) -> Result<(), ConfigError> {
    check_positive(&format!("{field}.stiffness"), spring.stiffness)?;
    check_positive(&format!("{field}.mass"), spring.mass)?;
    check_non_negative(&format!("{field}.damping"), spring.damping)
}

fn check_policy(field: &str, policy: DismissPolicy) -> Result<(), ConfigError> {
    check_non_negative(
        &format!("{field}.distance_threshold"),
        policy.distance_threshold,
    )?;
    check_non_negative(
        &format!("{field}.velocity_threshold"),
        policy.velocity_threshold,
    )
}

fn check_gesture(field: &str, gesture: GestureConfig) -> Result<(), ConfigError> {
    check_non_negative(
        &format!("{field}.activation_distance"),
        gesture.activation_distance,
    )?;
    check_non_negative(&format!("{field}.fail_distance"), gesture.fail_distance)
}
