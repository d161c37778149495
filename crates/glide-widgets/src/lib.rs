//! Gesture-driven controllers for the Glide presentation engine.
//!
//! Each controller owns its animated values, consumes input samples, and
//! exposes a small style struct the view reads every frame:
//! - [`SheetController`]: bottom sheet with drag-to-dismiss
//! - [`ScrollHeaderController`]: header that hides on scroll down
//! - [`TransitionCoordinator`]: thumbnail to full-screen shared-element transition
//! - [`WheelPicker`]: flick-to-select wheel
//!
//! Controllers never read a clock. The platform's frame callback calls each
//! controller's `tick(dt)`.

pub mod config;
pub mod error;
pub mod picker;
pub mod scroll_header;
pub mod sheet;
pub mod transition;
pub mod visibility;

pub use config::{HeaderConfig, MotionConfig, PickerConfig, SheetConfig, TransitionConfig};
pub use error::ConfigError;
pub use picker::{PickerEvent, PickerStyle, WheelPicker};
pub use scroll_header::{HeaderStyle, ScrollDirection, ScrollHeaderController};
pub use sheet::{SheetController, SheetEvent, SheetOwnership, SheetPhase, SheetSnapshot, SheetStyle};
pub use transition::{
    SourceLocator, ThumbnailGrid, TransitionCoordinator, TransitionEvent, TransitionPhase,
    TransitionStyle,
};
pub use visibility::VisibilityTracker;
