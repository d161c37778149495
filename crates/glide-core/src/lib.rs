//! Core types for the Glide presentation engine.
//!
//! This crate provides the primitives every Glide controller builds on:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Animated values: [`AnimatedValue`] with timed, spring and decay drivers
//! - Input: [`GestureSample`], [`ScrollSample`], [`PointerTracker`]
//! - Drag handling: [`GestureTracker`] and [`DismissPolicy`]

mod animation;
mod dismiss;
mod event;
mod geometry;
mod gesture;
mod pointer;

pub use animation::{
    interpolate, AnimatedValue, AnimationHandle, CompletionCallback, DecayConfig, DriverKind,
    Easing, Finished, Interpolate, Snap, Spring, SpringConfig, Timing,
};
pub use dismiss::{DismissDirection, DismissPolicy};
pub use event::{GesturePhase, GestureSample, PointerSample, ScrollSample};
pub use geometry::{finite_or_zero, Point, Rect, Size};
pub use gesture::{
    rubber_band, ActivationAxis, AxisBounds, Bound, GateState, GestureConfig, GestureRelease,
    GestureTracker, Overdrag, RUBBER_BAND_EXPONENT,
};
pub use pointer::{PointerTracker, VelocityTracker};
