//! Animated scalar values driven by timing curves, spring physics or decay.
//!
//! Every controller in Glide owns one or more [`AnimatedValue`]s and advances
//! them from the platform's frame callback with [`AnimatedValue::tick`]. A
//! value has at most one driver at a time; imposing a new animation cancels
//! the previous one, and its completion is never reported.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Easing Functions
// =============================================================================

/// Standard easing functions for timed animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation (no easing)
    Linear,
    /// Ease in (slow start)
    EaseIn,
    /// Ease out (slow end)
    EaseOut,
    /// Ease in and out (slow start and end)
    #[default]
    EaseInOut,
    /// Cubic ease in
    CubicIn,
    /// Cubic ease out
    CubicOut,
    /// Cubic ease in and out
    CubicInOut,
    /// Exponential ease out
    ExpoOut,
    /// Back ease out (overshoots then returns)
    BackOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0f32).mul_add(t, 2.0).powi(2) / 2.0
                }
            }
            Self::CubicIn => t * t * t,
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0f32).mul_add(t, 2.0).powi(3) / 2.0
                }
            }
            Self::ExpoOut => {
                if (t - 1.0).abs() < f32::EPSILON {
                    1.0
                } else {
                    1.0 - (-10.0 * t).exp2()
                }
            }
            Self::BackOut => {
                const C1: f32 = 1.701_58;
                const C3: f32 = C1 + 1.0;
                C1.mul_add((t - 1.0).powi(2), C3.mul_add((t - 1.0).powi(3), 1.0))
            }
        }
    }
}

/// Duration and curve of a timed animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Duration in seconds
    pub duration: f32,
    /// Easing curve
    pub easing: Easing,
}

impl Timing {
    /// Create a timing.
    #[must_use]
    pub const fn new(duration: f32, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new(0.3, Easing::EaseInOut)
    }
}

// =============================================================================
// SpringConfig - Spring Physics Parameters
// =============================================================================

/// Spring physics configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Stiffness of the spring (affects speed)
    pub stiffness: f32,
    /// Damping coefficient (affects bounciness)
    pub damping: f32,
    /// Mass of the object (affects inertia)
    pub mass: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::STIFF
    }
}

impl SpringConfig {
    /// Gentle spring (slow, smooth)
    pub const GENTLE: Self = Self::new(120.0, 14.0, 1.0);

    /// Wobbly spring (bouncy)
    pub const WOBBLY: Self = Self::new(180.0, 12.0, 1.0);

    /// Stiff spring (fast, snappy)
    pub const STIFF: Self = Self::new(400.0, 30.0, 1.0);

    /// Critically damped, no overshoot. Used for snap-back after a drag.
    pub const SNAP_BACK: Self = Self::new(500.0, 44.72, 1.0);

    /// Create a spring configuration.
    #[must_use]
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Calculate damping ratio.
    #[must_use]
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.mass * self.stiffness).sqrt())
    }

    /// Whether spring is underdamped (will oscillate).
    #[must_use]
    pub fn is_underdamped(&self) -> bool {
        self.damping_ratio() < 1.0
    }

    /// Whether spring is overdamped (slow, no oscillation).
    #[must_use]
    pub fn is_overdamped(&self) -> bool {
        self.damping_ratio() > 1.0
    }
}

// =============================================================================
// Spring - RK4 spring integrator
// =============================================================================

/// Displacement below which a spring counts as settled.
const REST_DISPLACEMENT: f32 = 0.001;
/// Velocity below which a spring counts as settled.
const REST_VELOCITY: f32 = 0.01;
/// Largest step handed to the integrator in one go.
const MAX_STEP: f32 = 1.0 / 60.0;

/// A spring simulation converging on a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
    config: SpringConfig,
}

impl Spring {
    /// Create a spring at rest at `initial`.
    #[must_use]
    pub fn new(initial: f32, config: SpringConfig) -> Self {
        Self {
            value: initial,
            velocity: 0.0,
            target: initial,
            config,
        }
    }

    /// Start with the given velocity (units per second).
    #[must_use]
    pub const fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the target, keeping the current velocity.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Current velocity.
    #[must_use]
    pub const fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Target value.
    #[must_use]
    pub const fn target(&self) -> f32 {
        self.target
    }

    /// Whether the spring has settled on its target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_DISPLACEMENT && self.velocity.abs() < REST_VELOCITY
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Settling snaps the value onto the target exactly.
    pub fn step(&mut self, dt: f32) {
        let mut remaining = dt;
        while remaining > 0.0 && !self.is_settled() {
            let h = remaining.min(MAX_STEP);
            self.integrate(h);
            remaining -= h;
        }
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    fn integrate(&mut self, dt: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1_v = self.acceleration(x, v);
        let k1_x = v;

        let k2_v = self.acceleration(x + k1_x * dt * 0.5, v + k1_v * dt * 0.5);
        let k2_x = v + k1_v * dt * 0.5;

        let k3_v = self.acceleration(x + k2_x * dt * 0.5, v + k2_v * dt * 0.5);
        let k3_x = v + k2_v * dt * 0.5;

        let k4_v = self.acceleration(x + k3_x * dt, v + k3_v * dt);
        let k4_x = v + k3_v * dt;

        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }
}

// =============================================================================
// Decay - free deceleration with optional snapping
// =============================================================================

/// Snap points a decay settles onto, spaced `interval` apart from `origin`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snap {
    /// Distance between snap points
    pub interval: f32,
    /// Position of snap point zero
    pub origin: f32,
    /// Spring used for the final settle
    pub spring: SpringConfig,
}

impl Snap {
    /// Create snap points.
    #[must_use]
    pub const fn new(interval: f32, origin: f32, spring: SpringConfig) -> Self {
        Self {
            interval,
            origin,
            spring,
        }
    }

    /// The snap point nearest to `value`, kept inside `bounds` when given.
    #[must_use]
    pub fn nearest(&self, value: f32, bounds: Option<(f32, f32)>) -> f32 {
        let snapped = if self.interval > 0.0 {
            let steps = ((value - self.origin) / self.interval).round();
            steps.mul_add(self.interval, self.origin)
        } else {
            value
        };
        match bounds {
            Some((min, max)) => snapped.clamp(min, max),
            None => snapped,
        }
    }
}

/// Decay (flick) animation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Fraction of velocity kept per millisecond
    pub deceleration: f32,
    /// Velocity (units/s) under which the decay stops
    pub velocity_floor: f32,
    /// Allowed range of the value
    pub bounds: Option<(f32, f32)>,
    /// Snap points to settle on once the decay ends
    pub snap: Option<Snap>,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            deceleration: 0.998,
            velocity_floor: 5.0,
            bounds: None,
            snap: None,
        }
    }
}

impl DecayConfig {
    /// Clamp the decay to `[min, max]`.
    #[must_use]
    pub const fn with_bounds(mut self, min: f32, max: f32) -> Self {
        self.bounds = Some((min, max));
        self
    }

    /// Settle onto snap points once the decay ends.
    #[must_use]
    pub const fn with_snap(mut self, snap: Snap) -> Self {
        self.snap = Some(snap);
        self
    }
}

// =============================================================================
// Interpolation
// =============================================================================

/// Trait for types that can be interpolated.
pub trait Interpolate {
    /// Interpolate between two values.
    fn interpolate(from: &Self, to: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(from: &Self, to: &Self, t: f32) -> Self {
        (*to - *from).mul_add(t, *from)
    }
}

impl Interpolate for Point {
    fn interpolate(from: &Self, to: &Self, t: f32) -> Self {
        from.lerp(to, t)
    }
}

/// Map `value` from the `input` range onto the `output` range, clamping at
/// both ends.
#[must_use]
pub fn interpolate(value: f32, input: (f32, f32), output: (f32, f32)) -> f32 {
    let span = input.1 - input.0;
    if span == 0.0 || !value.is_finite() {
        return output.0;
    }
    let t = ((value - input.0) / span).clamp(0.0, 1.0);
    f32::interpolate(&output.0, &output.1, t)
}

// =============================================================================
// AnimatedValue
// =============================================================================

/// Which driver currently moves an [`AnimatedValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverKind {
    /// Resting
    None,
    /// Duration and easing
    Timed,
    /// Spring physics
    Spring,
    /// Free deceleration
    Decay,
}

/// Generation token of one imposed animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationHandle(u64);

impl AnimationHandle {
    /// Raw generation number.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// Completion report of an animation that ran to its end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Finished {
    /// The animation that completed
    pub handle: AnimationHandle,
    /// Resting value
    pub value: f32,
}

/// Callback fired once when the animation it is attached to completes.
pub type CompletionCallback = Box<dyn FnOnce(Finished)>;

#[derive(Debug, Clone, Copy)]
struct TimedDriver {
    from: f32,
    to: f32,
    timing: Timing,
    elapsed: f32,
}

#[derive(Debug, Clone, Copy)]
struct DecayDriver {
    config: DecayConfig,
}

#[derive(Debug, Clone, Copy)]
enum Driver {
    Idle,
    Timed(TimedDriver),
    Spring(Spring),
    Decay(DecayDriver),
}

/// A continuously readable scalar moved by at most one animation driver.
pub struct AnimatedValue {
    value: f32,
    velocity: f32,
    driver: Driver,
    generation: u64,
    on_complete: Option<CompletionCallback>,
}

impl fmt::Debug for AnimatedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatedValue")
            .field("value", &self.value)
            .field("velocity", &self.velocity)
            .field("driver", &self.driver)
            .field("generation", &self.generation)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl AnimatedValue {
    /// Create a resting value.
    #[must_use]
    pub fn new(initial: f32) -> Self {
        Self {
            value: if initial.is_finite() { initial } else { 0.0 },
            velocity: 0.0,
            driver: Driver::Idle,
            generation: 0,
            on_complete: None,
        }
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Current velocity in units per second.
    #[must_use]
    pub const fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Current generation. Bumped by every `set` and imposed animation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Kind of the running driver.
    #[must_use]
    pub const fn kind(&self) -> DriverKind {
        match self.driver {
            Driver::Idle => DriverKind::None,
            Driver::Timed(_) => DriverKind::Timed,
            Driver::Spring(_) => DriverKind::Spring,
            Driver::Decay(_) => DriverKind::Decay,
        }
    }

    /// Whether an animation is running.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        !matches!(self.driver, Driver::Idle)
    }

    /// Where the running animation will come to rest, when known up front.
    #[must_use]
    pub const fn target(&self) -> Option<f32> {
        match self.driver {
            Driver::Timed(timed) => Some(timed.to),
            Driver::Spring(spring) => Some(spring.target()),
            Driver::Idle | Driver::Decay(_) => None,
        }
    }

    /// Whether `handle` still names the latest imposed animation.
    #[must_use]
    pub const fn is_current(&self, handle: AnimationHandle) -> bool {
        handle.0 == self.generation
    }

    /// Handle of the running animation.
    #[must_use]
    pub const fn handle(&self) -> Option<AnimationHandle> {
        if self.is_animating() {
            Some(AnimationHandle(self.generation))
        } else {
            None
        }
    }

    /// Jump to `value`, cancelling any running animation.
    ///
    /// Non-finite values are ignored.
    pub fn set(&mut self, value: f32) {
        if !value.is_finite() {
            tracing::trace!(value, "ignoring non-finite set");
            return;
        }
        self.impose(Driver::Idle);
        self.value = value;
        self.velocity = 0.0;
    }

    /// Stop where the value currently is. The running animation never
    /// reports completion.
    pub fn stop(&mut self) {
        if self.is_animating() {
            self.impose(Driver::Idle);
        }
        self.velocity = 0.0;
    }

    /// Tween from the current value to `target`.
    pub fn animate_to(&mut self, target: f32, timing: Timing) -> AnimationHandle {
        let target = self.sanitize_target(target);
        self.impose(Driver::Timed(TimedDriver {
            from: self.value,
            to: target,
            timing,
            elapsed: 0.0,
        }))
    }

    /// Spring toward `target`.
    ///
    /// `initial_velocity` hands over a gesture's exit velocity; `None` keeps
    /// whatever velocity the value currently has.
    pub fn spring(
        &mut self,
        target: f32,
        config: SpringConfig,
        initial_velocity: Option<f32>,
    ) -> AnimationHandle {
        let target = self.sanitize_target(target);
        let velocity = initial_velocity
            .filter(|v| v.is_finite())
            .unwrap_or(self.velocity);
        let mut spring = Spring::new(self.value, config).with_velocity(velocity);
        spring.set_target(target);
        self.velocity = velocity;
        self.impose(Driver::Spring(spring))
    }

    /// Decelerate freely from `velocity`.
    pub fn decay(&mut self, velocity: f32, config: DecayConfig) -> AnimationHandle {
        self.velocity = if velocity.is_finite() { velocity } else { 0.0 };
        self.impose(Driver::Decay(DecayDriver { config }))
    }

    /// Attach a callback to the running animation.
    ///
    /// Returns `false` (dropping the callback) when nothing is running.
    pub fn on_complete(&mut self, callback: impl FnOnce(Finished) + 'static) -> bool {
        if self.is_animating() {
            self.on_complete = Some(Box::new(callback));
            true
        } else {
            false
        }
    }

    /// Advance the running animation by `dt` seconds.
    ///
    /// Returns the completion exactly once, on the frame the animation ends.
    pub fn tick(&mut self, dt: f32) -> Option<Finished> {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let done = match self.driver {
            Driver::Idle => return None,
            Driver::Timed(ref mut timed) => {
                timed.elapsed += dt;
                let t = if timed.timing.duration > 0.0 {
                    timed.elapsed / timed.timing.duration
                } else {
                    1.0
                };
                if t >= 1.0 {
                    self.value = timed.to;
                    self.velocity = 0.0;
                    true
                } else {
                    let next =
                        f32::interpolate(&timed.from, &timed.to, timed.timing.easing.apply(t));
                    if dt > 0.0 {
                        self.velocity = (next - self.value) / dt;
                    }
                    self.value = next;
                    false
                }
            }
            Driver::Spring(ref mut spring) => {
                spring.step(dt);
                self.value = spring.value();
                self.velocity = spring.velocity();
                spring.is_settled()
            }
            Driver::Decay(decay) => self.step_decay(decay.config, dt),
        };

        if !done {
            return None;
        }
        self.driver = Driver::Idle;
        let finished = Finished {
            handle: AnimationHandle(self.generation),
            value: self.value,
        };
        if let Some(callback) = self.on_complete.take() {
            callback(finished);
        }
        Some(finished)
    }

    /// Returns `true` once the decay has come to rest without a snap.
    fn step_decay(&mut self, config: DecayConfig, dt: f32) -> bool {
        let keep = config.deceleration.clamp(0.0, 1.0).powf(dt * 1000.0);
        self.velocity *= keep;
        self.value += self.velocity * dt;

        let out_of_bounds = config
            .bounds
            .is_some_and(|(min, max)| self.value < min || self.value > max);
        let too_slow = self.velocity.abs() < config.velocity_floor;
        if !out_of_bounds && !too_slow {
            return false;
        }

        if let Some(snap) = config.snap {
            // Same generation and callback: the spring finishes the decay.
            let target = snap.nearest(self.value, config.bounds);
            let mut spring = Spring::new(self.value, snap.spring).with_velocity(self.velocity);
            spring.set_target(target);
            self.driver = Driver::Spring(spring);
            return false;
        }

        if let Some((min, max)) = config.bounds {
            self.value = self.value.clamp(min, max);
        }
        self.velocity = 0.0;
        true
    }

    fn sanitize_target(&self, target: f32) -> f32 {
        if target.is_finite() {
            target
        } else {
            tracing::trace!(target, "non-finite target, holding current value");
            self.value
        }
    }

    fn impose(&mut self, driver: Driver) -> AnimationHandle {
        if self.is_animating() {
            tracing::trace!(generation = self.generation, "superseding running animation");
        }
        self.generation += 1;
        self.on_complete = None;
        self.driver = driver;
        AnimationHandle(self.generation)
    }
}

// =============================================================================
// Tests
// =============================================================================
