//! Frame-driven scalar animations.
//!
//! A [`FloatAnimation`] does not own a clock. Callers feed it frame
//! timestamps and read back the value for that frame, so the same object
//! works under a real vsync source and under deterministic tests.

use crate::Easing;

const NANOS_PER_MILLI: u64 = 1_000_000;

/// Fixed integration step for spring physics (~60fps).
const SPRING_TIMESTEP_SECONDS: f32 = 0.016;

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
    /// Delay before starting animation in milliseconds.
    pub delay_millis: u64,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    /// Add a delay before the animation starts.
    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowInEasing)
    }
}

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Damping ratio. 1.0 = critically damped, < 1.0 = under-damped (bouncy), > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Stiffness constant. Higher values = faster animation.
    pub stiffness: f32,
    /// Velocity threshold to stop animation, in progress units per second.
    pub velocity_threshold: f32,
    /// Position threshold to stop animation, in progress units.
    pub position_threshold: f32,
}

impl SpringSpec {
    /// Create a spring with default material design values.
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
        }
    }

    /// Create a bouncy spring.
    pub fn bouncy() -> Self {
        Self {
            damping_ratio: 0.5,
            ..Self::default_spring()
        }
    }

    /// Create a stiff spring (fast, no bounce).
    pub fn stiff() -> Self {
        Self {
            stiffness: 3000.0,
            ..Self::default_spring()
        }
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

/// Animation type specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    /// Time-based tween animation.
    Tween(AnimationSpec),
    /// Physics-based spring animation.
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

impl From<AnimationSpec> for AnimationType {
    fn from(spec: AnimationSpec) -> Self {
        AnimationType::Tween(spec)
    }
}

impl From<SpringSpec> for AnimationType {
    fn from(spec: SpringSpec) -> Self {
        AnimationType::Spring(spec)
    }
}

/// Value produced for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub value: f32,
    pub finished: bool,
}

/// Scalar trajectory from `start` to `target` under an [`AnimationType`].
///
/// The first call to [`FloatAnimation::on_frame`] pins the start time. Once
/// finished, every further frame reports exactly `target`.
#[derive(Debug, Clone)]
pub struct FloatAnimation {
    start: f32,
    target: f32,
    current: f32,
    /// Spring velocity in progress units per second.
    velocity: f32,
    animation_type: AnimationType,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    finished: bool,
}

impl FloatAnimation {
    pub fn new(start: f32, target: f32, animation_type: AnimationType) -> Self {
        Self {
            start,
            target,
            current: start,
            velocity: 0.0,
            animation_type,
            start_time_nanos: None,
            last_frame_nanos: None,
            finished: false,
        }
    }

    /// Progress animation from 0 to 1, the shape most transform drivers need.
    pub fn progress(animation_type: AnimationType) -> Self {
        Self::new(0.0, 1.0, animation_type)
    }

    pub fn value(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn animation_type(&self) -> AnimationType {
        self.animation_type
    }

    /// Advance to `frame_time_nanos` and return the value for that frame.
    ///
    /// Timestamps earlier than the previous frame are treated as no elapsed
    /// time.
    pub fn on_frame(&mut self, frame_time_nanos: u64) -> AnimationFrame {
        if self.finished {
            return self.frame();
        }

        let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);

        match self.animation_type {
            AnimationType::Tween(spec) => self.advance_tween(spec, elapsed_nanos),
            AnimationType::Spring(spec) => {
                let previous = self.last_frame_nanos.unwrap_or(frame_time_nanos);
                let dt = frame_time_nanos.saturating_sub(previous) as f32 / 1_000_000_000.0;
                self.advance_spring(spec, dt);
            }
        }

        self.last_frame_nanos = Some(frame_time_nanos);
        self.frame()
    }

    fn frame(&self) -> AnimationFrame {
        AnimationFrame {
            value: self.current,
            finished: self.finished,
        }
    }

    fn finish(&mut self) {
        self.current = self.target;
        self.velocity = 0.0;
        self.finished = true;
    }

    fn advance_tween(&mut self, spec: AnimationSpec, elapsed_nanos: u64) {
        let delay_nanos = spec.delay_millis * NANOS_PER_MILLI;
        if elapsed_nanos < delay_nanos {
            return;
        }

        let duration_nanos = spec.duration_millis * NANOS_PER_MILLI;
        if duration_nanos == 0 {
            self.finish();
            return;
        }

        let linear_progress =
            ((elapsed_nanos - delay_nanos) as f32 / duration_nanos as f32).clamp(0.0, 1.0);
        if linear_progress >= 1.0 {
            self.finish();
            return;
        }

        let progress = spec.easing.transform(linear_progress);
        self.current = self.start + (self.target - self.start) * progress;
    }

    fn advance_spring(&mut self, spec: SpringSpec, dt: f32) {
        let span = self.target - self.start;
        if span.abs() < f32::EPSILON {
            self.finish();
            return;
        }

        let stiffness = spec.stiffness;
        let damping = 2.0 * spec.damping_ratio * stiffness.sqrt();
        let mut progress = (self.current - self.start) / span;

        // Semi-implicit Euler in progress space; the target sits at 1.0.
        let mut simulated = 0.0f32;
        while simulated < dt {
            let step = SPRING_TIMESTEP_SECONDS.min(dt - simulated);
            let displacement = progress - 1.0;
            let force = -stiffness * displacement - damping * self.velocity;
            self.velocity += force * step;
            progress += self.velocity * step;
            simulated += step;
        }

        self.current = self.start + span * progress.clamp(0.0, 2.0);

        let at_rest = self.velocity.abs() < spec.velocity_threshold;
        let near_target = (progress - 1.0).abs() < spec.position_threshold;
        if at_rest && near_target {
            log::trace!("spring settled at {}", self.target);
            self.finish();
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
