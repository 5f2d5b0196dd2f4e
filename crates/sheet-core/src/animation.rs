//! Time-based tweens on the tokio clock.
//!
//! Paused test runtimes (`start_paused = true`) make every animation
//! deterministic: time only moves when the runtime advances it.

use std::time::Duration;

use tokio::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Maps linear progress `t` in `0..=1` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut if t < 0.5 => 4.0 * t * t * t,
            Easing::EaseInOut => 1.0 - (-2.0 * t + 2.0).powi(3) / 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(Duration::from_millis(300), Easing::EaseInOut)
    }
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    pub fn fast() -> Self {
        Self::tween(Duration::from_millis(150), Easing::EaseOut)
    }

    /// Jumps straight to the target on the first update.
    pub fn instant() -> Self {
        Self::tween(Duration::ZERO, Easing::Linear)
    }
}

/// A scalar moving towards a target. Call [`update`](Self::update) once per
/// frame and read [`get`](Self::get).
#[derive(Clone, Debug)]
pub struct AnimatedValue {
    from: f32,
    to: f32,
    value: f32,
    spec: AnimationSpec,
    started: Option<Instant>,
}

impl AnimatedValue {
    pub fn new(initial: f32, spec: AnimationSpec) -> Self {
        Self {
            from: initial,
            to: initial,
            value: initial,
            spec,
            started: None,
        }
    }

    /// Retargets from wherever the value is now.
    pub fn set_target(&mut self, target: f32) {
        self.from = self.value;
        self.to = target;
        self.started = Some(Instant::now());
    }

    /// Advances to the current time. Returns `false` once settled.
    pub fn update(&mut self) -> bool {
        let Some(started) = self.started else {
            return false;
        };
        let elapsed = Instant::now().saturating_duration_since(started);
        if elapsed >= self.spec.duration {
            self.value = self.to;
            self.started = None;
            return false;
        }
        let t = elapsed.as_secs_f32() / self.spec.duration.as_secs_f32();
        self.value = self.from + (self.to - self.from) * self.spec.easing.apply(t);
        true
    }

    pub fn get(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_animating(&self) -> bool {
        self.started.is_some()
    }
}
