//! Time-based tweens for key emphasis
//!
//! Animations are sampled with an explicit `Instant` so that callers on the
//! event loop (and tests) decide what "now" is.

use std::time::{Duration, Instant};

/// Easing curves used by the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Linear interpolation (no easing)
    Linear,
    /// Fast start, decelerating to the target
    EaseOutCubic,
    /// Slow start and end, fast middle
    EaseInOutCubic,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        let t = fraction.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_millis)
    }
}

/// A running interpolation between two scalar values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    started_at: Instant,
    spec: AnimationSpec,
}

impl Tween {
    pub fn new(from: f32, to: f32, started_at: Instant, spec: AnimationSpec) -> Self {
        Self {
            from,
            to,
            started_at,
            spec,
        }
    }

    /// A tween that already sits at `value`
    pub fn settled(value: f32, now: Instant) -> Self {
        Self::new(value, value, now, AnimationSpec::tween(0, Easing::Linear))
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn value_at(&self, now: Instant) -> f32 {
        let fraction = self.fraction_at(now);
        self.from + (self.to - self.from) * self.spec.easing.transform(fraction)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.fraction_at(now) >= 1.0
    }

    fn fraction_at(&self, now: Instant) -> f32 {
        if self.spec.duration_millis == 0 {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.spec.duration().as_secs_f32()).min(1.0)
    }
}
