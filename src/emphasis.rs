//! Tilt-driven key emphasis
//!
//! Each side key owns an [`EmphasisController`]. Tilting the device toward a
//! key's side grows it; it shrinks back after the dwell time or as soon as the
//! device is level again. The controller only stores a progress tween in
//! [0, 1] and derives scale and glyph size from it, so both stay inside their
//! bounds whatever the timing.

use std::time::{Duration, Instant};

use crate::animation::{AnimationSpec, Easing, Tween};
use crate::config::emphasis;

/// Which edge of the keyboard a key sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySide {
    Left,
    Center,
    Right,
}

impl KeySide {
    /// Whether `tilt` leans far enough toward this side to emphasize it
    pub fn is_triggered_by(self, tilt: f32, threshold: f32) -> bool {
        match self {
            KeySide::Left => tilt < -threshold,
            KeySide::Right => tilt > threshold,
            KeySide::Center => false,
        }
    }
}

/// Rendered size of a key at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmphasisState {
    pub scale_factor: f32,
    pub glyph_size: f32,
}

impl EmphasisState {
    pub const REST: Self = Self {
        scale_factor: emphasis::REST_SCALE,
        glyph_size: emphasis::REST_GLYPH_SIZE,
    };

    pub const MAX: Self = Self {
        scale_factor: emphasis::MAX_SCALE,
        glyph_size: emphasis::MAX_GLYPH_SIZE,
    };

    fn at_progress(progress: f32) -> Self {
        let p = progress.clamp(0.0, 1.0);
        Self {
            scale_factor: Self::REST.scale_factor
                + (Self::MAX.scale_factor - Self::REST.scale_factor) * p,
            glyph_size: Self::REST.glyph_size + (Self::MAX.glyph_size - Self::REST.glyph_size) * p,
        }
    }

    pub fn is_rest(&self) -> bool {
        *self == Self::REST
    }
}

impl Default for EmphasisState {
    fn default() -> Self {
        Self::REST
    }
}

/// Thresholds and durations shared by every key
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmphasisTiming {
    pub threshold: f32,
    pub dwell: Duration,
    pub grow: AnimationSpec,
    pub revert: AnimationSpec,
}

impl Default for EmphasisTiming {
    fn default() -> Self {
        Self {
            threshold: emphasis::TILT_THRESHOLD,
            dwell: Duration::from_millis(emphasis::DWELL_MS),
            grow: AnimationSpec::tween(emphasis::GROW_MS, Easing::EaseOutCubic),
            revert: AnimationSpec::tween(emphasis::REVERT_MS, Easing::EaseInOutCubic),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisPhase {
    /// At rest or shrinking back to rest
    Idle,
    /// Enlarged or growing, with a revert pending
    Emphasized,
}

/// What a tilt update did to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisTransition {
    None,
    /// Grow animation started
    Grow,
    /// Already growing or enlarged; only the countdown restarted
    Extend,
    /// Revert animation started
    Revert,
}

pub struct EmphasisController {
    side: KeySide,
    timing: EmphasisTiming,
    progress: Tween,
    pending_revert: Option<Instant>,
}

impl EmphasisController {
    pub fn new(side: KeySide, timing: EmphasisTiming, now: Instant) -> Self {
        Self {
            side,
            timing,
            progress: Tween::settled(0.0, now),
            pending_revert: None,
        }
    }

    pub fn side(&self) -> KeySide {
        self.side
    }

    /// Re-evaluate the key against a new tilt reading
    pub fn on_tilt(&mut self, tilt: f32, now: Instant) -> EmphasisTransition {
        // A countdown that ran out before this reading still reverts first.
        self.fire_due_revert(now);
        if self.side.is_triggered_by(tilt, self.timing.threshold) {
            // Replacing the deadline cancels any earlier revert.
            self.pending_revert = Some(now + self.timing.dwell);
            if self.animate_to(1.0, self.timing.grow, now) {
                log::debug!("emphasize {:?} key (tilt {tilt:.2})", self.side);
                EmphasisTransition::Grow
            } else {
                EmphasisTransition::Extend
            }
        } else if tilt.abs() <= self.timing.threshold {
            self.pending_revert = None;
            if self.animate_to(0.0, self.timing.revert, now) {
                EmphasisTransition::Revert
            } else {
                EmphasisTransition::None
            }
        } else {
            EmphasisTransition::None
        }
    }

    /// Fire the revert timer if it is due. Returns true while animating.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.fire_due_revert(now);
        self.is_animating(now)
    }

    fn fire_due_revert(&mut self, now: Instant) {
        if let Some(deadline) = self.pending_revert {
            if now >= deadline {
                self.pending_revert = None;
                self.animate_to(0.0, self.timing.revert, deadline);
                log::debug!("dwell elapsed for {:?} key", self.side);
            }
        }
    }

    /// Drop the pending revert and snap back to rest
    pub fn reset(&mut self, now: Instant) {
        self.pending_revert = None;
        self.progress = Tween::settled(0.0, now);
    }

    pub fn state(&self, now: Instant) -> EmphasisState {
        EmphasisState::at_progress(self.progress.value_at(now))
    }

    pub fn phase(&self) -> EmphasisPhase {
        if self.progress.target() > 0.0 {
            EmphasisPhase::Emphasized
        } else {
            EmphasisPhase::Idle
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        !self.progress.is_finished(now)
    }

    pub fn pending_revert(&self) -> Option<Instant> {
        self.pending_revert
    }

    fn animate_to(&mut self, target: f32, spec: AnimationSpec, now: Instant) -> bool {
        if self.progress.target() == target {
            return false;
        }
        let current = self.progress.value_at(now);
        self.progress = Tween::new(current, target, now, spec);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn controller(side: KeySide, now: Instant) -> EmphasisController {
        EmphasisController::new(side, EmphasisTiming::default(), now)
    }

    #[test]
    fn test_left_key_grows_on_left_tilt() {
        let t0 = Instant::now();
        let mut key = controller(KeySide::Left, t0);
        assert_eq!(key.on_tilt(-0.5, t0), EmphasisTransition::Grow);
        assert_eq!(key.phase(), EmphasisPhase::Emphasized);
        assert!(key.is_animating(t0 + ms(100)));
        assert_eq!(key.state(t0 + ms(300)), EmphasisState::MAX);
    }

    #[test]
    fn test_right_key_ignores_left_tilt() {
        let t0 = Instant::now();
        let mut key = controller(KeySide::Right, t0);
        assert_eq!(key.on_tilt(-0.9, t0), EmphasisTransition::None);
        assert!(key.state(t0 + ms(500)).is_rest());
        assert_eq!(key.on_tilt(0.16, t0), EmphasisTransition::Grow);
    }

    #[test]
    fn test_center_key_never_emphasizes() {
        let t0 = Instant::now();
        let mut key = controller(KeySide::Center, t0);
        for tilt in [-1.0, -0.5, 0.0, 0.5, 1.0] {
            key.on_tilt(tilt, t0);
        }
        assert!(key.state(t0 + ms(1000)).is_rest());
        assert_eq!(key.pending_revert(), None);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let t0 = Instant::now();
        let mut key = controller(KeySide::Left, t0);
        assert_eq!(key.on_tilt(-0.15, t0), EmphasisTransition::None);
        assert!(key.state(t0).is_rest());
    }

    #[test]
    fn test_reverts_after_dwell() {
        let t0 = Instant::now();
        let mut key = controller(KeySide::Left, t0);
        key.on_tilt(-0.5, t0);
        assert!(!key.tick(t0 + ms(1999)));
        assert_eq!(key.state(t0 + ms(1999)), EmphasisState::MAX);

        assert!(key.tick(t0 + ms(2000)));
        assert_eq!(key.phase(), EmphasisPhase::Idle);
        assert!(!key.tick(t0 + ms(2400)));
        assert!(key.state(t0 + ms(2400)).is_rest());
    }

    #[test]
    fn test_level_tilt_reverts_within_animation_window() {
        let t0 = Instant::now();
        let mut key = controller(KeySide::Left, t0);
        key.on_tilt(-0.5, t0);
        assert_eq!(key.on_tilt(0.0, t0), EmphasisTransition::Revert);
        assert_eq!(key.pending_revert(), None);
        key.tick(t0 + ms(400));
        assert!(key.state(t0 + ms(400)).is_rest());
    }

    #[test]
    fn test_retrigger_extends_countdown_without_regrowing() {
        let t0 = Instant::now();
        let mut key = controller(KeySide::Right, t0);
        key.on_tilt(0.5, t0);
        assert_eq!(key.on_tilt(0.6, t0 + ms(1500)), EmphasisTransition::Extend);
        assert_eq!(key.pending_revert(), Some(t0 + ms(3500)));

        // The first deadline must not fire.
        key.tick(t0 + ms(2100));
        assert_eq!(key.state(t0 + ms(2100)), EmphasisState::MAX);
        key.tick(t0 + ms(3500));
        assert_eq!(key.phase(), EmphasisPhase::Idle);
    }

    #[test]
    fn test_expired_countdown_reverts_before_retrigger() {
        let t0 = Instant::now();
        let mut key = controller(KeySide::Left, t0);
        key.on_tilt(-0.5, t0);

        // No tick between the deadline and the next reading.
        assert_eq!(key.on_tilt(-0.5, t0 + ms(2500)), EmphasisTransition::Grow);
        assert!(key.state(t0 + ms(2500)).is_rest());
        assert_eq!(key.pending_revert(), Some(t0 + ms(4500)));
        assert_eq!(key.state(t0 + ms(2800)), EmphasisState::MAX);
    }

    #[test]
    fn test_retrigger_during_revert_grows_again() {
        let t0 = Instant::now();
        let mut key = controller(KeySide::Right, t0);
        key.on_tilt(0.5, t0);
        assert_eq!(key.on_tilt(0.5, t0 + ms(2200)), EmphasisTransition::Grow);
        let state = key.state(t0 + ms(2200));
        assert!(state.scale_factor > 1.0 && state.scale_factor < 1.8);
    }

    #[test]
    fn test_opposite_tilt_keeps_countdown() {
        let t0 = Instant::now();
        let mut key = controller(KeySide::Left, t0);
        key.on_tilt(-0.5, t0);
        assert_eq!(key.on_tilt(0.8, t0 + ms(100)), EmphasisTransition::None);
        assert_eq!(key.pending_revert(), Some(t0 + ms(2000)));
    }

    #[test]
    fn test_state_stays_in_bounds() {
        let t0 = Instant::now();
        let mut key = controller(KeySide::Left, t0);
        let mut now = t0;
        for step in 0..200u64 {
            let tilt = if step % 7 < 4 { -0.6 } else { 0.05 };
            key.on_tilt(tilt, now);
            key.tick(now);
            let state = key.state(now);
            assert!((1.0..=1.8).contains(&state.scale_factor));
            assert!((18.0..=32.0).contains(&state.glyph_size));
            now += ms(37);
        }
    }

    #[test]
    fn test_reset_cancels_revert() {
        let t0 = Instant::now();
        let mut key = controller(KeySide::Left, t0);
        key.on_tilt(-0.5, t0);
        key.reset(t0 + ms(50));
        assert_eq!(key.pending_revert(), None);
        assert!(key.state(t0 + ms(50)).is_rest());
    }
}
