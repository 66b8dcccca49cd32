//! Keyboard-driven stand-in for a tilt sensor
//!
//! Desktops have no accelerometer. When enabled, holding Alt+Left or
//! Alt+Right leans the "device" and the simulator feeds acceleration and
//! orientation samples into the motion source at the configured cadence, like
//! a real sensor lying on a table and rolled sideways.

use std::time::{Duration, Instant};

use flick_keys::config::tilt;
use flick_keys::source::ChannelSource;
use flick_keys::tilt::{MotionOrigin, MotionSample};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lean {
    Left,
    Right,
}

pub struct TiltSimulator {
    origin: MotionOrigin,
    interval: Option<Duration>,
    lean: Option<Lean>,
    last_emit: Option<Instant>,
    dirty: bool,
}

impl TiltSimulator {
    pub fn new(origin: MotionOrigin, interval: Option<Duration>) -> Self {
        Self {
            origin,
            interval,
            lean: None,
            last_emit: None,
            dirty: false,
        }
    }

    pub fn set_lean(&mut self, lean: Option<Lean>) {
        if self.lean != lean {
            self.lean = lean;
            self.dirty = true;
        }
    }

    pub fn lean(&self) -> Option<Lean> {
        self.lean
    }

    fn raw_x(&self) -> f32 {
        // Scale so the same lean reads the same after normalization.
        let magnitude = tilt::SIMULATED_ACCELERATION / tilt::BROWSER_DIVISOR * self.origin.divisor();
        match self.lean {
            Some(Lean::Left) => -magnitude,
            Some(Lean::Right) => magnitude,
            None => 0.0,
        }
    }

    /// Gravity split across x and z for the current roll
    fn raw_axes(&self) -> (f32, f32, f32) {
        let gravity = self.origin.gravity();
        let x = self.raw_x();
        let z = (gravity * gravity - x * x).max(0.0).sqrt();
        (x, 0.0, z)
    }

    /// Roll angle in degrees matching `raw_axes`
    fn gamma(&self) -> f32 {
        (self.raw_x() / self.origin.gravity())
            .clamp(-1.0, 1.0)
            .asin()
            .to_degrees()
    }

    /// Emit a sample when the lean changed or the cadence is due.
    /// Without a configured cadence only changes are emitted.
    pub fn tick(&mut self, now: Instant, source: &mut ChannelSource<MotionSample>) -> bool {
        let due = match (self.interval, self.last_emit) {
            (_, None) => true,
            (Some(interval), Some(last)) => now.saturating_duration_since(last) >= interval,
            (None, Some(_)) => false,
        };
        if !self.dirty && !due {
            return false;
        }

        self.dirty = false;
        self.last_emit = Some(now);
        let (x, y, z) = self.raw_axes();
        source.emit(MotionSample::Acceleration {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            origin: self.origin,
        });
        source.emit(MotionSample::Orientation {
            alpha: Some(0.0),
            beta: Some(0.0),
            gamma: Some(self.gamma()),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flick_keys::source::EventSource;
    use flick_keys::tilt::normalize_tilt;

    fn drain_x(sub: &flick_keys::source::Subscription<MotionSample>) -> Vec<f32> {
        sub.drain()
            .filter_map(|sample| match sample {
                MotionSample::Acceleration { x, origin, .. } => Some(normalize_tilt(x, origin)),
                MotionSample::Orientation { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_emits_at_cadence() {
        let mut source: ChannelSource<MotionSample> = ChannelSource::new();
        let sub = source.subscribe().unwrap();
        let mut sim = TiltSimulator::new(MotionOrigin::Browser, Some(Duration::from_millis(100)));
        let t0 = Instant::now();

        assert!(sim.tick(t0, &mut source));
        assert!(!sim.tick(t0 + Duration::from_millis(50), &mut source));
        assert!(sim.tick(t0 + Duration::from_millis(100), &mut source));
        assert_eq!(drain_x(&sub), vec![0.0, 0.0]);
    }

    #[test]
    fn test_lean_change_emits_immediately() {
        let mut source: ChannelSource<MotionSample> = ChannelSource::new();
        let sub = source.subscribe().unwrap();
        let mut sim = TiltSimulator::new(MotionOrigin::DeviceFrame, None);
        let t0 = Instant::now();
        sim.tick(t0, &mut source);
        sim.set_lean(Some(Lean::Left));
        assert!(sim.tick(t0 + Duration::from_millis(1), &mut source));
        assert!(!sim.tick(t0 + Duration::from_millis(500), &mut source));
        assert_eq!(drain_x(&sub), vec![0.0, -0.5]);
    }

    #[test]
    fn test_samples_carry_gravity_and_roll() {
        let mut source: ChannelSource<MotionSample> = ChannelSource::new();
        let sub = source.subscribe().unwrap();
        let mut sim = TiltSimulator::new(MotionOrigin::Browser, None);
        sim.set_lean(Some(Lean::Right));
        sim.tick(Instant::now(), &mut source);

        let samples: Vec<MotionSample> = sub.drain().collect();
        assert_eq!(samples.len(), 2);
        match samples[0] {
            MotionSample::Acceleration { x, y, z, .. } => {
                let (x, y, z) = (x.unwrap(), y.unwrap(), z.unwrap());
                assert_eq!(x, 2.5);
                assert_eq!(y, 0.0);
                assert!(((x * x + z * z).sqrt() - 9.81).abs() < 1e-3);
            }
            other => panic!("expected acceleration, got {other:?}"),
        }
        match samples[1] {
            MotionSample::Orientation { gamma, .. } => {
                assert!(gamma.unwrap() > 14.0 && gamma.unwrap() < 15.5);
            }
            other => panic!("expected orientation, got {other:?}"),
        }
    }
}
