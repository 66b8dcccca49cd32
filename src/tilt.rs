//! Motion samples and tilt normalization

use serde::{Deserialize, Serialize};

use crate::config::tilt;
use crate::source::SourceError;

/// Where an acceleration reading came from; decides its unit scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionOrigin {
    /// Web motion events (m/s², roughly ±10)
    #[default]
    Browser,
    /// Native device-frame sensor (g units)
    DeviceFrame,
}

impl MotionOrigin {
    pub fn divisor(self) -> f32 {
        match self {
            MotionOrigin::Browser => tilt::BROWSER_DIVISOR,
            MotionOrigin::DeviceFrame => tilt::DEVICE_FRAME_DIVISOR,
        }
    }

    /// One g in this origin's units
    pub fn gravity(self) -> f32 {
        match self {
            MotionOrigin::Browser => tilt::STANDARD_GRAVITY,
            MotionOrigin::DeviceFrame => 1.0,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            MotionOrigin::Browser => "m/s²",
            MotionOrigin::DeviceFrame => "g",
        }
    }
}

/// A raw sample delivered by a motion source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionSample {
    /// Acceleration including gravity; only `x` drives tilt
    Acceleration {
        x: Option<f32>,
        y: Option<f32>,
        z: Option<f32>,
        origin: MotionOrigin,
    },
    Orientation {
        alpha: Option<f32>,
        beta: Option<f32>,
        gamma: Option<f32>,
    },
}

/// Latest orientation reading in degrees; missing axes read as 0
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
}

/// Last acceleration sample as received; missing axes read as 0
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawAcceleration {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub origin: MotionOrigin,
}

impl RawAcceleration {
    pub fn from_axes(
        x: Option<f32>,
        y: Option<f32>,
        z: Option<f32>,
        origin: MotionOrigin,
    ) -> Self {
        Self {
            x: axis(x),
            y: axis(y),
            z: axis(z),
            origin,
        }
    }
}

/// Whether the motion sensor is feeding the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorStatus {
    /// Not subscribed yet, or unsubscribed
    #[default]
    Unmounted,
    Active,
    Unsupported,
    PermissionDenied,
}

impl SensorStatus {
    pub fn is_supported(self) -> bool {
        matches!(self, SensorStatus::Active | SensorStatus::PermissionDenied)
    }

    pub fn is_permitted(self) -> bool {
        self == SensorStatus::Active
    }
}

impl From<SourceError> for SensorStatus {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Unsupported => SensorStatus::Unsupported,
            SourceError::PermissionDenied => SensorStatus::PermissionDenied,
        }
    }
}

/// Map a raw horizontal acceleration to a tilt value in [-1, 1].
///
/// Missing or non-finite readings count as level.
pub fn normalize_tilt(raw_x: Option<f32>, origin: MotionOrigin) -> f32 {
    match raw_x {
        Some(x) if x.is_finite() => (x / origin.divisor()).clamp(-1.0, 1.0),
        _ => 0.0,
    }
}

fn axis(value: Option<f32>) -> f32 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

impl Orientation {
    pub fn from_axes(alpha: Option<f32>, beta: Option<f32>, gamma: Option<f32>) -> Self {
        Self {
            alpha: axis(alpha),
            beta: axis(beta),
            gamma: axis(gamma),
        }
    }
}

/// Observable tilt value owned by the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TiltState {
    value: f32,
    revision: u64,
}

impl TiltState {
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Number of updates so far, counting repeats of the same value
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Store a new reading, clamped to [-1, 1]. Returns true if the value changed.
    pub fn set(&mut self, value: f32) -> bool {
        let value = if value.is_finite() {
            value.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let changed = value != self.value;
        self.value = value;
        self.revision += 1;
        changed
    }
}
