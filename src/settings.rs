use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::animation::{AnimationSpec, Easing};
use crate::config::{emphasis, gesture, tilt};
use crate::emphasis::EmphasisTiming;
use crate::tilt::MotionOrigin;

/// Get the directory holding the settings file
/// - If running from source (binary path contains "target") or FLICK_KEYS_DEV is set: ./tmp/flick-keys
/// - If installed (binary path elsewhere): ~/.config/flick-keys
pub fn get_config_dir() -> PathBuf {
    let use_local_storage = std::env::var("FLICK_KEYS_DEV").is_ok()
        || std::env::current_exe()
            .map(|p| p.iter().any(|c| c == "target"))
            .unwrap_or(false);

    if use_local_storage {
        let mut path = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        path.push("tmp");
        path.push("flick-keys");
        path
    } else {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("flick-keys")
    }
}

/// `$FLICK_KEYS_SETTINGS` if set, otherwise `settings.json` in the config dir
pub fn settings_path() -> PathBuf {
    std::env::var_os("FLICK_KEYS_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|| get_config_dir().join("settings.json"))
}

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(err) => write!(f, "cannot read settings: {err}"),
            SettingsError::Parse(err) => write!(f, "malformed settings: {err}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(err) => Some(err),
            SettingsError::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err)
    }
}

/// User overrides for gesture and emphasis tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardSettings {
    pub flick_threshold_px: f32,
    pub tilt_threshold: f32,
    pub dwell_ms: u64,
    pub grow_ms: u64,
    pub revert_ms: u64,
    /// Sensor cadence; `None` keeps the source default
    pub sample_interval_ms: Option<u64>,
    /// Drive tilt from Alt+Arrow keys when no sensor exists
    pub simulate_tilt: bool,
    pub simulated_origin: MotionOrigin,
    /// Show the sensor debug panel at startup
    pub show_debug: bool,
}

impl Default for KeyboardSettings {
    fn default() -> Self {
        Self {
            flick_threshold_px: gesture::FLICK_THRESHOLD_PX,
            tilt_threshold: emphasis::TILT_THRESHOLD,
            dwell_ms: emphasis::DWELL_MS,
            grow_ms: emphasis::GROW_MS,
            revert_ms: emphasis::REVERT_MS,
            sample_interval_ms: Some(tilt::SAMPLE_INTERVAL_MS),
            simulate_tilt: false,
            simulated_origin: MotionOrigin::Browser,
            show_debug: true,
        }
    }
}

impl KeyboardSettings {
    pub fn from_json(payload: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(payload)?;
        Ok(settings.sanitized())
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let payload = fs::read_to_string(path)?;
        Self::from_json(&payload)
    }

    /// Replace out-of-range values with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.flick_threshold_px.is_finite() || self.flick_threshold_px <= 0.0 {
            self.flick_threshold_px = defaults.flick_threshold_px;
        }
        if !self.tilt_threshold.is_finite() || !(0.0..1.0).contains(&self.tilt_threshold) {
            self.tilt_threshold = defaults.tilt_threshold;
        }
        if self.sample_interval_ms == Some(0) {
            self.sample_interval_ms = defaults.sample_interval_ms;
        }
        self
    }

    pub fn emphasis_timing(&self) -> EmphasisTiming {
        EmphasisTiming {
            threshold: self.tilt_threshold,
            dwell: Duration::from_millis(self.dwell_ms),
            grow: AnimationSpec::tween(self.grow_ms, Easing::EaseOutCubic),
            revert: AnimationSpec::tween(self.revert_ms, Easing::EaseInOutCubic),
        }
    }

    pub fn sample_interval(&self) -> Option<Duration> {
        self.sample_interval_ms.map(Duration::from_millis)
    }
}

/// Load settings, falling back to defaults when the file is missing or bad
pub fn load_settings() -> KeyboardSettings {
    let path = settings_path();
    match KeyboardSettings::load_from(&path) {
        Ok(settings) => {
            log::info!("loaded settings from {}", path.display());
            settings
        }
        Err(SettingsError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("no settings at {}, using defaults", path.display());
            KeyboardSettings::default()
        }
        Err(err) => {
            log::warn!("{err}; using defaults");
            KeyboardSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let settings = KeyboardSettings::from_json("{}").unwrap();
        assert_eq!(settings, KeyboardSettings::default());
    }

    #[test]
    fn test_partial_override() {
        let settings =
            KeyboardSettings::from_json(r#"{"dwell_ms": 1500, "simulate_tilt": true}"#).unwrap();
        assert_eq!(settings.dwell_ms, 1500);
        assert!(settings.simulate_tilt);
        assert_eq!(settings.flick_threshold_px, 20.0);
        assert_eq!(settings.emphasis_timing().dwell, Duration::from_millis(1500));
    }

    #[test]
    fn test_origin_names() {
        let settings =
            KeyboardSettings::from_json(r#"{"simulated_origin": "device_frame"}"#).unwrap();
        assert_eq!(settings.simulated_origin, MotionOrigin::DeviceFrame);
    }

    #[test]
    fn test_debug_panel_can_start_hidden() {
        assert!(KeyboardSettings::default().show_debug);
        let settings = KeyboardSettings::from_json(r#"{"show_debug": false}"#).unwrap();
        assert!(!settings.show_debug);
    }

    #[test]
    fn test_out_of_range_values_fall_back() {
        let settings = KeyboardSettings::from_json(
            r#"{"flick_threshold_px": -3.0, "tilt_threshold": 4.0, "sample_interval_ms": 0}"#,
        )
        .unwrap();
        assert_eq!(settings.flick_threshold_px, 20.0);
        assert_eq!(settings.tilt_threshold, 0.15);
        assert_eq!(settings.sample_interval(), Some(Duration::from_millis(100)));
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = KeyboardSettings::from_json("{ dwell_ms: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("flick-keys-missing-settings.json");
        let err = KeyboardSettings::load_from(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("flick-keys-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        fs::write(&path, r#"{"grow_ms": 120}"#).unwrap();
        let settings = KeyboardSettings::load_from(&path).unwrap();
        assert_eq!(settings.grow_ms, 120);
        fs::remove_dir_all(&dir).unwrap();
    }
}
