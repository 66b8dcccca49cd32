//! Centralized configuration constants for flick-keys
//!
//! All magic numbers and tunable parameters are defined here. Values that
//! users may override at runtime are mirrored in `settings.rs`.

/// Flick gesture recognition
pub mod gesture {
    /// Minimum drag distance (logical pixels) along the dominant axis before a
    /// flick leaves the center zone
    pub const FLICK_THRESHOLD_PX: f32 = 20.0;
}

/// Tilt-driven key emphasis
pub mod emphasis {
    /// Tilt magnitude above which a side key is emphasized
    pub const TILT_THRESHOLD: f32 = 0.15;
    /// Resting key scale
    pub const REST_SCALE: f32 = 1.0;
    /// Fully emphasized key scale
    pub const MAX_SCALE: f32 = 1.8;
    /// Resting glyph size (logical pixels)
    pub const REST_GLYPH_SIZE: f32 = 18.0;
    /// Fully emphasized glyph size
    pub const MAX_GLYPH_SIZE: f32 = 32.0;
    /// Grow animation duration
    pub const GROW_MS: u64 = 300;
    /// Revert animation duration
    pub const REVERT_MS: u64 = 400;
    /// How long an emphasized key stays enlarged before reverting
    pub const DWELL_MS: u64 = 2000;
}

/// Motion sensor normalization
pub mod tilt {
    /// Divisor for browser-provided acceleration values
    pub const BROWSER_DIVISOR: f32 = 5.0;
    /// Divisor for device-frame sensor values
    pub const DEVICE_FRAME_DIVISOR: f32 = 1.0;
    /// Target sensor cadence when explicitly configured (~10 Hz)
    pub const SAMPLE_INTERVAL_MS: u64 = 100;
    /// Raw acceleration the desktop simulator holds while Alt+Arrow is down
    pub const SIMULATED_ACCELERATION: f32 = 2.5;
    /// One g in m/s², the unit of browser samples
    pub const STANDARD_GRAVITY: f32 = 9.81;
}

/// Layout constants (in logical pixels, will be scaled by DPI)
pub mod layout {
    /// General padding around the screen edges
    pub const PADDING: f32 = 12.0;
    /// Gap between neighbouring keys
    pub const KEY_GAP: f32 = 6.0;
    /// Corner radius of key backgrounds
    pub const KEY_RADIUS: f32 = 8.0;
    /// Share of the window height given to the text area
    pub const TEXT_AREA_RATIO: f32 = 0.32;
    /// Width of the command column relative to a kana key
    pub const SIDE_COLUMN_RATIO: f32 = 0.8;
    /// Height of edit line in the text area
    pub const LINE_HEIGHT: f32 = 26.0;
}

/// Rendering constants
pub mod rendering {
    /// Font size for the edited text
    pub const TEXT_FONT_SIZE: f32 = 20.0;
    /// Font size for side key labels
    pub const SIDE_KEY_FONT_SIZE: f32 = 15.0;
    /// Font size for flick direction hints
    pub const HINT_FONT_SIZE: f32 = 16.0;
    /// Font size for the status line
    pub const STATUS_FONT_SIZE: f32 = 12.0;
}

/// Timing constants (in milliseconds)
pub mod timing {
    /// Cursor blink interval
    pub const CURSOR_BLINK_MS: u64 = 500;
}
