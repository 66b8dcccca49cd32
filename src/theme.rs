//! Theme colors for the keyboard

pub struct Theme {
    /// Background color (RGB 0.0-1.0)
    pub bg: (f32, f32, f32),
    /// Foreground/text color
    pub fg: (f32, f32, f32),
    /// Text area background
    pub text_area_bg: (f32, f32, f32),
    /// Backdrop behind the keys
    pub keyboard_bg: (f32, f32, f32),
    /// Kana key background
    pub key_bg: (f32, f32, f32),
    /// Key background while a gesture is tracking
    pub key_pressed: (f32, f32, f32),
    /// Outline of an emphasized key
    pub key_emphasis: (f32, f32, f32),
    /// Command key background
    pub side_key_bg: (f32, f32, f32),
    /// Flick hint background
    pub hint_bg: (f32, f32, f32),
    /// Highlighted flick hint
    pub hint_active: (f32, f32, f32),
    /// Secondary text (status line, placeholders)
    pub muted: (f32, f32, f32),
    /// Cursor color
    pub cursor: (f32, f32, f32),
    /// Sensor debug panel
    pub debug_bg: (f32, f32, f32),
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: (0.07, 0.07, 0.09),
            fg: (0.95, 0.95, 0.95),
            text_area_bg: (0.12, 0.12, 0.15),
            keyboard_bg: (0.1, 0.1, 0.12),
            key_bg: (0.22, 0.22, 0.26),
            key_pressed: (0.32, 0.32, 0.38),
            key_emphasis: (1.0, 0.6, 0.1), // Amber outline
            side_key_bg: (0.16, 0.16, 0.2),
            hint_bg: (0.28, 0.28, 0.34),
            hint_active: (0.2, 0.45, 0.9), // Blue accent
            muted: (0.55, 0.55, 0.6),
            cursor: (0.2, 0.6, 1.0),
            debug_bg: (0.0, 0.0, 0.0),
        }
    }
}
