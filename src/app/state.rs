//! Application state types

use std::time::Instant;

use crate::ui::UiNode;

/// Result type for application actions that may trigger UI updates
#[must_use = "Handle the AppResult to ensure the UI updates correctly"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppResult {
    /// No action needed
    Ok,
    /// UI needs to be redrawn
    Redraw,
}

impl AppResult {
    pub fn needs_redraw(&self) -> bool {
        matches!(self, AppResult::Redraw)
    }

    pub fn from_changed(changed: bool) -> Self {
        if changed { AppResult::Redraw } else { AppResult::Ok }
    }
}

/// The node a pressed pointer is bound to until release
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerCapture {
    pub node: UiNode,
    /// Origin of the captured key's rect; moves are reported relative to it
    pub origin: (f32, f32),
}

/// Transient UI state (cursor blink, pointer capture, debug panel)
pub struct UiState {
    pub cursor_visible: bool,
    pub show_debug: bool,
    pub last_cursor_blink: Instant,
    pub pointer: Option<PointerCapture>,
    pub last_pointer_x: f32,
    pub last_pointer_y: f32,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            cursor_visible: true,
            show_debug: true,
            last_cursor_blink: Instant::now(),
            pointer: None,
            last_pointer_x: 0.0,
            last_pointer_y: 0.0,
        }
    }

    /// Reset cursor blink (call after user action)
    pub fn reset_cursor_blink(&mut self) {
        self.cursor_visible = true;
        self.last_cursor_blink = Instant::now();
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
