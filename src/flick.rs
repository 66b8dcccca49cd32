//! Flick gesture recognition
//!
//! A recognizer belongs to exactly one key and sees pointer coordinates local
//! to that key. The drag vector from the touch-down point is reclassified on
//! every move so the highlighted hint follows the finger; the glyph of the
//! last classified direction is committed on release.

use crate::config::gesture;
use crate::keymap::KeyDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlickDirection {
    Center,
    Up,
    Right,
    Down,
    Left,
}

impl FlickDirection {
    pub const ALL: [FlickDirection; 5] = [
        FlickDirection::Center,
        FlickDirection::Up,
        FlickDirection::Right,
        FlickDirection::Down,
        FlickDirection::Left,
    ];

    /// Slot in `KeyDefinition::flicks`
    pub fn index(self) -> usize {
        match self {
            FlickDirection::Center => 0,
            FlickDirection::Up => 1,
            FlickDirection::Right => 2,
            FlickDirection::Down => 3,
            FlickDirection::Left => 4,
        }
    }
}

/// Classify a drag vector. The dominant axis wins; ties go horizontal.
pub fn classify(dx: f32, dy: f32, threshold: f32) -> FlickDirection {
    if dy.abs() > dx.abs() {
        if dy < -threshold {
            FlickDirection::Up
        } else if dy > threshold {
            FlickDirection::Down
        } else {
            FlickDirection::Center
        }
    } else if dx < -threshold {
        FlickDirection::Left
    } else if dx > threshold {
        FlickDirection::Right
    } else {
        FlickDirection::Center
    }
}

/// Pointer positions captured from touch-down to the latest move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub start_x: f32,
    pub start_y: f32,
    pub current_x: f32,
    pub current_y: f32,
}

impl GestureSample {
    fn new(x: f32, y: f32) -> Self {
        Self {
            start_x: x,
            start_y: y,
            current_x: x,
            current_y: y,
        }
    }

    pub fn delta(&self) -> (f32, f32) {
        (self.current_x - self.start_x, self.current_y - self.start_y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum RecognizerState {
    Idle,
    Tracking {
        sample: GestureSample,
        direction: FlickDirection,
    },
}

/// Emitted when a gesture resolves to a non-empty glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlickCommit {
    pub glyph: &'static str,
    pub direction: FlickDirection,
}

pub struct FlickRecognizer {
    threshold: f32,
    state: RecognizerState,
}

impl FlickRecognizer {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            state: RecognizerState::Idle,
        }
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.state = RecognizerState::Tracking {
            sample: GestureSample::new(x, y),
            direction: FlickDirection::Center,
        };
    }

    /// Returns true if the highlighted direction changed
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let threshold = self.threshold;
        match &mut self.state {
            RecognizerState::Idle => false,
            RecognizerState::Tracking { sample, direction } => {
                sample.current_x = x;
                sample.current_y = y;
                let (dx, dy) = sample.delta();
                let next = classify(dx, dy, threshold);
                let changed = next != *direction;
                *direction = next;
                changed
            }
        }
    }

    /// Finish the gesture against `key` and return to idle.
    ///
    /// Empty or whitespace-only slots resolve to `None`.
    pub fn pointer_up(&mut self, key: &KeyDefinition) -> Option<FlickCommit> {
        let state = std::mem::replace(&mut self.state, RecognizerState::Idle);
        let RecognizerState::Tracking { direction, .. } = state else {
            return None;
        };

        let glyph = key.glyph(direction).trim();
        if glyph.is_empty() {
            log::debug!("flick {direction:?} on {} has no glyph", key.primary);
            return None;
        }
        Some(FlickCommit { glyph, direction })
    }

    /// Abandon the gesture without committing
    pub fn cancel(&mut self) {
        self.state = RecognizerState::Idle;
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.state, RecognizerState::Tracking { .. })
    }

    /// Live direction while tracking; hints are hidden when `None`
    pub fn active_direction(&self) -> Option<FlickDirection> {
        match self.state {
            RecognizerState::Idle => None,
            RecognizerState::Tracking { direction, .. } => Some(direction),
        }
    }

    pub fn sample(&self) -> Option<GestureSample> {
        match self.state {
            RecognizerState::Idle => None,
            RecognizerState::Tracking { sample, .. } => Some(sample),
        }
    }
}

impl Default for FlickRecognizer {
    fn default() -> Self {
        Self::new(gesture::FLICK_THRESHOLD_PX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::KeyKind;

    const A_KEY: KeyDefinition = KeyDefinition {
        primary: "あ",
        flicks: ["あ", "い", "う", "え", "お"],
        kind: KeyKind::Glyph,
    };

    const SPARSE_KEY: KeyDefinition = KeyDefinition {
        primary: "や",
        flicks: ["や", "", "ゆ", "  ", "よ"],
        kind: KeyKind::Glyph,
    };

    fn flick(key: &KeyDefinition, dx: f32, dy: f32) -> Option<&'static str> {
        let mut recognizer = FlickRecognizer::default();
        recognizer.pointer_down(40.0, 40.0);
        recognizer.pointer_move(40.0 + dx, 40.0 + dy);
        recognizer.pointer_up(key).map(|commit| commit.glyph)
    }

    #[test]
    fn test_classify_vertical() {
        assert_eq!(classify(0.0, -25.0, 20.0), FlickDirection::Up);
        assert_eq!(classify(10.0, 21.0, 20.0), FlickDirection::Down);
        assert_eq!(classify(3.0, -20.0, 20.0), FlickDirection::Center);
    }

    #[test]
    fn test_classify_horizontal() {
        assert_eq!(classify(-30.0, 5.0, 20.0), FlickDirection::Left);
        assert_eq!(classify(21.0, -21.0, 20.0), FlickDirection::Right);
        assert_eq!(classify(20.0, 0.0, 20.0), FlickDirection::Center);
    }

    #[test]
    fn test_classify_grid() {
        for dx in (-60..=60).step_by(3) {
            for dy in (-60..=60).step_by(3) {
                let (dx, dy) = (dx as f32, dy as f32);
                let expected = if dy.abs() > dx.abs() && dy < -20.0 {
                    FlickDirection::Up
                } else if dy.abs() > dx.abs() && dy > 20.0 {
                    FlickDirection::Down
                } else if dy.abs() <= dx.abs() && dx < -20.0 {
                    FlickDirection::Left
                } else if dy.abs() <= dx.abs() && dx > 20.0 {
                    FlickDirection::Right
                } else {
                    FlickDirection::Center
                };
                assert_eq!(classify(dx, dy, 20.0), expected, "dx={dx} dy={dy}");
            }
        }
    }

    #[test]
    fn test_up_flick_commits_second_glyph() {
        assert_eq!(flick(&A_KEY, 0.0, -25.0), Some("い"));
    }

    #[test]
    fn test_small_drag_commits_center() {
        assert_eq!(flick(&A_KEY, 5.0, 5.0), Some("あ"));
    }

    #[test]
    fn test_every_direction() {
        assert_eq!(flick(&A_KEY, 30.0, 0.0), Some("う"));
        assert_eq!(flick(&A_KEY, 0.0, 30.0), Some("え"));
        assert_eq!(flick(&A_KEY, -30.0, 0.0), Some("お"));
    }

    #[test]
    fn test_empty_slot_is_noop() {
        assert_eq!(flick(&SPARSE_KEY, 0.0, -30.0), None);
        assert_eq!(flick(&SPARSE_KEY, 0.0, 30.0), None);
        assert_eq!(flick(&SPARSE_KEY, 30.0, 0.0), Some("ゆ"));
    }

    #[test]
    fn test_direction_tracks_moves() {
        let mut recognizer = FlickRecognizer::default();
        assert_eq!(recognizer.active_direction(), None);
        recognizer.pointer_down(0.0, 0.0);
        assert_eq!(recognizer.active_direction(), Some(FlickDirection::Center));

        assert!(recognizer.pointer_move(0.0, -30.0));
        assert_eq!(recognizer.active_direction(), Some(FlickDirection::Up));
        assert!(!recognizer.pointer_move(2.0, -35.0));

        // Sliding back to the center cancels the flick.
        assert!(recognizer.pointer_move(1.0, -4.0));
        assert_eq!(recognizer.pointer_up(&A_KEY).map(|c| c.glyph), Some("あ"));
        assert!(!recognizer.is_tracking());
    }

    #[test]
    fn test_up_without_down_is_ignored() {
        let mut recognizer = FlickRecognizer::default();
        assert!(!recognizer.pointer_move(0.0, -40.0));
        assert_eq!(recognizer.pointer_up(&A_KEY), None);
    }

    #[test]
    fn test_cancel_drops_gesture() {
        let mut recognizer = FlickRecognizer::default();
        recognizer.pointer_down(0.0, 0.0);
        recognizer.pointer_move(0.0, -40.0);
        recognizer.cancel();
        assert_eq!(recognizer.sample(), None);
        assert_eq!(recognizer.pointer_up(&A_KEY), None);
    }
}
