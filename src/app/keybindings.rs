//! Keyboard shortcut registry
//!
//! Maps chords to host actions. Anything that resolves to `None` is passed
//! on to the keyboard controller as a hardware key, unless Ctrl or Alt is
//! held.

use super::simulator::Lean;

/// Modifier key state
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::default()
        }
    }

    /// Chords with these held never reach the document
    pub fn is_chord(&self) -> bool {
        self.ctrl || self.alt
    }
}

/// Keys the host reacts to; everything else is `Other`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    ArrowLeft,
    ArrowRight,
    F12,
    Other,
}

/// A key press (key + modifiers)
#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleDebug,
    /// Hold a simulated lean while the key stays down
    Lean(Lean),
}

/// Resolve a key press to an action
pub fn resolve(event: &KeyEvent) -> Option<Action> {
    let KeyEvent { key, modifiers } = event;
    let Modifiers { ctrl, alt } = *modifiers;

    match key {
        Key::Escape => Some(Action::Quit),

        // =================================================================
        // Debug panel (F12, Ctrl+D)
        // =================================================================
        Key::F12 => Some(Action::ToggleDebug),
        Key::Char(c) if ctrl && c.eq_ignore_ascii_case(&'d') => Some(Action::ToggleDebug),

        // =================================================================
        // Tilt simulator (Alt+Left, Alt+Right)
        // =================================================================
        Key::ArrowLeft if alt => Some(Action::Lean(Lean::Left)),
        Key::ArrowRight if alt => Some(Action::Lean(Lean::Right)),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key, modifiers: Modifiers) -> Option<Action> {
        resolve(&KeyEvent::new(key, modifiers))
    }

    #[test]
    fn test_debug_toggle_bindings() {
        assert_eq!(press(Key::F12, Modifiers::none()), Some(Action::ToggleDebug));
        assert_eq!(press(Key::Char('d'), Modifiers::ctrl()), Some(Action::ToggleDebug));
        assert_eq!(press(Key::Char('D'), Modifiers::ctrl()), Some(Action::ToggleDebug));
        assert_eq!(press(Key::Char('d'), Modifiers::none()), None);
    }

    #[test]
    fn test_lean_needs_alt() {
        assert_eq!(
            press(Key::ArrowLeft, Modifiers::alt()),
            Some(Action::Lean(Lean::Left))
        );
        assert_eq!(
            press(Key::ArrowRight, Modifiers::alt()),
            Some(Action::Lean(Lean::Right))
        );
        assert_eq!(press(Key::ArrowLeft, Modifiers::none()), None);
    }

    #[test]
    fn test_plain_keys_pass_through() {
        assert_eq!(press(Key::Escape, Modifiers::none()), Some(Action::Quit));
        assert_eq!(press(Key::Char('a'), Modifiers::none()), None);
        assert_eq!(press(Key::Other, Modifiers::none()), None);
        assert!(Modifiers::ctrl().is_chord());
        assert!(!Modifiers::none().is_chord());
    }
}
