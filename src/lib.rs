//! Flick Keys - a Japanese flick keyboard with tilt-driven key emphasis
//!
//! The library holds the interaction core: gesture recognition, emphasis
//! timing, tilt normalization and the document. The `flick-keys` binary
//! renders it in a window.

pub mod animation;
pub mod config;
pub mod emphasis;
pub mod flick;
pub mod kana;
pub mod keyboard;
pub mod keymap;
pub mod settings;
pub mod source;
pub mod text_buffer;
pub mod tilt;
