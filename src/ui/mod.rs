//! UI layout and hit-testing

mod keyboard_grid;
mod text_area;
mod tree;
mod types;

pub use tree::UiTree;
pub use types::{Rect, UiNode};
