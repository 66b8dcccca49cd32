//! Pointer and touch event handling
//!
//! A press captures the node under it; moves and the release go to that node
//! only, so a flick that strays over a neighbour still belongs to the key it
//! started on.

use std::time::Instant;

use crate::ui::UiNode;

use super::state::{AppResult, PointerCapture};
use super::App;

impl App {
    /// Current emphasis scale of every key, in key order
    fn key_scales(&self, now: Instant) -> Vec<f32> {
        self.keyboard
            .keys()
            .iter()
            .map(|key| key.emphasis_state(now).scale_factor)
            .collect()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> AppResult {
        self.state.last_pointer_x = x;
        self.state.last_pointer_y = y;
        if self.state.pointer.is_some() {
            // A second finger while one is tracking is ignored.
            return AppResult::Ok;
        }

        let now = Instant::now();
        let ui = self.ui_tree();
        let node = ui.hit_test(x, y, &self.key_scales(now));
        let origin = match node {
            UiNode::Key(index) => ui.keyboard.keys.get(index).map(|rect| (rect.x, rect.y)),
            UiNode::SideKey(_) => Some((0.0, 0.0)),
            UiNode::TextArea | UiNode::None => None,
        };
        let Some(origin) = origin else {
            return AppResult::Ok;
        };

        self.state.pointer = Some(PointerCapture { node, origin });
        if let UiNode::Key(index) = node {
            self.keyboard.pointer_down(index, x - origin.0, y - origin.1);
        }
        AppResult::Redraw
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> AppResult {
        self.state.last_pointer_x = x;
        self.state.last_pointer_y = y;
        match self.state.pointer {
            Some(PointerCapture {
                node: UiNode::Key(index),
                origin,
            }) => AppResult::from_changed(self.keyboard.pointer_move(
                index,
                x - origin.0,
                y - origin.1,
            )),
            _ => AppResult::Ok,
        }
    }

    pub fn pointer_up(&mut self) -> AppResult {
        let Some(capture) = self.state.pointer.take() else {
            return AppResult::Ok;
        };
        match capture.node {
            UiNode::Key(index) => {
                self.keyboard.pointer_up(index);
            }
            UiNode::SideKey(key) => {
                let ui = self.ui_tree();
                let released_on_key = ui
                    .keyboard
                    .side_keys
                    .iter()
                    .any(|(k, rect)| {
                        *k == key && rect.contains(self.state.last_pointer_x, self.state.last_pointer_y)
                    });
                if released_on_key {
                    self.keyboard.press_side_key(key);
                }
            }
            UiNode::TextArea | UiNode::None => {}
        }
        self.state.reset_cursor_blink();
        // Hints disappear on release even when nothing was committed
        AppResult::Redraw
    }

    /// Pointer left the window or the touch was cancelled by the platform
    pub fn pointer_cancel(&mut self) -> AppResult {
        match self.state.pointer.take() {
            Some(PointerCapture {
                node: UiNode::Key(index),
                ..
            }) => {
                self.keyboard.pointer_cancel(index);
                AppResult::Redraw
            }
            Some(_) => AppResult::Redraw,
            None => AppResult::Ok,
        }
    }
}
