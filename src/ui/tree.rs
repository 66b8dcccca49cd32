//! UI tree coordinator for hit-testing

use super::keyboard_grid::KeyboardGrid;
use super::text_area::TextArea;
use super::types::UiNode;

#[derive(Debug, Clone)]
pub struct UiTree {
    pub text_area: TextArea,
    pub keyboard: KeyboardGrid,
}

impl UiTree {
    pub fn new(width: f32, height: f32, scale: f32) -> Self {
        Self {
            text_area: TextArea::new(width, height, scale),
            keyboard: KeyboardGrid::new(width, height, scale),
        }
    }

    pub fn hit_test(&self, x: f32, y: f32, key_scales: &[f32]) -> UiNode {
        match self.keyboard.hit_test(x, y, key_scales) {
            UiNode::None if self.text_area.hit_test(x, y) => UiNode::TextArea,
            node => node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_area_above_keyboard() {
        let tree = UiTree::new(480.0, 800.0, 1.0);
        let (cx, cy) = tree.text_area.rect.center();
        assert_eq!(tree.hit_test(cx, cy, &[]), UiNode::TextArea);
        assert!(tree.text_area.rect.y + tree.text_area.rect.height < tree.keyboard.rect.y);
    }
}
