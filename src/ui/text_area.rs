//! Text area layout

use flick_keys::config::layout;
use super::types::Rect;

#[derive(Debug, Clone)]
pub struct TextArea {
    pub rect: Rect,
}

impl TextArea {
    pub fn new(width: f32, height: f32, scale: f32) -> Self {
        let padding = layout::PADDING * scale;
        let area_height = (height * layout::TEXT_AREA_RATIO - padding).max(0.0);
        Self {
            rect: Rect {
                x: padding,
                y: padding,
                width: (width - padding * 2.0).max(0.0),
                height: area_height,
            },
        }
    }

    pub fn hit_test(&self, x: f32, y: f32) -> bool {
        self.rect.contains(x, y)
    }

    /// Whole lines that fit at `line_height`
    pub fn visible_lines(&self, line_height: f32) -> usize {
        if line_height <= 0.0 {
            return 1;
        }
        ((self.rect.height - line_height * 0.5) / line_height)
            .floor()
            .max(1.0) as usize
    }
}
