//! Core UI types and enums

use flick_keys::keymap::SideKey;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiNode {
    None,
    TextArea,
    /// Kana key by index into the controller's key list
    Key(usize),
    SideKey(SideKey),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Same center, both sides multiplied by `factor`
    pub fn scaled(&self, factor: f32) -> Rect {
        let (cx, cy) = self.center();
        let width = self.width * factor;
        let height = self.height * factor;
        Rect {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_keeps_center() {
        let rect = Rect { x: 10.0, y: 20.0, width: 40.0, height: 30.0 };
        let big = rect.scaled(1.5);
        assert_eq!(big.center(), rect.center());
        assert_eq!(big.width, 60.0);
        assert!(big.contains(0.0, 20.0));
        assert!(!rect.contains(0.0, 20.0));
    }
}
