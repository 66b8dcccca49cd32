//! Keyboard grid layout and hit-testing
//!
//! Command columns flank the kana grid: Backspace and the modifier key on
//! the left, Clear/Space/Enter on the right. Key rects never move. An
//! emphasized key is drawn and hit-tested with its rect scaled around the
//! center, on top of its neighbours.

use flick_keys::config::layout;
use flick_keys::keymap::{self, COLUMNS, KeyPlacement, ROWS, SideKey};

use super::types::{Rect, UiNode};

#[derive(Debug, Clone)]
pub struct KeyboardGrid {
    /// Backdrop behind every key
    pub rect: Rect,
    /// Flick keys, same order as the controller's keys
    pub keys: Vec<Rect>,
    pub side_keys: Vec<(SideKey, Rect)>,
}

impl KeyboardGrid {
    pub fn new(width: f32, height: f32, scale: f32) -> Self {
        let padding = layout::PADDING * scale;
        let gap = layout::KEY_GAP * scale;
        let top = height * layout::TEXT_AREA_RATIO + padding;
        let rect = Rect {
            x: padding,
            y: top,
            width: (width - padding * 2.0).max(0.0),
            height: (height - top - padding).max(0.0),
        };

        let gaps = (COLUMNS as f32 + 1.0) * gap;
        let key_width =
            ((rect.width - gaps) / (COLUMNS as f32 + 2.0 * layout::SIDE_COLUMN_RATIO)).max(0.0);
        let side_width = key_width * layout::SIDE_COLUMN_RATIO;
        let key_height = ((rect.height - (ROWS as f32 - 1.0) * gap) / ROWS as f32).max(0.0);

        let row_y = |row: usize| rect.y + row as f32 * (key_height + gap);
        let left_x = rect.x;
        let grid_x = left_x + side_width + gap;
        let right_x = grid_x + COLUMNS as f32 * (key_width + gap);

        let keys = keymap::flick_keys()
            .map(|(placement, _)| match placement {
                KeyPlacement::Grid { row, column } => Rect {
                    x: grid_x + column as f32 * (key_width + gap),
                    y: row_y(row),
                    width: key_width,
                    height: key_height,
                },
                KeyPlacement::LeftColumn { row } => Rect {
                    x: left_x,
                    y: row_y(row),
                    width: side_width,
                    height: key_height,
                },
            })
            .collect();

        let column = |x: f32, keys: &[SideKey]| {
            keys.iter()
                .enumerate()
                .map(|(row, key)| {
                    (
                        *key,
                        Rect {
                            x,
                            y: row_y(row),
                            width: side_width,
                            height: key_height,
                        },
                    )
                })
                .collect::<Vec<_>>()
        };
        let mut side_keys = column(left_x, &SideKey::LEFT_COLUMN);
        side_keys.extend(column(right_x, &SideKey::RIGHT_COLUMN));

        Self {
            rect,
            keys,
            side_keys,
        }
    }

    /// Drawn bounds of key `index` at emphasis `scale`
    pub fn key_bounds(&self, index: usize, scale: f32) -> Option<Rect> {
        self.keys.get(index).map(|rect| rect.scaled(scale))
    }

    /// `scales[i]` is the current emphasis scale of key `i`
    pub fn hit_test(&self, x: f32, y: f32, scales: &[f32]) -> UiNode {
        let mut emphasized: Vec<(usize, f32)> = scales
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, scale)| *scale > 1.0)
            .collect();
        emphasized.sort_by(|a, b| b.1.total_cmp(&a.1));

        for (index, scale) in emphasized {
            if self
                .key_bounds(index, scale)
                .is_some_and(|rect| rect.contains(x, y))
            {
                return UiNode::Key(index);
            }
        }

        if let Some(index) = self.keys.iter().position(|rect| rect.contains(x, y)) {
            return UiNode::Key(index);
        }

        self.side_keys
            .iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(key, _)| UiNode::SideKey(*key))
            .unwrap_or(UiNode::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> KeyboardGrid {
        KeyboardGrid::new(600.0, 800.0, 1.0)
    }

    fn side_rect(grid: &KeyboardGrid, key: SideKey) -> Rect {
        grid.side_keys
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, rect)| *rect)
            .unwrap()
    }

    #[test]
    fn test_grid_shape() {
        let grid = grid();
        assert_eq!(grid.keys.len(), ROWS * COLUMNS + 1);
        assert_eq!(
            grid.side_keys.len(),
            SideKey::LEFT_COLUMN.len() + SideKey::RIGHT_COLUMN.len()
        );

        let first_kana = grid.keys[0];
        let last_kana = grid.keys[COLUMNS - 1];
        let backspace = side_rect(&grid, SideKey::Backspace);
        let clear = side_rect(&grid, SideKey::Clear);
        assert!(backspace.x + backspace.width < first_kana.x);
        assert!(clear.x > last_kana.x + last_kana.width);
        assert!(clear.x + clear.width <= grid.rect.x + grid.rect.width + 0.01);
    }

    #[test]
    fn test_modifier_sits_under_backspace() {
        let grid = grid();
        let modifier = grid.keys[ROWS * COLUMNS];
        let backspace = side_rect(&grid, SideKey::Backspace);
        assert_eq!(modifier.x, backspace.x);
        assert!(modifier.y > backspace.y + backspace.height);
    }

    #[test]
    fn test_hit_key_centers() {
        let grid = grid();
        let rest = vec![1.0; grid.keys.len()];
        for (index, rect) in grid.keys.iter().enumerate() {
            let (cx, cy) = rect.center();
            assert_eq!(grid.hit_test(cx, cy, &rest), UiNode::Key(index));
        }
        let (cx, cy) = side_rect(&grid, SideKey::Enter).center();
        assert_eq!(grid.hit_test(cx, cy, &rest), UiNode::SideKey(SideKey::Enter));
    }

    #[test]
    fn test_emphasized_key_claims_neighbour_area() {
        let grid = grid();
        let mut scales = vec![1.0; grid.keys.len()];
        // Point just inside key 1, near its left edge.
        let neighbour = grid.keys[1];
        let (x, y) = (neighbour.x + 2.0, neighbour.center().1);
        assert_eq!(grid.hit_test(x, y, &scales), UiNode::Key(1));

        scales[0] = 1.8;
        assert_eq!(grid.hit_test(x, y, &scales), UiNode::Key(0));
    }

    #[test]
    fn test_outside_is_none() {
        let grid = grid();
        assert_eq!(grid.hit_test(1.0, 1.0, &[]), UiNode::None);
    }
}
