//! Static keyboard layout
//!
//! Flick slots are ordered center, up, right, down, left. An empty slot
//! produces nothing when flicked.

use crate::emphasis::KeySide;
use crate::flick::FlickDirection;

/// How a key's committed glyph is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// The glyph is inserted as text
    Glyph,
    /// The glyph names a kana modifier applied to the last character
    Modifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDefinition {
    pub primary: &'static str,
    pub flicks: [&'static str; 5],
    pub kind: KeyKind,
}

impl KeyDefinition {
    const fn glyphs(primary: &'static str, flicks: [&'static str; 5]) -> Self {
        Self {
            primary,
            flicks,
            kind: KeyKind::Glyph,
        }
    }

    pub fn glyph(&self, direction: FlickDirection) -> &'static str {
        self.flicks[direction.index()]
    }
}

pub const ROWS: usize = 4;
pub const COLUMNS: usize = 3;

pub const KANA_ROWS: [[KeyDefinition; COLUMNS]; ROWS] = [
    [
        KeyDefinition::glyphs("あ", ["あ", "い", "う", "え", "お"]),
        KeyDefinition::glyphs("か", ["か", "き", "く", "け", "こ"]),
        KeyDefinition::glyphs("さ", ["さ", "し", "す", "せ", "そ"]),
    ],
    [
        KeyDefinition::glyphs("た", ["た", "ち", "つ", "て", "と"]),
        KeyDefinition::glyphs("な", ["な", "に", "ぬ", "ね", "の"]),
        KeyDefinition::glyphs("は", ["は", "ひ", "ふ", "へ", "ほ"]),
    ],
    [
        KeyDefinition::glyphs("ま", ["ま", "み", "む", "め", "も"]),
        KeyDefinition::glyphs("や", ["や", "", "ゆ", "", "よ"]),
        KeyDefinition::glyphs("ら", ["ら", "り", "る", "れ", "ろ"]),
    ],
    [
        KeyDefinition::glyphs("ん", ["ん", "", "", "", ""]),
        KeyDefinition::glyphs("わ", ["わ", "を", "", "", ""]),
        KeyDefinition::glyphs("、。?!", ["、", "。", "?", "!", "…"]),
    ],
];

/// Dakuten / handakuten / small-kana key in the left command column.
/// Tap cycles, up voices, down semi-voices, left shrinks.
pub const MODIFIER_KEY: KeyDefinition = KeyDefinition {
    primary: "小゛゜",
    flicks: ["小゛゜", "゛", "", "゜", "小"],
    kind: KeyKind::Modifier,
};

/// Row of the modifier key, under Backspace
pub const MODIFIER_ROW: usize = 1;

/// Where a flick key sits on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPlacement {
    /// Kana grid cell
    Grid { row: usize, column: usize },
    /// Left command column
    LeftColumn { row: usize },
}

impl KeyPlacement {
    /// Emphasis side; only the outer kana columns respond to tilt
    pub fn side(self) -> KeySide {
        match self {
            KeyPlacement::Grid { column, .. } => side_for_column(column),
            KeyPlacement::LeftColumn { .. } => KeySide::Center,
        }
    }
}

/// Emphasis side for a kana column
pub fn side_for_column(column: usize) -> KeySide {
    match column {
        0 => KeySide::Left,
        c if c + 1 == COLUMNS => KeySide::Right,
        _ => KeySide::Center,
    }
}

/// Row-major iterator over every kana key with its grid position
pub fn kana_keys() -> impl Iterator<Item = (usize, usize, &'static KeyDefinition)> {
    KANA_ROWS.iter().enumerate().flat_map(|(row, keys)| {
        keys.iter()
            .enumerate()
            .map(move |(column, key)| (row, column, key))
    })
}

/// Every flick key in index order: the kana grid, then the modifier key
pub fn flick_keys() -> impl Iterator<Item = (KeyPlacement, &'static KeyDefinition)> {
    kana_keys()
        .map(|(row, column, key)| (KeyPlacement::Grid { row, column }, key))
        .chain(std::iter::once((
            KeyPlacement::LeftColumn { row: MODIFIER_ROW },
            &MODIFIER_KEY,
        )))
}

/// Fixed command keys on either side of the kana grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideKey {
    Backspace,
    Space,
    Enter,
    Clear,
}

impl SideKey {
    /// Left column, top down; the modifier key follows
    pub const LEFT_COLUMN: [SideKey; 1] = [SideKey::Backspace];

    /// Right column, top down
    pub const RIGHT_COLUMN: [SideKey; 3] = [SideKey::Clear, SideKey::Space, SideKey::Enter];

    pub fn label(self) -> &'static str {
        match self {
            SideKey::Backspace => "⌫",
            SideKey::Space => "空白",
            SideKey::Enter => "改行",
            SideKey::Clear => "✕",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_shape() {
        assert_eq!(kana_keys().count(), ROWS * COLUMNS);
        assert_eq!(flick_keys().count(), ROWS * COLUMNS + 1);
        assert!(SideKey::LEFT_COLUMN.len() <= MODIFIER_ROW);
        assert!(SideKey::RIGHT_COLUMN.len() <= ROWS);
    }

    #[test]
    fn test_primary_starts_with_center_glyph() {
        for (_, key) in flick_keys() {
            assert!(key.primary.starts_with(key.glyph(FlickDirection::Center)));
        }
    }

    #[test]
    fn test_sparse_keys_keep_empty_slots() {
        let ya = KANA_ROWS[2][1];
        assert_eq!(ya.glyph(FlickDirection::Up), "");
        assert_eq!(ya.glyph(FlickDirection::Down), "");
        assert_eq!(ya.glyph(FlickDirection::Left), "よ");
        let n = KANA_ROWS[3][0];
        assert_eq!(n.primary, "ん");
        assert!(n.flicks[1..].iter().all(|glyph| glyph.is_empty()));
        assert_eq!(KANA_ROWS[3][2].glyph(FlickDirection::Down), "!");
    }

    #[test]
    fn test_column_sides() {
        assert_eq!(side_for_column(0), KeySide::Left);
        assert_eq!(side_for_column(1), KeySide::Center);
        assert_eq!(side_for_column(2), KeySide::Right);
        assert_eq!(
            KeyPlacement::LeftColumn { row: MODIFIER_ROW }.side(),
            KeySide::Center
        );
    }

    #[test]
    fn test_grid_holds_only_glyph_keys() {
        assert!(kana_keys().all(|(_, _, key)| key.kind == KeyKind::Glyph));
        let modifiers: Vec<_> = flick_keys()
            .filter(|(_, key)| key.kind == KeyKind::Modifier)
            .map(|(placement, _)| placement)
            .collect();
        assert_eq!(modifiers, vec![KeyPlacement::LeftColumn { row: MODIFIER_ROW }]);
    }
}
