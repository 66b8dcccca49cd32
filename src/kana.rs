//! Dakuten, handakuten and small-kana conversion for the modifier key

/// Conversion requested by the modifier key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KanaModifier {
    /// Step through every variant of the character
    Cycle,
    /// ゛
    Voiced,
    /// ゜
    SemiVoiced,
    /// 小
    Small,
}

impl KanaModifier {
    /// Parse a glyph committed by the modifier key
    pub fn from_glyph(glyph: &str) -> Option<Self> {
        match glyph {
            "小゛゜" => Some(KanaModifier::Cycle),
            "゛" => Some(KanaModifier::Voiced),
            "゜" => Some(KanaModifier::SemiVoiced),
            "小" => Some(KanaModifier::Small),
            _ => None,
        }
    }
}

#[rustfmt::skip]
const VOICED: &[(char, char)] = &[
    ('か', 'が'), ('き', 'ぎ'), ('く', 'ぐ'), ('け', 'げ'), ('こ', 'ご'),
    ('さ', 'ざ'), ('し', 'じ'), ('す', 'ず'), ('せ', 'ぜ'), ('そ', 'ぞ'),
    ('た', 'だ'), ('ち', 'ぢ'), ('つ', 'づ'), ('て', 'で'), ('と', 'ど'),
    ('は', 'ば'), ('ひ', 'び'), ('ふ', 'ぶ'), ('へ', 'べ'), ('ほ', 'ぼ'),
    ('う', 'ゔ'),
];

#[rustfmt::skip]
const SEMI_VOICED: &[(char, char)] = &[
    ('は', 'ぱ'), ('ひ', 'ぴ'), ('ふ', 'ぷ'), ('へ', 'ぺ'), ('ほ', 'ぽ'),
];

#[rustfmt::skip]
const SMALL: &[(char, char)] = &[
    ('あ', 'ぁ'), ('い', 'ぃ'), ('う', 'ぅ'), ('え', 'ぇ'), ('お', 'ぉ'),
    ('つ', 'っ'), ('や', 'ゃ'), ('ゆ', 'ゅ'), ('よ', 'ょ'), ('わ', 'ゎ'),
];

fn lookup(table: &[(char, char)], base: char) -> Option<char> {
    table.iter().find(|(b, _)| *b == base).map(|(_, v)| *v)
}

/// The unmodified character behind any variant
fn base_of(c: char) -> char {
    [VOICED, SEMI_VOICED, SMALL]
        .iter()
        .flat_map(|table| table.iter())
        .find(|(_, variant)| *variant == c)
        .map(|(base, _)| *base)
        .unwrap_or(c)
}

/// Variants in cycle order: base, small, voiced, semi-voiced
fn variants(base: char) -> Vec<char> {
    let mut out = vec![base];
    out.extend(lookup(SMALL, base));
    out.extend(lookup(VOICED, base));
    out.extend(lookup(SEMI_VOICED, base));
    out
}

/// Apply `modifier` to `c`; `None` when the character has no such form
pub fn apply(modifier: KanaModifier, c: char) -> Option<char> {
    let base = base_of(c);
    let converted = match modifier {
        KanaModifier::Cycle => {
            let all = variants(base);
            let position = all.iter().position(|v| *v == c)?;
            all[(position + 1) % all.len()]
        }
        KanaModifier::Voiced => lookup(VOICED, base)?,
        KanaModifier::SemiVoiced => lookup(SEMI_VOICED, base)?,
        KanaModifier::Small => lookup(SMALL, base)?,
    };
    (converted != c).then_some(converted)
}
