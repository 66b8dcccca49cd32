//! Font loading and discovery

use femtovg::{Canvas, FontId, renderer::OpenGl};

/// Load fonts with kana coverage first, then general fallbacks
pub fn load_fonts(canvas: &mut Canvas<OpenGl>) -> Vec<FontId> {
    let mut fonts = Vec::new();

    // 1. Japanese-capable fonts; the first one found becomes primary
    let cjk_paths = [
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/takao-gothic/TakaoPGothic.ttf",
        "/usr/share/fonts/truetype/fonts-japanese-gothic.ttf",
        "/usr/share/fonts/truetype/droid/DroidSansFallbackFull.ttf",
        "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
        "C:\\Windows\\Fonts\\meiryo.ttc",
        "C:\\Windows\\Fonts\\msgothic.ttc",
    ];

    for path in &cjk_paths {
        if let Ok(font) = canvas.add_font(path) {
            fonts.push(font);
            break;
        }
    }

    // 2. Latin fallbacks for hardware-keyboard input and labels
    let fallback_paths = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
    ];

    for path in &fallback_paths {
        if let Ok(font) = canvas.add_font(path) {
            fonts.push(font);
        }
    }

    // 3. Fallback: if no fonts loaded at all, try to find any TTF
    if fonts.is_empty() {
        if let Ok(entries) = std::fs::read_dir("/usr/share/fonts/truetype") {
            for entry in entries.flatten() {
                if !entry.path().is_dir() {
                    continue;
                }
                let Ok(sub_entries) = std::fs::read_dir(entry.path()) else {
                    continue;
                };
                let found = sub_entries
                    .flatten()
                    .map(|sub_entry| sub_entry.path())
                    .filter(|path| path.extension().is_some_and(|e| e == "ttf"))
                    .find_map(|path| canvas.add_font(path).ok());
                if let Some(font) = found {
                    fonts.push(font);
                    break;
                }
            }
        }
    }

    if fonts.is_empty() {
        log::error!("no usable font found; text will not render");
    } else {
        log::debug!("loaded {} font(s)", fonts.len());
    }

    fonts
}
