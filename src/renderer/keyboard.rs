//! Flick keyboard rendering

use crate::theme::Theme;
use crate::ui::Rect;
use femtovg::{Align, Baseline, Canvas, FontId, Paint, Path, renderer::OpenGl};
use flick_keys::config::{layout, rendering};
use flick_keys::flick::FlickDirection;
use flick_keys::keyboard::FlickKey;

use super::{FrameView, rgb};

pub struct KeyboardRenderer<'a> {
    canvas: &'a mut Canvas<OpenGl>,
    fonts: &'a [FontId],
    theme: &'a Theme,
    scale: f32,
}

impl<'a> KeyboardRenderer<'a> {
    pub fn new(
        canvas: &'a mut Canvas<OpenGl>,
        fonts: &'a [FontId],
        theme: &'a Theme,
        scale: f32,
    ) -> Self {
        Self {
            canvas,
            fonts,
            theme,
            scale,
        }
    }

    pub fn draw(&mut self, view: &FrameView<'_>) {
        let backdrop = view.ui.keyboard.rect;
        let mut path = Path::new();
        path.rounded_rect(
            backdrop.x,
            backdrop.y,
            backdrop.width,
            backdrop.height,
            layout::KEY_RADIUS * self.scale,
        );
        self.canvas.fill_path(&path, &Paint::color(rgb(self.theme.keyboard_bg)));

        self.draw_side_keys(view);

        // Keys at rest first so grown keys paint over their neighbours
        let mut emphasized = Vec::new();
        for (index, key) in view.keyboard.keys().iter().enumerate() {
            let state = key.emphasis_state(view.now);
            if state.is_rest() {
                let Some(bounds) = view.ui.keyboard.key_bounds(index, 1.0) else {
                    continue;
                };
                self.draw_key(key, bounds, state.glyph_size, false);
            } else {
                emphasized.push((index, state));
            }
        }
        emphasized.sort_by(|a, b| a.1.scale_factor.total_cmp(&b.1.scale_factor));
        for (index, state) in emphasized {
            let Some(bounds) = view.ui.keyboard.key_bounds(index, state.scale_factor) else {
                continue;
            };
            self.draw_key(&view.keyboard.keys()[index], bounds, state.glyph_size, true);
        }

        // Hints go last so they are never covered
        for (index, key) in view.keyboard.keys().iter().enumerate() {
            let Some(direction) = key.active_direction() else {
                continue;
            };
            let scale_factor = key.emphasis_state(view.now).scale_factor;
            if let Some(bounds) = view.ui.keyboard.key_bounds(index, scale_factor) {
                self.draw_hints(key, bounds, direction);
            }
        }
    }

    fn draw_side_keys(&mut self, view: &FrameView<'_>) {
        let mut paint = Paint::color(rgb(self.theme.fg));
        paint.set_font(self.fonts);
        paint.set_font_size(rendering::SIDE_KEY_FONT_SIZE * self.scale);
        paint.set_text_align(Align::Center);
        paint.set_text_baseline(Baseline::Middle);

        for (key, rect) in &view.ui.keyboard.side_keys {
            let mut path = Path::new();
            path.rounded_rect(rect.x, rect.y, rect.width, rect.height, layout::KEY_RADIUS * self.scale);
            self.canvas.fill_path(&path, &Paint::color(rgb(self.theme.side_key_bg)));

            let (cx, cy) = rect.center();
            let _ = self.canvas.fill_text(cx, cy, key.label(), &paint);
        }
    }

    /// `glyph_size` is in logical pixels
    fn draw_key(&mut self, key: &FlickKey, bounds: Rect, glyph_size: f32, emphasized: bool) {
        let background = if key.active_direction().is_some() {
            self.theme.key_pressed
        } else {
            self.theme.key_bg
        };

        let radius = layout::KEY_RADIUS * self.scale;
        let mut path = Path::new();
        path.rounded_rect(bounds.x, bounds.y, bounds.width, bounds.height, radius);
        self.canvas.fill_path(&path, &Paint::color(rgb(background)));
        if emphasized {
            self.canvas.stroke_path(
                &path,
                &Paint::color(rgb(self.theme.key_emphasis)).with_line_width(2.0 * self.scale),
            );
        }

        let mut paint = Paint::color(rgb(self.theme.fg));
        paint.set_font(self.fonts);
        paint.set_font_size(glyph_size * self.scale);
        paint.set_text_align(Align::Center);
        paint.set_text_baseline(Baseline::Middle);

        let (cx, cy) = bounds.center();
        let _ = self
            .canvas
            .fill_text(cx, cy, key.definition().primary, &paint);
    }

    /// Center glyph over the key, the four flick glyphs around it
    fn draw_hints(&mut self, key: &FlickKey, bounds: Rect, active: FlickDirection) {
        let (cx, cy) = bounds.center();
        let cell = bounds.width.min(bounds.height) * 0.75;
        let radius = layout::KEY_RADIUS * self.scale;

        let mut paint = Paint::color(rgb(self.theme.fg));
        paint.set_font(self.fonts);
        paint.set_font_size(rendering::HINT_FONT_SIZE * self.scale);
        paint.set_text_align(Align::Center);
        paint.set_text_baseline(Baseline::Middle);

        for direction in FlickDirection::ALL {
            let glyph = key.definition().glyph(direction).trim();
            if glyph.is_empty() && direction != active {
                continue;
            }
            let (ox, oy) = match direction {
                FlickDirection::Center => (0.0, 0.0),
                FlickDirection::Up => (0.0, -cell),
                FlickDirection::Right => (cell, 0.0),
                FlickDirection::Down => (0.0, cell),
                FlickDirection::Left => (-cell, 0.0),
            };
            let (x, y) = (cx + ox - cell / 2.0, cy + oy - cell / 2.0);

            let color = if direction == active {
                self.theme.hint_active
            } else {
                self.theme.hint_bg
            };
            let mut path = Path::new();
            path.rounded_rect(x, y, cell, cell, radius);
            self.canvas.fill_path(&path, &Paint::color(rgb(color)));

            let _ = self.canvas.fill_text(cx + ox, cy + oy, glyph, &paint);
        }
    }
}
