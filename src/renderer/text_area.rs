//! Document and status line rendering

use crate::theme::Theme;
use femtovg::{Baseline, Canvas, FontId, Paint, Path, renderer::OpenGl};
use flick_keys::config::{layout, rendering};

use super::{FrameView, rgb};

/// Snap a coordinate to the pixel grid to prevent blurry text rendering.
#[inline]
fn snap_to_pixel(coord: f32) -> f32 {
    coord.round()
}

pub struct TextAreaRenderer<'a> {
    canvas: &'a mut Canvas<OpenGl>,
    fonts: &'a [FontId],
    theme: &'a Theme,
    scale: f32,
}

impl<'a> TextAreaRenderer<'a> {
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
        let area = view.ui.text_area.rect;
        let padding = layout::PADDING * self.scale;
        let line_height = layout::LINE_HEIGHT * self.scale;

        let mut bg = Path::new();
        bg.rounded_rect(area.x, area.y, area.width, area.height, layout::KEY_RADIUS * self.scale);
        self.canvas.fill_path(&bg, &Paint::color(rgb(self.theme.text_area_bg)));

        let mut text_paint = Paint::color(rgb(self.theme.fg));
        text_paint.set_font(self.fonts);
        text_paint.set_font_size(rendering::TEXT_FONT_SIZE * self.scale);
        text_paint.set_text_baseline(Baseline::Middle);

        // Leave the bottom line for the status readout
        let text_height = (area.height - line_height).max(line_height);
        let visible = view.ui.text_area.visible_lines(line_height).min(
            (text_height / line_height).floor().max(1.0) as usize,
        );

        // Follow the end of the document, where every edit happens
        let buffer = view.keyboard.buffer();
        let total = buffer.len_lines();
        let first = total.saturating_sub(visible);
        let text_x = area.x + padding;

        let mut cursor = (text_x, area.y + padding + line_height / 2.0);
        for (row, index) in (first..total).enumerate() {
            let line = buffer.line(index);
            let y = snap_to_pixel(area.y + padding + line_height * (row as f32 + 0.5));
            let _ = self.canvas.fill_text(text_x, y, &line, &text_paint);
            if index + 1 == total {
                let width = self
                    .canvas
                    .measure_text(0.0, 0.0, &line, &text_paint)
                    .map(|metrics| metrics.width())
                    .unwrap_or(0.0);
                cursor = (text_x + width, y);
            }
        }

        if buffer.is_empty() {
            let mut placeholder = text_paint.clone();
            placeholder.set_color(rgb(self.theme.muted));
            let _ = self
                .canvas
                .fill_text(text_x + 4.0 * self.scale, cursor.1, "フリックで入力", &placeholder);
        }

        if view.cursor_visible {
            let half = rendering::TEXT_FONT_SIZE * self.scale * 0.6;
            let mut caret = Path::new();
            caret.move_to(snap_to_pixel(cursor.0) + 1.0, cursor.1 - half);
            caret.line_to(snap_to_pixel(cursor.0) + 1.0, cursor.1 + half);
            self.canvas.stroke_path(
                &caret,
                &Paint::color(rgb(self.theme.cursor)).with_line_width(2.0 * self.scale),
            );
        }

        self.draw_status(view, area.x + padding, area.y + area.height - line_height / 2.0);
    }

    fn draw_status(&mut self, view: &FrameView<'_>, x: f32, y: f32) {
        let mut paint = Paint::color(rgb(self.theme.muted));
        paint.set_font(self.fonts);
        paint.set_font_size(rendering::STATUS_FONT_SIZE * self.scale);
        paint.set_text_baseline(Baseline::Middle);

        let tilt = view.keyboard.tilt();
        let mut status = if view.tilt_simulated {
            format!("傾き {tilt:+.2} (Alt+←/→)")
        } else {
            "傾きセンサーなし".to_string()
        };
        if let Some(orientation) = view.keyboard.orientation() {
            status.push_str(&format!(
                "  α {:.0}° β {:.0}° γ {:.0}°",
                orientation.alpha, orientation.beta, orientation.gamma
            ));
        }
        let _ = self.canvas.fill_text(snap_to_pixel(x), snap_to_pixel(y), &status, &paint);
    }
}
