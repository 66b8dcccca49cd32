//! Sensor debug overlay (toggle with F12 or Ctrl+D)

use crate::theme::Theme;
use femtovg::{Baseline, Canvas, FontId, Paint, Path, renderer::OpenGl};
use flick_keys::config::{layout, rendering};
use flick_keys::emphasis::KeySide;
use flick_keys::keyboard::SensorDiagnostics;

use super::{FrameView, rgb};

fn mark(flag: bool) -> &'static str {
    if flag { "✓" } else { "✗" }
}

/// Text lines of the panel, top to bottom
pub fn panel_lines(diagnostics: &SensorDiagnostics, simulated: bool) -> Vec<String> {
    let status = diagnostics.status;
    let mut lines = vec![
        if simulated {
            "センサーデバッグ情報 (シミュレーション)".to_string()
        } else {
            "センサーデバッグ情報".to_string()
        },
        format!(
            "サポート: {} | 権限: {}",
            mark(status.is_supported()),
            mark(status.is_permitted())
        ),
    ];

    match diagnostics.acceleration {
        Some(raw) => {
            let unit = raw.origin.unit();
            lines.push(format!("加速度 X: {:.3} {unit}", raw.x));
            lines.push(format!("加速度 Y: {:.3} {unit}", raw.y));
            lines.push(format!("加速度 Z: {:.3} {unit}", raw.z));
        }
        None => lines.push("加速度: 未受信".to_string()),
    }

    lines.push(format!(
        "正規化値: {:.3} (しきい値 ±{:.2})",
        diagnostics.tilt, diagnostics.threshold
    ));
    lines.push(format!("更新回数: {}", diagnostics.tilt_updates));
    lines.push(
        match diagnostics.emphasized_side {
            Some(KeySide::Left) => "強調: 左拡大中",
            Some(KeySide::Right) => "強調: 右拡大中",
            _ => "強調: なし",
        }
        .to_string(),
    );

    if let Some(orientation) = diagnostics.orientation {
        lines.push(format!(
            "α {:.1}° β {:.1}° γ {:.1}°",
            orientation.alpha, orientation.beta, orientation.gamma
        ));
    }

    lines
}

pub struct DebugPanelRenderer<'a> {
    canvas: &'a mut Canvas<OpenGl>,
    fonts: &'a [FontId],
    theme: &'a Theme,
    scale: f32,
}

impl<'a> DebugPanelRenderer<'a> {
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

    /// Draw in the top-right corner of the text area
    pub fn draw(&mut self, view: &FrameView<'_>) {
        let lines = panel_lines(&view.keyboard.diagnostics(), view.tilt_simulated);

        let mut paint = Paint::color(rgb(self.theme.fg));
        paint.set_font(self.fonts);
        paint.set_font_size(rendering::STATUS_FONT_SIZE * self.scale);
        paint.set_text_baseline(Baseline::Top);

        let width = lines
            .iter()
            .filter_map(|line| self.canvas.measure_text(0.0, 0.0, line, &paint).ok())
            .map(|metrics| metrics.width())
            .fold(0.0_f32, f32::max);

        let padding = layout::PADDING * self.scale * 0.5;
        let line_height = rendering::STATUS_FONT_SIZE * self.scale * 1.4;
        let area = view.ui.text_area.rect;
        let panel_width = width + padding * 2.0;
        let panel_height = line_height * lines.len() as f32 + padding * 2.0;
        let x = (area.x + area.width - panel_width - padding).max(area.x);
        let y = area.y + padding;

        let mut bg = Path::new();
        bg.rounded_rect(x, y, panel_width, panel_height, layout::KEY_RADIUS * self.scale);
        self.canvas.fill_path(&bg, &Paint::color(rgb(self.theme.debug_bg)));

        for (row, line) in lines.iter().enumerate() {
            if row == 0 {
                paint.set_color(rgb(self.theme.key_emphasis));
            } else if row == 1 {
                paint.set_color(rgb(self.theme.fg));
            }
            let line_y = y + padding + row as f32 * line_height;
            let _ = self
                .canvas
                .fill_text(x + padding, line_y.round(), line, &paint);
        }
    }
}
