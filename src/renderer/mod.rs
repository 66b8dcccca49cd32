//! GPU-accelerated rendering with femtovg

mod debug_panel;
mod fonts;
mod keyboard;
mod text_area;

use crate::theme::Theme;
use crate::ui::UiTree;
use femtovg::{Canvas, Color, FontId, renderer::OpenGl};
use flick_keys::keyboard::KeyboardController;
use std::time::Instant;

use debug_panel::DebugPanelRenderer;
use keyboard::KeyboardRenderer;
use text_area::TextAreaRenderer;

/// Everything one frame needs to know
pub struct FrameView<'a> {
    pub keyboard: &'a KeyboardController,
    pub ui: &'a UiTree,
    pub now: Instant,
    pub cursor_visible: bool,
    pub show_debug: bool,
    pub tilt_simulated: bool,
}

/// Convert a theme triple into a femtovg color
pub(crate) fn rgb(color: (f32, f32, f32)) -> Color {
    Color::rgbf(color.0, color.1, color.2)
}

pub struct Renderer {
    canvas: Canvas<OpenGl>,
    fonts: Vec<FontId>,
    theme: Theme,
    width: f32,
    height: f32,
    scale: f32,
}

impl Renderer {
    pub fn new(renderer: OpenGl, width: f32, height: f32, scale: f32) -> Self {
        let mut canvas = Canvas::new(renderer).expect("Failed to create canvas");

        let fonts = fonts::load_fonts(&mut canvas);

        Self {
            canvas,
            fonts,
            theme: Theme::dark(),
            width,
            height,
            scale,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32, scale: f32) {
        self.width = width;
        self.height = height;
        self.scale = scale;
    }

    pub fn render(&mut self, view: &FrameView<'_>) {
        let (width, height) = (self.width, self.height);

        self.canvas.set_size(width as u32, height as u32, 1.0);
        self.canvas
            .clear_rect(0, 0, width as u32, height as u32, rgb(self.theme.bg));

        {
            let mut text_area =
                TextAreaRenderer::new(&mut self.canvas, &self.fonts, &self.theme, self.scale);
            text_area.draw(view);
        }

        {
            let mut keyboard =
                KeyboardRenderer::new(&mut self.canvas, &self.fonts, &self.theme, self.scale);
            keyboard.draw(view);
        }

        if view.show_debug {
            let mut panel =
                DebugPanelRenderer::new(&mut self.canvas, &self.fonts, &self.theme, self.scale);
            panel.draw(view);
        }

        self.canvas.flush();
    }
}
