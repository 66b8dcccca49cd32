//! Application state and coordination

mod keybindings;
mod pointer;
mod simulator;
mod state;

use std::time::{Duration, Instant};

use flick_keys::config::timing;
use flick_keys::keyboard::KeyboardController;
use flick_keys::settings::KeyboardSettings;
use flick_keys::source::{ChannelSource, SourceError};
use flick_keys::tilt::MotionSample;

use crate::renderer::{FrameView, Renderer};
use crate::ui::UiTree;

pub use keybindings::{Action, Key, KeyEvent, Modifiers, resolve};
pub use simulator::Lean;
pub use state::AppResult;
use simulator::TiltSimulator;
use state::UiState;

pub struct App {
    renderer: Renderer,
    keyboard: KeyboardController,
    motion: ChannelSource<MotionSample>,
    hardware: ChannelSource<String>,
    simulator: Option<TiltSimulator>,
    width: f32,
    height: f32,
    scale: f32,
    state: UiState,
}

impl App {
    pub fn new(
        gl_renderer: femtovg::renderer::OpenGl,
        width: f32,
        height: f32,
        scale: f32,
        settings: &KeyboardSettings,
    ) -> Self {
        let renderer = Renderer::new(gl_renderer, width, height, scale);
        let now = Instant::now();
        let mut keyboard = KeyboardController::new(settings, now);

        let (mut motion, simulator) = if settings.simulate_tilt {
            log::info!("tilt simulator enabled (Alt+Left / Alt+Right)");
            (
                ChannelSource::new(),
                Some(TiltSimulator::new(
                    settings.simulated_origin,
                    settings.sample_interval(),
                )),
            )
        } else {
            (ChannelSource::unavailable(SourceError::Unsupported), None)
        };
        let mut hardware = ChannelSource::new();
        keyboard.mount(&mut motion, &mut hardware);

        let mut state = UiState::new();
        state.show_debug = settings.show_debug;

        Self {
            renderer,
            keyboard,
            motion,
            hardware,
            simulator,
            width,
            height,
            scale,
            state,
        }
    }

    // =========================================================================
    // Core lifecycle
    // =========================================================================

    pub fn tick(&mut self) -> AppResult {
        let now = Instant::now();
        let mut needs_redraw = false;

        if self.state.last_cursor_blink.elapsed() >= Duration::from_millis(timing::CURSOR_BLINK_MS)
        {
            self.state.cursor_visible = !self.state.cursor_visible;
            self.state.last_cursor_blink = now;
            needs_redraw = true;
        }

        if let Some(simulator) = &mut self.simulator {
            simulator.tick(now, &mut self.motion);
        }
        if self.keyboard.pump(now) {
            needs_redraw = true;
        }
        // Keep redrawing while any key is growing or shrinking
        if self.keyboard.tick(now) {
            needs_redraw = true;
        }

        AppResult::from_changed(needs_redraw)
    }

    /// Message to show once when tilt assistance is unavailable
    pub fn take_notice(&mut self) -> Option<String> {
        self.keyboard.take_notice()
    }

    pub fn resize(&mut self, width: f32, height: f32, scale: f32) {
        self.width = width;
        self.height = height;
        self.scale = scale;
        self.renderer.resize(width, height, scale);
    }

    pub fn render(&mut self) {
        let ui = self.ui_tree();
        let view = FrameView {
            keyboard: &self.keyboard,
            ui: &ui,
            now: Instant::now(),
            cursor_visible: self.state.cursor_visible,
            show_debug: self.state.show_debug,
            tilt_simulated: self.simulator.is_some(),
        };
        self.renderer.render(&view);
    }

    /// Deregister from every input source
    pub fn shutdown(&mut self) {
        self.keyboard
            .unmount(&mut self.motion, &mut self.hardware, Instant::now());
    }

    pub(crate) fn ui_tree(&self) -> UiTree {
        UiTree::new(self.width, self.height, self.scale)
    }

    // =========================================================================
    // Keyboard passthrough
    // =========================================================================

    /// Forward a hardware key identifier ("a", "Enter", "Shift", ...)
    pub fn handle_hardware_key(&mut self, key: &str) -> AppResult {
        self.hardware.emit(key.to_string());
        let changed = self.keyboard.pump(Instant::now());
        if changed {
            self.state.reset_cursor_blink();
        }
        AppResult::from_changed(changed)
    }

    /// Run a resolved shortcut. `Quit` is left to the event loop.
    pub fn apply_action(&mut self, action: Action) -> AppResult {
        match action {
            Action::Quit => AppResult::Ok,
            Action::ToggleDebug => self.toggle_debug(),
            Action::Lean(lean) => self.simulate_lean(Some(lean)),
        }
    }

    pub fn toggle_debug(&mut self) -> AppResult {
        self.state.show_debug = !self.state.show_debug;
        let shown = if self.state.show_debug { "shown" } else { "hidden" };
        log::debug!("debug panel {shown}");
        AppResult::Redraw
    }

    /// Hold or release the simulated lean; ignored when no simulator runs
    pub fn simulate_lean(&mut self, lean: Option<Lean>) -> AppResult {
        let Some(simulator) = &mut self.simulator else {
            return AppResult::Ok;
        };
        if simulator.lean() == lean {
            return AppResult::Ok;
        }
        simulator.set_lean(lean);
        let now = Instant::now();
        simulator.tick(now, &mut self.motion);
        AppResult::from_changed(self.keyboard.pump(now))
    }
}
