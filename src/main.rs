//! Flick Keys - a tilt-assisted flick keyboard for kana input
//!
//! Drag from a key to pick one of its five glyphs. Leaning the device
//! toward one edge temporarily enlarges the keys on that edge.

mod app;
mod renderer;
mod theme;
mod ui;

use app::{Action, App, KeyEvent, Modifiers};
use env_logger::{Builder, Env};
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use native_dialog::{MessageDialog, MessageType};
use raw_window_handle::HasWindowHandle;
use std::ffi::CString;
use std::num::NonZeroU32;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, ModifiersState, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId};

fn main() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let settings = flick_keys::settings::load_settings();

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut handler = AppHandler::new(settings);
    event_loop.run_app(&mut handler).expect("Event loop failed");
}

struct AppHandler {
    settings: flick_keys::settings::KeyboardSettings,
    state: Option<AppState>,
    modifiers: ModifiersState,
    mouse_position: (f64, f64),
    /// Touch currently driving the pointer; later fingers are ignored
    active_touch: Option<u64>,
}

struct AppState {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    app: App,
}

impl AppHandler {
    fn new(settings: flick_keys::settings::KeyboardSettings) -> Self {
        Self {
            settings,
            state: None,
            modifiers: ModifiersState::default(),
            mouse_position: (0.0, 0.0),
            active_touch: None,
        }
    }
}

/// Identifier string the keyboard controller understands for a winit key
fn hardware_key_name(key: &Key) -> Option<String> {
    match key {
        Key::Named(NamedKey::Backspace) => Some("Backspace".to_string()),
        Key::Named(NamedKey::Enter) => Some("Enter".to_string()),
        Key::Named(NamedKey::Space) => Some(" ".to_string()),
        // Multi-character names fall through the controller untouched
        Key::Named(named) => Some(format!("{named:?}")),
        Key::Character(c) => Some(c.to_string()),
        _ => None,
    }
}

/// Shortcut view of a winit key
fn binding_key(key: &Key) -> app::Key {
    match key {
        Key::Named(NamedKey::Escape) => app::Key::Escape,
        Key::Named(NamedKey::ArrowLeft) => app::Key::ArrowLeft,
        Key::Named(NamedKey::ArrowRight) => app::Key::ArrowRight,
        Key::Named(NamedKey::F12) => app::Key::F12,
        Key::Character(c) => c.chars().next().map_or(app::Key::Other, app::Key::Char),
        _ => app::Key::Other,
    }
}

fn show_notice(notice: &str) {
    let shown = MessageDialog::new()
        .set_type(MessageType::Info)
        .set_title("Flick Keys")
        .set_text(notice)
        .show_alert();
    if let Err(e) = shown {
        log::warn!("could not show notice dialog: {e}");
    }
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        // Portrait, like the phone the layout was drawn for
        let window_attrs = WindowAttributes::default()
            .with_title("Flick Keys")
            .with_inner_size(LogicalSize::new(420.0, 720.0));

        // OpenGL config with 4x MSAA for smooth text and edges
        let config_template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_multisampling(4);

        let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attrs));

        let (window, gl_config) = display_builder
            .build(event_loop, config_template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .expect("No GL configs found")
            })
            .expect("Failed to create window");

        let window = window.expect("Window not created");
        let gl_display = gl_config.display();

        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(None))
            .build(Some(
                window
                    .window_handle()
                    .expect("Failed to get window handle")
                    .as_raw(),
            ));

        let gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attrs)
                .expect("Failed to create GL context")
        };

        let size = window.inner_size();
        let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            window
                .window_handle()
                .expect("Failed to get window handle")
                .as_raw(),
            NonZeroU32::new(size.width.max(1)).expect("width is at least 1"),
            NonZeroU32::new(size.height.max(1)).expect("height is at least 1"),
        );

        let gl_surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &surface_attrs)
                .expect("Failed to create surface")
        };

        let gl_context = gl_context
            .make_current(&gl_surface)
            .expect("Failed to make context current");

        let renderer = unsafe {
            femtovg::renderer::OpenGl::new_from_function_cstr(|name| {
                let cstr = CString::new(name.to_bytes()).expect("GL symbol names have no NUL");
                gl_display.get_proc_address(&cstr) as *const _
            })
            .expect("Failed to create renderer")
        };

        let scale = window.scale_factor() as f32;
        let mut app = App::new(
            renderer,
            size.width as f32,
            size.height as f32,
            scale,
            &self.settings,
        );

        if let Some(notice) = app.take_notice() {
            log::info!("{notice}");
            show_notice(&notice);
        }

        self.state = Some(AppState {
            window,
            gl_context,
            gl_surface,
            app,
        });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(s) => s,
            None => return,
        };

        let result = match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }

            WindowEvent::Resized(size) => {
                if let (Some(width), Some(height)) =
                    (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                {
                    state.gl_surface.resize(&state.gl_context, width, height);
                    let scale = state.window.scale_factor() as f32;
                    state
                        .app
                        .resize(size.width as f32, size.height as f32, scale);
                    state.window.request_redraw();
                }
                return;
            }

            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
                if !self.modifiers.alt_key() {
                    state.app.simulate_lean(None)
                } else {
                    return;
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let pressed = event.state == ElementState::Pressed;
                let modifiers = Modifiers {
                    ctrl: self.modifiers.control_key(),
                    alt: self.modifiers.alt_key(),
                };
                let shortcut = KeyEvent::new(binding_key(&event.logical_key), modifiers);

                match app::resolve(&shortcut) {
                    Some(Action::Quit) if pressed => {
                        event_loop.exit();
                        return;
                    }
                    // Leans are held: release drops back to level
                    Some(Action::Lean(lean)) => state.app.simulate_lean(pressed.then_some(lean)),
                    Some(action) if pressed => state.app.apply_action(action),
                    Some(_) => app::AppResult::Ok,
                    None if pressed && !modifiers.is_chord() => {
                        match hardware_key_name(&event.logical_key) {
                            Some(name) => state.app.handle_hardware_key(&name),
                            None => app::AppResult::Ok,
                        }
                    }
                    None => app::AppResult::Ok,
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = (position.x, position.y);
                state
                    .app
                    .pointer_move(position.x as f32, position.y as f32)
            }

            WindowEvent::CursorLeft { .. } => state.app.pointer_cancel(),

            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.mouse_position;
                match button_state {
                    ElementState::Pressed => state.app.pointer_down(x as f32, y as f32),
                    ElementState::Released => state.app.pointer_up(),
                }
            }

            WindowEvent::Touch(touch) => {
                let (x, y) = (touch.location.x as f32, touch.location.y as f32);
                match touch.phase {
                    TouchPhase::Started if self.active_touch.is_none() => {
                        self.active_touch = Some(touch.id);
                        state.app.pointer_down(x, y)
                    }
                    TouchPhase::Moved if self.active_touch == Some(touch.id) => {
                        state.app.pointer_move(x, y)
                    }
                    TouchPhase::Ended if self.active_touch == Some(touch.id) => {
                        self.active_touch = None;
                        let _ = state.app.pointer_move(x, y);
                        state.app.pointer_up()
                    }
                    TouchPhase::Cancelled if self.active_touch == Some(touch.id) => {
                        self.active_touch = None;
                        state.app.pointer_cancel()
                    }
                    _ => app::AppResult::Ok,
                }
            }

            WindowEvent::RedrawRequested => {
                state.app.render();
                if let Err(e) = state.gl_surface.swap_buffers(&state.gl_context) {
                    log::error!("failed to swap buffers: {e}");
                }
                return;
            }

            _ => return,
        };

        if result.needs_redraw() {
            state.window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            if state.app.tick().needs_redraw() {
                state.window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::Poll);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            state.app.shutdown();
        }
    }
}
