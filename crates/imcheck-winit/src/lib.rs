//! # imcheck-winit
//!
//! Desktop backend: a winit window whose pixels come from [`SoftRenderer`]
//! and reach the screen through `softbuffer`.
//!
//! ```text
//! window event  ──► InputState (Context)
//! RedrawRequested ─► FrameHandler::frame ─► SoftRenderer ─► softbuffer present
//! ```
//!
//! The caller hands over the [`Context`] and its [`FrameHandler`]; both are
//! torn down inside the loop when the window closes, in this order:
//! handler shutdown, backend, context, handler, window.

use std::{num::NonZeroU32, rc::Rc};

use imcheck_core::{
    input::{Key, Modifiers, MouseButton},
    renderer::{FontAtlas, Renderer},
    Context, Vec2,
};
use imcheck_soft::{SoftError, SoftRenderer};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

pub use imcheck_soft as soft;

/// Pixels of `PixelDelta` scrolling that count as one wheel notch.
const PIXELS_PER_LINE: f64 = 20.0;

// ─── Error ───────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum WinitError {
    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation failed: {0}")]
    CreateWindow(#[from] winit::error::OsError),
    #[error("presentation surface: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),
    #[error(transparent)]
    Soft(#[from] SoftError),
}

// ─── Config ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title:   String,
    /// Inner size in physical pixels.
    pub size:    (u32, u32),
    pub visible: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { title: String::from("imcheck"), size: (1280, 720), visible: true }
    }
}

// ─── FrameHandler ────────────────────────────────────────────────────────────

/// Per-frame callback driven by the window loop.
pub trait FrameHandler {
    /// Build one frame. Window input for this frame is already in `ctx.input`.
    fn frame(&mut self, ctx: &mut Context, font: &dyn FontAtlas);

    /// Called once when the window is closing, before anything is released.
    fn shutdown(&mut self, _ctx: &mut Context) {}

    /// While `true`, pointer, keyboard and focus events from the window are
    /// dropped so something else can drive `ctx.input` undisturbed.
    fn capture_input(&self) -> bool { false }
}

// ─── Event loop ──────────────────────────────────────────────────────────────

/// Open the window and drive `handler` until the window is closed.
///
/// Errors raised while creating the window or presenting are returned after
/// the loop has exited.
pub fn run<H: FrameHandler>(config: WindowConfig, ctx: Context, handler: H) -> Result<(), WinitError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = WinitApp::new(config, ctx, handler);
    event_loop.run_app(&mut app)?;
    app.teardown();

    match app.error.take() {
        Some(e) => Err(e),
        None    => Ok(()),
    }
}

type WindowSurface = softbuffer::Surface<Rc<Window>, Rc<Window>>;

struct WinitApp<H> {
    config:   WindowConfig,
    ctx:      Option<Context>,
    handler:  Option<H>,
    renderer: Option<SoftRenderer>,
    surface:  Option<WindowSurface>,
    window:   Option<Rc<Window>>,
    error:    Option<WinitError>,
}

impl<H: FrameHandler> WinitApp<H> {
    fn new(config: WindowConfig, ctx: Context, handler: H) -> Self {
        Self {
            config,
            ctx: Some(ctx),
            handler: Some(handler),
            renderer: None,
            surface: None,
            window: None,
            error: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), WinitError> {
        let (w, h) = self.config.size;
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(w, h))
            .with_visible(self.config.visible);
        let window = Rc::new(event_loop.create_window(attrs)?);

        let context = softbuffer::Context::new(window.clone())?;
        let surface = softbuffer::Surface::new(&context, window.clone())?;

        let size = window.inner_size();
        let renderer = SoftRenderer::new(size.width.max(1), size.height.max(1))?;
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.set_display_size(renderer.display_size());
        }
        log::info!("imcheck-winit: window '{}' {}x{}", self.config.title, size.width, size.height);

        self.renderer = Some(renderer);
        self.surface  = Some(surface);
        self.window   = Some(window);
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) -> Result<(), WinitError> {
        // Minimised windows report zero; keep the last framebuffer.
        if size.width == 0 || size.height == 0 { return Ok(()); }
        if let Some(r) = self.renderer.as_mut() { r.resize(size.width, size.height)?; }
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.set_display_size(Vec2::new(size.width as f32, size.height as f32));
        }
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), WinitError> {
        let (Some(ctx), Some(handler), Some(renderer)) =
            (self.ctx.as_mut(), self.handler.as_mut(), self.renderer.as_mut())
        else {
            return Ok(());
        };

        handler.frame(ctx, renderer.font());
        renderer.begin_frame();
        renderer.render(ctx.render_frame());
        renderer.end_frame();

        let Some(surface) = self.surface.as_mut() else { return Ok(()) };
        let (Some(w), Some(h)) = (NonZeroU32::new(renderer.width()), NonZeroU32::new(renderer.height())) else {
            return Ok(());
        };
        surface.resize(w, h)?;
        let mut buffer = surface.buffer_mut()?;
        renderer.copy_to_xrgb(&mut buffer);
        buffer.present()?;
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: WinitError) {
        log::error!("imcheck-winit: {err}");
        self.error.get_or_insert(err);
        event_loop.exit();
    }

    /// Release everything in shutdown order. Safe to call more than once.
    fn teardown(&mut self) {
        if let (Some(handler), Some(ctx)) = (self.handler.as_mut(), self.ctx.as_mut()) {
            handler.shutdown(ctx);
        }
        self.surface  = None;
        self.renderer = None;
        self.ctx      = None;
        self.handler  = None;
        if self.window.take().is_some() {
            log::debug!("imcheck-winit: window released");
        }
    }

    fn input_event(&mut self, event: &WindowEvent) {
        if self.handler.as_ref().is_some_and(|h| h.capture_input()) {
            log::trace!("imcheck-winit: input captured, dropping {event:?}");
            return;
        }
        let Some(ctx) = self.ctx.as_mut() else { return };
        let input = ctx.input_mut();
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                input.set_mouse_pos(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(btn) = map_mouse_button(*button) {
                    input.set_mouse_button(btn, *state == ElementState::Pressed);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p)   => (p.y / PIXELS_PER_LINE) as f32,
                };
                input.add_mouse_wheel(lines);
            }
            WindowEvent::ModifiersChanged(mods) => {
                let state = mods.state();
                let mut m = Modifiers::empty();
                m.set(Modifiers::CTRL,  state.control_key());
                m.set(Modifiers::SHIFT, state.shift_key());
                m.set(Modifiers::ALT,   state.alt_key());
                m.set(Modifiers::SUPER, state.super_key());
                input.set_modifiers(m);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let down = event.state == ElementState::Pressed;
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(key) = map_key(code) { input.set_key(key, down); }
                }
                // Ctrl chords are shortcuts, not text.
                if down && !input.ctrl() {
                    if let Some(text) = event.text.as_deref() {
                        input.add_text_str(text);
                    }
                }
            }
            WindowEvent::Focused(false) => input.release_all(),
            _ => {}
        }
    }
}

impl<H: FrameHandler> ApplicationHandler for WinitApp<H> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() { return; }
        if let Err(e) = self.create_window(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("imcheck-winit: close requested");
                self.teardown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Err(e) = self.resize(size) { self.fail(event_loop, e); }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() { self.fail(event_loop, e); }
            }
            other => self.input_event(&other),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

// ─── Input mapping ───────────────────────────────────────────────────────────

pub fn map_mouse_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left   => Some(MouseButton::Left),
        winit::event::MouseButton::Right  => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Translate a physical key to the engine's key set.
pub fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::Backspace                        => Key::Backspace,
        KeyCode::Delete                           => Key::Delete,
        KeyCode::Enter | KeyCode::NumpadEnter     => Key::Enter,
        KeyCode::Tab                              => Key::Tab,
        KeyCode::Escape                           => Key::Escape,
        KeyCode::Space                            => Key::Space,
        KeyCode::ArrowLeft                        => Key::Left,
        KeyCode::ArrowRight                       => Key::Right,
        KeyCode::ArrowUp                          => Key::Up,
        KeyCode::ArrowDown                        => Key::Down,
        KeyCode::Home                             => Key::Home,
        KeyCode::End                              => Key::End,
        KeyCode::KeyA                             => Key::A,
        KeyCode::KeyC                             => Key::C,
        KeyCode::KeyV                             => Key::V,
        KeyCode::KeyX                             => Key::X,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_keys_map_and_letters_outside_the_set_do_not() {
        assert_eq!(map_key(KeyCode::NumpadEnter), Some(Key::Enter));
        assert_eq!(map_key(KeyCode::KeyA), Some(Key::A));
        assert_eq!(map_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn only_the_three_main_buttons_are_tracked() {
        assert_eq!(map_mouse_button(winit::event::MouseButton::Middle), Some(MouseButton::Middle));
        assert_eq!(map_mouse_button(winit::event::MouseButton::Back), None);
    }

    #[test]
    fn default_window_is_visible_720p() {
        let c = WindowConfig::default();
        assert_eq!(c.size, (1280, 720));
        assert!(c.visible);
    }
}
