//! Winit runner implementing ApplicationHandler
//!
//! Drives the per-frame sequence: winit polls OS events between frames,
//! `RedrawRequested` runs one `FrameDriver` frame, and exit requests are
//! honored at frame boundaries.

use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Fullscreen, Window, WindowId};

use crate::config::AppConfig;
use crate::driver::FrameDriver;
use crate::traits::EmberApp;
use ember_core::{EmberError, Result};

/// Run an app under a winit event loop until it exits.
///
/// Returns the process exit code (0 for a window-close, the requested code
/// for `request_exit_with`). Window or event-loop creation failure is fatal
/// and returned as an error; callers map it to a non-zero process exit.
pub fn run<A: EmberApp>(config: AppConfig, app: A) -> Result<i32> {
    let event_loop =
        EventLoop::new().map_err(|e| EmberError::EventLoop(e.to_string()))?;
    // Poll: spin the loop without sleeping between frames
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut runner = Runner::new(config, app);
    event_loop
        .run_app(&mut runner)
        .map_err(|e| EmberError::EventLoop(e.to_string()))?;

    if let Some(err) = runner.init_error.take() {
        return Err(err);
    }
    Ok(runner.exit_code)
}

struct Runner<A: EmberApp> {
    app: A,
    config: AppConfig,
    driver: FrameDriver,
    window: Option<Arc<Window>>,
    started: bool,
    closed: bool,
    exit_code: i32,
    init_error: Option<EmberError>,
}

impl<A: EmberApp> Runner<A> {
    fn new(config: AppConfig, app: A) -> Self {
        let driver = FrameDriver::new(config.fixed_hz);
        Self {
            app,
            config,
            driver,
            window: None,
            started: false,
            closed: false,
            exit_code: 0,
            init_error: None,
        }
    }

    fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Honor a pending exit request at a frame boundary
    fn maybe_exit(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(code) = self.driver.exit_requested() {
            self.shutdown(event_loop, code);
        }
    }

    /// Transition to Closed: `on_close` exactly once, then stop the loop
    fn shutdown(&mut self, event_loop: &ActiveEventLoop, code: i32) {
        if !self.closed {
            self.closed = true;
            self.exit_code = code;
            let window = self.window.clone();
            let size = self.size();
            self.driver.close(&mut self.app, window.as_deref(), size);
            log::info!("loop closed (exit code {code})");
        }
        event_loop.exit();
    }
}

impl<A: EmberApp> ApplicationHandler for Runner<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
            .with_resizable(self.config.resizable)
            .with_decorations(self.config.decorated);

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                // Fatal: no window means no loop
                log::error!("window creation failed: {e}");
                self.init_error = Some(EmberError::WindowCreation(e.to_string()));
                event_loop.exit();
                return;
            }
        };

        if self.config.fullscreen {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        log::info!(
            "window created: {}x{} \"{}\"",
            self.config.width,
            self.config.height,
            self.config.title
        );
        self.window = Some(window);

        if !self.started {
            self.started = true;
            let window = self.window.clone();
            let size = self.size();
            self.driver.start(&mut self.app, window.as_deref(), size);
            self.maybe_exit(event_loop);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop, 0);
            }

            WindowEvent::Resized(new_size) => {
                self.config.width = new_size.width;
                self.config.height = new_size.height;
                let window = self.window.clone();
                self.driver.resize(
                    &mut self.app,
                    window.as_deref(),
                    (new_size.width, new_size.height),
                );
                self.maybe_exit(event_loop);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                // OS auto-repeat never produces fresh press edges
                if event.repeat {
                    return;
                }
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.driver.input.process_key_down(key),
                        ElementState::Released => self.driver.input.process_key_up(key),
                    }
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.driver.input.set_modifiers(modifiers.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.driver.input.process_mouse_move(position.x, position.y);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let Some(index) = mouse_button_index(button) else {
                    return;
                };
                match state {
                    ElementState::Pressed => self.driver.input.process_mouse_button_down(index),
                    ElementState::Released => self.driver.input.process_mouse_button_up(index),
                }
            }

            WindowEvent::RedrawRequested => {
                if self.closed {
                    return;
                }
                let window = self.window.clone();
                let size = self.size();
                self.driver.frame(&mut self.app, window.as_deref(), size);
                self.maybe_exit(event_loop);
            }

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.driver.input.process_mouse_raw_delta(delta.0, delta.1);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn mouse_button_index(button: MouseButton) -> Option<u32> {
    match button {
        MouseButton::Left => Some(0),
        MouseButton::Right => Some(1),
        MouseButton::Middle => Some(2),
        MouseButton::Back => Some(3),
        MouseButton::Forward => Some(4),
        MouseButton::Other(_) => None,
    }
}
