//! Standalone visualization window backed by winit.
//!
//! ```no_run
//! # use pulsing_spheres::Viewer;
//! Viewer::builder()
//!     .with_title("Pulsing Spheres")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use glam::Vec2;
use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    error::EventLoopError,
    event::{ElementState, MouseScrollDelta, StartCause, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    engine::SceneEngine, error::SceneError, options::Options, InputEvent,
    MouseButton,
};

/// Fraction of the monitor the window initially covers.
const INITIAL_WINDOW_FRACTION: f64 = 0.75;
/// Scroll lines per pixel of trackpad scroll.
const PIXELS_PER_LINE: f32 = 0.01;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: "Pulsing Spheres".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window showing the pulsating spheres.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::OptionsParse`] for invalid options before any
    /// window opens, the error that stopped the window or renderer from
    /// starting, or [`SceneError::Viewer`] if the event loop cannot be
    /// created or exits abnormally.
    pub fn run(self) -> Result<(), SceneError> {
        self.options.validate()?;

        let event_loop =
            EventLoop::new().map_err(|e| SceneError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp::new(self.options, self.title);
        let result = event_loop.run_app(&mut app);
        app.finish(result)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<SceneEngine>,
    last_frame_time: Instant,
    /// Handed to the engine once the window exists.
    options: Option<Options>,
    title: String,
    /// Why `resumed` gave up, reported once the loop returns.
    startup_error: Option<SceneError>,
}

fn viewport_size(inner: PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

/// Titled window covering a fixed fraction of the primary monitor, or the
/// platform default size when no monitor is reported.
fn initial_window_attributes(
    event_loop: &ActiveEventLoop,
    title: &str,
) -> WindowAttributes {
    let attrs = Window::default_attributes().with_title(title);
    let Some(monitor) = event_loop
        .primary_monitor()
        .or_else(|| event_loop.available_monitors().next())
    else {
        return attrs;
    };
    let logical: LogicalSize<f64> =
        monitor.size().to_logical(monitor.scale_factor());
    attrs.with_inner_size(LogicalSize::new(
        logical.width * INITIAL_WINDOW_FRACTION,
        logical.height * INITIAL_WINDOW_FRACTION,
    ))
}

impl ViewerApp {
    fn new(options: Options, title: String) -> Self {
        Self {
            window: None,
            engine: None,
            last_frame_time: Instant::now(),
            options: Some(options),
            title,
            startup_error: None,
        }
    }

    /// Stop the loop and keep `error` for [`finish`](Self::finish).
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: SceneError) {
        self.startup_error = Some(error);
        event_loop.exit();
    }

    fn finish(
        self,
        result: Result<(), EventLoopError>,
    ) -> Result<(), SceneError> {
        result.map_err(|e| SceneError::Viewer(e.to_string()))?;
        match self.startup_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        if !engine.should_render() {
            // Woken again by `new_events` once the deadline passes.
            if let Some(at) = engine.next_frame_at() {
                event_loop.set_control_flow(ControlFlow::WaitUntil(at));
            }
            return;
        }

        let now = Instant::now();
        let dt = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        engine.update(dt);
        match engine.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                engine.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory, exiting");
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("render error: {e:?}"),
        }

        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = initial_window_attributes(event_loop, &self.title);
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                let error =
                    SceneError::Viewer(format!("could not open window: {e}"));
                self.fail(event_loop, error);
                return;
            }
        };

        let options = self.options.take().unwrap_or_default();
        let size = viewport_size(window.inner_size());
        match pollster::block_on(SceneEngine::new(window.clone(), size, options))
        {
            Ok(engine) => self.engine = Some(engine),
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        }

        window.request_redraw();
        self.last_frame_time = Instant::now();
        self.window = Some(window);
    }

    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if matches!(cause, StartCause::ResumeTimeReached { .. }) {
            event_loop.set_control_flow(ControlFlow::Wait);
            if let Some(w) = &self.window {
                w.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }
        if matches!(event, WindowEvent::RedrawRequested) {
            self.redraw(event_loop);
            return;
        }
        let Some(engine) = &mut self.engine else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => {
                let (w, h) = viewport_size(size);
                engine.resize(w, h);
            }
            WindowEvent::MouseInput { button, state, .. } => {
                engine.handle_input(InputEvent::Button {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }
            WindowEvent::CursorMoved { position, .. } => {
                engine.handle_input(InputEvent::PointerMoved {
                    position: Vec2::new(position.x as f32, position.y as f32),
                });
            }
            WindowEvent::CursorLeft { .. } => {
                engine.handle_input(InputEvent::PointerLeft);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => {
                        pos.y as f32 * PIXELS_PER_LINE
                    }
                };
                engine.handle_input(InputEvent::Wheel { lines });
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key = format!("{code:?}");
                if !engine.handle_key(&key) {
                    log::trace!("unbound key {key}");
                }
            }
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_options_fail_before_the_window_opens() {
        let mut options = Options::default();
        options.pulse.speeds[1] = 0.0;
        let result = Viewer::builder().with_options(options).build().run();
        assert!(matches!(result, Err(SceneError::OptionsParse(_))));
    }

    #[test]
    fn startup_failure_is_returned_from_run() {
        let app = ViewerApp::new(Options::default(), "test".into());
        assert!(app.finish(Ok(())).is_ok());

        let mut app = ViewerApp::new(Options::default(), "test".into());
        app.startup_error = Some(SceneError::Viewer("no display".into()));
        assert!(matches!(app.finish(Ok(())), Err(SceneError::Viewer(_))));
    }
}
