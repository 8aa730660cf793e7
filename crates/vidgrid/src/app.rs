//! Windowed application: the winit event loop driving the sketch.

use std::sync::Arc;
use std::time::Instant;

use pollster::FutureExt;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use vidgrid_core::{Options, Result, VidgridError};
use vidgrid_render::{FrameSequence, RenderEngine, SceneRenderer, VideoSource, VideoTexture};

use crate::sketch::Sketch;

/// Everything that exists once the window is up.
struct Running {
    window: Arc<Window>,
    engine: RenderEngine,
    renderer: SceneRenderer,
    video: Box<dyn VideoSource>,
    sketch: Sketch,
}

impl Running {
    fn start(event_loop: &ActiveEventLoop, options: &Options) -> Result<Self> {
        let window_attributes = Window::default_attributes()
            .with_title(options.window.title.clone())
            .with_inner_size(LogicalSize::new(options.window.width, options.window.height));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .map_err(|e| VidgridError::WindowError(format!("failed to create window: {e}")))?,
        );

        let mut engine = RenderEngine::new_windowed(window.clone())
            .block_on()
            .map_err(|e| VidgridError::RenderError(format!("failed to create render engine: {e}")))?;
        engine.background_color = options.background_color;

        let video = FrameSequence::open(&options.video.path, options.video.fps, options.video.looping)
            .map_err(|e| VidgridError::RenderError(e.to_string()))?;
        let (video_width, video_height) = video.dimensions();
        let video_texture = VideoTexture::new(&engine.device, video_width, video_height);

        let (width, height) = engine.dimensions();
        let sketch = Sketch::new(options.clone(), width, height)?;
        let renderer = SceneRenderer::new(&engine, sketch.scene(), video_texture);

        let mut running = Self {
            window,
            engine,
            renderer,
            video: Box::new(video),
            sketch,
        };
        running.video.play(Instant::now());
        running.window.request_redraw();
        Ok(running)
    }

    /// Steps 1-6 of a frame: video upload, tick, uniforms, render.
    fn frame(&mut self) -> Result<()> {
        if let Some(frame) = self.video.poll_frame(Instant::now()) {
            self.renderer
                .upload_video_frame(&self.engine.queue, frame)
                .map_err(|e| VidgridError::RenderError(e.to_string()))?;
        }

        self.sketch.tick();

        self.engine.update_camera_uniforms(self.sketch.camera());
        self.renderer
            .update(&self.engine.queue, self.sketch.scene(), self.sketch.materials());
        self.engine
            .render(&self.renderer)
            .map_err(|e| VidgridError::RenderError(e.to_string()))
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.engine.resize(width, height);
        if let Err(e) = self.sketch.resize(width, height) {
            log::debug!("ignoring resize: {e}");
        }
    }
}

/// The winit application handler.
pub struct App {
    options: Options,
    running: Option<Running>,
    error: Option<VidgridError>,
    left_mouse_down: bool,
    mouse_pos: Option<(f64, f64)>,
}

impl App {
    /// Creates an app that opens its window on the first `resumed`.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            running: None,
            error: None,
            left_mouse_down: false,
            mouse_pos: None,
        }
    }

    /// Takes the fatal error that stopped the loop, if any.
    pub fn take_error(&mut self) -> Option<VidgridError> {
        self.error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: VidgridError) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn cancel(&self) {
        if let Some(running) = &self.running {
            running.sketch.cancellation_token().cancel();
        }
    }

    fn is_cancelled(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|r| r.sketch.cancellation_token().is_cancelled())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }

        match Running::start(event_loop, &self.options) {
            Ok(running) => {
                log::info!("sketch started");
                self.running = Some(running);
            }
            Err(e) => self.fail(event_loop, e),
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
                self.cancel();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.cancel();
            }
            WindowEvent::Resized(size) => {
                if let Some(running) = &mut self.running {
                    running.resize(size.width, size.height);
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.left_mouse_down = state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                let last = self.mouse_pos.replace((position.x, position.y));
                if let Some(running) = &mut self.running {
                    // Left drag orbits the camera
                    if let Some((x, y)) = last.filter(|_| self.left_mouse_down) {
                        running.sketch.orbit_camera(position.x - x, position.y - y);
                    }
                    running.sketch.pointer_moved(position.x, position.y);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_pos = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(running) = &mut self.running {
                    running.sketch.zoom_camera(scroll);
                }
            }
            WindowEvent::RedrawRequested => {
                if self.is_cancelled() {
                    event_loop.exit();
                    return;
                }
                let Some(running) = &mut self.running else {
                    return;
                };
                match running.frame() {
                    // Re-arm the loop
                    Ok(()) => running.window.request_redraw(),
                    Err(e) => self.fail(event_loop, e),
                }
            }
            _ => {}
        }

        if self.is_cancelled() {
            log::info!("shutting down");
            event_loop.exit();
        }
    }
}

/// Opens the window and runs the frame loop until shutdown.
///
/// Returns the fatal error that ended the loop, if any.
pub fn run(options: Options) -> Result<()> {
    options.validate()?;

    let event_loop = EventLoop::new()
        .map_err(|e| VidgridError::WindowError(format!("failed to create event loop: {e}")))?;
    let mut app = App::new(options);

    event_loop
        .run_app(&mut app)
        .map_err(|e| VidgridError::WindowError(format!("event loop error: {e}")))?;

    app.take_error().map_or(Ok(()), Err)
}
