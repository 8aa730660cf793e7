//! Headless rendering API for vidgrid.
//!
//! Renders a number of sketch frames into an offscreen target without
//! opening a window. Useful for integration tests and for exporting stills.

use std::path::Path;
use std::time::{Duration, Instant};

use image::RgbaImage;
use pollster::FutureExt;
use vidgrid_core::{Options, Result, VidgridError};
use vidgrid_render::{RenderEngine, SceneRenderer, VideoSource, VideoTexture};

use crate::sketch::Sketch;

/// Simulated wall-clock time between headless frames.
pub const HEADLESS_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

fn render_error(context: &str) -> impl Fn(vidgrid_render::RenderError) -> VidgridError + '_ {
    move |e| VidgridError::RenderError(format!("{context}: {e}"))
}

/// Renders `frames` ticks of an existing sketch and returns the last one.
///
/// `frames` must be at least 1. The output size is the sketch's viewport.
/// Video time advances by [`HEADLESS_FRAME_INTERVAL`] per tick, so the
/// result is deterministic.
pub fn render_sketch(
    sketch: &mut Sketch,
    video: &mut dyn VideoSource,
    frames: u32,
) -> Result<RgbaImage> {
    if frames == 0 {
        return Err(VidgridError::InvalidOption {
            name: "frames",
            reason: "at least one frame must be rendered".into(),
        });
    }

    let viewport = sketch.layout().viewport;
    let mut engine = RenderEngine::new_headless(viewport.width, viewport.height)
        .block_on()
        .map_err(render_error("failed to create headless engine"))?;
    engine.background_color = sketch.options().background_color;

    let (video_width, video_height) = video.dimensions();
    let video_texture = VideoTexture::new(&engine.device, video_width, video_height);
    let renderer = SceneRenderer::new(&engine, sketch.scene(), video_texture);

    let start = Instant::now();
    video.play(start);
    for n in 0..frames {
        if let Some(frame) = video.poll_frame(start + HEADLESS_FRAME_INTERVAL * n) {
            renderer
                .upload_video_frame(&engine.queue, frame)
                .map_err(render_error("failed to upload video frame"))?;
        }

        sketch.tick();
        engine.update_camera_uniforms(sketch.camera());
        renderer.update(&engine.queue, sketch.scene(), sketch.materials());
        engine
            .render(&renderer)
            .map_err(render_error("failed to render frame"))?;
    }

    let pixels = engine
        .capture_frame()
        .map_err(render_error("failed to capture frame"))?;
    vidgrid_render::to_image(pixels, viewport.width, viewport.height)
        .map_err(render_error("failed to wrap frame"))
}

/// Renders `frames` ticks of a fresh sketch at `width × height`.
///
/// The pointer stays at the centre of the viewport.
pub fn render_to_image(
    options: &Options,
    video: &mut dyn VideoSource,
    width: u32,
    height: u32,
    frames: u32,
) -> Result<RgbaImage> {
    let mut sketch = Sketch::new(options.clone(), width, height)?;
    sketch.pointer_moved(f64::from(width) / 2.0, f64::from(height) / 2.0);
    render_sketch(&mut sketch, video, frames)
}

/// Renders like [`render_to_image`] and saves the result as PNG or JPEG.
pub fn render_to_file(
    path: impl AsRef<Path>,
    options: &Options,
    video: &mut dyn VideoSource,
    width: u32,
    height: u32,
    frames: u32,
) -> Result<()> {
    let image = render_to_image(options, video, width, height, frames)?;
    vidgrid_render::save_image(path, &image).map_err(render_error("failed to save image"))
}
