//! vidgrid: a video-textured plane under a pointer-reactive grid of squares.
//!
//! The scene has four layered elements rendered with wgpu:
//!
//! - a video plane that always covers the window
//! - a faint crosshatch line grid
//! - an instanced grid of squares that glow around the point where the
//!   pointer's ray meets the video plane
//! - a point cloud on the same lattice as the squares
//!
//! The whole scene tilts slightly with the pointer.
//!
//! # Quick Start
//!
//! ```no_run
//! use vidgrid::*;
//!
//! fn main() -> Result<()> {
//!     let mut options = Options::default();
//!     options.video.path = "assets/video".into();
//!     run(options)
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Sketch`] owns all per-run state and performs the per-frame tick.
//! - [`App`] is the winit handler: it feeds pointer, drag, wheel and resize
//!   events to the sketch and re-arms the frame loop after each render.
//! - [`render_to_image`] runs the same frame steps offscreen.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]

mod app;
mod headless;
mod sketch;

pub use app::{run, App};
pub use headless::{render_sketch, render_to_file, render_to_image, HEADLESS_FRAME_INTERVAL};
pub use sketch::Sketch;

// Re-export core types
pub use vidgrid_core::{
    CancellationToken, ElementKind, FrameClock, Layout, Lattice, Materials, Options, PickResult,
    PointerState, Result, SceneGraph, VidgridError, Viewport,
};
pub use vidgrid_core::{Mat4, Vec2, Vec3, Vec4};

// Re-export render types
pub use vidgrid_render::{Camera, FrameSequence, RenderEngine, VideoSource};

/// Loads options from a JSON file, or defaults when no path is given.
pub fn load_options(path: Option<&std::path::Path>) -> Result<Options> {
    let options = match path {
        Some(path) => Options::from_json_file(path)?,
        None => Options::default(),
    };
    options.validate()?;
    Ok(options)
}
