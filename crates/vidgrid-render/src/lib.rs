//! Rendering backend for vidgrid.
//!
//! This crate provides the wgpu-based rendering engine, including:
//! - the windowed and headless [`RenderEngine`]
//! - per-element GPU resources and WGSL shaders
//! - the perspective [`Camera`] and pointer rays
//! - video frame sources and the texture they stream into
//! - frame capture to images

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Element counts and pixel sizes fit in u32
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

pub mod buffer;
pub mod camera;
pub mod engine;
pub mod error;
pub mod line_render;
pub mod plane_render;
pub mod point_render;
pub mod scene_render;
pub mod screenshot;
pub mod shader;
pub mod square_render;
pub mod video;

pub use camera::Camera;
pub use engine::{CameraUniforms, ElementPipelines, RenderEngine};
pub use error::{RenderError, RenderResult};
pub use line_render::{LineRenderData, LineUniforms};
pub use plane_render::{PlaneRenderData, PlaneUniforms};
pub use point_render::{PointRenderData, PointUniforms};
pub use scene_render::SceneRenderer;
pub use screenshot::{save_image, to_image};
pub use shader::ShaderBuilder;
pub use square_render::{SquareRenderData, SquareUniforms};
pub use video::{FrameSequence, VideoSource, VideoTexture};
