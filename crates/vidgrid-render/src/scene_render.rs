//! GPU resources for the whole scene, built once from a [`SceneGraph`].

use image::RgbaImage;
use vidgrid_core::{ElementKind, Materials, SceneGraph};

use crate::engine::{ElementPipelines, RenderEngine};
use crate::error::RenderResult;
use crate::line_render::{LineRenderData, LineUniforms, LINE_COLOR};
use crate::plane_render::{PlaneRenderData, PlaneUniforms};
use crate::point_render::{PointRenderData, PointUniforms};
use crate::square_render::{SquareRenderData, SquareUniforms};
use crate::video::VideoTexture;

/// Render data for the four scene elements.
///
/// Geometry is uploaded once; only uniforms and video frames change later.
pub struct SceneRenderer {
    pub plane: PlaneRenderData,
    pub lines: LineRenderData,
    pub squares: SquareRenderData,
    pub points: PointRenderData,
}

impl SceneRenderer {
    /// Uploads the scene geometry and binds it to `video`.
    #[must_use]
    pub fn new(engine: &RenderEngine, scene: &SceneGraph, video: VideoTexture) -> Self {
        let device = &engine.device;
        let pipelines = &engine.pipelines;
        let camera_buffer = &engine.camera_buffer;

        let plane = PlaneRenderData::new(device, &pipelines.plane_layout, camera_buffer, video);
        let lines = LineRenderData::new(
            device,
            &pipelines.line_layout,
            camera_buffer,
            &scene.line_vertices(),
        );
        let squares = SquareRenderData::new(
            device,
            &pipelines.square_layout,
            camera_buffer,
            scene.lattice().spacing(),
            &scene.square_offsets(),
        );
        let points = PointRenderData::new(
            device,
            &pipelines.point_layout,
            camera_buffer,
            &scene.point_positions(),
        );

        log::info!(
            "scene uploaded: {} squares, {} points, {} line segments",
            squares.num_instances,
            points.num_points,
            lines.num_vertices / 2
        );

        Self {
            plane,
            lines,
            squares,
            points,
        }
    }

    /// Writes every element's uniforms from the current transforms and materials.
    pub fn update(&self, queue: &wgpu::Queue, scene: &SceneGraph, materials: &Materials) {
        self.plane.update_uniforms(
            queue,
            &PlaneUniforms::new(scene.model_matrix(ElementKind::VideoPlane), &materials.plane),
        );
        self.lines.update_uniforms(
            queue,
            &LineUniforms::new(scene.model_matrix(ElementKind::LineGrid), LINE_COLOR),
        );
        self.squares.update_uniforms(
            queue,
            &SquareUniforms::new(scene.model_matrix(ElementKind::SquareGrid), &materials.squares),
        );
        self.points.update_uniforms(
            queue,
            &PointUniforms::new(scene.model_matrix(ElementKind::PointCloud), &materials.points),
        );
    }

    /// Uploads a new video frame to the plane texture.
    pub fn upload_video_frame(&self, queue: &wgpu::Queue, frame: &RgbaImage) -> RenderResult<()> {
        self.plane.upload_frame(queue, frame)
    }

    /// Records all draws, back to front.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, pipelines: &ElementPipelines) {
        for kind in ElementKind::ALL {
            match kind {
                ElementKind::VideoPlane => {
                    pass.set_pipeline(&pipelines.plane);
                    self.plane.draw(pass);
                }
                ElementKind::LineGrid => {
                    pass.set_pipeline(&pipelines.lines);
                    self.lines.draw(pass);
                }
                ElementKind::SquareGrid => {
                    pass.set_pipeline(&pipelines.squares);
                    self.squares.draw(pass);
                }
                ElementKind::PointCloud => {
                    pass.set_pipeline(&pipelines.points);
                    self.points.draw(pass);
                }
            }
        }
    }
}
