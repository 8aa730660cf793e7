//! Video plane GPU rendering resources.

use glam::Mat4;
use image::RgbaImage;
use vidgrid_core::scene::QUAD_INDICES;
use vidgrid_core::PlaneMaterial;

use crate::buffer::{
    create_index_buffer, create_uniform_buffer, create_vertex_buffer, quad_vertices, update_uniform,
};
use crate::error::RenderResult;
use crate::video::VideoTexture;

/// Uniforms for the video plane.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[allow(clippy::pub_underscore_fields)]
pub struct PlaneUniforms {
    pub model_matrix: [[f32; 4]; 4],
    pub resolution: [f32; 4],
    pub time: f32,
    pub _padding: [f32; 3],
}

impl PlaneUniforms {
    /// Packs the plane transform and material.
    #[must_use]
    pub fn new(model: Mat4, material: &PlaneMaterial) -> Self {
        Self {
            model_matrix: model.to_cols_array_2d(),
            resolution: material.resolution.to_array(),
            time: material.time,
            _padding: [0.0; 3],
        }
    }
}

impl Default for PlaneUniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, &PlaneMaterial::default())
    }
}

/// GPU resources for the video plane.
pub struct PlaneRenderData {
    /// Unit quad vertices.
    pub vertex_buffer: wgpu::Buffer,
    /// Quad indices.
    pub index_buffer: wgpu::Buffer,
    /// Plane uniforms.
    pub uniform_buffer: wgpu::Buffer,
    /// Bind group: camera, uniforms, video texture, sampler.
    pub bind_group: wgpu::BindGroup,
    /// Texture receiving video frames.
    pub video: VideoTexture,
}

impl PlaneRenderData {
    /// Creates the plane resources around an existing video texture.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        video: VideoTexture,
    ) -> Self {
        let vertex_buffer = create_vertex_buffer(device, &quad_vertices(1.0), Some("plane vertices"));
        let index_buffer = create_index_buffer(device, &QUAD_INDICES, Some("plane indices"));
        let uniform_buffer =
            create_uniform_buffer(device, &PlaneUniforms::default(), Some("plane uniforms"));

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("plane bind group"),
            layout: bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&video.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&video.sampler),
                },
            ],
        });

        Self {
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            bind_group,
            video,
        }
    }

    /// Updates uniforms.
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &PlaneUniforms) {
        update_uniform(queue, &self.uniform_buffer, uniforms);
    }

    /// Uploads a new video frame.
    pub fn upload_frame(&self, queue: &wgpu::Queue, frame: &RgbaImage) -> RenderResult<()> {
        self.video.upload(queue, frame)
    }

    /// Records the draw call.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    #[test]
    fn test_uniform_size_matches_wgsl() {
        assert_eq!(std::mem::size_of::<PlaneUniforms>(), 96);
    }

    #[test]
    fn test_uniforms_pack_material() {
        let material = PlaneMaterial {
            time: 1.5,
            resolution: Vec4::new(800.0, 600.0, 1.0, 1.33),
        };
        let uniforms = PlaneUniforms::new(Mat4::from_scale(glam::Vec3::new(2.0, 1.0, 1.0)), &material);
        assert_eq!(uniforms.time, 1.5);
        assert_eq!(uniforms.resolution, [800.0, 600.0, 1.0, 1.33]);
        assert_eq!(uniforms.model_matrix[0][0], 2.0);
    }
}
