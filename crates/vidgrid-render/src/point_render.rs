//! Point cloud GPU rendering resources.

use glam::{Mat4, Vec3};
use vidgrid_core::PointsMaterial;

use crate::buffer::{create_uniform_buffer, create_vertex_buffer, update_uniform, vec3_data};

/// Vertices per billboard (two triangles).
const BILLBOARD_VERTICES: u32 = 6;

/// Uniforms for point cloud rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[allow(clippy::pub_underscore_fields)]
pub struct PointUniforms {
    pub model_matrix: [[f32; 4]; 4],
    pub resolution: [f32; 4],
    pub time: f32,
    pub point_size: f32,
    pub _padding: [f32; 2],
}

impl PointUniforms {
    #[must_use]
    pub fn new(model: Mat4, material: &PointsMaterial) -> Self {
        Self {
            model_matrix: model.to_cols_array_2d(),
            resolution: material.resolution.to_array(),
            time: material.time,
            point_size: material.point_size,
            _padding: [0.0; 2],
        }
    }
}

impl Default for PointUniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, &PointsMaterial::default())
    }
}

/// GPU resources for rendering a point cloud.
pub struct PointRenderData {
    /// Point centres, one per instance.
    pub position_buffer: wgpu::Buffer,
    /// Uniform buffer for point-specific settings.
    pub uniform_buffer: wgpu::Buffer,
    /// Bind group for this point cloud.
    pub bind_group: wgpu::BindGroup,
    /// Number of points.
    pub num_points: u32,
}

impl PointRenderData {
    /// Creates new render data from point positions.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        positions: &[Vec3],
    ) -> Self {
        let num_points = positions.len() as u32;

        let position_buffer =
            create_vertex_buffer(device, &vec3_data(positions), Some("point positions"));
        let uniform_buffer =
            create_uniform_buffer(device, &PointUniforms::default(), Some("point uniforms"));

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("point cloud bind group"),
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
            ],
        });

        Self {
            position_buffer,
            uniform_buffer,
            bind_group,
            num_points,
        }
    }

    /// Updates uniforms.
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &PointUniforms) {
        update_uniform(queue, &self.uniform_buffer, uniforms);
    }

    /// Records one billboard per point.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.position_buffer.slice(..));
        pass.draw(0..BILLBOARD_VERTICES, 0..self.num_points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_size_matches_wgsl() {
        assert_eq!(std::mem::size_of::<PointUniforms>(), 96);
    }

    #[test]
    fn test_point_size_is_packed() {
        let uniforms = PointUniforms::new(Mat4::IDENTITY, &PointsMaterial::default());
        assert_eq!(uniforms.point_size, 0.0);

        let material = PointsMaterial {
            point_size: 0.012,
            ..PointsMaterial::default()
        };
        assert_eq!(PointUniforms::new(Mat4::IDENTITY, &material).point_size, 0.012);
    }
}
