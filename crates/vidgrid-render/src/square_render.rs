//! Instanced square grid GPU rendering resources.

use glam::{Mat4, Vec3};
use vidgrid_core::scene::QUAD_INDICES;
use vidgrid_core::SquareMaterial;

use crate::buffer::{
    create_index_buffer, create_uniform_buffer, create_vertex_buffer, quad_vertices,
    update_uniform, vec3_data,
};

/// Uniforms for the square grid.
///
/// `mouse` is a `vec3` followed by `time`, which WGSL packs into one 16-byte
/// row.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SquareUniforms {
    pub model_matrix: [[f32; 4]; 4],
    pub resolution: [f32; 4],
    pub mouse: [f32; 3],
    pub time: f32,
}

impl SquareUniforms {
    #[must_use]
    pub fn new(model: Mat4, material: &SquareMaterial) -> Self {
        Self {
            model_matrix: model.to_cols_array_2d(),
            resolution: material.resolution.to_array(),
            mouse: material.mouse.to_array(),
            time: material.time,
        }
    }
}

impl Default for SquareUniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, &SquareMaterial::default())
    }
}

/// GPU resources for the instanced square grid.
pub struct SquareRenderData {
    /// One quad, shared by every instance.
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    /// Per-instance lattice offsets.
    pub instance_buffer: wgpu::Buffer,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    /// Number of instances.
    pub num_instances: u32,
}

impl SquareRenderData {
    /// Creates render data for `offsets.len()` squares of side `size`.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        size: f32,
        offsets: &[Vec3],
    ) -> Self {
        let num_instances = offsets.len() as u32;

        let vertex_buffer = create_vertex_buffer(device, &quad_vertices(size), Some("square vertices"));
        let index_buffer = create_index_buffer(device, &QUAD_INDICES, Some("square indices"));
        let instance_buffer =
            create_vertex_buffer(device, &vec3_data(offsets), Some("square instance offsets"));
        let uniform_buffer =
            create_uniform_buffer(device, &SquareUniforms::default(), Some("square uniforms"));

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("square grid bind group"),
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
            vertex_buffer,
            index_buffer,
            instance_buffer,
            uniform_buffer,
            bind_group,
            num_instances,
        }
    }

    /// Updates uniforms.
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &SquareUniforms) {
        update_uniform(queue, &self.uniform_buffer, uniforms);
    }

    /// Records the instanced draw call.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..self.num_instances);
    }
}
