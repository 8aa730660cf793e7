//! Line grid GPU rendering resources.

use glam::{Mat4, Vec3, Vec4};

use crate::buffer::{create_uniform_buffer, create_vertex_buffer, update_uniform, vec3_data};

/// Default line colour: white at 10% opacity.
pub const LINE_COLOR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.1);

/// Uniforms for line rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineUniforms {
    pub model_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl LineUniforms {
    #[must_use]
    pub fn new(model: Mat4, color: Vec4) -> Self {
        Self {
            model_matrix: model.to_cols_array_2d(),
            color: color.to_array(),
        }
    }
}

impl Default for LineUniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, LINE_COLOR)
    }
}

/// GPU resources for the line grid.
pub struct LineRenderData {
    /// Segment endpoints, two per segment.
    pub vertex_buffer: wgpu::Buffer,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub num_vertices: u32,
}

impl LineRenderData {
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        vertices: &[Vec3],
    ) -> Self {
        let vertex_buffer = create_vertex_buffer(device, &vec3_data(vertices), Some("line vertices"));
        let uniform_buffer =
            create_uniform_buffer(device, &LineUniforms::default(), Some("line uniforms"));

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("line grid bind group"),
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
            uniform_buffer,
            bind_group,
            num_vertices: vertices.len() as u32,
        }
    }

    /// Updates uniforms.
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &LineUniforms) {
        update_uniform(queue, &self.uniform_buffer, uniforms);
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..self.num_vertices, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_color_is_faint_white() {
        let uniforms = LineUniforms::default();
        assert_eq!(uniforms.color, [1.0, 1.0, 1.0, 0.1]);
        assert_eq!(std::mem::size_of::<LineUniforms>(), 80);
    }
}
