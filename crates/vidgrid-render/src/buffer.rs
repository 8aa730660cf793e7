//! GPU buffer management.

use wgpu::util::DeviceExt;

/// Creates a vertex buffer from data.
pub fn create_vertex_buffer<T: bytemuck::Pod>(
    device: &wgpu::Device,
    data: &[T],
    label: Option<&str>,
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label,
        contents: bytemuck::cast_slice(data),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    })
}

/// Creates an index buffer from data.
pub fn create_index_buffer(
    device: &wgpu::Device,
    data: &[u32],
    label: Option<&str>,
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label,
        contents: bytemuck::cast_slice(data),
        usage: wgpu::BufferUsages::INDEX,
    })
}

/// Creates a uniform buffer from data.
pub fn create_uniform_buffer<T: bytemuck::Pod>(
    device: &wgpu::Device,
    data: &T,
    label: Option<&str>,
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label,
        contents: bytemuck::bytes_of(data),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

/// Overwrites a uniform buffer with a single value.
pub fn update_uniform<T: bytemuck::Pod>(queue: &wgpu::Queue, buffer: &wgpu::Buffer, data: &T) {
    queue.write_buffer(buffer, 0, bytemuck::bytes_of(data));
}

/// Bind group layout entry for a uniform buffer visible to both stages.
pub(crate) fn uniform_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

const QUAD_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

/// Vertex of a textured quad.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl QuadVertex {
    /// Vertex buffer layout: position at location 0, uv at location 1.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &QUAD_ATTRIBUTES,
    };
}

/// The four vertices of a `size × size` quad, indexed by `QUAD_INDICES`.
#[must_use]
pub fn quad_vertices(size: f32) -> [QuadVertex; 4] {
    let corners = vidgrid_core::scene::quad_corners(size);
    std::array::from_fn(|i| QuadVertex {
        position: corners[i].to_array(),
        uv: vidgrid_core::scene::QUAD_UVS[i],
    })
}

const VEC3_AT_0: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const VEC3_AT_2: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x3];

/// Per-vertex `vec3<f32>` positions at location 0.
pub const POSITION_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: 12,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &VEC3_AT_0,
};

/// Per-instance `vec3<f32>` centres at location 0.
pub const INSTANCE_CENTER_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: 12,
    step_mode: wgpu::VertexStepMode::Instance,
    attributes: &VEC3_AT_0,
};

/// Per-instance `vec3<f32>` offsets at location 2, after a [`QuadVertex`].
pub const INSTANCE_OFFSET_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: 12,
    step_mode: wgpu::VertexStepMode::Instance,
    attributes: &VEC3_AT_2,
};

/// Flattens positions into `[x, y, z]` triples for upload.
#[must_use]
pub fn vec3_data(points: &[glam::Vec3]) -> Vec<[f32; 3]> {
    points.iter().map(|p| p.to_array()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_vertex_layout_matches_struct() {
        assert_eq!(std::mem::size_of::<QuadVertex>(), 20);
        assert_eq!(QuadVertex::LAYOUT.array_stride, 20);
    }

    #[test]
    fn test_uniform_writes_fill_their_buffers() {
        use crate::line_render::LineUniforms;
        use crate::plane_render::PlaneUniforms;
        use crate::point_render::PointUniforms;
        use crate::square_render::SquareUniforms;

        // update_uniform rewrites exactly the bytes create_uniform_buffer allocated
        let written = [
            bytemuck::bytes_of(&PlaneUniforms::default()).len(),
            bytemuck::bytes_of(&SquareUniforms::default()).len(),
            bytemuck::bytes_of(&PointUniforms::default()).len(),
            bytemuck::bytes_of(&LineUniforms::default()).len(),
        ];
        assert_eq!(written, [96, 96, 96, 80]);
        assert!(written.iter().all(|n| n % 16 == 0));
    }

    #[test]
    fn test_quad_vertices_span_size() {
        let quad = quad_vertices(1.0);
        assert_eq!(quad[0].position, [-0.5, -0.5, 0.0]);
        assert_eq!(quad[2].position, [0.5, 0.5, 0.0]);
        assert_eq!(quad[0].uv, [0.0, 1.0]);
    }
}
