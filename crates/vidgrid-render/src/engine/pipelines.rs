//! Render pipelines for the four scene elements.

use std::num::NonZeroU64;

use crate::buffer::{
    uniform_layout_entry, QuadVertex, INSTANCE_CENTER_LAYOUT, INSTANCE_OFFSET_LAYOUT,
    POSITION_LAYOUT,
};
use crate::error::RenderResult;
use crate::shader::ShaderBuilder;

use super::DEPTH_FORMAT;

/// Size of `CameraUniforms` in WGSL.
const CAMERA_UNIFORM_SIZE: u64 = 80;

/// Pipelines and bind group layouts for every element.
pub struct ElementPipelines {
    /// Video plane: camera, uniforms, texture, sampler.
    pub plane_layout: wgpu::BindGroupLayout,
    pub plane: wgpu::RenderPipeline,
    /// Line grid: camera, uniforms.
    pub line_layout: wgpu::BindGroupLayout,
    pub lines: wgpu::RenderPipeline,
    /// Square grid: camera, uniforms.
    pub square_layout: wgpu::BindGroupLayout,
    pub squares: wgpu::RenderPipeline,
    /// Point cloud: camera, uniforms.
    pub point_layout: wgpu::BindGroupLayout,
    pub points: wgpu::RenderPipeline,
}

/// How an element blends into the target.
#[derive(Debug, Clone, Copy)]
enum Layering {
    /// Replaces colour and writes depth.
    Opaque,
    /// Alpha-blends over what is there without writing depth.
    Overlay,
}

struct PipelineDesc<'a> {
    label: &'a str,
    module: &'a wgpu::ShaderModule,
    bind_group_layout: &'a wgpu::BindGroupLayout,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    topology: wgpu::PrimitiveTopology,
    layering: Layering,
}

impl ElementPipelines {
    /// Compiles the element shaders and builds their pipelines.
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> RenderResult<Self> {
        let camera_entry = wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(CAMERA_UNIFORM_SIZE),
            },
            count: None,
        };

        let plane_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("plane bind group layout"),
            entries: &[
                // Camera uniforms
                camera_entry,
                // Plane uniforms
                uniform_layout_entry(1),
                // Video texture
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                // Video sampler
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let uniform_only_layout = |label: &str| {
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(label),
                entries: &[
                    // Camera uniforms
                    camera_entry,
                    // Element uniforms
                    uniform_layout_entry(1),
                ],
            })
        };
        let line_layout = uniform_only_layout("line grid bind group layout");
        let square_layout = uniform_only_layout("square grid bind group layout");
        let point_layout = uniform_only_layout("point cloud bind group layout");

        let plane_shader = ShaderBuilder::new()
            .with_source(include_str!("../shaders/plane.wgsl"))
            .with_label("plane shader")
            .build_module(device)?;
        let line_shader = ShaderBuilder::new()
            .with_source(include_str!("../shaders/lines.wgsl"))
            .with_label("line shader")
            .build_module(device)?;
        let square_shader = ShaderBuilder::new()
            .with_source(include_str!("../shaders/square.wgsl"))
            .with_label("square shader")
            .build_module(device)?;
        let point_shader = ShaderBuilder::new()
            .with_source(include_str!("../shaders/points.wgsl"))
            .with_label("point shader")
            .build_module(device)?;

        let plane = create_pipeline(
            device,
            color_format,
            &PipelineDesc {
                label: "plane pipeline",
                module: &plane_shader,
                bind_group_layout: &plane_layout,
                buffers: &[QuadVertex::LAYOUT],
                topology: wgpu::PrimitiveTopology::TriangleList,
                layering: Layering::Opaque,
            },
        );
        let lines = create_pipeline(
            device,
            color_format,
            &PipelineDesc {
                label: "line grid pipeline",
                module: &line_shader,
                bind_group_layout: &line_layout,
                buffers: &[POSITION_LAYOUT],
                topology: wgpu::PrimitiveTopology::LineList,
                layering: Layering::Overlay,
            },
        );
        let squares = create_pipeline(
            device,
            color_format,
            &PipelineDesc {
                label: "square grid pipeline",
                module: &square_shader,
                bind_group_layout: &square_layout,
                buffers: &[QuadVertex::LAYOUT, INSTANCE_OFFSET_LAYOUT],
                topology: wgpu::PrimitiveTopology::TriangleList,
                layering: Layering::Overlay,
            },
        );
        let points = create_pipeline(
            device,
            color_format,
            &PipelineDesc {
                label: "point cloud pipeline",
                module: &point_shader,
                bind_group_layout: &point_layout,
                buffers: &[INSTANCE_CENTER_LAYOUT],
                topology: wgpu::PrimitiveTopology::TriangleList,
                layering: Layering::Overlay,
            },
        );

        Ok(Self {
            plane_layout,
            plane,
            line_layout,
            lines,
            square_layout,
            squares,
            point_layout,
            points,
        })
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    desc: &PipelineDesc<'_>,
) -> wgpu::RenderPipeline {
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(desc.label),
        bind_group_layouts: &[desc.bind_group_layout],
        push_constant_ranges: &[],
    });

    let (blend, depth_write_enabled) = match desc.layering {
        Layering::Opaque => (wgpu::BlendState::REPLACE, true),
        Layering::Overlay => (wgpu::BlendState::ALPHA_BLENDING, false),
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: desc.module,
            entry_point: Some("vs_main"),
            buffers: desc.buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.module,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None, // Double-sided
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
