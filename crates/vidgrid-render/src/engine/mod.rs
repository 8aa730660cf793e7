//! The main rendering engine.

mod capture;
mod pipelines;

use std::sync::Arc;

use glam::Vec3;

use crate::buffer::{create_uniform_buffer, update_uniform};
use crate::camera::Camera;
use crate::error::{RenderError, RenderResult};
use crate::scene_render::SceneRenderer;

pub use pipelines::ElementPipelines;

/// Depth buffer format shared by every pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

/// Colour format of the headless target.
pub const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Camera uniforms for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[allow(clippy::pub_underscore_fields)]
pub struct CameraUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub _padding: f32,
}

impl From<&Camera> for CameraUniforms {
    fn from(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            camera_pos: camera.position.to_array(),
            _padding: 0.0,
        }
    }
}

impl Default for CameraUniforms {
    fn default() -> Self {
        Self::from(&Camera::default())
    }
}

/// What a frame is rendered into.
enum RenderTarget {
    /// A window surface.
    Surface(wgpu::Surface<'static>),
    /// An offscreen texture that can be read back.
    Offscreen(wgpu::Texture),
}

/// The main rendering engine backed by wgpu.
pub struct RenderEngine {
    /// The wgpu instance.
    pub instance: wgpu::Instance,
    /// The wgpu adapter.
    pub adapter: wgpu::Adapter,
    /// The wgpu device.
    pub device: wgpu::Device,
    /// The wgpu queue.
    pub queue: wgpu::Queue,
    target: RenderTarget,
    /// Surface configuration (also describes the offscreen target).
    pub surface_config: wgpu::SurfaceConfiguration,
    /// Depth texture.
    pub depth_texture: wgpu::Texture,
    /// Depth texture view.
    pub depth_view: wgpu::TextureView,
    /// Camera uniform buffer.
    pub camera_buffer: wgpu::Buffer,
    /// Element pipelines.
    pub pipelines: ElementPipelines,
    /// Clear colour.
    pub background_color: Vec3,
    /// Current viewport width.
    pub width: u32,
    /// Current viewport height.
    pub height: u32,
}

impl RenderEngine {
    /// Creates a new windowed render engine.
    pub async fn new_windowed(window: Arc<winit::window::Window>) -> RenderResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..wgpu::InstanceDescriptor::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::AdapterCreationFailed)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("vidgrid device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(RenderError::AdapterCreationFailed)?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        log::info!(
            "windowed engine on {} ({:?}), surface {:?} {}x{}",
            adapter.get_info().name,
            adapter.get_info().backend,
            surface_format,
            width,
            height
        );

        Self::from_parts(
            instance,
            adapter,
            device,
            queue,
            RenderTarget::Surface(surface),
            surface_config,
        )
        .await
    }

    /// Creates a headless render engine drawing into an offscreen texture.
    pub async fn new_headless(width: u32, height: u32) -> RenderResult<Self> {
        let width = width.max(1);
        let height = height.max(1);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..wgpu::InstanceDescriptor::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::AdapterCreationFailed)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("vidgrid device (headless)"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            format: OFFSCREEN_FORMAT,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        let target = Self::create_offscreen_texture(&device, width, height);

        log::info!(
            "headless engine on {} ({:?}), {}x{}",
            adapter.get_info().name,
            adapter.get_info().backend,
            width,
            height
        );

        Self::from_parts(
            instance,
            adapter,
            device,
            queue,
            RenderTarget::Offscreen(target),
            surface_config,
        )
        .await
    }

    async fn from_parts(
        instance: wgpu::Instance,
        adapter: wgpu::Adapter,
        device: wgpu::Device,
        queue: wgpu::Queue,
        target: RenderTarget,
        surface_config: wgpu::SurfaceConfiguration,
    ) -> RenderResult<Self> {
        let (depth_texture, depth_view) =
            Self::create_depth_texture(&device, surface_config.width, surface_config.height);

        let camera_buffer =
            create_uniform_buffer(&device, &CameraUniforms::default(), Some("camera uniforms"));

        // Shader errors surface through the validation scope instead of the
        // device's uncaptured error handler
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipelines = ElementPipelines::new(&device, surface_config.format);
        if let Some(error) = device.pop_error_scope().await {
            return Err(RenderError::ShaderCompilationFailed(error.to_string()));
        }
        let pipelines = pipelines?;

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
            target,
            width: surface_config.width,
            height: surface_config.height,
            surface_config,
            depth_texture,
            depth_view,
            camera_buffer,
            pipelines,
            background_color: Vec3::ZERO,
        })
    }

    /// Resizes the render target.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.width = width;
        self.height = height;
        self.surface_config.width = width;
        self.surface_config.height = height;

        match &mut self.target {
            RenderTarget::Surface(surface) => surface.configure(&self.device, &self.surface_config),
            RenderTarget::Offscreen(texture) => {
                *texture = Self::create_offscreen_texture(&self.device, width, height);
            }
        }

        let (depth_texture, depth_view) = Self::create_depth_texture(&self.device, width, height);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }

    fn create_offscreen_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::Texture {
        device.create_texture(&wgpu::TextureDescriptor {
            label: Some("offscreen target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: OFFSCREEN_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        })
    }

    /// Updates camera uniforms.
    pub fn update_camera_uniforms(&self, camera: &Camera) {
        update_uniform(&self.queue, &self.camera_buffer, &CameraUniforms::from(camera));
    }

    /// Returns the viewport dimensions.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Renders one frame and presents it.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped; any
    /// other surface error is returned.
    pub fn render(&mut self, scene: &SceneRenderer) -> RenderResult<()> {
        match &self.target {
            RenderTarget::Surface(surface) => {
                let frame = match surface.get_current_texture() {
                    Ok(frame) => frame,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        log::debug!("surface lost or outdated, reconfiguring");
                        surface.configure(&self.device, &self.surface_config);
                        return Ok(());
                    }
                    Err(wgpu::SurfaceError::Timeout) => {
                        log::warn!("surface texture timed out, skipping frame");
                        return Ok(());
                    }
                    Err(e) => return Err(e.into()),
                };
                let view = frame
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                self.encode_frame(&view, scene);
                frame.present();
            }
            RenderTarget::Offscreen(texture) => {
                let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
                self.encode_frame(&view, scene);
            }
        }
        Ok(())
    }

    fn encode_frame(&self, view: &wgpu::TextureView, scene: &SceneRenderer) {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(self.background_color.x),
                            g: f64::from(self.background_color.y),
                            b: f64::from(self.background_color.z),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            scene.draw(&mut pass, &self.pipelines);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }
}
