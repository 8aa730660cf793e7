//! Video frames and the texture they are streamed into.
//!
//! Decoding is outside this crate: a [`VideoSource`] hands out decoded RGBA
//! frames and [`VideoTexture`] copies whichever frame is current to the GPU.

use std::path::{Path, PathBuf};
use std::time::Instant;

use image::RgbaImage;

use crate::error::{RenderError, RenderResult};

/// File extensions accepted as video frames.
const FRAME_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// A source of decoded video frames.
pub trait VideoSource {
    /// Frame size in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Starts playback; no frame is available before this is called.
    fn play(&mut self, at: Instant);

    /// Returns true once playback has started.
    fn is_playing(&self) -> bool;

    /// Returns the frame visible at `now` when it differs from the one
    /// returned last, `None` otherwise.
    fn poll_frame(&mut self, now: Instant) -> Option<&RgbaImage>;
}

/// Video played back from a sequence of still frames.
pub struct FrameSequence {
    frames: Vec<RgbaImage>,
    fps: f32,
    looping: bool,
    started: Option<Instant>,
    shown: Option<usize>,
}

impl FrameSequence {
    /// Loads every PNG/JPEG in `dir`, ordered by file name.
    pub fn open(dir: impl AsRef<Path>, fps: f32, looping: bool) -> RenderResult<Self> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|source| RenderError::VideoSourceMissing {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if is_frame_file(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(RenderError::VideoSourceEmpty(dir.to_path_buf()));
        }

        let frames = paths
            .iter()
            .map(|path| -> RenderResult<RgbaImage> { Ok(image::open(path)?.to_rgba8()) })
            .collect::<RenderResult<Vec<_>>>()?;

        log::info!(
            "loaded {} video frames from {} at {} fps",
            frames.len(),
            dir.display(),
            fps
        );
        Self::from_frames(frames, fps, looping)
    }

    /// Wraps already decoded frames. All frames must share one size.
    pub fn from_frames(frames: Vec<RgbaImage>, fps: f32, looping: bool) -> RenderResult<Self> {
        let first = frames
            .first()
            .ok_or_else(|| RenderError::VideoSourceEmpty(PathBuf::from("<memory>")))?;
        let expected = first.dimensions();
        if let Some(frame) = frames.iter().find(|f| f.dimensions() != expected) {
            return Err(RenderError::FrameSizeMismatch {
                expected,
                actual: frame.dimensions(),
            });
        }

        Ok(Self {
            frames,
            fps: fps.max(f32::EPSILON),
            looping,
            started: None,
            shown: None,
        })
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Never true for a constructed sequence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the frame visible `seconds` after playback started.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn frame_index(&self, seconds: f64) -> usize {
        let raw = (seconds.max(0.0) * f64::from(self.fps)).floor() as usize;
        if self.looping {
            raw % self.frames.len()
        } else {
            raw.min(self.frames.len() - 1)
        }
    }
}

impl VideoSource for FrameSequence {
    fn dimensions(&self) -> (u32, u32) {
        self.frames[0].dimensions()
    }

    fn play(&mut self, at: Instant) {
        if self.started.is_none() {
            log::debug!("video playback started");
            self.started = Some(at);
        }
    }

    fn is_playing(&self) -> bool {
        self.started.is_some()
    }

    fn poll_frame(&mut self, now: Instant) -> Option<&RgbaImage> {
        let started = self.started?;
        let index = self.frame_index(now.saturating_duration_since(started).as_secs_f64());
        if self.shown == Some(index) {
            return None;
        }
        self.shown = Some(index);
        Some(&self.frames[index])
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| FRAME_EXTENSIONS.contains(&e.to_lowercase().as_str()))
}

/// GPU texture holding the current video frame.
pub struct VideoTexture {
    /// The texture.
    pub texture: wgpu::Texture,
    /// Full view of the texture.
    pub view: wgpu::TextureView,
    /// Linear clamp sampler.
    pub sampler: wgpu::Sampler,
    width: u32,
    height: u32,
}

impl VideoTexture {
    /// Creates an empty texture sized for `(width, height)` frames.
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("video texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("video sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            width,
            height,
        }
    }

    /// Texture size in pixels.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Copies a frame into the texture.
    pub fn upload(&self, queue: &wgpu::Queue, frame: &RgbaImage) -> RenderResult<()> {
        let actual = frame.dimensions();
        if actual != (self.width, self.height) {
            return Err(RenderError::FrameSizeMismatch {
                expected: (self.width, self.height),
                actual,
            });
        }

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            frame.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.width * 4),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        Ok(())
    }
}
