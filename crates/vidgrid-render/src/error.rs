//! Rendering error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during rendering operations.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to create wgpu adapter.
    #[error("failed to create graphics adapter")]
    AdapterCreationFailed,

    /// Failed to create wgpu device.
    #[error("failed to create graphics device: {0}")]
    DeviceCreationFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create surface.
    #[error("failed to create surface: {0}")]
    SurfaceCreationFailed(#[from] wgpu::CreateSurfaceError),

    /// Could not acquire the next surface texture.
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    /// Shader compilation failed.
    #[error("shader compilation failed: {0}")]
    ShaderCompilationFailed(String),

    /// The video frame directory does not exist or cannot be read.
    #[error("video source '{}' not found: {source}", path.display())]
    VideoSourceMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The video frame directory holds no decodable frames.
    #[error("video source '{}' contains no frames", .0.display())]
    VideoSourceEmpty(PathBuf),

    /// Frames of one video differ in size.
    #[error("video frame size mismatch: expected {expected:?}, got {actual:?}")]
    FrameSizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Image decoding or encoding failed.
    #[error("image error: {0}")]
    ImageError(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported output image format.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Pixel data does not match the requested dimensions.
    #[error("invalid image data")]
    InvalidImageData,

    /// Reading the frame back from the GPU failed.
    #[error("GPU buffer mapping failed")]
    BufferMapFailed,
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
