//! Error types for vidgrid.

use thiserror::Error;

/// The main error type for vidgrid operations.
#[derive(Error, Debug)]
pub enum VidgridError {
    /// The lattice needs between 1 and `MAX_GRID_COUNT` cells per side.
    #[error("grid count must be between 1 and {max}, got {0}", max = crate::lattice::MAX_GRID_COUNT)]
    InvalidGridCount(u32),

    /// A configuration value is out of range.
    #[error("invalid option '{name}': {reason}")]
    InvalidOption { name: &'static str, reason: String },

    /// The viewport has a zero dimension.
    #[error("invalid viewport size {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    /// Window or event loop creation failed.
    #[error("window error: {0}")]
    WindowError(String),

    /// Rendering error.
    #[error("render error: {0}")]
    RenderError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for vidgrid operations.
pub type Result<T> = std::result::Result<T, VidgridError>;
