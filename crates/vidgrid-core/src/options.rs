//! Configuration options for vidgrid.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VidgridError};
use crate::lattice::MAX_GRID_COUNT;

/// Top-level configuration, loadable from JSON.
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Lattice settings shared by the squares, points and lines.
    pub grid: GridOptions,
    /// Camera and cover-fit settings.
    pub layout: LayoutOptions,
    /// Frame clock and pointer parallax.
    pub animation: AnimationOptions,
    /// Video frame source.
    pub video: VideoOptions,
    /// Initial window settings.
    pub window: WindowOptions,
    /// Clear color behind the scene.
    pub background_color: Vec3,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            grid: GridOptions::default(),
            layout: LayoutOptions::default(),
            animation: AnimationOptions::default(),
            video: VideoOptions::default(),
            window: WindowOptions::default(),
            background_color: Vec3::ZERO,
        }
    }
}

impl Options {
    /// Reads options from a JSON file and validates them.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let options = Self::from_json_str(&text)?;
        log::info!("loaded options from {}", path.as_ref().display());
        Ok(options)
    }

    /// Parses options from a JSON string and validates them.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks that all values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.grid.count == 0 || self.grid.count > MAX_GRID_COUNT {
            return Err(VidgridError::InvalidGridCount(self.grid.count));
        }
        positive("grid.spacing", self.grid.spacing)?;
        positive("grid.line_extent", self.grid.line_extent)?;
        positive("layout.image_aspect", self.layout.image_aspect)?;
        positive("layout.target_height", self.layout.target_height)?;
        positive("layout.camera_distance", self.layout.camera_distance)?;
        positive("layout.near", self.layout.near)?;
        if self.layout.far <= self.layout.near {
            return Err(VidgridError::InvalidOption {
                name: "layout.far",
                reason: format!(
                    "must be greater than near ({} <= {})",
                    self.layout.far, self.layout.near
                ),
            });
        }
        positive("animation.time_step", self.animation.time_step)?;
        positive("animation.parallax_divisor", self.animation.parallax_divisor)?;
        positive("animation.point_size", self.animation.point_size)?;
        positive("video.fps", self.video.fps)?;
        if self.window.width == 0 || self.window.height == 0 {
            return Err(VidgridError::InvalidViewport {
                width: self.window.width,
                height: self.window.height,
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(VidgridError::InvalidOption {
            name,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

/// Lattice settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// Cells per side; the lattice holds `count²` cells.
    pub count: u32,
    /// Distance between neighbouring lattice positions (world units).
    pub spacing: f32,
    /// Half-length of each line in the line grid (world units).
    pub line_extent: f32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            count: 40,
            spacing: 0.1,
            line_extent: 5.0,
        }
    }
}

/// Camera and cover-fit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Aspect (height / width) of the video image used for cover fitting.
    pub image_aspect: f32,
    /// World height the camera frames at `camera_distance`.
    pub target_height: f32,
    /// Distance from the camera to the plane along +Z.
    pub camera_distance: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            image_aspect: 1080.0 / 1920.0,
            target_height: 0.9,
            camera_distance: 2.0,
            near: 0.001,
            far: 1000.0,
        }
    }
}

/// Frame clock and parallax settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationOptions {
    /// Amount the time accumulator advances per rendered frame.
    pub time_step: f32,
    /// Pointer NDC is divided by this to get the scene rotation in radians.
    pub parallax_divisor: f32,
    /// Point sprite size in world units.
    pub point_size: f32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            time_step: 0.05,
            parallax_divisor: 10.0,
            point_size: 0.012,
        }
    }
}

/// Video frame source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoOptions {
    /// Directory of decoded frames (PNG/JPEG, sorted by file name).
    pub path: PathBuf,
    /// Playback rate in frames per second.
    pub fps: f32,
    /// Whether playback restarts after the last frame.
    pub looping: bool,
}

impl Default for VideoOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/video"),
            fps: 30.0,
            looping: true,
        }
    }
}

/// Initial window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "vidgrid".to_string(),
            width: 1280,
            height: 720,
        }
    }
}
