//! Uniform state for the three shader materials.
//!
//! These structs are the CPU-side source of truth. They are written only by
//! the sketch (on resize and once per frame) and read by the renderer when it
//! uploads uniforms, so no locking is involved.

use glam::{Vec3, Vec4};

use crate::layout::Layout;
use crate::pick::PickResult;

/// Uniforms of the video plane material.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaneMaterial {
    pub time: f32,
    /// Cover vector: (width, height, a1, a2).
    pub resolution: Vec4,
}

/// Uniforms of the instanced square material.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SquareMaterial {
    pub time: f32,
    pub resolution: Vec4,
    /// Pick point on the video plane, or zero on a miss.
    pub mouse: Vec3,
}

/// Uniforms of the point cloud material.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointsMaterial {
    pub time: f32,
    pub resolution: Vec4,
    pub point_size: f32,
}

/// All material state of the sketch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Materials {
    pub plane: PlaneMaterial,
    pub squares: SquareMaterial,
    pub points: PointsMaterial,
}

impl Materials {
    pub fn new(point_size: f32) -> Self {
        Self {
            points: PointsMaterial {
                point_size,
                ..PointsMaterial::default()
            },
            ..Self::default()
        }
    }

    /// Writes viewport-derived values after a resize.
    pub fn apply_layout(&mut self, layout: &Layout) {
        self.plane.resolution = layout.resolution;
        self.squares.resolution = layout.resolution;
        self.points.resolution = layout.resolution;
    }

    /// Writes per-frame values.
    pub fn apply_frame(&mut self, time: f32, pick: PickResult) {
        self.plane.time = time;
        self.squares.time = time;
        self.points.time = time;
        self.squares.mouse = pick.point();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Viewport;
    use crate::options::LayoutOptions;

    #[test]
    fn test_layout_reaches_all_materials() {
        let mut materials = Materials::new(0.01);
        let layout = Layout::compute(Viewport::new(1280, 720).unwrap(), &LayoutOptions::default());
        materials.apply_layout(&layout);

        assert_eq!(materials.plane.resolution, layout.resolution);
        assert_eq!(materials.squares.resolution, layout.resolution);
        assert_eq!(materials.points.resolution, layout.resolution);
        assert_eq!(materials.points.point_size, 0.01);
    }

    #[test]
    fn test_frame_writes_time_and_mouse() {
        let mut materials = Materials::default();
        materials.apply_frame(1.5, PickResult::Hit(Vec3::new(0.1, 0.2, 0.0)));
        assert_eq!(materials.plane.time, 1.5);
        assert_eq!(materials.squares.time, 1.5);
        assert_eq!(materials.points.time, 1.5);
        assert_eq!(materials.squares.mouse, Vec3::new(0.1, 0.2, 0.0));

        materials.apply_frame(1.55, PickResult::Miss);
        assert_eq!(materials.squares.mouse, Vec3::ZERO);
    }
}
