//! Pointer tracking in normalized device coordinates.

use glam::Vec2;

/// Latest pointer position in NDC (`[-1, 1]` on both axes, +Y up).
///
/// Each move event overwrites the previous value; nothing is queued.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    ndc: Vec2,
}

impl PointerState {
    /// Creates a pointer at the given NDC position.
    pub fn new(ndc: Vec2) -> Self {
        Self { ndc }
    }

    /// Converts a screen position (origin top-left, pixels) to NDC.
    pub fn from_screen(x: f64, y: f64, width: u32, height: u32) -> Self {
        let nx = (x / f64::from(width)) * 2.0 - 1.0;
        let ny = -(y / f64::from(height)) * 2.0 + 1.0;
        #[allow(clippy::cast_possible_truncation)]
        Self::new(Vec2::new(nx as f32, ny as f32))
    }

    /// Records a pointer-move event.
    pub fn update(&mut self, x: f64, y: f64, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        *self = Self::from_screen(x, y, width, height);
    }

    /// Current NDC position.
    pub fn ndc(&self) -> Vec2 {
        self.ndc
    }

    /// Scene rotation (x, y) in radians for the parallax effect.
    pub fn parallax_rotation(&self, divisor: f32) -> Vec2 {
        Vec2::new(-self.ndc.y / divisor, self.ndc.x / divisor)
    }
}
