//! The `count × count` lattice under the square grid and the point cloud.

use glam::Vec3;

use crate::error::{Result, VidgridError};

/// Largest supported cells per side; keeps `count²` instances well inside `u32`.
pub const MAX_GRID_COUNT: u32 = 1024;

/// A square lattice of evenly spaced positions centred on the origin.
///
/// Index `i` is traversed with x outer and y inner:
/// `ix = i / count`, `iy = i % count`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lattice {
    count: u32,
    spacing: f32,
}

impl Lattice {
    /// Creates a lattice with `count` cells per side.
    pub fn new(count: u32, spacing: f32) -> Result<Self> {
        if count == 0 || count > MAX_GRID_COUNT {
            return Err(VidgridError::InvalidGridCount(count));
        }
        Ok(Self { count, spacing })
    }

    /// Cells per side.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Distance between neighbouring positions.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Total number of cells (`count²`).
    pub fn len(&self) -> usize {
        (self.count as usize) * (self.count as usize)
    }

    /// Always false; a lattice has at least one cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Coordinate of row/column `index` along one axis.
    pub fn coordinate(&self, index: u32) -> f32 {
        (index as f32 + 0.5 - self.count as f32 / 2.0) * self.spacing
    }

    /// World position of cell `index` (z = 0).
    pub fn position(&self, index: usize) -> Vec3 {
        let count = self.count as usize;
        let ix = (index / count) as u32;
        let iy = (index % count) as u32;
        Vec3::new(self.coordinate(ix), self.coordinate(iy), 0.0)
    }

    /// Iterates all cell positions in traversal order.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.len()).map(|i| self.position(i))
    }

    /// Per-instance translations for the instanced square mesh.
    pub fn square_offsets(&self) -> Vec<Vec3> {
        self.positions().collect()
    }

    /// Vertex positions for the point cloud.
    pub fn point_positions(&self) -> Vec<Vec3> {
        self.positions().collect()
    }

    /// Endpoint pairs for the crosshatch line grid.
    ///
    /// Returns `2 * count` segments: first the horizontal lines (constant y),
    /// then the vertical ones (constant x). Every line spans `±extent`
    /// regardless of the lattice spacing.
    pub fn line_segments(&self, extent: f32) -> Vec<[Vec3; 2]> {
        let horizontal = (0..self.count).map(|i| {
            let y = self.coordinate(i);
            [Vec3::new(-extent, y, 0.0), Vec3::new(extent, y, 0.0)]
        });
        let vertical = (0..self.count).map(|i| {
            let x = self.coordinate(i);
            [Vec3::new(x, -extent, 0.0), Vec3::new(x, extent, 0.0)]
        });
        horizontal.chain(vertical).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_count_rejected() {
        assert!(matches!(
            Lattice::new(0, 0.1),
            Err(VidgridError::InvalidGridCount(0))
        ));
        assert!(Lattice::new(MAX_GRID_COUNT + 1, 0.1).is_err());
        let largest = Lattice::new(MAX_GRID_COUNT, 0.1).unwrap();
        assert!(u32::try_from(largest.len()).is_ok());
    }

    #[test]
    fn test_default_lattice_corners() {
        let lattice = Lattice::new(40, 0.1).unwrap();
        assert_eq!(lattice.len(), 1600);

        let first = lattice.position(0);
        assert!((first.x + 1.95).abs() < 1e-5);
        assert!((first.y + 1.95).abs() < 1e-5);

        let last = lattice.position(lattice.len() - 1);
        assert!((last.x - 1.95).abs() < 1e-5);
        assert!((last.y - 1.95).abs() < 1e-5);
    }

    #[test]
    fn test_traversal_is_x_outer_y_inner() {
        let lattice = Lattice::new(3, 1.0).unwrap();
        assert_eq!(lattice.position(0), Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(lattice.position(1), Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(lattice.position(3), Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_line_segments_keep_fixed_extent() {
        let lattice = Lattice::new(40, 0.1).unwrap();
        let segments = lattice.line_segments(5.0);
        assert_eq!(segments.len(), 80);

        // Lines reach well past the lattice itself
        assert!(lattice.coordinate(39) < 5.0);
        for [a, b] in &segments[..40] {
            assert_eq!(a.x, -5.0);
            assert_eq!(b.x, 5.0);
            assert_eq!(a.y, b.y);
        }
        for [a, b] in &segments[40..] {
            assert_eq!(a.y, -5.0);
            assert_eq!(b.y, 5.0);
            assert_eq!(a.x, b.x);
        }
    }

    #[test]
    fn test_lines_pass_through_lattice_positions() {
        let lattice = Lattice::new(4, 0.1).unwrap();
        let segments = lattice.line_segments(5.0);
        let p = lattice.position(6);
        assert!(segments[..4].iter().any(|[a, _]| (a.y - p.y).abs() < 1e-6));
        assert!(segments[4..].iter().any(|[a, _]| (a.x - p.x).abs() < 1e-6));
    }

    proptest! {
        #[test]
        fn prop_squares_and_points_align(count in 1u32..64, spacing in 0.01f32..1.0) {
            let lattice = Lattice::new(count, spacing).unwrap();
            let squares = lattice.square_offsets();
            let points = lattice.point_positions();
            let expected = (count as usize) * (count as usize);

            prop_assert_eq!(squares.len(), expected);
            prop_assert_eq!(points.len(), expected);
            for (s, p) in squares.iter().zip(&points) {
                prop_assert!((s.x - p.x).abs() < 1e-6);
                prop_assert!((s.y - p.y).abs() < 1e-6);
            }
        }

        #[test]
        fn prop_lattice_is_centred(count in 1u32..64, spacing in 0.01f32..1.0) {
            let lattice = Lattice::new(count, spacing).unwrap();
            let sum = lattice.positions().fold(Vec3::ZERO, |acc, p| acc + p);
            let mean = sum / lattice.len() as f32;
            prop_assert!(mean.length() < 1e-3);
        }
    }
}
