//! Scene graph description: the four layered elements and their transforms.

use glam::{EulerRot, Mat4, Vec2, Vec3};

use crate::error::Result;
use crate::lattice::Lattice;
use crate::options::Options;

/// The visual elements of the sketch, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Unit quad textured with the live video.
    VideoPlane,
    /// Faint crosshatch of line segments.
    LineGrid,
    /// Instanced mesh of small squares reacting to the pointer.
    SquareGrid,
    /// One point per lattice cell.
    PointCloud,
}

impl ElementKind {
    /// All elements, back to front.
    pub const ALL: [ElementKind; 4] = [
        ElementKind::VideoPlane,
        ElementKind::LineGrid,
        ElementKind::SquareGrid,
        ElementKind::PointCloud,
    ];

    /// Z offset that layers the element in front of the ones drawn before it.
    pub fn depth_offset(self) -> f32 {
        match self {
            ElementKind::VideoPlane => 0.0,
            ElementKind::LineGrid => 0.005,
            ElementKind::SquareGrid => 0.006,
            ElementKind::PointCloud => 0.01,
        }
    }
}

/// Corners of an axis-aligned `size × size` quad centred on the origin,
/// counter-clockwise from bottom-left.
pub fn quad_corners(size: f32) -> [Vec3; 4] {
    let h = size / 2.0;
    [
        Vec3::new(-h, -h, 0.0),
        Vec3::new(h, -h, 0.0),
        Vec3::new(h, h, 0.0),
        Vec3::new(-h, h, 0.0),
    ]
}

/// Texture coordinates matching [`quad_corners`] (v grows downwards).
pub const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

/// Two triangles over [`quad_corners`].
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Scene state: the lattice the geometry is built from plus the transforms
/// that change at runtime (parallax rotation and plane scale).
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGraph {
    lattice: Lattice,
    line_extent: f32,
    rotation: Vec3,
    plane_scale: Vec3,
}

impl SceneGraph {
    /// Builds the scene description once from options.
    pub fn build(options: &Options) -> Result<Self> {
        let lattice = Lattice::new(options.grid.count, options.grid.spacing)?;
        log::debug!(
            "scene lattice: {0}x{0} cells, spacing {1}",
            lattice.count(),
            lattice.spacing()
        );
        Ok(Self {
            lattice,
            line_extent: options.grid.line_extent,
            rotation: Vec3::ZERO,
            plane_scale: Vec3::ONE,
        })
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn line_extent(&self) -> f32 {
        self.line_extent
    }

    /// Euler rotation (XYZ order) applied to the whole scene.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Replaces the x/y scene rotation; not accumulated across calls.
    pub fn set_rotation(&mut self, rotation: Vec2) {
        self.rotation = Vec3::new(rotation.x, rotation.y, 0.0);
    }

    pub fn plane_scale(&self) -> Vec3 {
        self.plane_scale
    }

    pub fn set_plane_scale(&mut self, scale: Vec3) {
        self.plane_scale = scale;
    }

    /// Rotation of the scene root.
    pub fn scene_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// World transform of one element: scene rotation, then depth offset,
    /// then the element's own scale.
    pub fn model_matrix(&self, kind: ElementKind) -> Mat4 {
        let scale = match kind {
            ElementKind::VideoPlane => self.plane_scale,
            _ => Vec3::ONE,
        };
        self.scene_matrix()
            * Mat4::from_translation(Vec3::new(0.0, 0.0, kind.depth_offset()))
            * Mat4::from_scale(scale)
    }

    /// Quad geometry for one square instance.
    pub fn square_corners(&self) -> [Vec3; 4] {
        quad_corners(self.lattice.spacing())
    }

    /// Instance translations for the square grid.
    pub fn square_offsets(&self) -> Vec<Vec3> {
        self.lattice.square_offsets()
    }

    /// Point cloud positions.
    pub fn point_positions(&self) -> Vec<Vec3> {
        self.lattice.point_positions()
    }

    /// Flattened line-list vertices (two per segment).
    pub fn line_vertices(&self) -> Vec<Vec3> {
        self.lattice
            .line_segments(self.line_extent)
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> SceneGraph {
        SceneGraph::build(&Options::default()).unwrap()
    }

    #[test]
    fn test_layers_increase_in_draw_order() {
        let offsets: Vec<f32> = ElementKind::ALL.iter().map(|k| k.depth_offset()).collect();
        assert_eq!(offsets, vec![0.0, 0.005, 0.006, 0.01]);
    }

    #[test]
    fn test_element_counts() {
        let scene = scene();
        assert_eq!(scene.square_offsets().len(), 1600);
        assert_eq!(scene.point_positions().len(), 1600);
        assert_eq!(scene.line_vertices().len(), 2 * 2 * 40);
    }

    #[test]
    fn test_square_size_matches_spacing() {
        let corners = scene().square_corners();
        assert!((corners[2].x - corners[0].x - 0.1).abs() < 1e-6);
        assert!((corners[2].y - corners[0].y - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_model_matrix_layers_and_scale() {
        let mut scene = scene();
        scene.set_plane_scale(Vec3::new(2.0, 1.0, 1.0));

        let plane = scene.model_matrix(ElementKind::VideoPlane);
        assert_eq!(plane.transform_point3(Vec3::new(0.5, 0.5, 0.0)), Vec3::new(1.0, 0.5, 0.0));

        let points = scene.model_matrix(ElementKind::PointCloud);
        assert_eq!(points.transform_point3(Vec3::ZERO), Vec3::new(0.0, 0.0, 0.01));
        // Only the plane is scaled
        assert_eq!(points.transform_point3(Vec3::X).x, 1.0);
    }

    #[test]
    fn test_rotation_is_replaced_not_accumulated() {
        let mut scene = scene();
        scene.set_rotation(Vec2::new(0.1, -0.1));
        scene.set_rotation(Vec2::new(0.02, 0.03));
        assert_eq!(scene.rotation(), Vec3::new(0.02, 0.03, 0.0));
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        assert_eq!(scene().scene_matrix(), Mat4::IDENTITY);
    }
}
