//! Ray picking against the video plane.

use glam::{Mat4, Vec3};

/// A ray in world space. `direction` is expected to be normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Where the pointer ray met the video plane this frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PickResult {
    /// World-space intersection point.
    Hit(Vec3),
    /// No intersection.
    #[default]
    Miss,
}

impl PickResult {
    /// Builds a result from an optional hit.
    pub fn from_hit(hit: Option<Vec3>) -> Self {
        hit.map_or(Self::Miss, Self::Hit)
    }

    /// Value for the mouse uniform; a miss maps to the zero vector.
    pub fn point(self) -> Vec3 {
        match self {
            Self::Hit(point) => point,
            Self::Miss => Vec3::ZERO,
        }
    }

    pub fn is_hit(self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

/// Intersects a ray with the unit quad `[-0.5, 0.5]²` on the local z = 0
/// plane of `model`.
///
/// Both faces count. Returns the first (and only) world-space hit point, or
/// `None` when the ray is parallel to the quad, points away from it, or
/// meets its plane outside the quad.
pub fn intersect_unit_quad(ray: &Ray, model: Mat4) -> Option<Vec3> {
    let inverse = model.inverse();
    let local_origin = inverse.transform_point3(ray.origin);
    let local_dir = inverse.transform_vector3(ray.direction);

    if local_dir.z.abs() < 1e-9 {
        return None;
    }

    // The local parameter equals the world one: the affine map is linear in t
    let t = -local_origin.z / local_dir.z;
    if t < 0.0 {
        return None;
    }

    let local_hit = local_origin + local_dir * t;
    if local_hit.x.abs() > 0.5 || local_hit.y.abs() > 0.5 {
        return None;
    }

    Some(ray.at(t))
}
