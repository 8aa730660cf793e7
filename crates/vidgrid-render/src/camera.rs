//! Perspective camera, orbit navigation and pointer ray construction.

use glam::{Mat4, Vec2, Vec3};
use vidgrid_core::{LayoutOptions, Ray};

/// A perspective camera orbiting a target, initially looking down -Z.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Camera {
    /// Creates a camera with default settings.
    #[must_use]
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 2.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 70f32.to_radians(),
            aspect_ratio,
            near: 0.001,
            far: 1000.0,
        }
    }

    /// Creates a camera placed at `camera_distance` on +Z.
    #[must_use]
    pub fn from_layout(options: &LayoutOptions, aspect_ratio: f32) -> Self {
        let mut camera = Self::new(aspect_ratio);
        camera.position = Vec3::new(0.0, 0.0, options.camera_distance);
        camera.set_near(options.near);
        camera.set_far(options.far);
        camera
    }

    /// Sets the aspect ratio.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Returns the projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Returns the camera's forward direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Distance from the camera to its target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Orbits the camera around the target, keeping its distance.
    ///
    /// `delta_x` turns around the up axis, `delta_y` tilts towards the poles,
    /// which are never reached.
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        let offset = self.position - self.target;
        let radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta -= delta_x;
        phi = (phi - delta_y).clamp(0.01, std::f32::consts::PI - 0.01);

        self.position = self.target
            + Vec3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );
    }

    /// Moves the camera towards (positive) or away from the target.
    pub fn zoom(&mut self, delta: f32) {
        let direction = self.forward();
        let distance = (self.distance() - delta).max(0.1);
        self.position = self.target - direction * distance;
    }

    /// Ray from the camera through a point given in NDC.
    ///
    /// The direction is built in view space from the field of view, which
    /// stays precise even with a tiny near plane.
    #[must_use]
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let half_height = (self.fov * 0.5).tan();
        let view_dir = Vec3::new(
            ndc.x * half_height * self.aspect_ratio,
            ndc.y * half_height,
            -1.0,
        );
        let direction = self
            .view_matrix()
            .inverse()
            .transform_vector3(view_dir)
            .normalize();
        Ray::new(self.position, direction)
    }

    /// Sets the field of view in radians.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(0.1, std::f32::consts::PI - 0.1);
    }

    /// Returns FOV in degrees.
    #[must_use]
    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }

    /// Sets FOV from degrees.
    pub fn set_fov_degrees(&mut self, degrees: f32) {
        self.set_fov(degrees.to_radians());
    }

    /// Sets the near clipping plane.
    pub fn set_near(&mut self, near: f32) {
        self.near = near.max(1e-4);
    }

    /// Sets the far clipping plane.
    pub fn set_far(&mut self, far: f32) {
        self.far = far.max(self.near + 0.1);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_camera_defaults() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(camera.forward(), Vec3::NEG_Z);
        assert!((camera.fov_degrees() - 70.0).abs() < 1e-3);
    }

    #[test]
    fn test_from_layout_uses_distance() {
        let options = LayoutOptions {
            camera_distance: 3.5,
            ..LayoutOptions::default()
        };
        let camera = Camera::from_layout(&options, 1.0);
        assert_eq!(camera.position.z, 3.5);
        assert_eq!(camera.near, 0.001);
    }

    #[test]
    fn test_centre_ray_looks_forward() {
        let camera = Camera::new(1.5);
        let ray = camera.ray_from_ndc(Vec2::ZERO);
        assert_eq!(ray.origin, camera.position);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_edge_ray_matches_projection() {
        let mut camera = Camera::new(2.0);
        camera.set_fov_degrees(40.0);

        let ray = camera.ray_from_ndc(Vec2::new(1.0, -1.0));
        // Any point along the ray projects back to the same NDC corner
        let p = ray.at(3.0);
        let clip = camera.view_projection_matrix() * p.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!((ndc.x - 1.0).abs() < 1e-4);
        assert!((ndc.y + 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_orbit_keeps_distance_and_target() {
        let mut camera = Camera::new(1.0);
        camera.orbit(0.4, 0.3);
        assert!((camera.distance() - 2.0).abs() < 1e-5);
        assert!(camera.position.x < 0.0);
        assert!(camera.position.y > 0.0);

        // The centre ray still passes through the target
        let ray = camera.ray_from_ndc(Vec2::ZERO);
        let to_target = camera.target - ray.origin;
        assert!(ray.direction.cross(to_target).length() < 1e-5);
        assert!(ray.direction.dot(camera.forward()) > 0.999);
    }

    #[test]
    fn test_orbit_stops_short_of_the_pole() {
        let mut camera = Camera::new(1.0);
        camera.orbit(0.0, 10.0);
        assert!(camera.position.y < camera.distance());
        assert!(camera.view_matrix().is_finite());
    }

    #[test]
    fn test_zoom_moves_along_view_axis() {
        let mut camera = Camera::new(1.0);
        camera.zoom(0.5);
        assert!((camera.position - Vec3::new(0.0, 0.0, 1.5)).length() < 1e-6);

        camera.zoom(100.0);
        assert!((camera.distance() - 0.1).abs() < 1e-6);
        assert_eq!(camera.forward(), Vec3::NEG_Z);
    }

    proptest! {
        #[test]
        fn prop_rays_reproject_to_their_ndc(
            x in -1.0f32..1.0,
            y in -1.0f32..1.0,
            aspect in 0.3f32..3.0,
        ) {
            let camera = Camera::new(aspect);
            let p = camera.ray_from_ndc(Vec2::new(x, y)).at(2.0);
            let clip = camera.view_projection_matrix() * p.extend(1.0);
            prop_assert!((clip.x / clip.w - x).abs() < 1e-3);
            prop_assert!((clip.y / clip.w - y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_set_fov_clamping() {
        let mut camera = Camera::new(1.0);
        camera.set_fov(0.0);
        assert!(camera.fov >= 0.1);

        camera.set_fov(std::f32::consts::PI);
        assert!(camera.fov < std::f32::consts::PI);
    }

    #[test]
    fn test_fov_degrees_conversion() {
        let mut camera = Camera::new(1.0);
        camera.set_fov_degrees(25.0);
        assert!((camera.fov_degrees() - 25.0).abs() < 1e-3);
    }
}
