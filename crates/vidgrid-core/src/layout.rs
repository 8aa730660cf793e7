//! Layout/resize policy: cover-fit vector, camera field of view and plane scale.

use glam::{Vec3, Vec4};

use crate::error::{Result, VidgridError};
use crate::options::LayoutOptions;

/// Viewport size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport, rejecting zero-sized dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(VidgridError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Everything derived from the viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// The viewport this layout was computed for.
    pub viewport: Viewport,
    /// Camera aspect ratio (width / height).
    pub aspect: f32,
    /// Cover vector: (width, height, a1, a2).
    pub resolution: Vec4,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Scale applied to the unit video plane.
    pub plane_scale: Vec3,
}

impl Layout {
    /// Computes the full layout for a viewport.
    pub fn compute(viewport: Viewport, options: &LayoutOptions) -> Self {
        Self {
            viewport,
            aspect: viewport.aspect(),
            resolution: cover_resolution(viewport, options.image_aspect),
            fov_degrees: fov_degrees(options.target_height, options.camera_distance),
            plane_scale: plane_scale(viewport),
        }
    }
}

/// Cover-fit scale factors `(a1, a2)` for an image of aspect
/// `image_aspect` (height / width) drawn over the viewport.
///
/// Exactly one factor is 1; the other is the ratio that makes the image
/// cover the viewport without stretching.
pub fn cover_factors(viewport: Viewport, image_aspect: f32) -> (f32, f32) {
    let w = viewport.width as f32;
    let h = viewport.height as f32;
    if h / w > image_aspect {
        ((w / h) * image_aspect, 1.0)
    } else {
        (1.0, (h / w) / image_aspect)
    }
}

/// The 4-component cover vector: `(width, height, a1, a2)`.
pub fn cover_resolution(viewport: Viewport, image_aspect: f32) -> Vec4 {
    let (a1, a2) = cover_factors(viewport, image_aspect);
    Vec4::new(viewport.width as f32, viewport.height as f32, a1, a2)
}

/// Vertical field of view (degrees) that frames `height` world units at
/// `distance`.
pub fn fov_degrees(height: f32, distance: f32) -> f32 {
    (2.0 * (height / (2.0 * distance)).atan()).to_degrees()
}

/// Scale for the unit plane so it keeps matching the view frustum.
///
/// Landscape viewports stretch x by the aspect ratio, portrait ones stretch
/// y by its inverse. The other axis stays at 1.
pub fn plane_scale(viewport: Viewport) -> Vec3 {
    let aspect = viewport.aspect();
    if aspect > 1.0 {
        Vec3::new(aspect, 1.0, 1.0)
    } else {
        Vec3::new(1.0, 1.0 / aspect, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const IMAGE_ASPECT: f32 = 1080.0 / 1920.0;

    #[test]
    fn test_zero_viewport_rejected() {
        assert!(Viewport::new(0, 600).is_err());
        assert!(Viewport::new(800, 0).is_err());
    }

    #[test]
    fn test_fov_for_default_framing() {
        let fov = fov_degrees(0.9, 2.0);
        let expected = 2.0 * (0.9_f32 / 4.0).atan().to_degrees();
        assert!((fov - expected).abs() < 1e-4);
        assert!((fov - 25.36).abs() < 0.01);
    }

    #[test]
    fn test_landscape_wider_than_video() {
        // 4:1 is wider than 16:9, so the video is scaled along y
        let (a1, a2) = cover_factors(Viewport::new(1600, 400).unwrap(), IMAGE_ASPECT);
        assert_eq!(a1, 1.0);
        assert!((a2 - 0.25 / IMAGE_ASPECT).abs() < 1e-6);
    }

    #[test]
    fn test_portrait_is_scaled_along_x() {
        let (a1, a2) = cover_factors(Viewport::new(600, 800).unwrap(), IMAGE_ASPECT);
        assert!((a1 - 0.75 * IMAGE_ASPECT).abs() < 1e-6);
        assert_eq!(a2, 1.0);
    }

    #[test]
    fn test_plane_scale_landscape_and_portrait() {
        let wide = plane_scale(Viewport::new(1600, 600).unwrap());
        assert!((wide.x - 1600.0 / 600.0).abs() < 1e-6);
        assert_eq!(wide.y, 1.0);

        let tall = plane_scale(Viewport::new(600, 1200).unwrap());
        assert_eq!(tall.x, 1.0);
        assert!((tall.y - 2.0).abs() < 1e-6);

        let square = plane_scale(Viewport::new(500, 500).unwrap());
        assert_eq!(square, Vec3::ONE);
    }

    #[test]
    fn test_layout_resize_recomputes_everything() {
        let options = LayoutOptions::default();
        let before = Layout::compute(Viewport::new(800, 600).unwrap(), &options);
        let after = Layout::compute(Viewport::new(1600, 600).unwrap(), &options);

        assert!((after.aspect - 1600.0 / 600.0).abs() < 1e-6);
        assert!((after.plane_scale.x - 1600.0 / 600.0).abs() < 1e-6);
        assert_eq!(after.plane_scale.y, 1.0);
        assert_eq!(after.resolution.x, 1600.0);
        assert_eq!(after.resolution.y, 600.0);
        assert_eq!(before.fov_degrees, after.fov_degrees);
    }

    proptest! {
        #[test]
        fn prop_cover_branches(width in 1u32..8000, height in 1u32..8000) {
            let viewport = Viewport::new(width, height).unwrap();
            let resolution = cover_resolution(viewport, IMAGE_ASPECT);
            let (w, h) = (width as f32, height as f32);

            prop_assert_eq!(resolution.x, w);
            prop_assert_eq!(resolution.y, h);
            if h / w > IMAGE_ASPECT {
                prop_assert_eq!(resolution.w, 1.0);
                prop_assert!((resolution.z - (w / h) * IMAGE_ASPECT).abs() <= 1e-6 * resolution.z.max(1.0));
            } else {
                prop_assert_eq!(resolution.z, 1.0);
                prop_assert!((resolution.w - (h / w) / IMAGE_ASPECT).abs() <= 1e-6 * resolution.w.max(1.0));
            }
        }

        #[test]
        fn prop_cover_never_shrinks(width in 1u32..8000, height in 1u32..8000) {
            // Neither factor exceeds 1: the sampled UV window stays inside the image
            let (a1, a2) = cover_factors(Viewport::new(width, height).unwrap(), IMAGE_ASPECT);
            prop_assert!(a1 <= 1.0 + 1e-6);
            prop_assert!(a2 <= 1.0 + 1e-6);
        }
    }
}
