//! The sketch context: all per-run state and the per-frame tick.

use vidgrid_core::{
    intersect_unit_quad, CancellationToken, ElementKind, FrameClock, Layout, Materials, Options,
    PickResult, PointerState, Result, SceneGraph, Viewport,
};
use vidgrid_render::Camera;

/// Radians of orbit per pixel of pointer drag.
const ORBIT_SPEED: f32 = 0.01;

/// Fraction of the camera distance covered by one scroll line.
const ZOOM_SPEED: f32 = 0.1;

/// Owns everything the frame loop reads and writes.
///
/// Pointer, viewport and material state are only written through `&mut self`
/// on the event-loop thread.
#[derive(Debug, Clone)]
pub struct Sketch {
    options: Options,
    layout: Layout,
    pointer: PointerState,
    clock: FrameClock,
    camera: Camera,
    scene: SceneGraph,
    materials: Materials,
    pick: PickResult,
    token: CancellationToken,
}

impl Sketch {
    /// Builds the scene once and applies the initial layout.
    pub fn new(options: Options, width: u32, height: u32) -> Result<Self> {
        options.validate()?;
        let viewport = Viewport::new(width, height)?;
        let layout = Layout::compute(viewport, &options.layout);

        let camera = Camera::from_layout(&options.layout, layout.aspect);
        let scene = SceneGraph::build(&options)?;
        let materials = Materials::new(options.animation.point_size);
        let clock = FrameClock::new(options.animation.time_step);

        let mut sketch = Self {
            options,
            layout,
            pointer: PointerState::default(),
            clock,
            camera,
            scene,
            materials,
            pick: PickResult::Miss,
            token: CancellationToken::new(),
        };
        sketch.apply_layout(layout);
        Ok(sketch)
    }

    /// Recomputes the layout for a new viewport size.
    ///
    /// A zero-sized viewport (minimised window) is rejected and leaves every
    /// derived value untouched.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let viewport = Viewport::new(width, height)?;
        let layout = Layout::compute(viewport, &self.options.layout);
        self.apply_layout(layout);
        log::debug!(
            "resized to {}x{}: fov {:.2}, plane scale {}",
            width,
            height,
            layout.fov_degrees,
            layout.plane_scale
        );
        Ok(())
    }

    fn apply_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.camera.set_aspect_ratio(layout.aspect);
        self.camera.set_fov_degrees(layout.fov_degrees);
        self.scene.set_plane_scale(layout.plane_scale);
        self.materials.apply_layout(&layout);
    }

    /// Records a pointer move given in window pixels.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        let viewport = self.layout.viewport;
        self.pointer.update(x, y, viewport.width, viewport.height);
    }

    /// Orbits the camera around the scene by a drag of `delta_x`, `delta_y`
    /// window pixels.
    pub fn orbit_camera(&mut self, delta_x: f64, delta_y: f64) {
        self.camera
            .orbit(delta_x as f32 * ORBIT_SPEED, delta_y as f32 * ORBIT_SPEED);
    }

    /// Zooms by `scroll` lines; positive moves towards the scene.
    pub fn zoom_camera(&mut self, scroll: f32) {
        let step = self.camera.distance() * ZOOM_SPEED;
        self.camera.zoom(scroll * step);
    }

    /// Advances one frame: clock, pick, parallax rotation, materials.
    ///
    /// The pick uses the plane transform from the previous tick (the one
    /// last rendered); the rotation is updated afterwards.
    pub fn tick(&mut self) -> PickResult {
        let time = self.clock.advance();

        let ray = self.camera.ray_from_ndc(self.pointer.ndc());
        let plane_model = self.scene.model_matrix(ElementKind::VideoPlane);
        self.pick = PickResult::from_hit(intersect_unit_quad(&ray, plane_model));

        self.scene
            .set_rotation(self.pointer.parallax_rotation(self.options.animation.parallax_divisor));

        self.materials.apply_frame(time, self.pick);
        self.pick
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Accumulated animation time.
    pub fn time(&self) -> f32 {
        self.clock.time()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn materials(&self) -> &Materials {
        &self.materials
    }

    /// Result of the last pick.
    pub fn pick(&self) -> PickResult {
        self.pick
    }

    /// Token that stops the frame loop; clones share the flag.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }
}

#[cfg(test)]
mod tests {
    use vidgrid_core::{Vec2, Vec3};

    use super::*;

    #[test]
    fn test_initial_layout_applied() {
        let sketch = Sketch::new(Options::default(), 800, 600).unwrap();
        assert!((sketch.camera().aspect_ratio - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(sketch.materials().plane.resolution, sketch.layout().resolution);
        assert_eq!(sketch.scene().plane_scale(), sketch.layout().plane_scale);
        assert_eq!(sketch.time(), 0.0);
    }

    #[test]
    fn test_zero_resize_keeps_state() {
        let mut sketch = Sketch::new(Options::default(), 800, 600).unwrap();
        let before = *sketch.layout();
        assert!(sketch.resize(0, 600).is_err());
        assert_eq!(*sketch.layout(), before);
    }

    #[test]
    fn test_pointer_uses_current_viewport() {
        let mut sketch = Sketch::new(Options::default(), 800, 600).unwrap();
        sketch.pointer_moved(400.0, 300.0);
        assert_eq!(sketch.pointer().ndc(), Vec2::ZERO);

        sketch.resize(1600, 600).unwrap();
        sketch.pointer_moved(1600.0, 0.0);
        assert_eq!(sketch.pointer().ndc(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_centre_pick_hits_plane_origin() {
        let mut sketch = Sketch::new(Options::default(), 800, 600).unwrap();
        sketch.pointer_moved(400.0, 300.0);
        let pick = sketch.tick();
        assert!(pick.is_hit());
        assert!(pick.point().length() < 1e-5);
        assert_eq!(sketch.materials().squares.mouse, pick.point());
    }

    #[test]
    fn test_rotation_follows_pointer() {
        let mut sketch = Sketch::new(Options::default(), 800, 600).unwrap();
        sketch.pointer_moved(800.0, 0.0);
        sketch.tick();
        let rotation = sketch.scene().rotation();
        assert!((rotation.x + 0.1).abs() < 1e-6);
        assert!((rotation.y - 0.1).abs() < 1e-6);
        assert_eq!(rotation.z, 0.0);

        sketch.pointer_moved(400.0, 300.0);
        sketch.tick();
        assert_eq!(sketch.scene().rotation(), Vec3::ZERO);
    }

    #[test]
    fn test_orbited_camera_still_picks_the_plane() {
        let mut sketch = Sketch::new(Options::default(), 800, 600).unwrap();
        sketch.pointer_moved(400.0, 300.0);
        sketch.orbit_camera(30.0, 20.0);
        assert!(sketch.camera().position.x < 0.0);

        let pick = sketch.tick();
        assert!(pick.is_hit());
        assert!(pick.point().length() < 1e-4);
    }

    #[test]
    fn test_zoom_scales_with_distance() {
        let mut sketch = Sketch::new(Options::default(), 800, 600).unwrap();
        sketch.zoom_camera(1.0);
        assert!((sketch.camera().distance() - 1.8).abs() < 1e-5);
        sketch.zoom_camera(-1.0);
        assert!((sketch.camera().distance() - 1.98).abs() < 1e-5);

        // Resizing keeps the navigated camera position
        let position = sketch.camera().position;
        sketch.resize(1024, 768).unwrap();
        assert_eq!(sketch.camera().position, position);
    }

    #[test]
    fn test_token_shared_with_clones() {
        let sketch = Sketch::new(Options::default(), 64, 64).unwrap();
        let token = sketch.cancellation_token().clone();
        token.cancel();
        assert!(sketch.cancellation_token().is_cancelled());
    }
}
