use std::cell::Cell;

use glam::{Mat4, Vec3};

/// Orthographic projection volume.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrthoBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthoBounds {
    pub const DEFAULT_NEAR: f32 = -1000.0;
    pub const DEFAULT_FAR: f32 = 1000.0;

    /// Volume centered on the origin spanning `width × height`.
    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            left: -width / 2.0,
            right: width / 2.0,
            bottom: -height / 2.0,
            top: height / 2.0,
            near: Self::DEFAULT_NEAR,
            far: Self::DEFAULT_FAR,
        }
    }

    /// Right-handed orthographic matrix with a `[0, 1]` depth range.
    pub fn to_matrix(self) -> Mat4 {
        Mat4::orthographic_rh(self.left, self.right, self.bottom, self.top, self.near, self.far)
    }
}

/// 2D camera with an orthographic projection.
///
/// The view-projection matrix is cached and only recomputed after one of the
/// inputs (position, rotation, scale, projection) changed.
#[derive(Debug, Clone)]
pub struct OrthographicCamera {
    bounds: OrthoBounds,
    projection: Mat4,

    position: Vec3,
    rotation: f32,
    x_scale: f32,
    y_scale: f32,

    dirty: Cell<bool>,
    view: Cell<Mat4>,
    view_projection: Cell<Mat4>,
}

impl OrthographicCamera {
    pub fn new(bounds: OrthoBounds) -> Self {
        Self {
            bounds,
            projection: bounds.to_matrix(),
            position: Vec3::ZERO,
            rotation: 0.0,
            x_scale: 1.0,
            y_scale: 1.0,
            dirty: Cell::new(true),
            view: Cell::new(Mat4::IDENTITY),
            view_projection: Cell::new(Mat4::IDENTITY),
        }
    }

    /// Camera centered on the origin looking at a `width × height` area.
    pub fn with_size(width: f32, height: f32) -> Self {
        Self::new(OrthoBounds::centered(width, height))
    }

    pub fn bounds(&self) -> OrthoBounds {
        self.bounds
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn set_ortho_size(&mut self, width: f32, height: f32) {
        self.set_ortho_bounds(OrthoBounds::centered(width, height));
    }

    pub fn set_ortho_bounds(&mut self, bounds: OrthoBounds) {
        self.bounds = bounds;
        self.projection = bounds.to_matrix();
        self.dirty.set(true);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty.set(true);
    }

    /// Rotation about +Z in radians.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
        self.dirty.set(true);
    }

    pub fn scale(&self) -> (f32, f32) {
        (self.x_scale, self.y_scale)
    }

    pub fn set_scale(&mut self, x_scale: f32, y_scale: f32) {
        self.x_scale = x_scale;
        self.y_scale = y_scale;
        self.dirty.set(true);
    }

    /// Inverse of the camera's world transform.
    pub fn view(&self) -> Mat4 {
        self.recalculate_if_dirty();
        self.view.get()
    }

    pub fn view_projection(&self) -> Mat4 {
        self.recalculate_if_dirty();
        self.view_projection.get()
    }

    fn recalculate_if_dirty(&self) {
        if !self.dirty.get() {
            return;
        }

        let transform = Mat4::from_translation(self.position)
            * Mat4::from_rotation_z(self.rotation)
            * Mat4::from_scale(Vec3::new(self.x_scale, self.y_scale, 1.0));
        let view = transform.inverse();

        self.view.set(view);
        self.view_projection.set(self.projection * view);
        self.dirty.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn repeated_queries_are_bit_identical() {
        let mut cam = OrthographicCamera::with_size(1280.0, 720.0);
        cam.set_position(Vec3::new(12.5, -3.0, 0.0));
        cam.set_rotation(0.3);
        let a = cam.view_projection();
        let b = cam.view_projection();
        assert_eq!(a.to_cols_array(), b.to_cols_array());
    }

    #[test]
    fn position_change_is_visible_on_next_query() {
        let mut cam = OrthographicCamera::with_size(200.0, 100.0);
        let before = cam.view_projection();
        cam.set_position(Vec3::new(100.0, 0.0, 0.0));
        let after = cam.view_projection();
        assert_ne!(before, after);

        // The camera's position now lands at the center of clip space.
        let clip = after * Vec4::new(100.0, 0.0, 0.0, 1.0);
        assert!(clip.x.abs() < 1e-6 && clip.y.abs() < 1e-6);
    }

    #[test]
    fn projection_maps_bounds_to_clip_edges() {
        let cam = OrthographicCamera::with_size(640.0, 360.0);
        let clip = cam.view_projection() * Vec4::new(320.0, 180.0, 0.0, 1.0);
        assert!((clip.x - 1.0).abs() < 1e-6);
        assert!((clip.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn scale_zooms_out() {
        let mut cam = OrthographicCamera::with_size(100.0, 100.0);
        cam.set_scale(2.0, 2.0);
        // At scale 2 the visible area doubles: x = 100 is now the right edge.
        let clip = cam.view_projection() * Vec4::new(100.0, 0.0, 0.0, 1.0);
        assert!((clip.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn higher_z_maps_to_nearer_depth() {
        let cam = OrthographicCamera::with_size(1280.0, 720.0);
        let sprite = cam.view_projection() * Vec4::new(0.0, 0.0, 0.9, 1.0);
        let rect = cam.view_projection() * Vec4::new(0.0, 0.0, 0.8, 1.0);

        // The quad pipeline depth-tests with `Less` against a 1.0 clear.
        assert!(sprite.z < rect.z);
        for depth in [sprite.z, rect.z] {
            assert!((0.0..1.0).contains(&depth));
        }
        assert!((rect.z - 0.4996).abs() < 1e-6);
    }

    #[test]
    fn reprojection_marks_cache_dirty() {
        let mut cam = OrthographicCamera::with_size(100.0, 100.0);
        let before = cam.view_projection();
        cam.set_ortho_size(200.0, 200.0);
        assert_ne!(before, cam.view_projection());
        assert_eq!(cam.bounds(), OrthoBounds::centered(200.0, 200.0));
    }
}
