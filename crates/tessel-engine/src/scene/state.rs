use crate::coords::Size;
use crate::paint::Color;
use crate::render::OrthographicCamera;

/// State every scene carries: logical size, cameras, background.
///
/// The default camera always tracks `size`. A scene may install its own
/// camera, which then takes precedence when rendering.
#[derive(Debug, Clone)]
pub struct SceneState {
    size: Size,
    camera: Option<OrthographicCamera>,
    default_camera: OrthographicCamera,

    /// Color the backbuffer is cleared to before the scene renders.
    pub background_color: Color,
}

impl SceneState {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            camera: None,
            default_camera: OrthographicCamera::with_size(size.width, size.height),
            background_color: Color::GRAY,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Resizes the scene and reprojects both cameras to `±w/2, ±h/2`.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        if let Some(camera) = self.camera.as_mut() {
            camera.set_ortho_size(size.width, size.height);
        }
        self.default_camera.set_ortho_size(size.width, size.height);
    }

    pub fn camera(&self) -> Option<&OrthographicCamera> {
        self.camera.as_ref()
    }

    pub fn camera_mut(&mut self) -> Option<&mut OrthographicCamera> {
        self.camera.as_mut()
    }

    pub fn set_camera(&mut self, camera: Option<OrthographicCamera>) {
        self.camera = camera;
    }

    pub fn default_camera(&self) -> &OrthographicCamera {
        &self.default_camera
    }

    /// The scene camera if one is set, else the default camera.
    pub fn active_camera(&self) -> &OrthographicCamera {
        self.camera.as_ref().unwrap_or(&self.default_camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::OrthoBounds;
    use glam::Vec3;

    #[test]
    fn new_state_uses_default_camera_and_gray_background() {
        let state = SceneState::new(Size::new(1280.0, 720.0));
        assert!(state.camera().is_none());
        assert_eq!(state.background_color, Color::GRAY);
        assert_eq!(state.default_camera().bounds(), OrthoBounds::centered(1280.0, 720.0));
        assert!(std::ptr::eq(state.active_camera(), state.default_camera()));
    }

    #[test]
    fn set_size_reprojects_both_cameras() {
        let mut state = SceneState::new(Size::new(1280.0, 720.0));
        state.set_camera(Some(OrthographicCamera::with_size(1280.0, 720.0)));

        state.set_size(Size::new(640.0, 360.0));

        let expected = OrthoBounds {
            left: -320.0,
            right: 320.0,
            bottom: -180.0,
            top: 180.0,
            near: -1000.0,
            far: 1000.0,
        };
        assert_eq!(state.size(), Size::new(640.0, 360.0));
        assert_eq!(state.default_camera().bounds(), expected);
        assert_eq!(state.camera().map(|c| c.bounds()), Some(expected));
    }

    #[test]
    fn scene_camera_takes_precedence() {
        let mut state = SceneState::new(Size::new(100.0, 100.0));
        let mut cam = OrthographicCamera::with_size(100.0, 100.0);
        cam.set_position(Vec3::new(10.0, 0.0, 0.0));
        state.set_camera(Some(cam));

        assert_eq!(state.active_camera().position(), Vec3::new(10.0, 0.0, 0.0));

        if let Some(cam) = state.camera_mut() {
            cam.set_position(Vec3::new(20.0, 5.0, 0.0));
        }
        assert_eq!(state.active_camera().position(), Vec3::new(20.0, 5.0, 0.0));

        state.set_camera(None);
        assert_eq!(state.active_camera().position(), Vec3::ZERO);
    }
}
