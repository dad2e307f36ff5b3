use glam::{Mat4, Vec3};

use crate::coords::{Point, Rect, Size};
use crate::paint::Color;

/// Texture sampling parameters for a textured quad.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextureStyle {
    /// Texture coordinate multiplier; values above 1 repeat the texture.
    pub tiling_factor: f32,

    /// Tint color, mixed into the sampled color by `color_blend_factor`.
    pub tint: Color,

    /// 0 = pure texture color, 1 = texture color multiplied by `tint`.
    /// Clamped to [0, 1] in the fragment shader.
    pub color_blend_factor: f32,
}

impl Default for TextureStyle {
    fn default() -> Self {
        Self {
            tiling_factor: 1.0,
            tint: Color::WHITE,
            color_blend_factor: 0.0,
        }
    }
}

/// Builds a quad model transform: `translate × rotate_z × scale`.
///
/// The unit quad is centered on its origin, so `rotation` (radians) turns the
/// quad about its own center before it is placed at `position`.
pub fn quad_transform(position: Vec3, size: Size, rotation: f32) -> Mat4 {
    let translate = Mat4::from_translation(position);
    let scale = Mat4::from_scale(Vec3::new(size.width, size.height, 1.0));
    if rotation == 0.0 {
        translate * scale
    } else {
        translate * Mat4::from_rotation_z(rotation) * scale
    }
}

/// Quad drawing surface handed to [`crate::scene::Scene::render`].
///
/// Only the two transform-based operations are required; the positional
/// overloads build the transform with [`quad_transform`].
pub trait Renderer {
    type Texture;

    /// Solid-color quad.
    fn draw_quad(&mut self, transform: Mat4, color: Color);

    /// Textured quad.
    fn draw_textured_quad(&mut self, transform: Mat4, texture: &Self::Texture, style: TextureStyle);

    /// Axis-aligned solid quad centered at `position`, layered by `z`.
    fn draw_rect(&mut self, position: Point, z: f32, size: Size, color: Color) {
        let transform = quad_transform(Vec3::new(position.x, position.y, z), size, 0.0);
        self.draw_quad(transform, color);
    }

    /// Solid quad covering `rect` (origin corner plus size, either sign).
    fn fill_rect(&mut self, rect: Rect, z: f32, color: Color) {
        let rect = rect.normalized();
        self.draw_rect(rect.center(), z, rect.size, color);
    }

    /// Solid quad rotated by `rotation` radians about its center.
    fn draw_rotated_rect(&mut self, position: Point, z: f32, rotation: f32, size: Size, color: Color) {
        let transform = quad_transform(Vec3::new(position.x, position.y, z), size, rotation);
        self.draw_quad(transform, color);
    }

    /// Textured quad with default style (no tiling, no tint).
    fn draw_sprite(
        &mut self,
        position: Point,
        z: f32,
        rotation: f32,
        size: Size,
        texture: &Self::Texture,
    ) {
        self.draw_styled_sprite(position, z, rotation, size, texture, TextureStyle::default());
    }

    /// Textured quad rotated by `rotation` radians about its center.
    fn draw_styled_sprite(
        &mut self,
        position: Point,
        z: f32,
        rotation: f32,
        size: Size,
        texture: &Self::Texture,
        style: TextureStyle,
    ) {
        let transform = quad_transform(Vec3::new(position.x, position.y, z), size, rotation);
        self.draw_textured_quad(transform, texture, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec4, b: Vec4) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn center_maps_to_position() {
        let m = quad_transform(Vec3::new(10.0, 20.0, 0.5), Size::new(4.0, 2.0), 1.0);
        assert!(approx(m * Vec4::new(0.0, 0.0, 0.0, 1.0), Vec4::new(10.0, 20.0, 0.5, 1.0)));
    }

    #[test]
    fn unrotated_corner_is_scaled_then_translated() {
        let m = quad_transform(Vec3::new(10.0, 20.0, 0.0), Size::new(4.0, 2.0), 0.0);
        let corner = m * Vec4::new(0.5, 0.5, 0.0, 1.0);
        assert!(approx(corner, Vec4::new(12.0, 21.0, 0.0, 1.0)));
    }

    #[test]
    fn rotation_pivots_on_quad_center() {
        // Scale first: corner (0.5, 0.5) of a 4×2 quad sits at (2, 1) locally;
        // a quarter turn moves it to (-1, 2) before translation.
        let m = quad_transform(Vec3::new(10.0, 20.0, 0.0), Size::new(4.0, 2.0), FRAC_PI_2);
        let corner = m * Vec4::new(0.5, 0.5, 0.0, 1.0);
        assert!(approx(corner, Vec4::new(9.0, 22.0, 0.0, 1.0)));
    }

    #[test]
    fn default_style_is_untinted() {
        let style = TextureStyle::default();
        assert_eq!(style.tiling_factor, 1.0);
        assert_eq!(style.tint, Color::WHITE);
        assert_eq!(style.color_blend_factor, 0.0);
    }
}
