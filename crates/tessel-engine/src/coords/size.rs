/// Width/height pair in application units.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size::new(0.0, 0.0);

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when both extents are positive and finite.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

impl From<Size> for glam::Vec2 {
    #[inline]
    fn from(s: Size) -> Self {
        glam::Vec2::new(s.width, s.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_needs_both_extents_positive() {
        assert!(Size::new(1280.0, 720.0).is_valid());
        assert!(!Size::new(0.0, 720.0).is_valid());
        assert!(!Size::new(1280.0, 0.0).is_valid());
        assert!(!Size::ZERO.is_valid());
        assert!(!Size::new(f32::INFINITY, 1.0).is_valid());
    }
}
