use super::{Point, Size};

/// Axis-aligned rectangle given by an origin corner and a (possibly negative) size.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.size.width
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.size.height
    }

    #[inline]
    pub fn min_x(self) -> f32 {
        self.origin.x.min(self.origin.x + self.size.width)
    }

    #[inline]
    pub fn max_x(self) -> f32 {
        self.origin.x.max(self.origin.x + self.size.width)
    }

    #[inline]
    pub fn mid_x(self) -> f32 {
        self.origin.x + self.size.width * 0.5
    }

    #[inline]
    pub fn min_y(self) -> f32 {
        self.origin.y.min(self.origin.y + self.size.height)
    }

    #[inline]
    pub fn max_y(self) -> f32 {
        self.origin.y.max(self.origin.y + self.size.height)
    }

    #[inline]
    pub fn mid_y(self) -> f32 {
        self.origin.y + self.size.height * 0.5
    }

    #[inline]
    pub fn center(self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        Rect::new(
            self.min_x(),
            self.min_y(),
            self.size.width.abs(),
            self.size.height.abs(),
        )
    }
}
