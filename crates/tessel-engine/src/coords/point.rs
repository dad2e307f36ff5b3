use core::ops::{Add, Mul, Sub};

/// 2D point (or offset) in application units.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Returns the unit vector in the same direction, or zero for a zero-length input.
    #[inline]
    pub fn normalized_or_zero(self) -> Point {
        let len = self.length();
        if len == 0.0 { Point::ZERO } else { Point::new(self.x / len, self.y / len) }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<Point> for glam::Vec2 {
    #[inline]
    fn from(p: Point) -> Self {
        glam::Vec2::new(p.x, p.y)
    }
}

impl From<glam::Vec2> for Point {
    #[inline]
    fn from(v: glam::Vec2) -> Self {
        Point::new(v.x, v.y)
    }
}
