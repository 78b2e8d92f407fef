//! Geometry primitives
//!
//! Integer pixel coordinates, floating-point curve coordinates, rectangles
//! and the two-valued pixel colour.

use core::ops::{Add, Mul, Sub};

/// Lengths below this are treated as zero
pub const EPSILON: f32 = 0.0001;

/// Pixel colour
///
/// The model is strictly binary: ink (set bit) or paper (clear bit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Background, bit clear
    #[default]
    Paper,
    /// Foreground, bit set
    Ink,
}

impl Color {
    /// Whether this colour sets the bit
    pub const fn is_ink(self) -> bool {
        matches!(self, Color::Ink)
    }

    /// The opposite colour
    pub const fn inverted(self) -> Self {
        match self {
            Color::Ink => Color::Paper,
            Color::Paper => Color::Ink,
        }
    }

    /// Byte value with every pixel in this colour
    pub(crate) const fn fill_byte(self) -> u8 {
        match self {
            Color::Ink => 0xFF,
            Color::Paper => 0x00,
        }
    }
}

impl From<bool> for Color {
    fn from(ink: bool) -> Self {
        if ink {
            Color::Ink
        } else {
            Color::Paper
        }
    }
}

/// Integer point in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Floating-point point for curves and animation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length of the vector from the origin
    pub fn length(self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y)
    }

    /// Unit vector in the same direction, or zero for a degenerate vector
    pub fn normalized(self) -> PointF {
        let len = self.length();
        if len < EPSILON {
            return PointF::new(0.0, 0.0);
        }
        PointF::new(self.x / len, self.y / len)
    }

    /// Round to the nearest pixel (halves away from zero)
    pub fn to_point(self) -> Point {
        Point::new(libm::roundf(self.x) as i32, libm::roundf(self.y) as i32)
    }
}

impl From<Point> for PointF {
    fn from(p: Point) -> Self {
        PointF::new(p.x as f32, p.y as f32)
    }
}

impl Add for PointF {
    type Output = PointF;

    fn add(self, other: PointF) -> PointF {
        PointF::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for PointF {
    type Output = PointF;

    fn sub(self, other: PointF) -> PointF {
        PointF::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for PointF {
    type Output = PointF;

    fn mul(self, scalar: f32) -> PointF {
        PointF::new(self.x * scalar, self.y * scalar)
    }
}

/// Axis-aligned rectangle, half-open on the right and bottom edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn left(&self) -> i32 {
        self.x
    }

    pub const fn top(&self) -> i32 {
        self.y
    }

    /// First column past the rectangle
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    /// First row past the rectangle
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub const fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    pub const fn contains_point(&self, p: Point) -> bool {
        self.contains(p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_bool() {
        assert_eq!(Color::from(true), Color::Ink);
        assert_eq!(Color::from(false), Color::Paper);
        assert_eq!(Color::Ink.inverted(), Color::Paper);
    }

    #[test]
    fn test_pointf_arithmetic() {
        let a = PointF::new(1.0, 2.0);
        let b = PointF::new(4.0, 6.0);
        assert_eq!(b - a, PointF::new(3.0, 4.0));
        assert_eq!(a + b, PointF::new(5.0, 8.0));
        assert_eq!(a * 2.0, PointF::new(2.0, 4.0));
        assert_eq!((b - a).length(), 5.0);
    }

    #[test]
    fn test_normalized_degenerate_is_zero() {
        assert_eq!(PointF::new(0.0, 0.00001).normalized(), PointF::new(0.0, 0.0));
        let n = PointF::new(3.0, 4.0).normalized();
        assert!((n.x - 0.6).abs() < 1e-6);
        assert!((n.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_to_point_rounds_to_nearest() {
        assert_eq!(PointF::new(1.4, 1.6).to_point(), Point::new(1, 2));
        assert_eq!(PointF::new(-1.6, -0.4).to_point(), Point::new(-2, 0));
    }

    #[test]
    fn test_rect_half_open() {
        let r = Rect::new(10, 20, 5, 3);
        assert!(r.contains(10, 20));
        assert!(r.contains(14, 22));
        assert!(!r.contains(15, 22));
        assert!(!r.contains(14, 23));
        assert_eq!(r.right(), 15);
        assert_eq!(r.bottom(), 23);
    }
}
