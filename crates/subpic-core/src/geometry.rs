//! Integer pixel geometry shared by frames, the size fitter and the mapper

use serde::{Deserialize, Serialize};

/// Width and height in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero or negative
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// A pixel position or offset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

/// Axis-aligned rectangle with exclusive right/bottom edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle of the given size anchored at the origin
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// True when the rectangle has no area
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Translate by `delta`, saturating at the i32 range
    pub fn offset(&mut self, delta: Point) {
        self.left = self.left.saturating_add(delta.x);
        self.right = self.right.saturating_add(delta.x);
        self.top = self.top.saturating_add(delta.y);
        self.bottom = self.bottom.saturating_add(delta.y);
    }

    /// Translated copy
    pub fn offset_by(mut self, delta: Point) -> Self {
        self.offset(delta);
        self
    }
}

/// `value * numerator / denominator` computed in 64 bits, rounded half away
/// from zero. Returns `None` for a zero denominator or an i32 overflow.
pub fn mul_div(value: i32, numerator: i32, denominator: i32) -> Option<i32> {
    if denominator == 0 {
        return None;
    }

    let product = i64::from(value) * i64::from(numerator);
    let divisor = i64::from(denominator);
    let magnitude = (product.abs() + divisor.abs() / 2) / divisor.abs();
    let quotient = if (product < 0) != (divisor < 0) {
        -magnitude
    } else {
        magnitude
    };

    i32::try_from(quotient).ok()
}

/// Round to nearest, halves away from zero
pub fn round_half_away(value: f64) -> i32 {
    value.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_emptiness() {
        assert!(Rect::default().is_empty());
        assert!(Rect::new(10, 10, 10, 20).is_empty());
        assert!(Rect::new(10, 10, 5, 20).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn test_rect_offset() {
        let rect = Rect::new(1, 2, 11, 22).offset_by(Point::new(-1, 3));
        assert_eq!(rect, Rect::new(0, 5, 10, 25));
        assert_eq!(rect.size(), Size::new(10, 20));
        assert_eq!(rect.top_left(), Point::new(0, 5));
    }

    #[test]
    fn test_rect_offset_saturates() {
        let rect = Rect::new(0, 0, i32::MAX, 10).offset_by(Point::new(5, i32::MIN));
        assert_eq!(rect, Rect::new(5, i32::MIN, i32::MAX, i32::MIN + 10));
        assert_eq!(Point::new(i32::MAX, 0) + Point::new(1, -1), Point::new(i32::MAX, -1));
    }

    #[test]
    fn test_mul_div_rounds_to_nearest() {
        assert_eq!(mul_div(1080, 1280, 1920), Some(720));
        assert_eq!(mul_div(1000, 2, 3), Some(667));
        assert_eq!(mul_div(3, 500, 1000), Some(2));
        assert_eq!(mul_div(-3, 500, 1000), Some(-2));
        assert_eq!(mul_div(5, 1, 3), Some(2));
        assert_eq!(mul_div(4, 1, 3), Some(1));
    }

    #[test]
    fn test_mul_div_failures() {
        assert_eq!(mul_div(10, 10, 0), None);
        assert_eq!(mul_div(i32::MAX, i32::MAX, 1), None);
    }

    #[test]
    fn test_round_half_away() {
        assert_eq!(round_half_away(2.5), 3);
        assert_eq!(round_half_away(-2.5), -3);
        assert_eq!(round_half_away(-170.67), -171);
        assert_eq!(round_half_away(1365.33), 1365);
    }
}
