//! 2D integer point for positions and offsets

use std::ops::{Add, AddAssign, Neg, Sub};
use serde::{Deserialize, Serialize};

/// 2D point for positions and offsets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin
    pub const ZERO: Point = Point { x: 0, y: 0 };

    /// Create a new point
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise clamp into `[min, max]`
    ///
    /// When an axis has `max < min` the minimum wins.
    #[inline]
    pub fn clamp(self, min: Point, max: Point) -> Self {
        Self::new(
            self.x.min(max.x).max(min.x),
            self.y.min(max.y).max(min.y),
        )
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, other: Point) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(10, 20);
        let b = Point::new(3, -4);
        assert_eq!(a + b, Point::new(13, 16));
        assert_eq!(a - b, Point::new(7, 24));
        assert_eq!(-b, Point::new(-3, 4));
    }

    #[test]
    fn test_point_clamp() {
        let p = Point::new(-5, 500);
        assert_eq!(p.clamp(Point::ZERO, Point::new(100, 100)), Point::new(0, 100));
    }

    #[test]
    fn test_point_clamp_inverted_range_prefers_min() {
        let p = Point::new(50, 50);
        assert_eq!(p.clamp(Point::new(20, 0), Point::new(10, 100)), Point::new(20, 50));
    }
}
