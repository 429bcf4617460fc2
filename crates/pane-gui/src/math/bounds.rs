//! Clamp regions expressed as min/max corners

use serde::{Deserialize, Serialize};
use super::{Point, Rect, Size};

/// Clamp region an object's position and drawing are confined to
///
/// Unlike [`Rect`], a `Bounds` may be empty (`max < min` on an axis), which
/// happens when two clamps are intersected and do not overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    /// Upper limit used by unclamped objects
    pub const LIMIT: i32 = 1 << 20;

    /// Region covering the whole addressable surface
    pub const UNBOUNDED: Bounds = Bounds {
        min_x: 0,
        min_y: 0,
        max_x: Self::LIMIT,
        max_y: Self::LIMIT,
    };

    /// Create a new region, flooring every edge at zero
    #[inline]
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x: min_x.max(0),
            min_y: min_y.max(0),
            max_x: max_x.max(0),
            max_y: max_y.max(0),
        }
    }

    /// Intersection: max of minimums, min of maximums
    #[inline]
    pub fn intersect(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        }
    }

    /// Check if the region covers no area
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max_x < self.min_x || self.max_y < self.min_y
    }

    /// Hit test, edges included
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Check if `other` lies entirely inside this region
    #[inline]
    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        other.is_empty()
            || (other.min_x >= self.min_x
                && other.min_y >= self.min_y
                && other.max_x <= self.max_x
                && other.max_y <= self.max_y)
    }

    /// Rectangle view, empty axes collapse to zero extent
    #[inline]
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.min_x,
            self.min_y,
            (self.max_x - self.min_x).max(0),
            (self.max_y - self.min_y).max(0),
        )
    }

    /// Clamp an object origin so that `size` stays inside the region.
    ///
    /// When the object is larger than the region on an axis the origin is
    /// held in `[max - size, min]` instead, so oversized content can be
    /// scrolled but never leaves a gap at either edge.
    pub fn clamp_origin(&self, origin: Point, size: Size) -> Point {
        let x = clamp_axis(origin.x, size.width, self.min_x, self.max_x);
        let y = clamp_axis(origin.y, size.height, self.min_y, self.max_y);
        Point::new(x, y)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

fn clamp_axis(origin: i32, extent: i32, min: i32, max: i32) -> i32 {
    if max < min {
        return min;
    }
    let far = max - extent;
    if far >= min {
        origin.clamp(min, far)
    } else {
        origin.clamp(far, min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_new_floors_at_zero() {
        let b = Bounds::new(-10, -5, 100, -1);
        assert_eq!(b, Bounds { min_x: 0, min_y: 0, max_x: 100, max_y: 0 });
    }

    #[test]
    fn test_bounds_intersect() {
        let a = Bounds::new(0, 0, 100, 100);
        let b = Bounds::new(50, 20, 200, 80);
        assert_eq!(a.intersect(&b), Bounds::new(50, 20, 100, 80));
    }

    #[test]
    fn test_bounds_disjoint_intersection_is_empty() {
        let a = Bounds::new(0, 0, 10, 10);
        let b = Bounds::new(20, 20, 30, 30);
        let i = a.intersect(&b);
        assert!(i.is_empty());
        assert_eq!(i.to_rect().size(), Size::ZERO);
        assert!(!i.contains(Point::new(5, 5)));
    }

    #[test]
    fn test_clamp_origin_fits() {
        let b = Bounds::new(0, 0, 100, 100);
        let p = b.clamp_origin(Point::new(90, -20), Size::new(20, 20));
        assert_eq!(p, Point::new(80, 0));
    }

    #[test]
    fn test_clamp_origin_oversized_behaves_like_scroll_view() {
        let b = Bounds::new(0, 0, 100, 100);
        let size = Size::new(300, 50);
        assert_eq!(b.clamp_origin(Point::new(10, 0), size).x, 0);
        assert_eq!(b.clamp_origin(Point::new(-150, 0), size).x, -150);
        assert_eq!(b.clamp_origin(Point::new(-500, 0), size).x, -200);
    }

    #[test]
    fn test_contains_bounds() {
        let outer = Bounds::new(0, 0, 100, 100);
        assert!(outer.contains_bounds(&Bounds::new(10, 10, 90, 90)));
        assert!(!outer.contains_bounds(&Bounds::new(10, 10, 190, 90)));
    }
}
