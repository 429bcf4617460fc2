//! Resize handles and hot-zone hit testing

use serde::{Deserialize, Serialize};
use crate::math::{Point, Rect};

/// Edge or corner being resized
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    /// North (top) edge
    N,
    /// South (bottom) edge
    S,
    /// East (right) edge
    E,
    /// West (left) edge
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeHandle {
    #[inline]
    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            ResizeHandle::NE | ResizeHandle::NW | ResizeHandle::SE | ResizeHandle::SW
        )
    }

    /// Moves the left edge
    #[inline]
    pub fn moves_left(&self) -> bool {
        matches!(self, ResizeHandle::W | ResizeHandle::NW | ResizeHandle::SW)
    }

    /// Moves the right edge
    #[inline]
    pub fn moves_right(&self) -> bool {
        matches!(self, ResizeHandle::E | ResizeHandle::NE | ResizeHandle::SE)
    }

    /// Moves the top edge
    #[inline]
    pub fn moves_top(&self) -> bool {
        matches!(self, ResizeHandle::N | ResizeHandle::NE | ResizeHandle::NW)
    }

    /// Moves the bottom edge
    #[inline]
    pub fn moves_bottom(&self) -> bool {
        matches!(self, ResizeHandle::S | ResizeHandle::SE | ResizeHandle::SW)
    }

    /// Host cursor shown while hovering this handle
    pub fn cursor(&self) -> CursorIcon {
        match self {
            ResizeHandle::N | ResizeHandle::S => CursorIcon::ResizeVertical,
            ResizeHandle::E | ResizeHandle::W => CursorIcon::ResizeHorizontal,
            ResizeHandle::NE | ResizeHandle::SW => CursorIcon::ResizeNeSw,
            ResizeHandle::NW | ResizeHandle::SE => CursorIcon::ResizeNwSe,
        }
    }
}

/// Cursor shape requested from the host
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorIcon {
    #[default]
    Default,
    ResizeHorizontal,
    ResizeVertical,
    ResizeNwSe,
    ResizeNeSw,
}

/// Hot zone under `point`, if any
///
/// Zones are `range` units wide and lie just outside each edge, spanning the
/// edge plus `range` past both ends. A point can be in at most one
/// horizontal and one vertical zone; corners win over edges, and corners are
/// checked in the order NW, NE, SW, SE.
pub fn hot_zone(rect: &Rect, point: Point, range: i32) -> Option<ResizeHandle> {
    let in_x_span = point.x >= rect.x - range && point.x <= rect.right() + range;
    let in_y_span = point.y >= rect.y - range && point.y <= rect.bottom() + range;
    if !in_x_span || !in_y_span {
        return None;
    }

    let west = point.x < rect.x;
    let east = point.x > rect.right();
    let north = point.y < rect.y;
    let south = point.y > rect.bottom();

    let handle = match (north, south, west, east) {
        (true, _, true, _) => ResizeHandle::NW,
        (true, _, _, true) => ResizeHandle::NE,
        (_, true, true, _) => ResizeHandle::SW,
        (_, true, _, true) => ResizeHandle::SE,
        (true, _, _, _) => ResizeHandle::N,
        (_, true, _, _) => ResizeHandle::S,
        (_, _, true, _) => ResizeHandle::W,
        (_, _, _, true) => ResizeHandle::E,
        _ => return None,
    };
    Some(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: Rect = Rect::new(100, 100, 300, 200);

    #[test]
    fn test_edges() {
        assert_eq!(hot_zone(&RECT, Point::new(95, 200), 10), Some(ResizeHandle::W));
        assert_eq!(hot_zone(&RECT, Point::new(405, 200), 10), Some(ResizeHandle::E));
        assert_eq!(hot_zone(&RECT, Point::new(250, 92), 10), Some(ResizeHandle::N));
        assert_eq!(hot_zone(&RECT, Point::new(250, 310), 10), Some(ResizeHandle::S));
    }

    #[test]
    fn test_corners_take_priority() {
        assert_eq!(hot_zone(&RECT, Point::new(95, 95), 10), Some(ResizeHandle::NW));
        assert_eq!(hot_zone(&RECT, Point::new(405, 95), 10), Some(ResizeHandle::NE));
        assert_eq!(hot_zone(&RECT, Point::new(95, 305), 10), Some(ResizeHandle::SW));
        assert_eq!(hot_zone(&RECT, Point::new(405, 305), 10), Some(ResizeHandle::SE));
    }

    #[test]
    fn test_inside_and_far_outside() {
        assert_eq!(hot_zone(&RECT, Point::new(200, 200), 10), None);
        assert_eq!(hot_zone(&RECT, Point::new(100, 100), 10), None);
        assert_eq!(hot_zone(&RECT, Point::new(80, 200), 10), None);
        assert_eq!(hot_zone(&RECT, Point::new(250, 320), 10), None);
    }

    #[test]
    fn test_handle_edges() {
        assert!(ResizeHandle::NW.moves_left() && ResizeHandle::NW.moves_top());
        assert!(ResizeHandle::SE.moves_right() && ResizeHandle::SE.moves_bottom());
        assert!(!ResizeHandle::E.is_corner());
        assert!(ResizeHandle::SW.is_corner());
    }

    #[test]
    fn test_cursor_for_handle() {
        assert_eq!(ResizeHandle::N.cursor(), CursorIcon::ResizeVertical);
        assert_eq!(ResizeHandle::W.cursor(), CursorIcon::ResizeHorizontal);
        assert_eq!(ResizeHandle::SE.cursor(), CursorIcon::ResizeNwSe);
        assert_eq!(ResizeHandle::NE.cursor(), CursorIcon::ResizeNeSw);
    }
}
