//! Anchor rules for placing children inside a window

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::GuiError;
use crate::math::{Point, Rect, Size};

/// Layout rule for a child of a window
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
    /// Keeps its own position, only clamped to the window
    Free,
    /// Like `Free`, for children that move themselves (nested windows)
    Movable,
    /// Reserved: window title
    Title,
    /// Reserved: minimize control
    Minimize,
    /// Reserved: maximize or split control
    MaxSplit,
    /// Reserved: close control
    Close,
}

/// Reserved slots in the title bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlSlot {
    Title,
    Minimize,
    MaxSplit,
    Close,
}

/// How an anchor computes a child position
#[derive(Clone, Copy)]
pub enum Placement {
    /// Position from the window interior and the child size
    Compass(fn(Rect, Size) -> Point),
    /// Keep the position, clamp to the window rectangle
    Propagate,
    /// Title bar slot
    Control(ControlSlot),
}

fn top_left(area: Rect, _child: Size) -> Point {
    Point::new(area.x, area.y)
}

fn top(area: Rect, child: Size) -> Point {
    Point::new(area.x + (area.width - child.width) / 2, area.y)
}

fn top_right(area: Rect, child: Size) -> Point {
    Point::new(area.right() - child.width, area.y)
}

fn left(area: Rect, child: Size) -> Point {
    Point::new(area.x, area.y + (area.height - child.height) / 2)
}

fn center(area: Rect, child: Size) -> Point {
    Point::new(
        area.x + (area.width - child.width) / 2,
        area.y + (area.height - child.height) / 2,
    )
}

fn right(area: Rect, child: Size) -> Point {
    Point::new(area.right() - child.width, area.y + (area.height - child.height) / 2)
}

fn bottom_left(area: Rect, child: Size) -> Point {
    Point::new(area.x, area.bottom() - child.height)
}

fn bottom(area: Rect, child: Size) -> Point {
    Point::new(area.x + (area.width - child.width) / 2, area.bottom() - child.height)
}

fn bottom_right(area: Rect, child: Size) -> Point {
    Point::new(area.right() - child.width, area.bottom() - child.height)
}

impl Anchor {
    /// Every anchor, in code order
    pub const ALL: [Anchor; 15] = [
        Anchor::TopLeft,
        Anchor::Top,
        Anchor::TopRight,
        Anchor::Left,
        Anchor::Center,
        Anchor::Right,
        Anchor::BottomLeft,
        Anchor::Bottom,
        Anchor::BottomRight,
        Anchor::Free,
        Anchor::Movable,
        Anchor::Title,
        Anchor::Minimize,
        Anchor::MaxSplit,
        Anchor::Close,
    ];

    pub fn placement(self) -> Placement {
        match self {
            Anchor::TopLeft => Placement::Compass(top_left),
            Anchor::Top => Placement::Compass(top),
            Anchor::TopRight => Placement::Compass(top_right),
            Anchor::Left => Placement::Compass(left),
            Anchor::Center => Placement::Compass(center),
            Anchor::Right => Placement::Compass(right),
            Anchor::BottomLeft => Placement::Compass(bottom_left),
            Anchor::Bottom => Placement::Compass(bottom),
            Anchor::BottomRight => Placement::Compass(bottom_right),
            Anchor::Free | Anchor::Movable => Placement::Propagate,
            Anchor::Title => Placement::Control(ControlSlot::Title),
            Anchor::Minimize => Placement::Control(ControlSlot::Minimize),
            Anchor::MaxSplit => Placement::Control(ControlSlot::MaxSplit),
            Anchor::Close => Placement::Control(ControlSlot::Close),
        }
    }

    /// Reserved for window controls
    #[inline]
    pub fn is_control(self) -> bool {
        matches!(self.placement(), Placement::Control(_))
    }

    /// Numeric code, stable across versions
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::Top => "top",
            Anchor::TopRight => "top-right",
            Anchor::Left => "left",
            Anchor::Center => "center",
            Anchor::Right => "right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::Bottom => "bottom",
            Anchor::BottomRight => "bottom-right",
            Anchor::Free => "free",
            Anchor::Movable => "movable",
            Anchor::Title => "title",
            Anchor::Minimize => "minimize",
            Anchor::MaxSplit => "max-split",
            Anchor::Close => "close",
        }
    }

    /// Parse a name, falling back to `TopLeft` with a warning
    pub fn parse_or_default(name: &str) -> Anchor {
        name.parse().unwrap_or_else(|e: GuiError| {
            warn!("{}, using top-left", e);
            Anchor::TopLeft
        })
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Anchor {
    type Err = GuiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Anchor::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| GuiError::InvalidAnchor(s.to_string()))
    }
}

impl TryFrom<u8> for Anchor {
    type Error = GuiError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Anchor::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| GuiError::InvalidAnchor(code.to_string()))
    }
}
