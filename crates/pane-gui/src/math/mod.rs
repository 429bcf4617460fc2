//! Integer geometry for surface-space layout
//!
//! All coordinates are surface units with the origin at the top-left corner
//! and y growing downward.

mod point;
mod size;
mod rect;
mod bounds;
mod style;

pub use point::Point;
pub use size::Size;
pub use rect::Rect;
pub use bounds::Bounds;
pub use style::{FrameStyle, FRAME_STYLE};
