//! Drag and resize gestures

use crate::math::{Point, Rect, Size};
use crate::object::ObjectId;
use super::ResizeHandle;

/// Kind of in-progress gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    /// Moving a window by its title bar
    Move,
    /// Resizing a window from a latched handle
    Resize(ResizeHandle),
}

/// The gesture currently owning the pointer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveGesture {
    pub window: ObjectId,
    pub kind: GestureKind,
}

/// Process-wide gesture slot
///
/// At most one window drags or resizes at a time. Windows consult the slot
/// before starting a gesture; nothing is locked.
#[derive(Clone, Debug, Default)]
pub struct GestureSlot {
    active: Option<ActiveGesture>,
}

impl GestureSlot {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn active(&self) -> Option<ActiveGesture> {
        self.active
    }

    /// No other window holds the slot
    #[inline]
    pub fn is_free_for(&self, window: ObjectId) -> bool {
        self.active.map_or(true, |g| g.window == window)
    }

    /// Claim the slot; fails while another window holds it
    pub fn begin(&mut self, window: ObjectId, kind: GestureKind) -> bool {
        if !self.is_free_for(window) {
            return false;
        }
        self.active = Some(ActiveGesture { window, kind });
        true
    }

    /// Release the slot if `window` holds it
    pub fn end(&mut self, window: ObjectId) {
        if self.active.is_some_and(|g| g.window == window) {
            self.active = None;
        }
    }
}

/// Per-window pointer gesture state
#[derive(Clone, Debug, Default)]
pub struct WindowGesture {
    /// Primary button went down while this window was interacting
    pub pressing: bool,
    pub dragging: bool,
    /// Hot zone under the pointer
    pub hover: Option<ResizeHandle>,
    /// Handle latched by a press; resizing continues until release
    pub latched: Option<ResizeHandle>,
    /// Pointer position at the last applied step
    pub last_pointer: Point,
    /// Pointer position where a middle-button scroll drag started
    pub scroll_drag: Option<Point>,
}

impl WindowGesture {
    #[inline]
    pub fn is_resizing(&self) -> bool {
        self.latched.is_some()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.dragging || self.is_resizing()
    }

    /// Clear drag and resize latches
    pub fn release(&mut self) {
        self.pressing = false;
        self.dragging = false;
        self.latched = None;
    }
}

/// Rectangle after moving the edges selected by `handle` by `delta`
///
/// The size is clamped to `[min, max]` and to the room `bound` leaves on the
/// side being dragged; the minimum wins. Edges not moved by the handle stay
/// where they were.
pub fn resize_rect(
    handle: ResizeHandle,
    rect: Rect,
    delta: Point,
    min: Size,
    max: Size,
    bound: Rect,
) -> Rect {
    let mut left = rect.x;
    let mut right = rect.right();
    let mut top = rect.y;
    let mut bottom = rect.bottom();

    if handle.moves_left() {
        left += delta.x;
    }
    if handle.moves_right() {
        right += delta.x;
    }
    if handle.moves_top() {
        top += delta.y;
    }
    if handle.moves_bottom() {
        bottom += delta.y;
    }

    let room = Size::new(
        if handle.moves_left() {
            rect.right() - bound.x
        } else if handle.moves_right() {
            bound.right() - rect.x
        } else {
            max.width
        },
        if handle.moves_top() {
            rect.bottom() - bound.y
        } else if handle.moves_bottom() {
            bound.bottom() - rect.y
        } else {
            max.height
        },
    );
    let max = Size::new(max.width.min(room.width), max.height.min(room.height));
    let size = Size::new(right - left, bottom - top).clamp(min, max);
    let x = if handle.moves_left() { rect.right() - size.width } else { rect.x };
    let y = if handle.moves_top() { rect.bottom() - size.height } else { rect.y };

    Rect::new(x, y, size.width, size.height)
}
