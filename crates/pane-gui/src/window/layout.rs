//! Anchor layout of window children

use crate::math::{Bounds, Point, Rect, Size, FRAME_STYLE};
use crate::object::ObjectId;
use crate::registry::Registry;
use super::{ControlSlot, Placement, WindowManager};

/// Frame values needed to place a child, copied out of the window
struct Frame {
    rect: Rect,
    interior: Rect,
    clamp: Bounds,
    border: i32,
    title_bar_height: i32,
    resizable: bool,
}

/// Position of a title bar control of size `size`
fn control_position(slot: ControlSlot, frame: &Frame, size: Size) -> Point {
    let right = frame.rect.right() - frame.border;
    let top = frame.rect.y + frame.border;
    let step = FRAME_STYLE.button_width;
    match slot {
        ControlSlot::Close => Point::new(right - size.width, top),
        ControlSlot::MaxSplit => Point::new(right - step - size.width, top),
        // Without a maximize button minimize takes its slot
        ControlSlot::Minimize if !frame.resizable => Point::new(right - step - size.width, top),
        ControlSlot::Minimize => Point::new(right - 2 * step - size.width, top),
        ControlSlot::Title => Point::new(
            frame.rect.x + frame.border + FRAME_STYLE.title_inset,
            frame.rect.y + (frame.title_bar_height - size.height) / 2,
        ),
    }
}

impl WindowManager {
    /// Place `child` according to its anchor in `window`
    ///
    /// Sets the child's window clamp and position. Nested windows get their
    /// own children constrained in turn.
    pub fn constrain(&self, reg: &mut Registry, window: ObjectId, child: ObjectId) {
        let Some(object) = reg.get(window) else {
            return;
        };
        let Some(win) = object.as_window() else {
            return;
        };
        let Some(anchor) = win.anchor_of(child) else {
            return;
        };
        let rect = object.visual.rect();
        let frame = Frame {
            rect,
            interior: win.interior(rect),
            clamp: object.visual.effective_clamp(),
            border: win.border,
            title_bar_height: win.title_bar_height,
            resizable: win.resizable,
        };
        let scroll = win
            .scroll_bases
            .get(&child)
            .map(|&base| base + win.scroll.offset())
            .unwrap_or(Point::ZERO);
        let Some(child_visual) = reg.visual(child) else {
            return;
        };
        let child_size = child_visual.size();
        let child_position = child_visual.position();

        match anchor.placement() {
            Placement::Compass(place) => {
                reg.set_window_clamp(child, frame.interior.bounds().intersect(&frame.clamp));
                reg.set_position(child, place(frame.interior, child_size) + scroll);
            }
            Placement::Propagate => {
                reg.set_window_clamp(child, frame.rect.bounds().intersect(&frame.clamp));
                reg.set_position(child, child_position);
            }
            Placement::Control(slot) => {
                reg.set_window_clamp(child, frame.rect.bounds().intersect(&frame.clamp));
                reg.set_position(child, control_position(slot, &frame, child_size));
            }
        }

        if reg.window(child).is_some() {
            self.constrain_children(reg, child);
        }
    }

    /// Constrain every child of `window`
    pub fn constrain_children(&self, reg: &mut Registry, window: ObjectId) {
        let children = reg.window(window).map(|w| w.all_children()).unwrap_or_default();
        for child in children {
            self.constrain(reg, window, child);
        }
    }

    /// Clamp a top-level window to the surface and lay out its subtree
    pub fn constrain_top_level(&self, reg: &mut Registry, window: ObjectId) {
        let surface = Bounds::new(0, 0, self.surface().width, self.surface().height);
        reg.set_window_clamp(window, surface);
        if let Some(position) = reg.visual(window).map(|v| v.position()) {
            reg.set_position(window, position);
        }
        self.constrain_children(reg, window);
    }

    /// Re-run layout from the root of `window`
    pub fn relayout(&self, reg: &mut Registry, window: ObjectId) {
        match reg.window(window).and_then(|w| w.parent()) {
            Some(parent) => self.constrain(reg, parent, window),
            None => self.constrain_top_level(reg, window),
        }
    }

    /// Leftmost x of any title bar button, or the window's right edge
    pub fn controls_left(&self, reg: &Registry, window: ObjectId) -> Option<i32> {
        let object = reg.get(window)?;
        let win = object.as_window()?;
        let right = object.visual.rect().right();
        let left = win
            .controls()
            .buttons()
            .into_iter()
            .filter(|&b| reg.visual(b).is_some_and(|v| v.is_visible()))
            .filter_map(|b| reg.visual(b).map(|v| v.position().x))
            .min()
            .unwrap_or(right);
        Some(left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(resizable: bool) -> Frame {
        let rect = Rect::new(100, 50, 400, 300);
        Frame {
            rect,
            interior: rect.inset(1, 34, 1, 1),
            clamp: Bounds::UNBOUNDED,
            border: 1,
            title_bar_height: 34,
            resizable,
        }
    }

    #[test]
    fn test_control_slots_right_to_left() {
        let f = frame(true);
        let size = Size::new(58, 32);
        assert_eq!(control_position(ControlSlot::Close, &f, size), Point::new(441, 51));
        assert_eq!(control_position(ControlSlot::MaxSplit, &f, size), Point::new(383, 51));
        assert_eq!(control_position(ControlSlot::Minimize, &f, size), Point::new(325, 51));
    }

    #[test]
    fn test_minimize_takes_maximize_slot_when_fixed_size() {
        let f = frame(false);
        let size = Size::new(58, 32);
        assert_eq!(control_position(ControlSlot::Minimize, &f, size), Point::new(383, 51));
    }

    #[test]
    fn test_title_centered_in_bar() {
        let f = frame(true);
        assert_eq!(
            control_position(ControlSlot::Title, &f, Size::new(80, 24)),
            Point::new(105, 55)
        );
    }
}
