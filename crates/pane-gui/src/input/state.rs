//! Pointer and keyboard state tracked between events

use std::collections::HashSet;

use crate::math::Point;
use super::{ButtonAction, InputEvent, Key, KeyAction, PointerButton};

/// Current pointer, button, scroll and key state
#[derive(Clone, Debug, Default)]
pub struct InputState {
    pointer: Point,
    last_pointer: Point,
    buttons: [bool; 3],
    scroll_x: f32,
    scroll_y: f32,
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold an event into the state
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMove { x, y } => {
                self.pointer = Point::new(x, y);
            }
            InputEvent::PointerButton { button, action } => {
                self.buttons[button.index()] = action == ButtonAction::Pressed;
            }
            InputEvent::Scroll { dx, dy } => {
                self.scroll_x += dx;
                self.scroll_y += dy;
            }
            InputEvent::Key { key, action } => match action {
                KeyAction::Pressed | KeyAction::Repeated => {
                    self.held.insert(key);
                }
                KeyAction::Released => {
                    self.held.remove(&key);
                }
            },
            InputEvent::SurfaceResize { .. } | InputEvent::SurfaceClose => {}
        }
    }

    #[inline]
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Pointer position at the end of the previous frame
    #[inline]
    pub fn last_pointer(&self) -> Point {
        self.last_pointer
    }

    #[inline]
    pub fn is_down(&self, button: PointerButton) -> bool {
        self.buttons[button.index()]
    }

    /// Scroll accumulated this frame
    #[inline]
    pub fn scroll(&self) -> (f32, f32) {
        (self.scroll_x, self.scroll_y)
    }

    #[inline]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn shift(&self) -> bool {
        self.is_held(Key::LeftShift) || self.is_held(Key::RightShift)
    }

    pub fn control(&self) -> bool {
        self.is_held(Key::LeftControl) || self.is_held(Key::RightControl)
    }

    /// Reset per-frame accumulators
    pub fn end_frame(&mut self) {
        self.scroll_x = 0.0;
        self.scroll_y = 0.0;
        self.last_pointer = self.pointer;
    }
}
