//! Push buttons with hover, press and disabled frames

use crate::input::ButtonAction;
use super::Animation;

/// Frame shown for each button state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonFrame {
    Normal = 0,
    Hover = 1,
    Pressed = 2,
    Disabled = 3,
}

/// Button state machine over an [`Animation`]
///
/// Handlers return the frame to show when it should change. Presses are
/// edge-triggered: [`Button::read_press`] reports a completed click once.
#[derive(Clone, Debug, Default)]
pub struct Button {
    pub animation: Animation,
    disabled: bool,
    in_bounds: bool,
    pressing: bool,
    pressed: bool,
}

impl Button {
    pub fn new(animation: Animation) -> Self {
        Self {
            animation,
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Pointer is over the button
    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.in_bounds
    }

    #[inline]
    pub fn is_pressing(&self) -> bool {
        self.pressing
    }

    /// Whether a click completed since the last read, clearing the flag
    pub fn read_press(&mut self) -> bool {
        std::mem::replace(&mut self.pressed, false)
    }

    /// Frame index to show for `frame`, falling back to normal
    pub fn frame_index(&self, frame: ButtonFrame) -> usize {
        let index = frame as usize;
        if index < self.animation.frame_count() {
            index
        } else {
            ButtonFrame::Normal as usize
        }
    }

    pub(crate) fn set_disabled(&mut self, disabled: bool) -> Option<ButtonFrame> {
        if disabled == self.disabled {
            return None;
        }
        self.disabled = disabled;
        self.pressing = false;
        self.in_bounds = false;
        if disabled {
            Some(ButtonFrame::Disabled)
        } else {
            Some(ButtonFrame::Normal)
        }
    }

    /// `inside` is the pointer hit test against the button rect and clamp
    pub(crate) fn on_pointer_move(&mut self, inside: bool) -> Option<ButtonFrame> {
        if self.disabled || !self.animation.is_shown() {
            return None;
        }
        if inside {
            let was = self.in_bounds;
            self.in_bounds = true;
            if !was && !self.pressing {
                return Some(ButtonFrame::Hover);
            }
            None
        } else {
            let was = self.in_bounds || self.pressing;
            self.in_bounds = false;
            self.pressing = false;
            was.then_some(ButtonFrame::Normal)
        }
    }

    /// Primary pointer button only
    pub(crate) fn on_primary(&mut self, action: ButtonAction) -> Option<ButtonFrame> {
        if self.disabled || !self.animation.is_shown() || !self.in_bounds {
            return None;
        }
        match action {
            ButtonAction::Pressed => {
                self.pressing = true;
                Some(ButtonFrame::Pressed)
            }
            ButtonAction::Released => {
                if !self.pressing {
                    return None;
                }
                self.pressing = false;
                self.pressed = true;
                Some(ButtonFrame::Hover)
            }
        }
    }
}
