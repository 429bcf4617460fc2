//! Discrete events delivered by the input source

use serde::{Deserialize, Serialize};

/// Keys the core distinguishes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    Kp0, Kp1, Kp2, Kp3, Kp4, Kp5, Kp6, Kp7, Kp8, Kp9,
    KpDecimal, KpDivide, KpMultiply, KpSubtract, KpAdd, KpEnter,
    Space, Apostrophe, Comma, Minus, Period, Slash, Semicolon, Equal,
    LeftBracket, Backslash, RightBracket, GraveAccent,
    Enter, Tab, Backspace, Delete, Escape,
    Left, Right, Up, Down, Home, End,
    LeftShift, RightShift, LeftControl, RightControl, LeftAlt, RightAlt,
    /// Any key without a dedicated variant, by host key code
    Other(u32),
}

impl Key {
    #[inline]
    pub fn is_shift(self) -> bool {
        matches!(self, Key::LeftShift | Key::RightShift)
    }

    #[inline]
    pub fn is_control(self) -> bool {
        matches!(self, Key::LeftControl | Key::RightControl)
    }
}

/// Key transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    Pressed,
    Released,
    Repeated,
}

/// Pointer button transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    Pressed,
    Released,
}

/// The three tracked pointer buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    /// Slot in the button state array
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PointerButton::Primary => 0,
            PointerButton::Secondary => 1,
            PointerButton::Middle => 2,
        }
    }
}

/// One occurrence from the input source
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Key { key: Key, action: KeyAction },
    PointerMove { x: i32, y: i32 },
    PointerButton { button: PointerButton, action: ButtonAction },
    Scroll { dx: f32, dy: f32 },
    SurfaceResize { width: i32, height: i32 },
    SurfaceClose,
}
