//! Window configuration for creation

use serde::{Deserialize, Serialize};
use crate::backend::Color;
use crate::math::{Point, Size};

/// Window body and title colors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowColors {
    pub background: Color,
    pub frame: Color,
    pub title: Color,
    pub unfocused_title: Color,
}

impl Default for WindowColors {
    fn default() -> Self {
        Self {
            background: Color::rgb(30, 30, 34),
            frame: Color::rgb(62, 62, 72),
            title: Color::WHITE,
            unfocused_title: Color::rgb(140, 140, 150),
        }
    }
}

/// Configuration for creating a window
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Unique registry name
    pub name: String,
    /// Title bar text
    pub title: String,
    pub position: Point,
    pub size: Size,
    /// Requested layer, rounded up to even
    pub layer: i32,
    /// Title bar, border and controls
    pub decorated: bool,
    /// Resize hot zones and the maximize control
    pub resizable: bool,
    pub colors: WindowColors,
    /// Mouse wheel scrolls scrollable children
    pub wheel_scroll: bool,
    /// Middle-button drag scrolls scrollable children
    pub drag_scroll: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            title: String::new(),
            position: Point::ZERO,
            size: Size::new(400, 300),
            layer: 0,
            decorated: true,
            resizable: true,
            colors: WindowColors::default(),
            wheel_scroll: false,
            drag_scroll: false,
        }
    }
}
