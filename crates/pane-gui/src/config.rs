//! GUI-wide configuration

use serde::{Deserialize, Serialize};

use crate::backend::Color;
use crate::math::Size;
use crate::registry::RedrawState;

/// Image paths for the frames of a button
///
/// Frames are shown as normal, hover, pressed and, when a fourth path is
/// given, disabled.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    pub frames: Vec<String>,
}

impl ButtonConfig {
    pub fn new<S: Into<String>>(frames: impl IntoIterator<Item = S>) -> Self {
        Self {
            frames: frames.into_iter().map(Into::into).collect(),
        }
    }
}

/// Images used for window control buttons
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSkin {
    pub close: ButtonConfig,
    pub maximize: ButtonConfig,
    pub split: ButtonConfig,
    pub minimize: ButtonConfig,
}

impl Default for ControlSkin {
    fn default() -> Self {
        let frames = |name: &str| {
            ButtonConfig::new(
                ["normal", "hover", "pressed"].map(|state| format!("controls/{}_{}.png", name, state)),
            )
        };
        Self {
            close: frames("close"),
            maximize: frames("maximize"),
            split: frames("split"),
            minimize: frames("minimize"),
        }
    }
}

/// Top-level GUI configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Initial host surface size
    pub surface: Size,
    /// Color the surface is cleared to each frame
    pub clear: Color,
    /// Redraw every frame regardless of changes
    pub continuous_redraw: bool,
    /// Quiet frames before the redraw flag clears
    pub redraw_frames: u32,
    /// Units scrolled per wheel tick
    pub scroll_multiplier: i32,
    pub skin: ControlSkin,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            surface: Size::new(1280, 720),
            clear: Color::rgb(16, 16, 20),
            continuous_redraw: false,
            redraw_frames: RedrawState::DEFAULT_QUIET_FRAMES,
            scroll_multiplier: 32,
            skin: ControlSkin::default(),
        }
    }
}
