//! Rasterized text

use serde::{Deserialize, Serialize};
use crate::backend::{Color, FontSpec};

/// Font and colors used to rasterize text
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub font: FontSpec,
    pub color: Color,
    pub background: Color,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font: FontSpec::default(),
            color: Color::WHITE,
            background: Color::TRANSPARENT,
        }
    }
}

impl TextConfig {
    /// Height of one rendered line
    #[inline]
    pub fn line_height(&self) -> i32 {
        self.font.size * 3 / 2
    }
}

/// A string rendered into the object's pixel buffer
#[derive(Clone, Debug, Default)]
pub struct Text {
    text: String,
    pub config: TextConfig,
}

impl Text {
    pub fn new(text: impl Into<String>, config: TextConfig) -> Self {
        Self {
            text: text.into(),
            config,
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the text changed
    pub(crate) fn set_text(&mut self, text: &str) -> bool {
        if self.text == text {
            return false;
        }
        self.text = text.to_string();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_height_is_one_and_a_half_font_size() {
        let config = TextConfig {
            font: FontSpec { size: 20, ..Default::default() },
            ..Default::default()
        };
        assert_eq!(config.line_height(), 30);
    }

    #[test]
    fn test_set_text_reports_change() {
        let mut text = Text::new("a", TextConfig::default());
        assert!(!text.set_text("a"));
        assert!(text.set_text("b"));
        assert_eq!(text.text(), "b");
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: TextConfig = serde_json::from_str(r#"{"color":{"r":1,"g":2,"b":3,"a":4}}"#).unwrap();
        assert_eq!(config.color, Color::rgba(1, 2, 3, 4));
        assert_eq!(config.font, FontSpec::default());
    }
}
