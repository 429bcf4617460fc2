//! Raw pixel buffers and colors

use serde::{Deserialize, Serialize};
use crate::math::Size;

/// 8-bit RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Opaque color
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Channel layout of a pixel buffer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    Rgb,
    #[default]
    Rgba,
}

impl PixelFormat {
    /// Bytes per pixel
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// Decoded image data handed to the rendering backend
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: i32,
    pub height: i32,
    pub format: PixelFormat,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Zero-size placeholder used when a resource cannot be produced
    pub fn empty() -> Self {
        Self::default()
    }

    /// Buffer of `size` filled with one color
    pub fn solid(size: Size, color: Color) -> Self {
        let width = size.width.max(0);
        let height = size.height.max(0);
        let pixels = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(pixels * 4);
        for _ in 0..pixels {
            data.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        Self {
            width,
            height,
            format: PixelFormat::Rgba,
            data,
        }
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check that the data length matches the declared dimensions
    pub fn is_consistent(&self) -> bool {
        let expected = (self.width.max(0) as usize)
            * (self.height.max(0) as usize)
            * self.format.channels();
        self.data.len() == expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_buffer() {
        let buf = PixelBuffer::solid(Size::new(3, 2), Color::rgb(1, 2, 3));
        assert_eq!(buf.data.len(), 24);
        assert_eq!(&buf.data[0..4], &[1, 2, 3, 255]);
        assert!(buf.is_consistent());
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_empty_placeholder() {
        let buf = PixelBuffer::empty();
        assert!(buf.is_empty());
        assert!(buf.is_consistent());
        assert_eq!(buf.size(), Size::ZERO);
    }

    #[test]
    fn test_rgb_channels() {
        let buf = PixelBuffer {
            width: 2,
            height: 2,
            format: PixelFormat::Rgb,
            data: vec![0; 12],
        };
        assert!(buf.is_consistent());
    }
}
