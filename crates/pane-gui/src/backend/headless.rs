//! In-memory collaborators
//!
//! Used by tests and by scripted sessions that run without a window system.

use std::collections::{HashMap, HashSet};

use crate::error::ResourceError;
use crate::math::Size;
use super::{
    Color, FontSpec, ImageLoader, Panel, PixelBuffer, Quad, RasterizedText, RenderBackend,
    TextRasterizer, TextureId,
};

/// A recorded draw operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCall {
    Quad(Quad),
    Panel(Panel),
}

/// Backend that records draw calls instead of rasterizing
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_texture: TextureId,
    live: HashSet<TextureId>,
    released: Vec<TextureId>,
    calls: Vec<DrawCall>,
    frames: usize,
    in_frame: bool,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls of the most recent frame
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of frames presented
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Textures currently uploaded
    pub fn live_textures(&self) -> usize {
        self.live.len()
    }

    /// Every texture handle released so far
    pub fn released(&self) -> &[TextureId] {
        &self.released
    }

    /// Quads drawn last frame
    pub fn quads(&self) -> impl Iterator<Item = &Quad> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Quad(q) => Some(q),
            DrawCall::Panel(_) => None,
        })
    }

    /// Panels drawn last frame
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Panel(p) => Some(p),
            DrawCall::Quad(_) => None,
        })
    }
}

impl RenderBackend for HeadlessBackend {
    fn begin_frame(&mut self, _surface: Size, _clear: Color) {
        self.calls.clear();
        self.in_frame = true;
    }

    fn upload(&mut self, _pixels: &PixelBuffer) -> TextureId {
        self.next_texture += 1;
        self.live.insert(self.next_texture);
        self.next_texture
    }

    fn draw_quad(&mut self, quad: &Quad) {
        if self.in_frame {
            self.calls.push(DrawCall::Quad(quad.clone()));
        }
    }

    fn draw_panel(&mut self, panel: &Panel) {
        if self.in_frame {
            self.calls.push(DrawCall::Panel(panel.clone()));
        }
    }

    fn release(&mut self, texture: TextureId) {
        if self.live.remove(&texture) {
            self.released.push(texture);
        }
    }

    fn end_frame(&mut self) {
        self.in_frame = false;
        self.frames += 1;
    }
}

/// Image loader producing solid-color buffers
///
/// Every path loads as a `size` buffer unless it was registered with a
/// specific size or marked missing.
#[derive(Clone, Debug)]
pub struct SolidImages {
    pub size: Size,
    pub color: Color,
    sizes: HashMap<String, Size>,
    missing: HashSet<String>,
}

impl SolidImages {
    pub fn new(size: Size, color: Color) -> Self {
        Self {
            size,
            color,
            sizes: HashMap::new(),
            missing: HashSet::new(),
        }
    }

    /// Give `path` its own size
    pub fn with_image(mut self, path: &str, size: Size) -> Self {
        self.sizes.insert(path.to_string(), size);
        self
    }

    /// Make loading `path` fail
    pub fn with_missing(mut self, path: &str) -> Self {
        self.missing.insert(path.to_string());
        self
    }
}

impl Default for SolidImages {
    fn default() -> Self {
        // control button size
        Self::new(Size::new(58, 32), Color::rgb(128, 128, 128))
    }
}

impl ImageLoader for SolidImages {
    fn load_image(&self, path: &str) -> Result<PixelBuffer, ResourceError> {
        if self.missing.contains(path) {
            return Err(ResourceError::NotFound(path.to_string()));
        }
        let size = self.sizes.get(path).copied().unwrap_or(self.size);
        Ok(PixelBuffer::solid(size, self.color))
    }
}

/// Fixed-advance text rasterizer
///
/// Each character advances `font.size * 3 / 5` units; line height is
/// `font.size * 3 / 2`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonospaceText;

impl MonospaceText {
    /// Horizontal advance of one character
    pub fn advance(font: &FontSpec) -> i32 {
        (font.size * 3 / 5).max(1)
    }
}

impl TextRasterizer for MonospaceText {
    fn rasterize(
        &self,
        text: &str,
        font: &FontSpec,
        color: Color,
        _background: Color,
    ) -> Result<RasterizedText, ResourceError> {
        if font.size <= 0 {
            return Err(ResourceError::Font(format!("invalid size {}", font.size)));
        }
        let width = self.measure(text, font);
        let height = font.size * 3 / 2;
        Ok(RasterizedText {
            pixels: PixelBuffer::solid(Size::new(width, height), color),
            width,
        })
    }

    fn measure(&self, text: &str, font: &FontSpec) -> i32 {
        text.chars().count() as i32 * Self::advance(font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Bounds, Rect};
    use crate::backend::Rotation;

    #[test]
    fn test_backend_records_frame() {
        let mut backend = HeadlessBackend::new();
        let tex = backend.upload(&PixelBuffer::solid(Size::new(2, 2), Color::WHITE));
        backend.begin_frame(Size::new(100, 100), Color::BLACK);
        backend.draw_quad(&Quad {
            rect: Rect::new(0, 0, 2, 2),
            clip: Bounds::UNBOUNDED,
            rotation: Rotation::None,
            flip_horizontal: false,
            flip_vertical: false,
            texture: tex,
        });
        backend.end_frame();

        assert_eq!(backend.frames(), 1);
        assert_eq!(backend.quads().count(), 1);
        assert_eq!(backend.live_textures(), 1);

        backend.release(tex);
        backend.release(tex);
        assert_eq!(backend.live_textures(), 0);
        assert_eq!(backend.released(), &[tex]);
    }

    #[test]
    fn test_solid_images_missing_path() {
        let images = SolidImages::default().with_missing("data/gone.png");
        assert!(images.load_image("data/gone.png").is_err());
        assert_eq!(images.load_image("data/x.png").unwrap().size(), Size::new(58, 32));
    }

    #[test]
    fn test_solid_images_custom_size() {
        let images = SolidImages::default().with_image("logo.png", Size::new(10, 12));
        assert_eq!(images.load_image("logo.png").unwrap().size(), Size::new(10, 12));
    }

    #[test]
    fn test_monospace_measure() {
        let font = FontSpec { size: 20, ..Default::default() };
        assert_eq!(MonospaceText.measure("abcd", &font), 48);
        let raster = MonospaceText.rasterize("abcd", &font, Color::WHITE, Color::BLACK).unwrap();
        assert_eq!(raster.width, 48);
        assert_eq!(raster.pixels.height, 30);
    }

    #[test]
    fn test_monospace_rejects_bad_font() {
        let font = FontSpec { size: 0, ..Default::default() };
        assert!(MonospaceText.rasterize("x", &font, Color::WHITE, Color::BLACK).is_err());
    }
}
