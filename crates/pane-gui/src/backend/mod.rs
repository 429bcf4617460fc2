//! Collaborator interfaces for drawing and resources
//!
//! The core never touches a GPU, an image decoder or a font engine directly.
//! It talks to them through these traits:
//!
//! - [`RenderBackend`]: uploads pixel buffers and draws clipped quads
//! - [`ImageLoader`]: decodes image files into [`PixelBuffer`]s
//! - [`TextRasterizer`]: turns strings into pixel buffers and measures them
//!
//! [`headless`] provides in-memory implementations for tests and scripted runs.

mod pixels;
pub mod headless;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ResourceError;
use crate::math::{Bounds, Rect, Size};

pub use pixels::{Color, PixelBuffer, PixelFormat};

/// Backend-side texture handle
pub type TextureId = u64;

/// Quarter-turn rotation applied when drawing a quad
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    None,
    Quarter,
    Half,
    ThreeQuarter,
}

impl Rotation {
    /// Rotation after one more clockwise quarter turn
    pub fn turned(self) -> Rotation {
        match self {
            Rotation::None => Rotation::Quarter,
            Rotation::Quarter => Rotation::Half,
            Rotation::Half => Rotation::ThreeQuarter,
            Rotation::ThreeQuarter => Rotation::None,
        }
    }
}

/// A textured quad scissor-clipped to `clip`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quad {
    pub rect: Rect,
    pub clip: Bounds,
    pub rotation: Rotation,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub texture: TextureId,
}

/// Window body: background, border and title strip
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Panel {
    pub rect: Rect,
    pub clip: Bounds,
    pub background: Color,
    pub frame: Color,
    pub border: i32,
    pub title_bar_height: i32,
}

/// Font selection for text rasterization
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size: i32,
    pub bold: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "monospace".to_string(),
            size: 16,
            bold: false,
        }
    }
}

/// Output of [`TextRasterizer::rasterize`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RasterizedText {
    pub pixels: PixelBuffer,
    pub width: i32,
}

/// Draws uploaded textures onto the host surface
pub trait RenderBackend {
    /// Start a frame, clearing the surface
    fn begin_frame(&mut self, surface: Size, clear: Color);

    /// Upload pixels and return a handle for drawing
    fn upload(&mut self, pixels: &PixelBuffer) -> TextureId;

    /// Draw a textured quad clipped to its clamp
    fn draw_quad(&mut self, quad: &Quad);

    /// Draw a window body
    fn draw_panel(&mut self, panel: &Panel);

    /// Free a texture handle
    fn release(&mut self, texture: TextureId);

    /// Present the frame
    fn end_frame(&mut self);
}

/// Decodes image files
pub trait ImageLoader {
    fn load_image(&self, path: &str) -> Result<PixelBuffer, ResourceError>;
}

/// Rasterizes and measures text
pub trait TextRasterizer {
    fn rasterize(
        &self,
        text: &str,
        font: &FontSpec,
        color: Color,
        background: Color,
    ) -> Result<RasterizedText, ResourceError>;

    /// Pixel width of `text` in `font`
    fn measure(&self, text: &str, font: &FontSpec) -> i32;
}

/// Resource collaborators owned by the GUI
pub struct Resources {
    pub images: Box<dyn ImageLoader>,
    pub text: Box<dyn TextRasterizer>,
}

impl Resources {
    pub fn new(images: Box<dyn ImageLoader>, text: Box<dyn TextRasterizer>) -> Self {
        Self { images, text }
    }

    /// In-memory collaborators, see [`headless`]
    pub fn headless() -> Self {
        Self::new(
            Box::new(headless::SolidImages::default()),
            Box::new(headless::MonospaceText),
        )
    }

    /// Load an image, degrading to an empty buffer on failure
    pub fn image_or_placeholder(&self, path: &str) -> PixelBuffer {
        match self.images.load_image(path) {
            Ok(pixels) => pixels,
            Err(e) => {
                warn!("{}, using empty placeholder", e);
                PixelBuffer::empty()
            }
        }
    }

    /// Rasterize text, degrading to an empty buffer on failure
    pub fn text_or_placeholder(
        &self,
        text: &str,
        font: &FontSpec,
        color: Color,
        background: Color,
    ) -> RasterizedText {
        match self.text.rasterize(text, font, color, background) {
            Ok(raster) => raster,
            Err(e) => {
                warn!("{}, using empty placeholder for {:?}", e, text);
                RasterizedText::default()
            }
        }
    }
}

impl Default for Resources {
    fn default() -> Self {
        Self::headless()
    }
}
