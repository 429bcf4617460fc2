//! Base visual entity shared by every object

use crate::backend::{PixelBuffer, Rotation, TextureId};
use crate::math::{Bounds, Point, Rect, Size};

/// Which input and update streams an object receives
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Subscriptions {
    pub keys: bool,
    pub pointer: bool,
    pub updates: bool,
}

impl Subscriptions {
    pub const NONE: Subscriptions = Subscriptions {
        keys: false,
        pointer: false,
        updates: false,
    };

    #[inline]
    pub fn any(&self) -> bool {
        self.keys || self.pointer || self.updates
    }
}

/// Position, size, visibility and clamping of an object
///
/// Two clamp regions apply at once: the object's own and the one imposed by
/// the window that contains it. Positioning and hit-testing use their
/// intersection, the effective clamp.
#[derive(Clone, Debug)]
pub struct VisualObject {
    name: String,
    layer: i32,
    position: Point,
    size: Size,
    visible: bool,
    local_clamp: Bounds,
    window_clamp: Bounds,
    pixels: PixelBuffer,
    pub(crate) texture: Option<TextureId>,
    /// Pixels changed since the last upload
    pub(crate) dirty: bool,
    /// Anything drawable changed since the registry last swept
    pub(crate) changed: bool,
    pub rotation: Rotation,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub(crate) subscriptions: Subscriptions,
    /// Composite widget this object is a member of
    pub(crate) owner: Option<crate::object::ObjectId>,
}

impl VisualObject {
    /// New invisible object at the origin
    pub fn new(name: impl Into<String>, layer: i32) -> Self {
        Self {
            name: name.into(),
            layer,
            position: Point::ZERO,
            size: Size::ZERO,
            visible: false,
            local_clamp: Bounds::UNBOUNDED,
            window_clamp: Bounds::UNBOUNDED,
            pixels: PixelBuffer::empty(),
            texture: None,
            dirty: true,
            changed: true,
            rotation: Rotation::None,
            flip_horizontal: false,
            flip_vertical: false,
            subscriptions: Subscriptions::NONE,
            owner: None,
        }
    }

    /// Builder: initial pixels, size taken from the buffer
    pub fn with_pixels(mut self, pixels: PixelBuffer) -> Self {
        self.size = pixels.size();
        self.pixels = pixels;
        self
    }

    /// Builder: explicit size
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Size::new(size.width.max(0), size.height.max(0));
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn layer(&self) -> i32 {
        self.layer
    }

    /// Only the registry moves objects between layers
    pub(crate) fn set_layer_unchecked(&mut self, layer: i32) {
        if self.layer != layer {
            self.layer = layer;
            self.changed = true;
        }
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn owner(&self) -> Option<crate::object::ObjectId> {
        self.owner
    }

    #[inline]
    pub fn subscriptions(&self) -> Subscriptions {
        self.subscriptions
    }

    #[inline]
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    #[inline]
    pub fn local_clamp(&self) -> Bounds {
        self.local_clamp
    }

    #[inline]
    pub fn window_clamp(&self) -> Bounds {
        self.window_clamp
    }

    /// Intersection of the local and window clamps
    #[inline]
    pub fn effective_clamp(&self) -> Bounds {
        self.local_clamp.intersect(&self.window_clamp)
    }

    /// Move, keeping the object inside its effective clamp
    ///
    /// Returns the position actually taken.
    pub fn set_position(&mut self, position: Point) -> Point {
        let clamped = self.effective_clamp().clamp_origin(position, self.size);
        if clamped != self.position {
            self.position = clamped;
            self.changed = true;
        }
        self.position
    }

    pub fn set_size(&mut self, size: Size) {
        let size = Size::new(size.width.max(0), size.height.max(0));
        if size != self.size {
            self.size = size;
            self.dirty = true;
            self.changed = true;
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        if visible != self.visible {
            self.visible = visible;
            self.changed = true;
        }
    }

    pub fn set_local_clamp(&mut self, clamp: Bounds) {
        if clamp != self.local_clamp {
            self.local_clamp = clamp;
            self.dirty = true;
            self.changed = true;
        }
    }

    pub fn set_window_clamp(&mut self, clamp: Bounds) {
        if clamp != self.window_clamp {
            self.window_clamp = clamp;
            self.dirty = true;
            self.changed = true;
        }
    }

    /// Replace pixel data; the size follows the buffer
    pub fn set_pixels(&mut self, pixels: PixelBuffer) {
        self.size = pixels.size();
        self.pixels = pixels;
        self.dirty = true;
        self.changed = true;
    }

    /// Hit test against the effective clamp
    #[inline]
    pub fn in_clamp(&self, point: Point) -> bool {
        self.effective_clamp().contains(point)
    }

    /// Hit test against the object rectangle and its effective clamp
    #[inline]
    pub fn hit(&self, point: Point) -> bool {
        self.rect().contains(point) && self.in_clamp(point)
    }

    /// Clear and return the change flag
    pub(crate) fn take_changed(&mut self) -> bool {
        std::mem::replace(&mut self.changed, false)
    }
}
