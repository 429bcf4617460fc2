//! Window state

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::math::{Point, Rect, FRAME_STYLE};
use crate::object::ObjectId;
use super::{hot_zone, Anchor, ResizeHandle, WindowColors, WindowConfig, WindowGesture};

/// Window display state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowState {
    #[default]
    Normal,
    Maximized,
    Minimized,
}

/// Title text and control buttons of a decorated window
#[derive(Clone, Debug, Default)]
pub struct Controls {
    pub title: Option<ObjectId>,
    pub close: Option<ObjectId>,
    pub maximize: Option<ObjectId>,
    pub split: Option<ObjectId>,
    pub minimize: Option<ObjectId>,
}

impl Controls {
    /// Control buttons that exist
    pub fn buttons(&self) -> Vec<ObjectId> {
        [self.close, self.maximize, self.split, self.minimize]
            .into_iter()
            .flatten()
            .collect()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.title == Some(id) || self.buttons().contains(&id)
    }
}

/// Wheel and drag scroll accumulators
#[derive(Clone, Debug)]
pub struct ScrollState {
    pub wheel_enabled: bool,
    pub drag_enabled: bool,
    /// Accumulated wheel ticks
    pub wheel: f32,
    /// Units moved per wheel tick
    pub multiplier: i32,
    pub min_wheel: Option<f32>,
    pub max_wheel: Option<f32>,
    /// Accumulated drag-scroll delta, follows the pointer
    pub drag: Point,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            wheel_enabled: false,
            drag_enabled: false,
            wheel: 0.0,
            multiplier: 32,
            min_wheel: None,
            max_wheel: None,
            drag: Point::ZERO,
        }
    }
}

impl ScrollState {
    /// Add wheel ticks within the configured limits
    pub fn add_wheel(&mut self, ticks: f32) {
        let mut wheel = self.wheel + ticks;
        if let Some(max) = self.max_wheel {
            wheel = wheel.min(max);
        }
        if let Some(min) = self.min_wheel {
            wheel = wheel.max(min);
        }
        self.wheel = wheel;
    }

    /// Offset applied to scrollable children
    pub fn offset(&self) -> Point {
        if self.drag_enabled {
            self.drag
        } else {
            Point::new(0, (self.wheel * self.multiplier as f32) as i32)
        }
    }
}

/// Geometry saved by maximize for split to restore
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RestoreState {
    pub rect: Rect,
    pub anchor: Option<Anchor>,
}

/// Window-specific state of a registry object
///
/// Geometry lives on the object's [`VisualObject`](crate::object::VisualObject);
/// this holds chrome, tree links, children and gesture state.
#[derive(Clone, Debug)]
pub struct Window {
    pub title: String,
    pub decorated: bool,
    pub resizable: bool,
    pub border: i32,
    pub title_bar_height: i32,
    pub colors: WindowColors,
    pub gesture: WindowGesture,
    pub scroll: ScrollState,
    pub(crate) focused: bool,
    pub(crate) state: WindowState,
    pub(crate) parent: Option<ObjectId>,
    pub(crate) root: Option<ObjectId>,
    pub(crate) children: BTreeMap<Anchor, Vec<ObjectId>>,
    pub(crate) child_layers: HashMap<ObjectId, i32>,
    pub(crate) scroll_bases: HashMap<ObjectId, Point>,
    pub(crate) controls: Controls,
    pub(crate) restore: Option<RestoreState>,
}

impl Window {
    pub fn new(config: &WindowConfig) -> Self {
        let (border, title_bar_height) = if config.decorated {
            (FRAME_STYLE.border_width, FRAME_STYLE.title_bar_height)
        } else {
            (0, 0)
        };
        Self {
            title: config.title.clone(),
            decorated: config.decorated,
            resizable: config.resizable,
            border,
            title_bar_height,
            colors: config.colors,
            gesture: WindowGesture::default(),
            scroll: ScrollState {
                wheel_enabled: config.wheel_scroll,
                drag_enabled: config.drag_scroll,
                ..Default::default()
            },
            focused: false,
            state: WindowState::Normal,
            parent: None,
            root: None,
            children: BTreeMap::new(),
            child_layers: HashMap::new(),
            scroll_bases: HashMap::new(),
            controls: Controls::default(),
            restore: None,
        }
    }

    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    #[inline]
    pub fn state(&self) -> WindowState {
        self.state
    }

    /// Direct parent window
    #[inline]
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    /// Top-most ancestor, fixed when the window is attached
    #[inline]
    pub fn root(&self) -> Option<ObjectId> {
        self.root
    }

    #[inline]
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    #[inline]
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.gesture.dragging
    }

    #[inline]
    pub fn is_resizing(&self) -> bool {
        self.gesture.is_resizing()
    }

    /// Children grouped by anchor
    pub fn children(&self) -> &BTreeMap<Anchor, Vec<ObjectId>> {
        &self.children
    }

    /// Every child, controls included, in anchor order
    pub fn all_children(&self) -> Vec<ObjectId> {
        self.children.values().flatten().copied().collect()
    }

    pub fn anchor_of(&self, child: ObjectId) -> Option<Anchor> {
        self.children
            .iter()
            .find(|(_, ids)| ids.contains(&child))
            .map(|(&anchor, _)| anchor)
    }

    /// Layer of `child` relative to the window's widget layer
    pub fn child_layer(&self, child: ObjectId) -> i32 {
        self.child_layers.get(&child).copied().unwrap_or(0)
    }

    /// Area inside the border and below the title bar
    pub fn interior(&self, rect: Rect) -> Rect {
        rect.inset(self.border, self.title_bar_height, self.border, self.border)
    }

    /// Strip occupied by the title bar
    pub fn title_strip(&self, rect: Rect) -> Rect {
        Rect::new(rect.x, rect.y, rect.width, self.title_bar_height)
    }

    /// Hot zone under `point` this window would resize from
    ///
    /// Only focused, resizable, decorated windows in the normal state have
    /// live hot zones.
    pub fn resize_handle_at(&self, rect: Rect, point: Point) -> Option<ResizeHandle> {
        let live = self.decorated
            && self.resizable
            && self.focused
            && self.state == WindowState::Normal;
        if !live {
            return None;
        }
        hot_zone(&rect, point, FRAME_STYLE.resize_range)
    }

    /// Add `child` under `anchor`, moving it out of any other anchor
    pub(crate) fn insert_child(&mut self, anchor: Anchor, child: ObjectId) {
        self.take_from_bucket(child);
        self.children.entry(anchor).or_default().push(child);
    }

    fn take_from_bucket(&mut self, child: ObjectId) -> Option<Anchor> {
        let anchor = self.anchor_of(child)?;
        if let Some(ids) = self.children.get_mut(&anchor) {
            ids.retain(|&c| c != child);
            if ids.is_empty() {
                self.children.remove(&anchor);
            }
        }
        Some(anchor)
    }

    /// Forget `child`, returning the anchor it had
    pub(crate) fn remove_child(&mut self, child: ObjectId) -> Option<Anchor> {
        let anchor = self.take_from_bucket(child)?;
        self.child_layers.remove(&child);
        self.scroll_bases.remove(&child);
        Some(anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decorated_frame_metrics() {
        let w = Window::new(&WindowConfig::default());
        assert_eq!(w.border, 1);
        assert_eq!(w.title_bar_height, 34);
        assert_eq!(w.interior(Rect::new(0, 0, 500, 500)), Rect::new(1, 34, 498, 465));
    }

    #[test]
    fn test_undecorated_interior_is_rect() {
        let w = Window::new(&WindowConfig { decorated: false, ..Default::default() });
        let rect = Rect::new(10, 10, 200, 100);
        assert_eq!(w.interior(rect), rect);
    }

    #[test]
    fn test_children_move_between_anchors() {
        let mut w = Window::new(&WindowConfig::default());
        w.insert_child(Anchor::Center, 7);
        w.insert_child(Anchor::TopLeft, 8);
        w.insert_child(Anchor::BottomRight, 7);

        assert_eq!(w.anchor_of(7), Some(Anchor::BottomRight));
        assert!(!w.children().contains_key(&Anchor::Center));
        assert_eq!(w.all_children(), vec![8, 7]);

        w.child_layers.insert(7, 3);
        w.insert_child(Anchor::Top, 7);
        assert_eq!(w.child_layer(7), 3);

        assert_eq!(w.remove_child(7), Some(Anchor::Top));
        assert_eq!(w.child_layer(7), 0);
        assert_eq!(w.remove_child(7), None);
    }

    #[test]
    fn test_scroll_offset_sources() {
        let mut s = ScrollState { wheel_enabled: true, ..Default::default() };
        s.add_wheel(2.0);
        assert_eq!(s.offset(), Point::new(0, 64));

        s.drag_enabled = true;
        s.drag = Point::new(-5, 7);
        assert_eq!(s.offset(), Point::new(-5, 7));
    }

    #[test]
    fn test_wheel_limits() {
        let mut s = ScrollState {
            min_wheel: Some(-3.0),
            max_wheel: Some(0.0),
            ..Default::default()
        };
        s.add_wheel(5.0);
        assert_eq!(s.wheel, 0.0);
        s.add_wheel(-10.0);
        assert_eq!(s.wheel, -3.0);
    }

    #[test]
    fn test_controls_buttons() {
        let controls = Controls {
            title: Some(1),
            close: Some(2),
            minimize: Some(4),
            ..Default::default()
        };
        assert_eq!(controls.buttons(), vec![2, 4]);
        assert!(controls.contains(1));
        assert!(!controls.contains(3));
    }
}
