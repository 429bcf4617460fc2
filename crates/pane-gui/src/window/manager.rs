//! Window manager for tree links, z-order and focus

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::math::{Point, Size, FRAME_STYLE};
use crate::object::ObjectId;
use crate::registry::Registry;
use super::{CursorIcon, GestureSlot};

/// Cross-window indices and state
///
/// Window objects themselves live in the [`Registry`]; operations that need
/// to look across windows take it by reference.
pub struct WindowManager {
    /// All windows by name
    windows: BTreeMap<String, ObjectId>,
    /// Drag/resize exclusivity
    pub gestures: GestureSlot,
    /// Cursor requested from the host
    cursor: CursorIcon,
    /// Host surface size
    surface: Size,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(Size::new(1280, 720))
    }
}

impl WindowManager {
    pub fn new(surface: Size) -> Self {
        Self {
            windows: BTreeMap::new(),
            gestures: GestureSlot::new(),
            cursor: CursorIcon::Default,
            surface,
        }
    }

    #[inline]
    pub fn surface(&self) -> Size {
        self.surface
    }

    pub(crate) fn set_surface(&mut self, surface: Size) {
        self.surface = surface;
    }

    #[inline]
    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: CursorIcon) {
        self.cursor = cursor;
    }

    pub(crate) fn register(&mut self, name: &str, id: ObjectId) {
        self.windows.insert(name.to_string(), id);
    }

    pub(crate) fn unregister(&mut self, id: ObjectId) {
        self.windows.retain(|_, &mut w| w != id);
        self.gestures.end(id);
    }

    pub fn id_of(&self, name: &str) -> Option<ObjectId> {
        self.windows.get(name).copied()
    }

    /// All window ids, ordered by name
    pub fn ids(&self) -> Vec<ObjectId> {
        self.windows.values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Windows without a parent
    pub fn top_level(&self, reg: &Registry) -> Vec<ObjectId> {
        self.windows
            .values()
            .copied()
            .filter(|&id| reg.window(id).is_some_and(|w| w.is_top_level()))
            .collect()
    }

    /// Windows grouped by layer
    pub fn by_layer(&self, reg: &Registry) -> BTreeMap<i32, Vec<ObjectId>> {
        let mut layers: BTreeMap<i32, Vec<ObjectId>> = BTreeMap::new();
        for &id in self.windows.values() {
            if let Some(layer) = reg.layer_of(id) {
                layers.entry(layer).or_default().push(id);
            }
        }
        layers
    }

    /// Focused window on the highest layer
    pub fn focused_window(&self, reg: &Registry) -> Option<ObjectId> {
        self.windows
            .values()
            .copied()
            .filter(|&id| reg.window(id).is_some_and(|w| w.is_focused()))
            .max_by_key(|&id| reg.layer_of(id).unwrap_or(i32::MIN))
    }

    /// Whether `window` may start or continue a gesture
    #[inline]
    pub fn is_free_to_interact(&self, window: ObjectId) -> bool {
        self.gestures.is_free_for(window)
    }

    /// A visible window in `among`, above `id`, hits `point`
    pub fn is_covered(
        &self,
        reg: &Registry,
        id: ObjectId,
        point: Point,
        among: &[ObjectId],
    ) -> bool {
        let layer = reg.layer_of(id).unwrap_or(i32::MIN);
        among.iter().any(|&other| {
            other != id
                && reg.get(other).is_some_and(|o| {
                    o.visual.is_visible() && o.visual.hit(point) && o.visual.layer() > layer
                })
        })
    }

    // =========================================================================
    // Tree queries
    // =========================================================================

    /// Direct child windows of `id`
    pub fn child_windows(&self, reg: &Registry, id: ObjectId) -> Vec<ObjectId> {
        reg.window(id)
            .map(|w| {
                w.all_children()
                    .into_iter()
                    .filter(|&c| reg.window(c).is_some())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every object below `id`: children, their members and nested subtrees
    pub fn descendants(&self, reg: &Registry, id: ObjectId) -> Vec<ObjectId> {
        let mut out = Vec::new();
        let mut stack = reg.window(id).map(|w| w.all_children()).unwrap_or_default();
        while let Some(next) = stack.pop() {
            if !reg.contains(next) {
                continue;
            }
            out.push(next);
            stack.extend(reg.members(next));
            if let Some(w) = reg.window(next) {
                stack.extend(w.all_children());
            }
        }
        out
    }

    /// `ancestor` is on the parent chain of `id`
    pub fn is_ancestor(&self, reg: &Registry, ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = reg.window(id).and_then(|w| w.parent());
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = reg.window(p).and_then(|w| w.parent());
        }
        false
    }

    /// Absolute root of `id`, itself when top-level
    pub fn root_of(&self, reg: &Registry, id: ObjectId) -> ObjectId {
        reg.window(id).and_then(|w| w.root()).unwrap_or(id)
    }

    /// Highest layer used by `id` and everything below it
    pub fn subtree_highest(&self, reg: &Registry, id: ObjectId) -> i32 {
        let own = reg.layer_of(id).unwrap_or(i32::MIN);
        self.descendants(reg, id)
            .into_iter()
            .filter_map(|d| reg.layer_of(d))
            .fold(own, i32::max)
    }

    // =========================================================================
    // Layering
    // =========================================================================

    /// Put `id` on `layer` and restack its subtree above it
    ///
    /// Widgets go to `layer + 1 + relative layer`; child windows keep their
    /// relative order, each one above the previous one's subtree.
    pub fn relayer(&self, reg: &mut Registry, id: ObjectId, layer: i32) {
        reg.change_layer(id, layer);

        let Some(window) = reg.window(id) else {
            return;
        };
        let children: Vec<(ObjectId, i32)> = window
            .all_children()
            .into_iter()
            .map(|c| (c, window.child_layer(c)))
            .collect();

        let widget_base = layer + FRAME_STYLE.object_layer_factor;
        let mut next = layer + FRAME_STYLE.subwindow_layer_factor;
        let mut child_windows = Vec::new();
        for (child, relative) in children {
            if reg.window(child).is_some() {
                child_windows.push(child);
            } else {
                let child_layer = widget_base + relative;
                reg.change_layer(child, child_layer);
                next = next.max(child_layer + 1);
            }
        }

        child_windows.sort_by_key(|&c| reg.layer_of(c).unwrap_or(i32::MIN));
        for child in child_windows {
            self.relayer(reg, child, next);
            next = self.subtree_highest(reg, child) + FRAME_STYLE.subwindow_layer_factor;
        }
    }

    /// Layer for `child` joining `parent`
    ///
    /// `parent.layer + 2` when `parent` has no other child windows, otherwise
    /// two above the highest layer used by any sibling subtree.
    pub fn nested_layer(&self, reg: &Registry, parent: ObjectId, child: ObjectId) -> i32 {
        let requested = reg.layer_of(parent).unwrap_or(0) + FRAME_STYLE.subwindow_layer_factor;
        self.child_windows(reg, parent)
            .into_iter()
            .filter(|&s| s != child)
            .map(|s| self.subtree_highest(reg, s))
            .max()
            .map_or(requested, |highest| {
                (highest + FRAME_STYLE.subwindow_layer_factor).max(requested)
            })
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Arbitrate a pointer press at `point` for window `id`
    ///
    /// Returns whether focus moved to `id`.
    pub fn request_focus(&self, reg: &mut Registry, id: ObjectId, point: Point) -> bool {
        let Some(object) = reg.get(id) else {
            return false;
        };
        let Some(window) = object.as_window() else {
            return false;
        };
        if window.is_focused() || !object.visual.is_visible() || !object.visual.hit(point) {
            return false;
        }
        match window.parent() {
            None => {
                if self.is_covered(reg, id, point, &self.top_level(reg)) {
                    return false;
                }
                self.bring_to_front(reg, id);
            }
            Some(parent) => {
                let root = self.root_of(reg, id);
                if !reg.window(root).is_some_and(|w| w.is_focused()) {
                    return false;
                }
                if self.is_covered(reg, id, point, &self.ids()) {
                    return false;
                }

                let mut chain = Vec::new();
                let mut current = Some(parent);
                while let Some(p) = current {
                    if p == root {
                        break;
                    }
                    if !reg.window(p).is_some_and(|w| w.is_focused()) {
                        chain.push(p);
                    }
                    current = reg.window(p).and_then(|w| w.parent());
                }
                for ancestor in chain.into_iter().rev() {
                    self.promote_in_parent(reg, ancestor);
                }
                self.promote_in_parent(reg, id);
            }
        }
        true
    }

    /// Focus a top-level window and raise it above every other window
    pub fn bring_to_front(&self, reg: &mut Registry, id: ObjectId) {
        let mut own: HashSet<ObjectId> = self.descendants(reg, id).into_iter().collect();
        own.insert(id);

        let layer = reg.layer_of(id).unwrap_or(0);
        let highest_other = self
            .top_level(reg)
            .into_iter()
            .filter(|w| !own.contains(w))
            .map(|w| self.subtree_highest(reg, w))
            .max();
        let target = match highest_other {
            Some(h) if h >= layer => h + 1,
            _ => layer,
        };

        self.relayer(reg, id, target);
        for other in self.ids() {
            if let Some(w) = reg.window_mut(other) {
                w.focused = other == id;
            }
        }
        debug!("window {} focused at layer {}", id, target);
    }

    /// Raise a nested window above its siblings and focus it within its root
    fn promote_in_parent(&self, reg: &mut Registry, id: ObjectId) {
        let Some(parent) = reg.window(id).and_then(|w| w.parent()) else {
            return;
        };
        let layer = reg.layer_of(id).unwrap_or(0);
        let highest_sibling = self
            .child_windows(reg, parent)
            .into_iter()
            .filter(|&s| s != id)
            .map(|s| self.subtree_highest(reg, s))
            .max();
        if let Some(h) = highest_sibling {
            if h >= layer {
                self.relayer(reg, id, h + 1);
            }
        }

        let root = self.root_of(reg, id);
        for other in self.ids() {
            if other == id {
                continue;
            }
            if let Some(w) = reg.window_mut(other) {
                if w.root() == Some(root) {
                    w.focused = false;
                }
            }
        }
        if let Some(w) = reg.window_mut(id) {
            w.focused = true;
        }
        debug!("nested window {} focused under root {}", id, root);
    }

    /// Focus `id` unconditionally, raising its whole ancestor chain
    pub fn focus(&self, reg: &mut Registry, id: ObjectId) {
        let root = self.root_of(reg, id);
        self.bring_to_front(reg, root);
        if root == id {
            return;
        }
        let mut chain = vec![id];
        let mut current = reg.window(id).and_then(|w| w.parent());
        while let Some(p) = current {
            if p == root {
                break;
            }
            chain.push(p);
            current = reg.window(p).and_then(|w| w.parent());
        }
        for window in chain.into_iter().rev() {
            self.promote_in_parent(reg, window);
        }
    }

    /// Drop focus from every window
    pub fn unfocus_all(&self, reg: &mut Registry) {
        for id in self.ids() {
            if let Some(w) = reg.window_mut(id) {
                w.focused = false;
            }
        }
    }
}
