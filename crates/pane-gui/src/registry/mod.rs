//! Object registry
//!
//! Owns every live object and keeps two indices over them: by name and by
//! layer. The union of the layer buckets is always the set of live objects;
//! render and update passes walk the buckets in ascending layer order.

mod redraw;

pub use redraw::RedrawState;

use std::collections::{BTreeMap, HashMap};
use tracing::{trace, warn};

use crate::backend::RenderBackend;
use crate::error::GuiError;
use crate::math::{Bounds, Point};
use crate::object::{Object, ObjectId, ObjectKind, VisualObject, Widget};
use crate::widgets::TextBox;
use crate::window::Window;

/// Name and layer indices over all live objects
pub struct Registry {
    objects: HashMap<ObjectId, Object>,
    by_name: HashMap<String, ObjectId>,
    by_layer: BTreeMap<i32, Vec<ObjectId>>,
    next_id: ObjectId,
    redraw: RedrawState,
    desync_events: usize,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(RedrawState::default())
    }
}

impl Registry {
    pub fn new(redraw: RedrawState) -> Self {
        Self {
            objects: HashMap::new(),
            by_name: HashMap::new(),
            by_layer: BTreeMap::new(),
            next_id: 1,
            redraw,
            desync_events: 0,
        }
    }

    /// Register an object
    ///
    /// A duplicate name leaves the existing object in place.
    pub fn add(&mut self, object: Object) -> Result<ObjectId, GuiError> {
        let name = object.visual.name().to_string();
        if self.by_name.contains_key(&name) {
            warn!("object {:?} already registered, ignoring", name);
            return Err(GuiError::DuplicateName(name));
        }

        let id = self.next_id;
        self.next_id += 1;

        self.by_layer.entry(object.visual.layer()).or_default().push(id);
        self.by_name.insert(name, id);
        self.objects.insert(id, object);
        self.redraw.request();
        Ok(id)
    }

    /// Unregister an object, returning it
    pub fn remove(&mut self, id: ObjectId) -> Option<Object> {
        let object = self.objects.remove(&id)?;
        self.by_name.remove(object.visual.name());
        self.detach_from_layer(id, object.visual.layer());
        self.redraw.request();
        Some(object)
    }

    /// Move an object to another layer bucket
    pub fn change_layer(&mut self, id: ObjectId, layer: i32) {
        let Some(current) = self.objects.get(&id).map(|o| o.visual.layer()) else {
            return;
        };
        if current != layer {
            self.detach_from_layer(id, current);
            self.by_layer.entry(layer).or_default().push(id);
            if let Some(object) = self.objects.get_mut(&id) {
                object.visual.set_layer_unchecked(layer);
            }
        }

        for member in self.members(id) {
            self.change_layer(member, layer);
        }
    }

    fn detach_from_layer(&mut self, id: ObjectId, recorded: i32) {
        if let Some(bucket) = self.by_layer.get_mut(&recorded) {
            if let Some(index) = bucket.iter().position(|&o| o == id) {
                bucket.remove(index);
                if bucket.is_empty() {
                    self.by_layer.remove(&recorded);
                }
                return;
            }
        }

        self.desync_events += 1;
        warn!(
            "object {} missing from its layer {} bucket, scanning all layers",
            id, recorded
        );
        let mut found = false;
        for bucket in self.by_layer.values_mut() {
            let before = bucket.len();
            bucket.retain(|&o| o != id);
            found |= bucket.len() != before;
        }
        self.by_layer.retain(|_, bucket| !bucket.is_empty());
        if !found {
            warn!("object {} was not in any layer bucket", id);
        }
    }

    /// Number of layer-index desyncs recovered so far
    pub fn desync_events(&self) -> usize {
        self.desync_events
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    #[inline]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    #[inline]
    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(&id)
    }

    pub fn id_of(&self, name: &str) -> Option<ObjectId> {
        self.by_name.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&Object> {
        self.id_of(name).and_then(|id| self.objects.get(&id))
    }

    pub fn visual(&self, id: ObjectId) -> Option<&VisualObject> {
        self.objects.get(&id).map(|o| &o.visual)
    }

    pub fn visual_mut(&mut self, id: ObjectId) -> Option<&mut VisualObject> {
        self.objects.get_mut(&id).map(|o| &mut o.visual)
    }

    pub fn window(&self, id: ObjectId) -> Option<&Window> {
        self.objects.get(&id).and_then(Object::as_window)
    }

    pub fn window_mut(&mut self, id: ObjectId) -> Option<&mut Window> {
        self.objects.get_mut(&id).and_then(Object::as_window_mut)
    }

    pub fn widget(&self, id: ObjectId) -> Option<&Widget> {
        self.objects.get(&id).and_then(Object::as_widget)
    }

    pub fn widget_mut(&mut self, id: ObjectId) -> Option<&mut Widget> {
        self.objects.get_mut(&id).and_then(Object::as_widget_mut)
    }

    pub fn layer_of(&self, id: ObjectId) -> Option<i32> {
        self.visual(id).map(VisualObject::layer)
    }

    /// Member objects of a composite widget
    pub fn members(&self, id: ObjectId) -> Vec<ObjectId> {
        self.objects.get(&id).map(Object::members).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All registered names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// Ids in ascending layer order, insertion order within a layer
    pub fn ordered_ids(&self) -> Vec<ObjectId> {
        self.by_layer.values().flatten().copied().collect()
    }

    /// Ids currently recorded in layer buckets, stale entries included
    pub fn layered_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.by_layer.values().flatten().copied()
    }

    // =========================================================================
    // Geometry with composite fan-out
    // =========================================================================

    /// Move an object and its members
    pub fn set_position(&mut self, id: ObjectId, position: Point) {
        let Some(object) = self.objects.get_mut(&id) else {
            return;
        };
        let origin = object.visual.set_position(position);
        for (member, at) in self.member_layout(id, origin) {
            self.set_position(member, at);
        }
    }

    fn member_layout(&self, id: ObjectId, origin: Point) -> Vec<(ObjectId, Point)> {
        let Some(widget) = self.widget(id) else {
            return Vec::new();
        };
        match widget {
            Widget::Animation(anim) => anim.frames().iter().map(|&f| (f, origin)).collect(),
            Widget::Button(button) => button
                .animation
                .frames()
                .iter()
                .map(|&f| (f, origin))
                .collect(),
            Widget::TextBox(text_box) => self.line_layout(text_box, origin),
            Widget::WritableTextBox(writable) => {
                let mut layout = self.line_layout(&writable.text_box, origin);
                layout.push((writable.caret(), origin + writable.caret_offset()));
                layout
            }
            Widget::Image | Widget::Text(_) => Vec::new(),
        }
    }

    fn line_layout(&self, text_box: &TextBox, origin: Point) -> Vec<(ObjectId, Point)> {
        let heights = text_box
            .lines()
            .iter()
            .map(|&line| self.visual(line).map(|v| v.size().height).unwrap_or(0));
        text_box.stack(origin, heights)
    }

    pub fn set_window_clamp(&mut self, id: ObjectId, clamp: Bounds) {
        if let Some(visual) = self.visual_mut(id) {
            visual.set_window_clamp(clamp);
        }
        for member in self.members(id) {
            self.set_window_clamp(member, clamp);
        }
    }

    pub fn set_local_clamp(&mut self, id: ObjectId, clamp: Bounds) {
        if let Some(visual) = self.visual_mut(id) {
            visual.set_local_clamp(clamp);
        }
        for member in self.members(id) {
            self.set_local_clamp(member, clamp);
        }
    }

    /// Show or hide an object
    ///
    /// Animations only ever show their current frame. Windows are shown on
    /// their own; their children are handled by the window manager.
    pub fn set_visible(&mut self, id: ObjectId, visible: bool) {
        let Some(object) = self.objects.get_mut(&id) else {
            return;
        };
        let shown: Vec<(ObjectId, bool)> = match &mut object.kind {
            ObjectKind::Window(_) => {
                object.visual.set_visible(visible);
                Vec::new()
            }
            ObjectKind::Widget(Widget::Animation(anim)) => {
                object.visual.set_visible(visible);
                anim.set_shown(visible);
                anim.frame_visibility()
            }
            ObjectKind::Widget(Widget::Button(button)) => {
                object.visual.set_visible(visible);
                button.animation.set_shown(visible);
                button.animation.frame_visibility()
            }
            ObjectKind::Widget(Widget::WritableTextBox(writable)) => {
                object.visual.set_visible(visible);
                let mut shown: Vec<_> =
                    writable.text_box.lines().iter().map(|&l| (l, visible)).collect();
                shown.push((writable.caret(), visible && writable.caret_shown()));
                shown
            }
            ObjectKind::Widget(widget) => {
                object.visual.set_visible(visible);
                widget.members().into_iter().map(|m| (m, visible)).collect()
            }
        };
        for (member, member_visible) in shown {
            self.set_visible(member, member_visible);
        }
    }

    // =========================================================================
    // Frame passes
    // =========================================================================

    /// Draw every live object in ascending layer order
    ///
    /// Bucket entries whose object is gone are evicted as they are met.
    pub fn render_frame(&mut self, backend: &mut dyn RenderBackend) {
        let mut stale = 0usize;
        let objects = &mut self.objects;
        for bucket in self.by_layer.values_mut() {
            bucket.retain(|id| match objects.get_mut(id) {
                Some(object) => {
                    object.render(backend);
                    true
                }
                None => {
                    stale += 1;
                    false
                }
            });
        }
        if stale > 0 {
            self.by_layer.retain(|_, bucket| !bucket.is_empty());
            trace!("evicted {} stale layer entries", stale);
        }
    }

    /// Fold per-object change flags into the redraw flag
    pub fn collect_changes(&mut self) {
        let mut changed = false;
        for object in self.objects.values_mut() {
            changed |= object.visual.take_changed();
        }
        if changed {
            self.redraw.request();
        }
    }

    #[inline]
    pub fn request_redraw(&mut self) {
        self.redraw.request();
    }

    #[inline]
    pub fn redraw_needed(&self) -> bool {
        self.redraw.needed()
    }

    pub fn redraw_state(&self) -> &RedrawState {
        &self.redraw
    }

    pub fn redraw_state_mut(&mut self) -> &mut RedrawState {
        &mut self.redraw
    }

    /// Record a layer on an object without moving its bucket entry
    #[cfg(test)]
    pub(crate) fn desync_layer_for_test(&mut self, id: ObjectId, layer: i32) {
        if let Some(visual) = self.visual_mut(id) {
            visual.set_layer_unchecked(layer);
        }
    }

    /// Insert a bucket entry with no backing object
    #[cfg(test)]
    pub(crate) fn inject_stale_for_test(&mut self, id: ObjectId, layer: i32) {
        self.by_layer.entry(layer).or_default().push(id);
    }

    /// Name index and layer buckets describe the same set, each id once
    pub fn is_consistent(&self) -> bool {
        let mut layered: Vec<ObjectId> = self.layered_ids().collect();
        layered.sort_unstable();
        let before = layered.len();
        layered.dedup();
        if before != layered.len() {
            return false;
        }
        let mut named: Vec<ObjectId> = self.by_name.values().copied().collect();
        named.sort_unstable();
        layered == named && named.len() == self.objects.len()
    }
}
