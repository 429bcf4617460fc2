//! Input event delivery to windows and widgets

use tracing::debug;

use super::Gui;
use crate::input::{ButtonAction, Channel, InputEvent, Key, KeyAction, PointerButton};
use crate::math::{Point, Size};
use crate::object::{ObjectId, Widget};
use crate::widgets::edit_for_key;
use crate::window::{CursorIcon, GestureKind, WindowState};

impl Gui {
    /// Deliver one host input event
    ///
    /// Every event requests a redraw. Recipients are snapshotted per event,
    /// so objects destroyed by an earlier recipient are skipped.
    pub fn handle_event(&mut self, event: &InputEvent) {
        self.input.apply(event);
        self.registry.request_redraw();
        match *event {
            InputEvent::PointerMove { .. } => self.pointer_moved(),
            InputEvent::PointerButton { button, action } => self.pointer_button(button, action),
            InputEvent::Scroll { dy, .. } => self.scrolled(dy),
            InputEvent::Key { key, action } => self.key_event(key, action),
            InputEvent::SurfaceResize { width, height } => {
                self.surface_resized(Size::new(width, height));
            }
            InputEvent::SurfaceClose => {
                debug!("surface close requested");
                self.close_requested = true;
            }
        }
    }

    /// Widgets inside an unfocused window ignore input
    pub(crate) fn widget_enabled(&self, id: ObjectId) -> bool {
        self.parent_of(id)
            .map_or(true, |w| self.registry.window(w).is_some_and(|w| w.is_focused()))
    }

    /// Widgets take pointer input only from a focused owner that no other
    /// window's gesture is locking out
    fn pointer_enabled(&self, id: ObjectId) -> bool {
        let free = match self.parent_of(id) {
            Some(window) => self.windows.is_free_to_interact(window),
            None => self.windows.gestures.active().is_none(),
        };
        free && self.widget_enabled(id)
    }

    /// A window above `id` takes a press at `point`, either by covering it or
    /// through one of its live resize hot zones
    fn claimed_above(&self, id: ObjectId, point: Point) -> bool {
        let ids = self.windows.ids();
        if self.windows.is_covered(&self.registry, id, point, &ids) {
            return true;
        }
        let layer = self.registry.layer_of(id).unwrap_or(i32::MIN);
        ids.into_iter().filter(|&other| other != id).any(|other| {
            self.registry.get(other).is_some_and(|o| {
                o.visual.is_visible()
                    && o.visual.layer() > layer
                    && o.as_window()
                        .is_some_and(|w| w.resize_handle_at(o.visual.rect(), point).is_some())
            })
        })
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    fn pointer_moved(&mut self) {
        let point = self.input.pointer();
        for id in self.dispatch.recipients(&self.registry, Channel::Pointer) {
            if self.registry.window(id).is_some() {
                self.window_pointer_moved(id, point);
            } else {
                self.button_pointer_moved(id, point);
            }
        }
        self.update_cursor();
    }

    fn window_pointer_moved(&mut self, id: ObjectId, point: Point) {
        let Some(object) = self.registry.get(id) else {
            return;
        };
        let Some(window) = object.as_window() else {
            return;
        };
        if !object.visual.is_visible() {
            return;
        }
        let free = self.windows.is_free_to_interact(id);
        let hover = if free {
            window.resize_handle_at(object.visual.rect(), point)
        } else {
            None
        };
        let wants_drag = free
            && window.gesture.pressing
            && !window.gesture.is_active()
            && window.is_focused()
            && window.state() != WindowState::Maximized;
        let scroll_from = window.gesture.scroll_drag;

        let dragging = wants_drag && self.windows.gestures.begin(id, GestureKind::Move);
        let Some(window) = self.registry.window_mut(id) else {
            return;
        };
        window.gesture.hover = hover;
        if dragging {
            window.gesture.dragging = true;
            debug!("window {} drag started", id);
        }
        if let Some(last) = scroll_from {
            window.scroll.drag = window.scroll.drag + (point - last);
            window.gesture.scroll_drag = Some(point);
            self.relayout_scrollables(id);
        }
    }

    fn button_pointer_moved(&mut self, id: ObjectId, point: Point) {
        let inside =
            self.registry.visual(id).is_some_and(|v| v.hit(point)) && self.pointer_enabled(id);
        let frame = match self.registry.widget_mut(id) {
            Some(Widget::Button(button)) => button.on_pointer_move(inside),
            _ => None,
        };
        if let Some(frame) = frame {
            self.show_button_frame(id, frame);
        }
    }

    fn pointer_button(&mut self, button: PointerButton, action: ButtonAction) {
        let point = self.input.pointer();
        for id in self.dispatch.recipients(&self.registry, Channel::Pointer) {
            let is_window = self.registry.window(id).is_some();
            match (button, is_window) {
                (PointerButton::Primary, true) => self.window_primary(id, point, action),
                (PointerButton::Primary, false) => self.button_primary(id, point, action),
                (PointerButton::Middle, true) => self.window_middle(id, point, action),
                _ => {}
            }
        }
        self.update_cursor();
    }

    fn window_primary(&mut self, id: ObjectId, point: Point, action: ButtonAction) {
        if action == ButtonAction::Released {
            if let Some(window) = self.registry.window_mut(id) {
                if window.gesture.is_active() {
                    debug!("window {} gesture ended", id);
                }
                window.gesture.release();
            }
            self.windows.gestures.end(id);
            return;
        }

        if !self.registry.visual(id).is_some_and(|v| v.is_visible()) {
            return;
        }
        self.windows.request_focus(&mut self.registry, id, point);

        let Some(object) = self.registry.get(id) else {
            return;
        };
        let Some(window) = object.as_window() else {
            return;
        };
        if !window.is_focused() || self.claimed_above(id, point) {
            return;
        }
        let rect = object.visual.rect();
        let handle = window.resize_handle_at(rect, point);
        let in_title = window.title_strip(rect).contains(point)
            && object.visual.in_clamp(point)
            && !window.controls().buttons().into_iter().any(|b| {
                self.registry
                    .visual(b)
                    .is_some_and(|v| v.is_visible() && v.hit(point))
            });

        if let Some(handle) = handle {
            if self.windows.gestures.begin(id, GestureKind::Resize(handle)) {
                if let Some(window) = self.registry.window_mut(id) {
                    window.gesture.latched = Some(handle);
                    window.gesture.last_pointer = point;
                }
                debug!("window {} resize started from {:?}", id, handle);
            }
        } else if in_title {
            if let Some(window) = self.registry.window_mut(id) {
                window.gesture.pressing = true;
                window.gesture.last_pointer = point;
            }
        }
    }

    fn window_middle(&mut self, id: ObjectId, point: Point, action: ButtonAction) {
        let Some(object) = self.registry.get(id) else {
            return;
        };
        let hit = object.visual.is_visible() && object.visual.hit(point);
        let Some(window) = self.registry.window_mut(id) else {
            return;
        };
        match action {
            ButtonAction::Pressed => {
                if hit && window.is_focused() && window.scroll.drag_enabled {
                    window.gesture.scroll_drag = Some(point);
                }
            }
            ButtonAction::Released => window.gesture.scroll_drag = None,
        }
    }

    fn button_primary(&mut self, id: ObjectId, point: Point, action: ButtonAction) {
        let inside =
            self.registry.visual(id).is_some_and(|v| v.hit(point)) && self.pointer_enabled(id);
        let frames = match self.registry.widget_mut(id) {
            Some(Widget::Button(button)) => {
                [button.on_pointer_move(inside), button.on_primary(action)]
            }
            _ => return,
        };
        for frame in frames.into_iter().flatten() {
            self.show_button_frame(id, frame);
        }
    }

    /// Wheel ticks go to the topmost focused window under the pointer
    fn scrolled(&mut self, ticks: f32) {
        let point = self.input.pointer();
        let target = self
            .windows
            .ids()
            .into_iter()
            .filter(|&id| {
                self.registry.get(id).is_some_and(|o| {
                    o.visual.is_visible()
                        && o.visual.hit(point)
                        && o.as_window().is_some_and(|w| w.is_focused() && w.scroll.wheel_enabled)
                })
            })
            .max_by_key(|&id| self.registry.layer_of(id).unwrap_or(i32::MIN));
        if let Some(id) = target {
            if let Some(window) = self.registry.window_mut(id) {
                window.scroll.add_wheel(ticks);
            }
            self.relayout_scrollables(id);
        }
    }

    pub(crate) fn update_cursor(&mut self) {
        let gestures: Vec<_> = self
            .windows
            .ids()
            .into_iter()
            .filter_map(|id| self.registry.window(id))
            .map(|w| (w.gesture.latched, w.gesture.hover))
            .collect();
        let handle = gestures
            .iter()
            .find_map(|&(latched, _)| latched)
            .or_else(|| gestures.iter().find_map(|&(_, hover)| hover));
        self.windows
            .set_cursor(handle.map_or(CursorIcon::Default, |h| h.cursor()));
    }

    // =========================================================================
    // Keys and surface
    // =========================================================================

    fn key_event(&mut self, key: Key, action: KeyAction) {
        if action == KeyAction::Released {
            return;
        }
        let Some(edit) = edit_for_key(key, self.input.shift()) else {
            return;
        };
        for id in self.dispatch.recipients(&self.registry, Channel::Keys) {
            if !self.widget_enabled(id) {
                continue;
            }
            if let Some(Widget::WritableTextBox(writable)) = self.registry.widget_mut(id) {
                writable.queue(edit.clone());
            }
        }
    }

    fn surface_resized(&mut self, size: Size) {
        self.windows.set_surface(size);
        for id in self.windows.top_level(&self.registry) {
            let maximized = self
                .registry
                .window(id)
                .is_some_and(|w| w.state() == WindowState::Maximized);
            if let Some(visual) = self.registry.visual_mut(id) {
                let current = visual.size();
                let fitted = if maximized {
                    size
                } else {
                    Size::new(current.width.min(size.width), current.height.min(size.height))
                };
                visual.set_size(fitted);
            }
            self.windows.constrain_top_level(&mut self.registry, id);
        }
        debug!("surface resized to {}x{}", size.width, size.height);
    }
}
