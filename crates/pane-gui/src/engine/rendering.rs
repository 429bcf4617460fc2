//! Per-frame update and render passes

use tracing::warn;

use super::Gui;
use crate::backend::RenderBackend;
use crate::input::Channel;
use crate::math::{Point, Size, FRAME_STYLE};
use crate::object::{ObjectId, Widget};
use crate::window::resize_rect;

impl Gui {
    /// Run one update pass
    ///
    /// Applies drag and resize steps, handles control presses, applies
    /// queued typing, syncs window chrome and closes out the frame.
    pub fn update(&mut self) {
        for id in self.windows.ids() {
            self.update_window(id);
        }
        self.handle_control_presses();

        for id in self.dispatch.recipients(&self.registry, Channel::Updates) {
            if matches!(self.registry.widget(id), Some(Widget::WritableTextBox(_))) {
                self.update_writable(id);
            }
        }
        for id in self.windows.ids() {
            self.refresh_chrome(id);
        }
        self.update_cursor();

        self.registry.collect_changes();
        self.input.end_frame();
        self.registry.redraw_state_mut().end_frame();
    }

    /// Draw the frame if a redraw is pending
    ///
    /// Textures of destroyed objects are released first. Returns whether
    /// anything was drawn.
    pub fn render(&mut self, backend: &mut dyn RenderBackend) -> bool {
        for texture in self.pending_release.drain(..) {
            backend.release(texture);
        }
        if !self.registry.redraw_needed() {
            return false;
        }
        backend.begin_frame(self.windows.surface(), self.config.clear);
        self.registry.render_frame(backend);
        backend.end_frame();
        true
    }

    /// Apply the pointer movement since the last step to a drag or resize
    fn update_window(&mut self, id: ObjectId) {
        let pointer = self.input.pointer();
        let Some(object) = self.registry.get(id) else {
            return;
        };
        let Some(window) = object.as_window() else {
            return;
        };
        let gesture = window.gesture.clone();
        if !gesture.is_active() {
            return;
        }
        let rect = object.visual.rect();
        let bound = object.visual.effective_clamp().to_rect();
        let delta = pointer - gesture.last_pointer;
        let max = match window.parent() {
            Some(parent) => self
                .registry
                .get(parent)
                .and_then(|p| p.as_window().map(|w| w.interior(p.visual.rect()).size()))
                .unwrap_or_else(|| self.windows.surface()),
            None => self.windows.surface(),
        };

        if delta != Point::ZERO {
            if gesture.dragging {
                self.registry.set_position(id, rect.position() + delta);
            } else if let Some(handle) = gesture.latched {
                let min = Size::new(FRAME_STYLE.min_window_width, FRAME_STYLE.min_window_height);
                let next = resize_rect(handle, rect, delta, min, max, bound);
                if let Some(visual) = self.registry.visual_mut(id) {
                    visual.set_size(next.size());
                }
                self.registry.set_position(id, next.position());
            }
            self.windows.constrain_children(&mut self.registry, id);
        }
        if let Some(window) = self.registry.window_mut(id) {
            window.gesture.last_pointer = pointer;
        }
    }

    /// Close, maximize, split and minimize clicked controls
    fn handle_control_presses(&mut self) {
        for id in self.windows.ids() {
            let Some(window) = self.registry.window(id) else {
                continue;
            };
            let controls = window.controls().clone();
            let pressed = |gui: &mut Gui, button: Option<ObjectId>| {
                button.is_some_and(|b| gui.read_press(b))
            };

            let result = if pressed(self, controls.close) {
                self.destroy(id)
            } else if pressed(self, controls.maximize) {
                self.maximize(id)
            } else if pressed(self, controls.split) {
                self.split(id)
            } else if pressed(self, controls.minimize) {
                self.minimize(id)
            } else {
                Ok(())
            };
            if let Err(e) = result {
                warn!("window {} control failed: {}", id, e);
            }
        }
    }

    /// Apply queued edits and show the caret while the owner has focus
    fn update_writable(&mut self, id: ObjectId) {
        let focused = self.widget_enabled(id);
        let visible = self.registry.visual(id).is_some_and(|v| v.is_visible());
        let (applied, caret, shown) = match self.registry.widget_mut(id) {
            Some(Widget::WritableTextBox(writable)) => {
                let applied = writable.apply_pending();
                let shown = focused && visible;
                writable.set_caret_shown(shown);
                (applied, writable.caret(), shown)
            }
            _ => return,
        };
        if applied {
            if let Err(e) = self.refresh_writable(id) {
                warn!("text box {} refresh failed: {}", id, e);
            }
        }
        self.registry.set_visible(caret, shown);
    }
}
