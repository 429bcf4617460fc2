//! Window lifecycle, tree links and window operations

use tracing::{debug, warn};

use super::Gui;
use crate::error::GuiError;
use crate::math::{Bounds, Point, Rect, Size, FRAME_STYLE};
use crate::object::{Object, ObjectId, Subscriptions, VisualObject, Widget};
use crate::widgets::TextConfig;
use crate::window::{
    Anchor, Controls, Placement, RestoreState, Window, WindowConfig, WindowState,
};

const WINDOW_EVENTS: Subscriptions = Subscriptions {
    pointer: true,
    updates: true,
    ..Subscriptions::NONE
};

/// Requested window layers are rounded up to even
fn even_layer(layer: i32) -> i32 {
    if layer % 2 == 0 {
        layer
    } else {
        layer + 1
    }
}

/// Title shortened to fit in front of the controls
fn elide(title: &str) -> String {
    format!("{}...", title.chars().take(4).collect::<String>())
}

impl Gui {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Create a top-level window with its title and controls
    ///
    /// The new window is focused and raised above every other window.
    pub fn create_window(&mut self, config: &WindowConfig) -> Result<ObjectId, GuiError> {
        let layer = even_layer(config.layer);
        let mut visual = VisualObject::new(config.name.as_str(), layer).with_size(config.size);
        visual.subscriptions = WINDOW_EVENTS;
        let mut window = Window::new(config);
        window.scroll.multiplier = self.config.scroll_multiplier;

        let id = self.registry.add(Object::window(visual, window))?;
        self.windows.register(&config.name, id);
        self.dispatch.subscribe(id, true);
        self.registry.set_visible(id, true);
        self.windows.constrain_top_level(&mut self.registry, id);
        self.registry.set_position(id, config.position);

        if config.decorated {
            if let Err(e) = self.create_controls(id, config) {
                self.destroy_subtree(id);
                return Err(e);
            }
        }

        self.windows.bring_to_front(&mut self.registry, id);
        self.windows.constrain_children(&mut self.registry, id);
        self.refresh_chrome(id);
        debug!("window {:?} created", config.name);
        Ok(id)
    }

    fn create_controls(&mut self, id: ObjectId, config: &WindowConfig) -> Result<(), GuiError> {
        let name = &config.name;
        let layer = self.registry.layer_of(id).unwrap_or(0) + FRAME_STYLE.object_layer_factor;
        let skin = self.config.skin.clone();
        let mut controls = Controls::default();

        let title_config = TextConfig {
            color: config.colors.title,
            ..Default::default()
        };
        let title = self.create_text(&format!("{}#title", name), &config.title, title_config, layer)?;
        self.attach_child(id, title, Anchor::Title);
        controls.title = Some(title);

        let close = self.create_button(&format!("{}#close", name), &skin.close, layer)?;
        self.attach_child(id, close, Anchor::Close);
        controls.close = Some(close);

        if config.resizable {
            let maximize = self.create_button(&format!("{}#maximize", name), &skin.maximize, layer)?;
            self.attach_child(id, maximize, Anchor::MaxSplit);
            controls.maximize = Some(maximize);

            let split = self.create_button(&format!("{}#split", name), &skin.split, layer)?;
            self.attach_child(id, split, Anchor::MaxSplit);
            self.registry.set_visible(split, false);
            controls.split = Some(split);
        }

        let minimize = self.create_button(&format!("{}#minimize", name), &skin.minimize, layer)?;
        self.attach_child(id, minimize, Anchor::Minimize);
        controls.minimize = Some(minimize);

        if let Some(window) = self.registry.window_mut(id) {
            window.controls = controls;
        }
        Ok(())
    }

    fn require_window(&self, id: ObjectId) -> Result<&Window, GuiError> {
        let object = self.registry.get(id).ok_or(GuiError::UnknownObject(id))?;
        object.as_window().ok_or(GuiError::NotAWindow(id))
    }

    // =========================================================================
    // Tree links
    // =========================================================================

    /// Link `child` under `parent` and lay it out; no argument checks
    pub(crate) fn attach_child(&mut self, parent: ObjectId, child: ObjectId, anchor: Anchor) {
        let parent_layer = self.registry.layer_of(parent).unwrap_or(0);
        let Some(window) = self.registry.window_mut(parent) else {
            return;
        };
        window.insert_child(anchor, child);
        let relative = window.child_layer(child);

        if self.registry.window(child).is_some() {
            let root = self.windows.root_of(&self.registry, parent);
            if let Some(w) = self.registry.window_mut(child) {
                w.parent = Some(parent);
                w.root = Some(root);
            }
            for nested in self.windows.descendants(&self.registry, child) {
                if let Some(w) = self.registry.window_mut(nested) {
                    w.root = Some(root);
                }
            }
            let layer = self.windows.nested_layer(&self.registry, parent, child);
            self.windows.relayer(&mut self.registry, child, layer);
        } else {
            let layer = parent_layer + FRAME_STYLE.object_layer_factor + relative;
            self.registry.change_layer(child, layer);
        }
        self.windows.constrain(&mut self.registry, parent, child);
    }

    /// Attach `child` to window `parent` under `anchor`
    ///
    /// A child already attached elsewhere moves. Attached windows become
    /// nested windows of `parent` and take focus.
    pub fn attach(&mut self, parent: ObjectId, child: ObjectId, anchor: Anchor) -> Result<(), GuiError> {
        if anchor.is_control() {
            return Err(GuiError::InvalidAnchor(anchor.to_string()));
        }
        self.require_window(parent)?;
        let child_visual = self.registry.visual(child).ok_or(GuiError::UnknownObject(child))?;
        if child == parent
            || child_visual.owner().is_some()
            || self.windows.is_ancestor(&self.registry, child, parent)
        {
            return Err(GuiError::InvalidParent { parent, child });
        }

        if let Some(old) = self.parent_of(child) {
            if let Some(window) = self.registry.window_mut(old) {
                window.remove_child(child);
            }
        }
        self.attach_child(parent, child, anchor);

        let parent_shown = self.registry.visual(parent).is_some_and(|v| v.is_visible());
        if self.registry.window(child).is_some() {
            if !parent_shown {
                self.set_window_visible(child, false);
            }
            self.windows.focus(&mut self.registry, child);
        } else if !parent_shown {
            self.registry.set_visible(child, false);
        }
        self.registry.request_redraw();
        Ok(())
    }

    /// Detach `child` from `parent`, returning the anchor it had
    ///
    /// Bookkeeping only: the child stays registered. A detached window
    /// becomes top-level again.
    pub fn remove_child(&mut self, parent: ObjectId, child: ObjectId) -> Result<Anchor, GuiError> {
        let window = self.require_window(parent)?;
        match window.anchor_of(child) {
            None => return Err(GuiError::UnknownObject(child)),
            Some(anchor) if anchor.is_control() => {
                return Err(GuiError::InvalidAnchor(anchor.to_string()));
            }
            Some(_) => {}
        }
        let anchor = self
            .registry
            .window_mut(parent)
            .and_then(|w| w.remove_child(child))
            .ok_or(GuiError::UnknownObject(child))?;

        if self.registry.window(child).is_some() {
            if let Some(w) = self.registry.window_mut(child) {
                w.parent = None;
                w.root = None;
            }
            for nested in self.windows.descendants(&self.registry, child) {
                if let Some(w) = self.registry.window_mut(nested) {
                    w.root = Some(child);
                }
            }
            self.windows.constrain_top_level(&mut self.registry, child);
        } else {
            self.registry.set_window_clamp(child, Bounds::UNBOUNDED);
        }
        Ok(anchor)
    }

    /// Move a child to another anchor and re-lay it out
    pub fn set_anchor(&mut self, child: ObjectId, anchor: Anchor) -> Result<(), GuiError> {
        if anchor.is_control() {
            return Err(GuiError::InvalidAnchor(anchor.to_string()));
        }
        let parent = self.parent_of(child).ok_or(GuiError::UnknownObject(child))?;
        if let Some(window) = self.registry.window_mut(parent) {
            window.insert_child(anchor, child);
        }
        self.windows.constrain(&mut self.registry, parent, child);
        Ok(())
    }

    /// Set a child's layer relative to its window's widget layer
    pub fn set_child_layer(&mut self, child: ObjectId, relative: i32) -> Result<(), GuiError> {
        let parent = self.parent_of(child).ok_or(GuiError::UnknownObject(child))?;
        if let Some(window) = self.registry.window_mut(parent) {
            window.child_layers.insert(child, relative);
        }
        let layer = self.registry.layer_of(parent).unwrap_or(0);
        self.windows.relayer(&mut self.registry, parent, layer);
        Ok(())
    }

    /// Mark a child as following the window's scroll offset
    pub fn set_scrollable(&mut self, window: ObjectId, child: ObjectId, scrollable: bool) -> Result<(), GuiError> {
        let win = self
            .registry
            .window_mut(window)
            .ok_or(GuiError::NotAWindow(window))?;
        if win.anchor_of(child).is_none() {
            return Err(GuiError::UnknownObject(child));
        }
        if scrollable {
            win.scroll_bases.insert(child, Point::ZERO);
        } else {
            win.scroll_bases.remove(&child);
        }
        self.windows.constrain(&mut self.registry, window, child);
        Ok(())
    }

    /// Add wheel ticks to a window and move its scrollable children
    pub fn scroll_window(&mut self, id: ObjectId, ticks: f32) -> Result<(), GuiError> {
        let window = self.registry.window_mut(id).ok_or(GuiError::NotAWindow(id))?;
        window.scroll.add_wheel(ticks);
        self.relayout_scrollables(id);
        Ok(())
    }

    pub(crate) fn relayout_scrollables(&mut self, id: ObjectId) {
        let children: Vec<ObjectId> = self
            .registry
            .window(id)
            .map(|w| w.scroll_bases.keys().copied().collect())
            .unwrap_or_default();
        for child in children {
            self.windows.constrain(&mut self.registry, id, child);
        }
    }

    // =========================================================================
    // Window operations
    // =========================================================================

    /// Focus a window, raising its ancestor chain
    pub fn focus_window(&mut self, id: ObjectId) -> Result<(), GuiError> {
        self.require_window(id)?;
        self.windows.focus(&mut self.registry, id);
        Ok(())
    }

    /// Change the title text
    pub fn set_title(&mut self, id: ObjectId, title: &str) -> Result<(), GuiError> {
        let window = self.registry.window_mut(id).ok_or(GuiError::NotAWindow(id))?;
        window.title = title.to_string();
        self.refresh_chrome(id);
        Ok(())
    }

    /// Resize a window within the minimum size and the surface
    pub fn resize_window(&mut self, id: ObjectId, size: Size) -> Result<(), GuiError> {
        self.require_window(id)?;
        let min = Size::new(FRAME_STYLE.min_window_width, FRAME_STYLE.min_window_height);
        let size = size.clamp(min, self.surface());
        if let Some(visual) = self.registry.visual_mut(id) {
            visual.set_size(size);
        }
        self.windows.relayout(&mut self.registry, id);
        Ok(())
    }

    /// Fill the parent interior, or the surface for top-level windows
    pub fn maximize(&mut self, id: ObjectId) -> Result<(), GuiError> {
        let window = self.require_window(id)?;
        if window.state() == WindowState::Maximized {
            return Ok(());
        }
        let parent = window.parent();
        let rect = self.registry.visual(id).map(|v| v.rect()).unwrap_or(Rect::ZERO);
        let (anchor, target) = match parent {
            Some(p) => {
                let object = self.registry.get(p).ok_or(GuiError::UnknownObject(p))?;
                let parent_window = object.as_window().ok_or(GuiError::NotAWindow(p))?;
                (
                    parent_window.anchor_of(id),
                    parent_window.interior(object.visual.rect()),
                )
            }
            None => (None, Rect::from_pos_size(Point::ZERO, self.surface())),
        };

        if let Some(window) = self.registry.window_mut(id) {
            window.restore = Some(RestoreState { rect, anchor });
            window.state = WindowState::Maximized;
            window.gesture.release();
        }
        self.windows.gestures.end(id);
        if let Some(visual) = self.registry.visual_mut(id) {
            visual.set_size(target.size());
        }
        match parent {
            Some(p) => {
                if let Some(window) = self.registry.window_mut(p) {
                    window.insert_child(Anchor::TopLeft, id);
                }
                self.windows.constrain(&mut self.registry, p, id);
            }
            None => {
                self.registry.set_position(id, target.position());
                self.windows.constrain_children(&mut self.registry, id);
            }
        }
        self.show_max_split(id);
        debug!("window {} maximized to {:?}", id, target);
        Ok(())
    }

    /// Undo [`Gui::maximize`], restoring the saved rectangle and anchor
    pub fn split(&mut self, id: ObjectId) -> Result<(), GuiError> {
        let window = self.require_window(id)?;
        if window.state() != WindowState::Maximized {
            return Ok(());
        }
        let parent = window.parent();
        let restore = match self.registry.window_mut(id) {
            Some(window) => {
                window.state = WindowState::Normal;
                window.restore.take()
            }
            None => None,
        };

        if let Some(restore) = restore {
            if let Some(visual) = self.registry.visual_mut(id) {
                visual.set_size(restore.rect.size());
            }
            match parent {
                Some(p) => {
                    let anchor = restore.anchor.unwrap_or(Anchor::Movable);
                    if let Some(window) = self.registry.window_mut(p) {
                        window.insert_child(anchor, id);
                    }
                    self.windows.constrain(&mut self.registry, p, id);
                    if matches!(anchor.placement(), Placement::Propagate) {
                        self.registry.set_position(id, restore.rect.position());
                        self.windows.constrain_children(&mut self.registry, id);
                    }
                }
                None => {
                    self.registry.set_position(id, restore.rect.position());
                    self.windows.constrain_children(&mut self.registry, id);
                }
            }
        }
        self.show_max_split(id);
        debug!("window {} split", id);
        Ok(())
    }

    /// Hide a window and its subtree until [`Gui::restore_window`]
    pub fn minimize(&mut self, id: ObjectId) -> Result<(), GuiError> {
        let window = self.require_window(id)?;
        if window.state() == WindowState::Minimized {
            return Ok(());
        }
        if let Some(window) = self.registry.window_mut(id) {
            window.state = WindowState::Minimized;
            window.focused = false;
            window.gesture.release();
        }
        self.windows.gestures.end(id);
        self.set_window_visible(id, false);
        debug!("window {} minimized", id);
        Ok(())
    }

    /// Show a minimized window again and focus it
    pub fn restore_window(&mut self, id: ObjectId) -> Result<(), GuiError> {
        let window = self.require_window(id)?;
        if window.state() != WindowState::Minimized {
            return Ok(());
        }
        if let Some(window) = self.registry.window_mut(id) {
            window.state = if window.restore.is_some() {
                WindowState::Maximized
            } else {
                WindowState::Normal
            };
        }
        self.set_window_visible(id, true);
        self.windows.focus(&mut self.registry, id);
        Ok(())
    }

    /// Show or hide a window with its children
    ///
    /// Minimized nested windows stay hidden and only the control matching
    /// the window state (maximize or split) is shown.
    pub(crate) fn set_window_visible(&mut self, id: ObjectId, visible: bool) {
        self.registry.set_visible(id, visible);
        let Some(window) = self.registry.window(id) else {
            return;
        };
        let children = window.all_children();
        let inactive = if window.state() == WindowState::Maximized {
            window.controls().maximize
        } else {
            window.controls().split
        };

        for child in children {
            match self.registry.window(child) {
                Some(nested) => {
                    if visible && nested.state() == WindowState::Minimized {
                        continue;
                    }
                    self.set_window_visible(child, visible);
                }
                None => {
                    self.registry.set_visible(child, visible && Some(child) != inactive);
                }
            }
        }
    }

    fn show_max_split(&mut self, id: ObjectId) {
        let Some(window) = self.registry.window(id) else {
            return;
        };
        let maximized = window.state() == WindowState::Maximized;
        let (maximize, split) = (window.controls().maximize, window.controls().split);
        let shown = self.registry.visual(id).is_some_and(|v| v.is_visible());
        if let Some(maximize) = maximize {
            self.registry.set_visible(maximize, shown && !maximized);
        }
        if let Some(split) = split {
            self.registry.set_visible(split, shown && maximized);
        }
    }

    // =========================================================================
    // Chrome
    // =========================================================================

    /// Sync control enablement and the title text with the window state
    pub(crate) fn refresh_chrome(&mut self, id: ObjectId) {
        let Some(object) = self.registry.get(id) else {
            return;
        };
        let Some(window) = object.as_window() else {
            return;
        };
        let active = window.is_focused() && !window.gesture.is_active();
        let buttons = window.controls().buttons();
        let title_id = window.controls().title;
        let title = window.title.clone();
        let color = if window.is_focused() {
            window.colors.title
        } else {
            window.colors.unfocused_title
        };
        let x = object.visual.position().x;

        for button in buttons {
            self.set_button_disabled(button, !active);
        }

        let Some(title_id) = title_id else {
            return;
        };
        let available = self.windows.controls_left(&self.registry, id).unwrap_or(x) - x;
        let shown = match self.registry.widget(title_id) {
            Some(Widget::Text(text)) => {
                if self.resources.text.measure(&title, &text.config.font) > available {
                    elide(&title)
                } else {
                    title
                }
            }
            _ => {
                warn!("title of window {} is not a text object", id);
                return;
            }
        };

        let changed = match self.registry.widget_mut(title_id) {
            Some(Widget::Text(text)) => {
                let recolored = text.config.color != color;
                text.config.color = color;
                text.set_text(&shown) || recolored
            }
            _ => false,
        };
        if changed {
            self.rasterize(title_id);
            self.windows.constrain(&mut self.registry, id, title_id);
        }
    }
}
