//! Widget creation, mutation and destruction

use tracing::{debug, warn};

use super::Gui;
use crate::backend::PixelBuffer;
use crate::config::ButtonConfig;
use crate::error::GuiError;
use crate::math::{Point, Size};
use crate::object::{Object, ObjectId, Subscriptions, VisualObject, Widget};
use crate::widgets::{
    Animation, Button, ButtonFrame, EditMode, Text, TextBox, TextConfig, WritableTextBox,
    TEXT_PADDING,
};

const POINTER: Subscriptions = Subscriptions {
    pointer: true,
    ..Subscriptions::NONE
};

const KEYS: Subscriptions = Subscriptions {
    keys: true,
    updates: true,
    ..Subscriptions::NONE
};

fn text_box_of(widget: &Widget) -> Option<&TextBox> {
    match widget {
        Widget::TextBox(text_box) => Some(text_box),
        Widget::WritableTextBox(writable) => Some(&writable.text_box),
        _ => None,
    }
}

fn text_box_of_mut(widget: &mut Widget) -> Option<&mut TextBox> {
    match widget {
        Widget::TextBox(text_box) => Some(text_box),
        Widget::WritableTextBox(writable) => Some(&mut writable.text_box),
        _ => None,
    }
}

impl Gui {
    // =========================================================================
    // Creation
    // =========================================================================

    fn ensure_unique(&self, name: &str) -> Result<(), GuiError> {
        if self.registry.id_of(name).is_some() {
            warn!("object {:?} already registered, ignoring", name);
            return Err(GuiError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    fn add_widget(
        &mut self,
        mut visual: VisualObject,
        widget: Widget,
        subscriptions: Subscriptions,
    ) -> Result<ObjectId, GuiError> {
        visual.subscriptions = subscriptions;
        let id = self.registry.add(Object::widget(visual, widget))?;
        if subscriptions.any() {
            self.dispatch.subscribe(id, false);
        }
        Ok(id)
    }

    /// Register a member of composite `owner`, sharing its layer and clamps
    fn add_member(
        &mut self,
        owner: ObjectId,
        name: String,
        pixels: PixelBuffer,
        widget: Widget,
    ) -> Result<ObjectId, GuiError> {
        let parent = self.registry.visual(owner).ok_or(GuiError::UnknownObject(owner))?;
        let mut visual = VisualObject::new(name, parent.layer()).with_pixels(pixels);
        visual.set_local_clamp(parent.local_clamp());
        visual.set_window_clamp(parent.window_clamp());
        visual.owner = Some(owner);
        self.registry.add(Object::widget(visual, widget))
    }

    /// Image frames named `name#i` owned by `owner`
    fn add_frames(
        &mut self,
        owner: ObjectId,
        name: &str,
        paths: &[String],
    ) -> Result<Vec<ObjectId>, GuiError> {
        let mut frames = Vec::with_capacity(paths.len());
        for (i, path) in paths.iter().enumerate() {
            let pixels = self.resources.image_or_placeholder(path);
            let frame = self.add_member(owner, format!("{}#{}", name, i), pixels, Widget::Image);
            match frame {
                Ok(frame) => frames.push(frame),
                Err(e) => {
                    for frame in frames {
                        self.registry.remove(frame);
                    }
                    return Err(e);
                }
            }
        }
        Ok(frames)
    }

    /// Create a single-image widget
    pub fn create_image(&mut self, name: &str, path: &str, layer: i32) -> Result<ObjectId, GuiError> {
        let pixels = self.resources.image_or_placeholder(path);
        let visual = VisualObject::new(name, layer).with_pixels(pixels);
        let id = self.add_widget(visual, Widget::Image, Subscriptions::NONE)?;
        self.registry.set_visible(id, true);
        Ok(id)
    }

    /// Create a rasterized text widget
    pub fn create_text(
        &mut self,
        name: &str,
        text: &str,
        config: TextConfig,
        layer: i32,
    ) -> Result<ObjectId, GuiError> {
        let visual = VisualObject::new(name, layer);
        let id = self.add_widget(visual, Widget::Text(Text::new(text, config)), Subscriptions::NONE)?;
        self.rasterize(id);
        self.registry.set_visible(id, true);
        Ok(id)
    }

    /// Create a stack of text lines
    pub fn create_text_box(
        &mut self,
        name: &str,
        lines: &[&str],
        config: TextConfig,
        line_spacing: i32,
        layer: i32,
    ) -> Result<ObjectId, GuiError> {
        let visual = VisualObject::new(name, layer);
        let text_box = TextBox::new(config, line_spacing);
        let id = self.add_widget(visual, Widget::TextBox(text_box), Subscriptions::NONE)?;
        let lines: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        self.sync_lines(id, &lines)?;
        self.registry.set_visible(id, true);
        Ok(id)
    }

    /// Create an editable text box with a caret
    pub fn create_writable_text_box(
        &mut self,
        name: &str,
        config: TextConfig,
        mode: EditMode,
        layer: i32,
    ) -> Result<ObjectId, GuiError> {
        self.ensure_unique(name)?;
        let caret_pixels = PixelBuffer::solid(Size::new(2, config.line_height()), config.color);
        let caret_visual = VisualObject::new(format!("{}#caret", name), layer).with_pixels(caret_pixels);
        let caret = self.registry.add(Object::widget(caret_visual, Widget::Image))?;

        let writable = WritableTextBox::new(TextBox::new(config, 0), caret, mode);
        let id = match self.add_widget(VisualObject::new(name, layer), Widget::WritableTextBox(writable), KEYS) {
            Ok(id) => id,
            Err(e) => {
                self.registry.remove(caret);
                return Err(e);
            }
        };
        if let Some(visual) = self.registry.visual_mut(caret) {
            visual.owner = Some(id);
        }
        self.refresh_writable(id)?;
        self.registry.set_visible(id, true);
        Ok(id)
    }

    /// Create an animation from image frames
    pub fn create_animation(&mut self, name: &str, paths: &[&str], layer: i32) -> Result<ObjectId, GuiError> {
        self.ensure_unique(name)?;
        let id = self.add_widget(
            VisualObject::new(name, layer),
            Widget::Animation(Animation::default()),
            Subscriptions::NONE,
        )?;
        let paths: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
        let frames = match self.add_frames(id, name, &paths) {
            Ok(frames) => frames,
            Err(e) => {
                self.registry.remove(id);
                return Err(e);
            }
        };
        self.fit_to_first_frame(id, &frames);
        if let Some(Widget::Animation(anim)) = self.registry.widget_mut(id) {
            *anim = Animation::new(frames);
        }
        self.registry.set_visible(id, true);
        Ok(id)
    }

    /// Create a push button from normal/hover/pressed(/disabled) frames
    pub fn create_button(&mut self, name: &str, config: &ButtonConfig, layer: i32) -> Result<ObjectId, GuiError> {
        self.ensure_unique(name)?;
        let id = self.add_widget(
            VisualObject::new(name, layer),
            Widget::Button(Button::default()),
            POINTER,
        )?;
        let frames = match self.add_frames(id, name, &config.frames) {
            Ok(frames) => frames,
            Err(e) => {
                self.dispatch.unsubscribe(id);
                self.registry.remove(id);
                return Err(e);
            }
        };
        self.fit_to_first_frame(id, &frames);
        if let Some(Widget::Button(button)) = self.registry.widget_mut(id) {
            *button = Button::new(Animation::new(frames));
        }
        self.registry.set_visible(id, true);
        Ok(id)
    }

    fn fit_to_first_frame(&mut self, id: ObjectId, frames: &[ObjectId]) {
        let size = frames
            .first()
            .and_then(|&f| self.registry.visual(f))
            .map(|v| v.size())
            .unwrap_or(Size::ZERO);
        if let Some(visual) = self.registry.visual_mut(id) {
            visual.set_size(size);
        }
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// Re-rasterize a text object from its string and config
    pub(crate) fn rasterize(&mut self, id: ObjectId) {
        let Some(Widget::Text(text)) = self.registry.widget(id) else {
            return;
        };
        let config = &text.config;
        let raster = self
            .resources
            .text_or_placeholder(text.text(), &config.font, config.color, config.background);
        let size = Size::new(
            self.resources.text.measure(text.text(), &config.font),
            config.line_height(),
        );
        if let Some(visual) = self.registry.visual_mut(id) {
            visual.set_pixels(raster.pixels);
            visual.set_size(size);
        }
    }

    /// Make the line objects of a text box match `texts`
    fn sync_lines(&mut self, id: ObjectId, texts: &[String]) -> Result<(), GuiError> {
        let object = self.registry.get(id).ok_or(GuiError::UnknownObject(id))?;
        let owner = object.visual.name().to_string();
        let Some(text_box) = object.as_widget().and_then(text_box_of) else {
            return Ok(());
        };
        let config = text_box.config.clone();
        let spacing = text_box.line_spacing;
        let mut lines = text_box.lines().to_vec();

        while lines.len() < texts.len() {
            let Some(text_box) = self.registry.widget_mut(id).and_then(text_box_of_mut) else {
                break;
            };
            let name = text_box.next_line_name(&owner);
            let line = self.add_member(id, name, PixelBuffer::empty(), Widget::Text(Text::new("", config.clone())))?;
            if let Some(text_box) = self.registry.widget_mut(id).and_then(text_box_of_mut) {
                text_box.insert_line(usize::MAX, line);
            }
            self.rasterize(line);
            lines.push(line);
        }
        while lines.len() > texts.len() {
            let index = lines.len() - 1;
            if let Some(text_box) = self.registry.widget_mut(id).and_then(text_box_of_mut) {
                text_box.remove_line(index);
            }
            if let Some(line) = lines.pop() {
                self.destroy_subtree(line);
            }
        }

        for (&line, text) in lines.iter().zip(texts) {
            let changed = match self.registry.widget_mut(line) {
                Some(Widget::Text(t)) => t.set_text(text),
                _ => false,
            };
            if changed {
                self.rasterize(line);
            }
        }

        let width = lines
            .iter()
            .filter_map(|&l| self.registry.visual(l))
            .map(|v| v.size().width)
            .max()
            .unwrap_or(0);
        let height = lines.len() as i32 * (config.line_height() + spacing);
        let (position, visible) = match self.registry.visual_mut(id) {
            Some(visual) => {
                visual.set_size(Size::new(width + 2 * TEXT_PADDING, height + 2 * TEXT_PADDING));
                (visual.position(), visual.is_visible())
            }
            None => return Ok(()),
        };
        self.registry.set_visible(id, visible);
        self.registry.set_position(id, position);
        Ok(())
    }

    /// Rebuild lines and caret of a writable text box from its buffer
    pub(crate) fn refresh_writable(&mut self, id: ObjectId) -> Result<(), GuiError> {
        let Some(Widget::WritableTextBox(writable)) = self.registry.widget(id) else {
            return Ok(());
        };
        let buffer = writable.buffer();
        let lines = buffer.lines().to_vec();
        let line = buffer.line() as i32;
        let before = buffer.before_caret().to_string();
        let config = writable.text_box.config.clone();
        let spacing = writable.text_box.line_spacing;

        self.sync_lines(id, &lines)?;

        let caret = Point::new(
            TEXT_PADDING + self.resources.text.measure(&before, &config.font),
            TEXT_PADDING + line * (config.line_height() + spacing),
        );
        if let Some(Widget::WritableTextBox(writable)) = self.registry.widget_mut(id) {
            writable.set_caret_offset(caret);
        }
        if let Some(position) = self.registry.visual(id).map(|v| v.position()) {
            self.registry.set_position(id, position);
        }
        Ok(())
    }

    /// Replace the string of a text or the lines of a text box
    pub fn set_text(&mut self, id: ObjectId, text: &str) -> Result<(), GuiError> {
        match self.registry.widget_mut(id) {
            Some(Widget::Text(t)) => {
                if t.set_text(text) {
                    self.rasterize(id);
                }
                Ok(())
            }
            Some(Widget::TextBox(_)) => {
                let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
                self.sync_lines(id, &lines)
            }
            Some(_) => {
                warn!("object {} holds no settable text", id);
                Ok(())
            }
            None => Err(GuiError::UnknownObject(id)),
        }
    }

    /// Current string of a text, text box or writable text box
    pub fn text(&self, id: ObjectId) -> Option<String> {
        match self.registry.widget(id)? {
            Widget::Text(t) => Some(t.text().to_string()),
            Widget::TextBox(text_box) => Some(self.joined_lines(text_box)),
            Widget::WritableTextBox(writable) => Some(writable.buffer().text()),
            _ => None,
        }
    }

    fn joined_lines(&self, text_box: &TextBox) -> String {
        text_box
            .lines()
            .iter()
            .filter_map(|&l| match self.registry.widget(l) {
                Some(Widget::Text(t)) => Some(t.text()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Queue text for a writable text box as if typed, applied next update
    pub fn type_text(&mut self, id: ObjectId, text: &str) -> Result<(), GuiError> {
        match self.registry.widget_mut(id) {
            Some(Widget::WritableTextBox(writable)) => {
                writable.queue_text(text);
                Ok(())
            }
            Some(_) => {
                warn!("object {} is not writable, dropping typed text", id);
                Ok(())
            }
            None => Err(GuiError::UnknownObject(id)),
        }
    }

    /// Lines submitted by a console-mode text box since the last call
    pub fn take_submitted(&mut self, id: ObjectId) -> Vec<String> {
        match self.registry.widget_mut(id) {
            Some(Widget::WritableTextBox(writable)) => writable.take_submitted(),
            _ => Vec::new(),
        }
    }

    pub fn set_line_limit(&mut self, id: ObjectId, limit: Option<usize>) {
        if let Some(Widget::WritableTextBox(writable)) = self.registry.widget_mut(id) {
            writable.line_limit = limit;
        }
    }

    // =========================================================================
    // Geometry, visibility and frames
    // =========================================================================

    /// Move an object; windows re-lay out their children
    pub fn set_position(&mut self, id: ObjectId, position: Point) -> Result<(), GuiError> {
        if !self.registry.contains(id) {
            return Err(GuiError::UnknownObject(id));
        }
        self.registry.set_position(id, position);
        if self.registry.window(id).is_some() {
            self.windows.constrain_children(&mut self.registry, id);
        }
        Ok(())
    }

    /// Show or hide an object; windows take their subtree along
    pub fn set_visible(&mut self, id: ObjectId, visible: bool) -> Result<(), GuiError> {
        if !self.registry.contains(id) {
            return Err(GuiError::UnknownObject(id));
        }
        if self.registry.window(id).is_some() {
            self.set_window_visible(id, visible);
        } else {
            self.registry.set_visible(id, visible);
        }
        Ok(())
    }

    /// Show frame `frame` of an animation or button
    pub fn set_frame(&mut self, id: ObjectId, frame: usize) -> Result<(), GuiError> {
        let object = self.registry.get_mut(id).ok_or(GuiError::UnknownObject(id))?;
        let name = object.visual.name().to_string();
        let anim = match object.as_widget_mut() {
            Some(Widget::Animation(anim)) => anim,
            Some(Widget::Button(button)) => &mut button.animation,
            _ => {
                return Err(GuiError::InvalidFrame { name, frame, frames: 0 });
            }
        };
        if !anim.select(frame) {
            let err = GuiError::InvalidFrame {
                name,
                frame,
                frames: anim.frame_count(),
            };
            warn!("{}", err);
            return Err(err);
        }
        for (member, visible) in anim.frame_visibility() {
            self.registry.set_visible(member, visible);
        }
        Ok(())
    }

    /// Current frame index of an animation or button
    pub fn frame(&self, id: ObjectId) -> Option<usize> {
        match self.registry.widget(id)? {
            Widget::Animation(anim) => Some(anim.current()),
            Widget::Button(button) => Some(button.animation.current()),
            _ => None,
        }
    }

    pub(crate) fn show_button_frame(&mut self, id: ObjectId, frame: ButtonFrame) {
        let visibility = match self.registry.widget_mut(id) {
            Some(Widget::Button(button)) => {
                let index = button.frame_index(frame);
                button.animation.select(index);
                button.animation.frame_visibility()
            }
            _ => return,
        };
        for (member, visible) in visibility {
            self.registry.set_visible(member, visible);
        }
    }

    /// Whether a button was clicked since the last read
    pub fn read_press(&mut self, id: ObjectId) -> bool {
        match self.registry.widget_mut(id) {
            Some(Widget::Button(button)) => button.read_press(),
            _ => false,
        }
    }

    /// Enable or disable a button
    pub fn set_button_disabled(&mut self, id: ObjectId, disabled: bool) {
        let frame = match self.registry.widget_mut(id) {
            Some(Widget::Button(button)) => button.set_disabled(disabled),
            _ => None,
        };
        if let Some(frame) = frame {
            self.show_button_frame(id, frame);
        }
    }

    // =========================================================================
    // Destruction
    // =========================================================================

    /// Window or widget holding `child` as a direct child
    pub fn parent_of(&self, child: ObjectId) -> Option<ObjectId> {
        if let Some(window) = self.registry.window(child) {
            return window.parent();
        }
        self.windows.ids().into_iter().find(|&w| {
            self.registry
                .window(w)
                .is_some_and(|win| win.anchor_of(child).is_some())
        })
    }

    /// Destroy an object, its children and members
    ///
    /// The object is detached from its parent window, unsubscribed from
    /// input and its texture is released on the next render.
    pub fn destroy(&mut self, id: ObjectId) -> Result<(), GuiError> {
        if !self.registry.contains(id) {
            return Err(GuiError::UnknownObject(id));
        }
        if let Some(parent) = self.parent_of(id) {
            if let Some(window) = self.registry.window_mut(parent) {
                window.remove_child(id);
            }
        }
        self.destroy_subtree(id);
        Ok(())
    }

    pub(crate) fn destroy_subtree(&mut self, id: ObjectId) {
        let children = self.registry.window(id).map(|w| w.all_children()).unwrap_or_default();
        for child in children {
            self.destroy_subtree(child);
        }
        for member in self.registry.members(id) {
            self.destroy_subtree(member);
        }

        self.dispatch.unsubscribe(id);
        if self.registry.window(id).is_some() {
            self.windows.unregister(id);
            self.windows.set_cursor(crate::window::CursorIcon::Default);
        }
        if let Some(object) = self.registry.remove(id) {
            if let Some(texture) = object.visual.texture {
                self.pending_release.push(texture);
            }
            debug!("destroyed {:?}", object.visual.name());
        }
    }
}
