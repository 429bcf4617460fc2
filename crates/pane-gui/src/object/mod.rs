//! Objects held by the registry
//!
//! Every object carries a [`VisualObject`] plus a kind: either a widget or a
//! window. Container logic matches on [`ObjectKind`] instead of probing types.

mod visual;

pub use visual::{Subscriptions, VisualObject};

use crate::backend::{Panel, Quad, RenderBackend};
use crate::widgets::{Animation, Button, Text, TextBox, WritableTextBox};
use crate::window::Window;

/// Registry-assigned object handle
pub type ObjectId = u64;

/// Widget variants
#[derive(Clone, Debug)]
pub enum Widget {
    /// Single textured quad
    Image,
    Text(Text),
    TextBox(TextBox),
    WritableTextBox(WritableTextBox),
    Animation(Animation),
    Button(Button),
}

impl Widget {
    /// Objects this widget is composed of
    pub fn members(&self) -> Vec<ObjectId> {
        match self {
            Widget::Image | Widget::Text(_) => Vec::new(),
            Widget::Animation(anim) => anim.frames().to_vec(),
            Widget::Button(button) => button.animation.frames().to_vec(),
            Widget::TextBox(text_box) => text_box.lines().to_vec(),
            Widget::WritableTextBox(writable) => {
                let mut members = writable.text_box.lines().to_vec();
                members.push(writable.caret());
                members
            }
        }
    }
}

/// Widget or window
#[derive(Clone, Debug)]
pub enum ObjectKind {
    Widget(Widget),
    Window(Box<Window>),
}

/// A registered object
#[derive(Clone, Debug)]
pub struct Object {
    pub visual: VisualObject,
    pub kind: ObjectKind,
}

impl Object {
    pub fn widget(visual: VisualObject, widget: Widget) -> Self {
        Self {
            visual,
            kind: ObjectKind::Widget(widget),
        }
    }

    pub fn window(visual: VisualObject, window: Window) -> Self {
        Self {
            visual,
            kind: ObjectKind::Window(Box::new(window)),
        }
    }

    #[inline]
    pub fn is_window(&self) -> bool {
        matches!(self.kind, ObjectKind::Window(_))
    }

    pub fn as_window(&self) -> Option<&Window> {
        match &self.kind {
            ObjectKind::Window(w) => Some(w),
            ObjectKind::Widget(_) => None,
        }
    }

    pub fn as_window_mut(&mut self) -> Option<&mut Window> {
        match &mut self.kind {
            ObjectKind::Window(w) => Some(w),
            ObjectKind::Widget(_) => None,
        }
    }

    pub fn as_widget(&self) -> Option<&Widget> {
        match &self.kind {
            ObjectKind::Widget(w) => Some(w),
            ObjectKind::Window(_) => None,
        }
    }

    pub fn as_widget_mut(&mut self) -> Option<&mut Widget> {
        match &mut self.kind {
            ObjectKind::Widget(w) => Some(w),
            ObjectKind::Window(_) => None,
        }
    }

    /// Member objects of a composite widget
    pub fn members(&self) -> Vec<ObjectId> {
        match &self.kind {
            ObjectKind::Widget(w) => w.members(),
            ObjectKind::Window(_) => Vec::new(),
        }
    }

    /// Draw this object if it is visible and has something to show
    pub(crate) fn render(&mut self, backend: &mut dyn RenderBackend) {
        let visual = &mut self.visual;
        if !visual.is_visible() {
            return;
        }
        let clip = visual.effective_clamp();

        if let ObjectKind::Window(window) = &self.kind {
            backend.draw_panel(&Panel {
                rect: visual.rect(),
                clip,
                background: window.colors.background,
                frame: window.colors.frame,
                border: window.border,
                title_bar_height: window.title_bar_height,
            });
            return;
        }

        if visual.pixels().is_empty() {
            return;
        }
        if visual.dirty || visual.texture.is_none() {
            if let Some(old) = visual.texture.take() {
                backend.release(old);
            }
            visual.texture = Some(backend.upload(visual.pixels()));
            visual.dirty = false;
        }
        if let Some(texture) = visual.texture {
            backend.draw_quad(&Quad {
                rect: visual.rect(),
                clip,
                rotation: visual.rotation,
                flip_horizontal: visual.flip_horizontal,
                flip_vertical: visual.flip_vertical,
                texture,
            });
        }
    }
}
