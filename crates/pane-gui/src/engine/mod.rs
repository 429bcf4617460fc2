//! GUI engine coordinating all components
//!
//! This module is split into focused submodules:
//! - `objects`: widget creation, mutation and destruction
//! - `windows`: window lifecycle, tree links and window operations
//! - `input`: event delivery to windows and widgets
//! - `rendering`: per-frame update and render passes
//! - `snapshot`: layout capture and restore

mod input;
mod objects;
mod rendering;
mod snapshot;
mod windows;

use crate::backend::{Resources, TextureId};
use crate::config::GuiConfig;
use crate::input::{InputDispatch, InputState};
use crate::math::Size;
use crate::object::ObjectId;
use crate::registry::{RedrawState, Registry};
use crate::window::{CursorIcon, WindowManager};

/// GUI engine owning every object, window and collaborator
///
/// This is the main entry point for hosts, managing:
/// - Registry (objects by name and layer, redraw flag)
/// - Window manager (focus, layering, gesture slot, cursor)
/// - Input dispatch (subscriber lists) and input state
/// - Resources (image loading and text rasterization)
///
/// Hosts call [`Gui::handle_event`] for each input event, then
/// [`Gui::update`] and [`Gui::render`] once per frame.
pub struct Gui {
    pub(crate) registry: Registry,
    pub(crate) windows: WindowManager,
    pub(crate) dispatch: InputDispatch,
    pub(crate) input: InputState,
    pub(crate) resources: Resources,
    pub(crate) config: GuiConfig,
    /// Textures of destroyed objects, released on the next render
    pub(crate) pending_release: Vec<TextureId>,
    pub(crate) close_requested: bool,
}

impl Default for Gui {
    fn default() -> Self {
        Self::new(GuiConfig::default())
    }
}

impl Gui {
    /// Create an engine with headless resources
    pub fn new(config: GuiConfig) -> Self {
        Self::with_resources(config, Resources::headless())
    }

    /// Create an engine with host-provided resources
    pub fn with_resources(config: GuiConfig, resources: Resources) -> Self {
        let redraw = RedrawState::new(config.redraw_frames, config.continuous_redraw);
        Self {
            registry: Registry::new(redraw),
            windows: WindowManager::new(config.surface),
            dispatch: InputDispatch::new(),
            input: InputState::new(),
            resources,
            config,
            pending_release: Vec::new(),
            close_requested: false,
        }
    }

    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[inline]
    pub fn window_manager(&self) -> &WindowManager {
        &self.windows
    }

    #[inline]
    pub fn input_state(&self) -> &InputState {
        &self.input
    }

    #[inline]
    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    #[inline]
    pub fn surface(&self) -> Size {
        self.windows.surface()
    }

    /// Cursor shape the host should show
    #[inline]
    pub fn cursor(&self) -> CursorIcon {
        self.windows.cursor()
    }

    /// The host asked to close the surface
    #[inline]
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    #[inline]
    pub fn redraw_needed(&self) -> bool {
        self.registry.redraw_needed()
    }

    /// Switch continuous redraw on or off
    pub fn set_continuous_redraw(&mut self, continuous: bool) {
        self.registry.redraw_state_mut().set_continuous(continuous);
    }

    pub fn id_of(&self, name: &str) -> Option<ObjectId> {
        self.registry.id_of(name)
    }

    /// Focused window on the highest layer
    pub fn focused_window(&self) -> Option<ObjectId> {
        self.windows.focused_window(&self.registry)
    }
}
