//! Windows and the window manager
//!
//! A window is a registry object with chrome, children placed by [`Anchor`],
//! and membership in a window tree. The [`WindowManager`] arbitrates focus,
//! assigns layers and owns the single drag/resize gesture slot.

mod anchor;
mod config;
mod gesture;
mod layout;
mod manager;
mod region;
#[allow(clippy::module_inception)]
mod window;

pub use anchor::{Anchor, ControlSlot, Placement};
pub use config::{WindowColors, WindowConfig};
pub use gesture::{resize_rect, ActiveGesture, GestureKind, GestureSlot, WindowGesture};
pub use manager::WindowManager;
pub use region::{hot_zone, CursorIcon, ResizeHandle};
pub use window::{Controls, ScrollState, Window, WindowState};
pub(crate) use window::RestoreState;
