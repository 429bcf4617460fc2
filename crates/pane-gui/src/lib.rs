//! Retained-mode 2D GUI core
//!
//! This crate provides a miniature window manager drawn onto a single host
//! surface:
//! - Object registry with name and layer indices
//! - Window management (focus arbitration, nested z-order, drag and resize)
//! - Anchor-based layout of window children
//! - Composite widgets (animations, buttons, text boxes, editable text)
//! - Input dispatch to subscribed windows and widgets
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`math`]: Geometry types (`Point`, `Size`, `Rect`, `Bounds`) and frame style
//! - [`object`]: Registry objects and their visual state
//! - [`registry`]: Name/layer indices, render pass and redraw bookkeeping
//! - [`window`]: Window state, anchors, gestures and the window manager
//! - [`widgets`]: Composite widget state machines
//! - [`input`]: Input events, state and subscriber dispatch
//! - [`backend`]: Render, image and text collaborator traits
//! - [`persistence`]: Layout snapshots for storage
//!
//! ## Example
//!
//! ```rust
//! use pane_gui::{Gui, GuiConfig, HeadlessBackend, InputEvent, Point, Size, WindowConfig};
//!
//! let mut gui = Gui::new(GuiConfig::default());
//! let main = gui
//!     .create_window(&WindowConfig {
//!         name: "main".to_string(),
//!         title: "Main".to_string(),
//!         position: Point::new(40, 40),
//!         size: Size::new(640, 480),
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//! gui.handle_event(&InputEvent::PointerMove { x: 100, y: 50 });
//! gui.update();
//!
//! let mut backend = HeadlessBackend::new();
//! assert!(gui.render(&mut backend));
//! assert_eq!(gui.focused_window(), Some(main));
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod input;
pub mod math;
pub mod object;
pub mod persistence;
pub mod registry;
pub mod widgets;
pub mod window;

mod engine;

// Re-export core types for convenience
pub use backend::headless::HeadlessBackend;
pub use backend::{Color, ImageLoader, PixelBuffer, RenderBackend, Resources, TextRasterizer};
pub use config::{ButtonConfig, ControlSkin, GuiConfig};
pub use error::{GuiError, ResourceError};
pub use input::{ButtonAction, InputEvent, Key, KeyAction, PointerButton};
pub use math::{Bounds, Point, Rect, Size, FRAME_STYLE, FrameStyle};
pub use object::{ObjectId, VisualObject};
pub use persistence::{LayoutSnapshot, PersistedWindow};
pub use registry::Registry;
pub use widgets::{EditMode, TextConfig};
pub use window::{Anchor, CursorIcon, WindowConfig, WindowManager, WindowState};

pub use engine::Gui;
