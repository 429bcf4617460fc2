//! Input events, state and delivery
//!
//! The host pushes [`InputEvent`]s; the GUI folds them into [`InputState`]
//! and routes them to subscribers through [`InputDispatch`].

mod event;
mod state;
mod dispatch;
pub mod keymap;

pub use event::{ButtonAction, InputEvent, Key, KeyAction, PointerButton};
pub use state::InputState;
pub use dispatch::{Channel, InputDispatch};
