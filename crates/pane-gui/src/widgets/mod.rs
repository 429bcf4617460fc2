//! Composite widgets built on registry objects
//!
//! - [`Animation`]: frames sharing one position, one visible at a time
//! - [`Button`]: animation driven by hover/press/disabled state
//! - [`Text`]: a rasterized string
//! - [`TextBox`]: a vertical stack of text lines
//! - [`WritableTextBox`]: an editable text box with a caret

mod animation;
mod button;
mod text;
mod text_box;
mod writable;

pub use animation::Animation;
pub use button::{Button, ButtonFrame};
pub use text::{Text, TextConfig};
pub use text_box::{TextBox, TEXT_PADDING};
pub use writable::{edit_for_key, Edit, EditMode, TextBuffer, WritableTextBox};
