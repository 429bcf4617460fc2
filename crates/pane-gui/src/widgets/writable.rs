//! Editable text boxes

use crate::input::{keymap, Key};
use crate::math::Point;
use crate::object::ObjectId;
use super::TextBox;

/// Spaces inserted for a tab
pub const TAB_WIDTH: usize = 5;

/// How enter and multi-line editing behave
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
    /// Single line; enter submits and clears it
    #[default]
    Console,
    /// Single line; enter is ignored
    Free,
    /// Multiple lines; enter splits, backspace at column 0 joins
    TextEditor,
}

/// One editing operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edit {
    Insert(String),
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
}

/// Edit produced by a key press, if the key edits at all
pub fn edit_for_key(key: Key, shift: bool) -> Option<Edit> {
    let edit = match key {
        Key::Backspace => Edit::Backspace,
        Key::Enter | Key::KpEnter => Edit::Enter,
        Key::Left => Edit::Left,
        Key::Right => Edit::Right,
        Key::Up => Edit::Up,
        Key::Down => Edit::Down,
        Key::Tab => Edit::Insert(" ".repeat(TAB_WIDTH)),
        _ => Edit::Insert(keymap::translate(key, shift)?.to_string()),
    };
    Some(edit)
}

/// Lines of text with a caret, independent of any rendering
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
    line: usize,
    column: usize,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            line: 0,
            column: 0,
        }
    }
}

fn byte_offset(s: &str, column: usize) -> usize {
    s.char_indices().nth(column).map(|(i, _)| i).unwrap_or(s.len())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Caret line index
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Caret column in characters
    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Text before the caret on its line
    pub fn before_caret(&self) -> &str {
        let current = &self.lines[self.line];
        &current[..byte_offset(current, self.column)]
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn insert(&mut self, text: &str) {
        let current = &mut self.lines[self.line];
        let at = byte_offset(current, self.column);
        current.insert_str(at, text);
        self.column += char_len(text);
    }

    /// Delete before the caret; at column 0 optionally joins with the line above
    pub fn backspace(&mut self, join_lines: bool) {
        if self.column > 0 {
            let current = &mut self.lines[self.line];
            let end = byte_offset(current, self.column);
            let start = byte_offset(current, self.column - 1);
            current.replace_range(start..end, "");
            self.column -= 1;
        } else if join_lines && self.line > 0 {
            let tail = self.lines.remove(self.line);
            self.line -= 1;
            self.column = char_len(&self.lines[self.line]);
            self.lines[self.line].push_str(&tail);
        }
    }

    /// Break the line at the caret
    pub fn split_line(&mut self) {
        let current = &mut self.lines[self.line];
        let at = byte_offset(current, self.column);
        let tail = current.split_off(at);
        self.line += 1;
        self.lines.insert(self.line, tail);
        self.column = 0;
    }

    /// Empty the caret line, returning what it held
    pub fn take_line(&mut self) -> String {
        self.column = 0;
        std::mem::take(&mut self.lines[self.line])
    }

    pub fn move_left(&mut self, wrap: bool) {
        if self.column > 0 {
            self.column -= 1;
        } else if wrap && self.line > 0 {
            self.line -= 1;
            self.column = char_len(&self.lines[self.line]);
        }
    }

    pub fn move_right(&mut self, wrap: bool) {
        if self.column < char_len(&self.lines[self.line]) {
            self.column += 1;
        } else if wrap && self.line + 1 < self.lines.len() {
            self.line += 1;
            self.column = 0;
        }
    }

    pub fn move_vertical(&mut self, down: bool) {
        let target = if down {
            (self.line + 1).min(self.lines.len() - 1)
        } else {
            self.line.saturating_sub(1)
        };
        self.line = target;
        self.column = self.column.min(char_len(&self.lines[self.line]));
    }
}

/// A [`TextBox`] that accepts typing
///
/// Keys are queued as [`Edit`]s while the owning window has focus and are
/// applied on the next update.
#[derive(Clone, Debug)]
pub struct WritableTextBox {
    pub text_box: TextBox,
    pub mode: EditMode,
    /// Most lines a text editor may hold
    pub line_limit: Option<usize>,
    buffer: TextBuffer,
    caret: ObjectId,
    caret_shown: bool,
    /// Caret position relative to the box origin
    caret_offset: Point,
    pending: Vec<Edit>,
    submitted: Vec<String>,
}

impl WritableTextBox {
    pub fn new(text_box: TextBox, caret: ObjectId, mode: EditMode) -> Self {
        Self {
            text_box,
            mode,
            line_limit: None,
            buffer: TextBuffer::new(),
            caret,
            caret_shown: false,
            caret_offset: Point::ZERO,
            pending: Vec::new(),
            submitted: Vec::new(),
        }
    }

    #[inline]
    pub fn caret(&self) -> ObjectId {
        self.caret
    }

    #[inline]
    pub fn caret_shown(&self) -> bool {
        self.caret_shown
    }

    pub(crate) fn set_caret_shown(&mut self, shown: bool) {
        self.caret_shown = shown;
    }

    #[inline]
    pub fn caret_offset(&self) -> Point {
        self.caret_offset
    }

    pub(crate) fn set_caret_offset(&mut self, offset: Point) {
        self.caret_offset = offset;
    }

    #[inline]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn queue(&mut self, edit: Edit) {
        self.pending.push(edit);
    }

    /// Queue typed text, turning newlines into enter presses
    pub fn queue_text(&mut self, text: &str) {
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                self.pending.push(Edit::Enter);
            }
            if !part.is_empty() {
                self.pending.push(Edit::Insert(part.replace('\t', &" ".repeat(TAB_WIDTH))));
            }
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Apply queued edits; returns whether anything was applied
    pub fn apply_pending(&mut self) -> bool {
        let pending = std::mem::take(&mut self.pending);
        let applied = !pending.is_empty();
        for edit in pending {
            self.apply(edit);
        }
        applied
    }

    pub fn apply(&mut self, edit: Edit) {
        let editor = self.mode == EditMode::TextEditor;
        match edit {
            Edit::Insert(text) => self.buffer.insert(&text),
            Edit::Backspace => self.buffer.backspace(editor),
            Edit::Enter => match self.mode {
                EditMode::Console => {
                    let line = self.buffer.take_line();
                    self.submitted.push(line);
                }
                EditMode::Free => {}
                EditMode::TextEditor => {
                    let full = self
                        .line_limit
                        .is_some_and(|limit| self.buffer.lines().len() >= limit);
                    if !full {
                        self.buffer.split_line();
                    }
                }
            },
            Edit::Left => self.buffer.move_left(editor),
            Edit::Right => self.buffer.move_right(editor),
            Edit::Up if editor => self.buffer.move_vertical(false),
            Edit::Down if editor => self.buffer.move_vertical(true),
            Edit::Up | Edit::Down => {}
        }
    }

    /// Lines submitted in console mode since the last call
    pub fn take_submitted(&mut self) -> Vec<String> {
        std::mem::take(&mut self.submitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> WritableTextBox {
        WritableTextBox::new(TextBox::default(), 0, EditMode::TextEditor)
    }

    fn type_all(w: &mut WritableTextBox, text: &str) {
        w.queue_text(text);
        w.apply_pending();
    }

    #[test]
    fn test_key_edits() {
        assert_eq!(edit_for_key(Key::A, true), Some(Edit::Insert("A".to_string())));
        assert_eq!(edit_for_key(Key::Tab, false), Some(Edit::Insert("     ".to_string())));
        assert_eq!(edit_for_key(Key::Backspace, false), Some(Edit::Backspace));
        assert_eq!(edit_for_key(Key::KpEnter, false), Some(Edit::Enter));
        assert_eq!(edit_for_key(Key::LeftShift, false), None);
    }

    #[test]
    fn test_editor_enter_splits_at_caret() {
        let mut w = editor();
        type_all(&mut w, "hello");
        w.apply(Edit::Left);
        w.apply(Edit::Left);
        w.apply(Edit::Enter);

        assert_eq!(w.buffer().lines(), &["hel".to_string(), "lo".to_string()]);
        assert_eq!((w.buffer().line(), w.buffer().column()), (1, 0));
    }

    #[test]
    fn test_editor_backspace_joins_lines() {
        let mut w = editor();
        type_all(&mut w, "ab\ncd");
        w.apply(Edit::Left);
        w.apply(Edit::Left);
        w.apply(Edit::Backspace);

        assert_eq!(w.buffer().text(), "abcd");
        assert_eq!(w.buffer().column(), 2);
    }

    #[test]
    fn test_line_limit_blocks_enter() {
        let mut w = editor();
        w.line_limit = Some(2);
        type_all(&mut w, "a\nb\nc");
        assert_eq!(w.buffer().lines().len(), 2);
        assert_eq!(w.buffer().text(), "a\nbc");
    }

    #[test]
    fn test_console_enter_submits() {
        let mut w = WritableTextBox::new(TextBox::default(), 0, EditMode::Console);
        type_all(&mut w, "ls\n");
        assert_eq!(w.take_submitted(), vec!["ls".to_string()]);
        assert!(w.take_submitted().is_empty());
        assert_eq!(w.buffer().text(), "");
    }

    #[test]
    fn test_free_mode_ignores_enter_and_vertical_moves() {
        let mut w = WritableTextBox::new(TextBox::default(), 0, EditMode::Free);
        type_all(&mut w, "x\ny");
        w.apply(Edit::Up);
        assert_eq!(w.buffer().lines(), &["xy".to_string()]);
    }

    #[test]
    fn test_backspace_on_multibyte_chars() {
        let mut buffer = TextBuffer::new();
        buffer.insert("héé");
        buffer.backspace(false);
        assert_eq!(buffer.text(), "hé");
        assert_eq!(buffer.before_caret(), "hé");
    }

    #[test]
    fn test_vertical_move_clamps_column() {
        let mut w = editor();
        type_all(&mut w, "long line\nab");
        w.apply(Edit::Up);
        assert_eq!((w.buffer().line(), w.buffer().column()), (0, 2));
        w.apply(Edit::Down);
        w.apply(Edit::Down);
        assert_eq!(w.buffer().line(), 1);
    }
}
