//! Stacked lines of text

use crate::math::Point;
use crate::object::ObjectId;
use super::TextConfig;

/// Gap between the box edge and its lines
pub const TEXT_PADDING: i32 = 2;

/// Vertical stack of [`Text`](super::Text) line objects
#[derive(Clone, Debug, Default)]
pub struct TextBox {
    lines: Vec<ObjectId>,
    pub line_spacing: i32,
    pub config: TextConfig,
    next_line: u64,
}

impl TextBox {
    pub fn new(config: TextConfig, line_spacing: i32) -> Self {
        Self {
            lines: Vec::new(),
            line_spacing,
            config,
            next_line: 0,
        }
    }

    #[inline]
    pub fn lines(&self) -> &[ObjectId] {
        &self.lines
    }

    pub(crate) fn insert_line(&mut self, index: usize, id: ObjectId) {
        let index = index.min(self.lines.len());
        self.lines.insert(index, id);
    }

    pub(crate) fn remove_line(&mut self, index: usize) -> Option<ObjectId> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    /// Unique registry name for the next line object
    pub(crate) fn next_line_name(&mut self, owner: &str) -> String {
        let name = format!("{}#line{}", owner, self.next_line);
        self.next_line += 1;
        name
    }

    /// Positions of each line when the box sits at `origin`
    pub fn stack(
        &self,
        origin: Point,
        heights: impl IntoIterator<Item = i32>,
    ) -> Vec<(ObjectId, Point)> {
        let x = origin.x + TEXT_PADDING;
        let mut y = origin.y + TEXT_PADDING;
        self.lines
            .iter()
            .zip(heights)
            .map(|(&line, height)| {
                let at = Point::new(x, y);
                y += height + self.line_spacing;
                (line, at)
            })
            .collect()
    }
}
