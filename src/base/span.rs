//! Byte-offset ranges and line/column conversion.

pub use text_size::{TextRange, TextSize};

/// A 0-indexed line/column position. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Maps byte offsets to line/column positions for one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the first character of every line.
    line_starts: Vec<TextSize>,
    text: Box<str>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(TextSize::new(offset as u32 + 1));
            }
        }
        Self {
            line_starts,
            text: text.into(),
        }
    }

    /// Number of lines (a trailing newline opens an empty last line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset into a line/column position.
    ///
    /// Offsets past the end clamp to the end of the text.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(TextSize::of(&*self.text));
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = usize::from(self.line_starts[line]);
        let col = self.text[start..usize::from(offset)].chars().count();
        LineCol {
            line: line as u32,
            col: col as u32,
        }
    }

    /// Convert a line/column position back into a byte offset.
    pub fn offset(&self, pos: LineCol) -> Option<TextSize> {
        let start = *self.line_starts.get(pos.line as usize)?;
        let rest = &self.text[usize::from(start)..];
        let mut byte = 0usize;
        for (i, (idx, c)) in rest.char_indices().enumerate() {
            if i == pos.col as usize {
                return Some(start + TextSize::new(idx as u32));
            }
            if c == '\n' {
                return None;
            }
            byte = idx + c.len_utf8();
        }
        if pos.col as usize == rest[..byte].chars().count() {
            Some(start + TextSize::new(byte as u32))
        } else {
            None
        }
    }
}
