//! Document capability consumed by the editing engines.
//!
//! All offsets are `char` indices. A toolkit widget implements
//! [`TextBuffer`] as an adapter; [`crate::RopeBuffer`] is the in-memory one.

use analyzer::keywords::is_word_char;
use analyzer::{Span, TextEdit};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("offset {offset} is past the end of the document ({len} chars)")]
    OffsetOutOfRange { offset: usize, len: usize },
    #[error("line {line} does not exist ({count} lines)")]
    LineOutOfRange { line: usize, count: usize },
    #[error("edit group closed without a matching open")]
    UnbalancedEditGroup,
}

/// Selection as anchor + head. The head is the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    pub fn span(&self) -> Span {
        Span::new(self.start(), self.end())
    }
}

/// 0-based line and column (in chars).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

pub trait TextBuffer {
    fn text(&self) -> String;

    fn slice(&self, span: Span) -> Result<String, BufferError>;

    fn len_chars(&self) -> usize;

    /// Line count; a trailing line break opens one more (empty) line.
    fn len_lines(&self) -> usize;

    fn char_to_line(&self, offset: usize) -> Result<usize, BufferError>;

    fn line_to_char(&self, line: usize) -> Result<usize, BufferError>;

    /// Text of `line` without its line terminator.
    fn line_text(&self, line: usize) -> Result<String, BufferError>;

    fn char_at(&self, offset: usize) -> Option<char>;

    fn selection(&self) -> Selection;

    fn set_selection(&mut self, selection: Selection) -> Result<(), BufferError>;

    /// Replaces `range` with `text` and leaves a caret after the inserted text.
    fn replace(&mut self, range: Span, text: &str) -> Result<(), BufferError>;

    /// Opens a group of edits undone as one unit. Groups nest.
    fn begin_edit_group(&mut self);

    fn end_edit_group(&mut self) -> Result<(), BufferError>;

    fn cursor(&self) -> usize {
        self.selection().head
    }

    fn set_cursor(&mut self, offset: usize) -> Result<(), BufferError> {
        self.set_selection(Selection::caret(offset))
    }

    fn has_selection(&self) -> bool {
        !self.selection().is_empty()
    }

    fn selected_text(&self) -> Result<String, BufferError> {
        self.slice(self.selection().span())
    }

    fn offset_to_position(&self, offset: usize) -> Result<Position, BufferError> {
        let line = self.char_to_line(offset)?;
        let column = offset - self.line_to_char(line)?;
        Ok(Position { line, column })
    }

    fn position_to_offset(&self, position: Position) -> Result<usize, BufferError> {
        let start = self.line_to_char(position.line)?;
        let line_len = self.line_text(position.line)?.chars().count();
        if position.column > line_len {
            return Err(BufferError::OffsetOutOfRange {
                offset: start + position.column,
                len: self.len_chars(),
            });
        }
        Ok(start + position.column)
    }

    /// Line and column of the cursor.
    fn position(&self) -> Result<Position, BufferError> {
        self.offset_to_position(self.cursor())
    }

    /// Inserts at the cursor, replacing any selection.
    fn insert(&mut self, text: &str) -> Result<(), BufferError> {
        let span = self.selection().span();
        self.replace(span, text)
    }

    fn delete_selection(&mut self) -> Result<(), BufferError> {
        let span = self.selection().span();
        if span.is_empty() {
            return Ok(());
        }
        self.replace(span, "")
    }

    fn apply_edit(&mut self, edit: &TextEdit) -> Result<(), BufferError> {
        self.replace(edit.range, &edit.new_text)
    }

    /// Start of the identifier that ends at `offset`.
    fn word_start_before(&self, offset: usize) -> usize {
        let mut start = offset;
        while start > 0 && self.char_at(start - 1).is_some_and(is_word_char) {
            start -= 1;
        }
        start
    }

    /// End of the identifier that starts at `offset`.
    fn word_end_after(&self, offset: usize) -> usize {
        let mut end = offset;
        while self.char_at(end).is_some_and(is_word_char) {
            end += 1;
        }
        end
    }

    /// Whether `offset` sits at the end of its line.
    fn is_line_end(&self, offset: usize) -> bool {
        match self.char_at(offset) {
            None => true,
            Some(c) => c == '\n' || c == '\r',
        }
    }

    /// Moves the caret to the start of a 1-based line number.
    fn go_to_line(&mut self, line_number: usize) -> Result<(), BufferError> {
        let line = line_number.saturating_sub(1);
        let offset = self.line_to_char(line)?;
        self.set_cursor(offset)
    }
}

/// Runs `f` inside one edit group. The group is closed even when `f` fails.
pub fn with_edit_group<B, T>(
    buffer: &mut B,
    f: impl FnOnce(&mut B) -> Result<T, BufferError>,
) -> Result<T, BufferError>
where
    B: TextBuffer + ?Sized,
{
    buffer.begin_edit_group();
    let result = f(buffer);
    buffer.end_edit_group()?;
    result
}
