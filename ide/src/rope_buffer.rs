//! In-memory [`TextBuffer`] backed by a `ropey::Rope`, with grouped undo.

use analyzer::Span;
use ropey::Rope;

use crate::buffer::{BufferError, Selection, TextBuffer};

#[derive(Debug, Clone)]
struct AppliedEdit {
    start: usize,
    removed: String,
    inserted_chars: usize,
}

#[derive(Debug, Clone)]
struct EditGroup {
    edits: Vec<AppliedEdit>,
    selection_before: Selection,
}

#[derive(Debug, Clone, Default)]
pub struct RopeBuffer {
    rope: Rope,
    selection: Selection,
    undo_stack: Vec<EditGroup>,
    open_groups: usize,
    pending: Option<EditGroup>,
}

impl RopeBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            ..Self::default()
        }
    }

    /// Builds a buffer with the given selection; offsets are clamped.
    pub fn with_selection(text: &str, selection: Selection) -> Self {
        let mut buffer = Self::new(text);
        let len = buffer.rope.len_chars();
        buffer.selection = Selection::new(selection.anchor.min(len), selection.head.min(len));
        buffer
    }

    /// Number of undoable edit groups.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Reverts the most recent edit group. Returns `false` when there is none.
    pub fn undo(&mut self) -> bool {
        let Some(group) = self.undo_stack.pop() else {
            return false;
        };
        for edit in group.edits.iter().rev() {
            self.rope.remove(edit.start..edit.start + edit.inserted_chars);
            self.rope.insert(edit.start, &edit.removed);
        }
        self.selection = group.selection_before;
        true
    }

    fn check_offset(&self, offset: usize) -> Result<(), BufferError> {
        let len = self.rope.len_chars();
        if offset > len {
            return Err(BufferError::OffsetOutOfRange { offset, len });
        }
        Ok(())
    }

    fn check_line(&self, line: usize) -> Result<(), BufferError> {
        let count = self.rope.len_lines();
        if line >= count {
            return Err(BufferError::LineOutOfRange { line, count });
        }
        Ok(())
    }

    fn record(&mut self, edit: AppliedEdit, selection_before: Selection) {
        match self.pending.as_mut() {
            Some(group) => group.edits.push(edit),
            None => self.undo_stack.push(EditGroup {
                edits: vec![edit],
                selection_before,
            }),
        }
    }
}

impl TextBuffer for RopeBuffer {
    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn slice(&self, span: Span) -> Result<String, BufferError> {
        self.check_offset(span.end)?;
        Ok(self.rope.slice(span.start..span.end).to_string())
    }

    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    fn char_to_line(&self, offset: usize) -> Result<usize, BufferError> {
        self.check_offset(offset)?;
        Ok(self.rope.char_to_line(offset))
    }

    fn line_to_char(&self, line: usize) -> Result<usize, BufferError> {
        self.check_line(line)?;
        Ok(self.rope.line_to_char(line))
    }

    fn line_text(&self, line: usize) -> Result<String, BufferError> {
        self.check_line(line)?;
        let text = self.rope.line(line).to_string();
        Ok(text.trim_end_matches(['\n', '\r']).to_string())
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.rope.get_char(offset)
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) -> Result<(), BufferError> {
        self.check_offset(selection.anchor)?;
        self.check_offset(selection.head)?;
        self.selection = selection;
        Ok(())
    }

    fn replace(&mut self, range: Span, text: &str) -> Result<(), BufferError> {
        self.check_offset(range.end)?;
        self.check_offset(range.start)?;
        let (start, end) = (range.start.min(range.end), range.start.max(range.end));

        let removed = self.rope.slice(start..end).to_string();
        let inserted_chars = text.chars().count();
        if removed.is_empty() && inserted_chars == 0 {
            return Ok(());
        }

        let selection_before = self.selection;
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        self.selection = Selection::caret(start + inserted_chars);
        self.record(
            AppliedEdit {
                start,
                removed,
                inserted_chars,
            },
            selection_before,
        );
        Ok(())
    }

    fn begin_edit_group(&mut self) {
        if self.open_groups == 0 {
            self.pending = Some(EditGroup {
                edits: Vec::new(),
                selection_before: self.selection,
            });
        }
        self.open_groups += 1;
    }

    fn end_edit_group(&mut self) -> Result<(), BufferError> {
        if self.open_groups == 0 {
            return Err(BufferError::UnbalancedEditGroup);
        }
        self.open_groups -= 1;
        if self.open_groups == 0
            && let Some(group) = self.pending.take()
            && !group.edits.is_empty()
        {
            self.undo_stack.push(group);
        }
        Ok(())
    }
}
