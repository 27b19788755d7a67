//! Tab / Shift+Tab: block indent and outdent.
//!
//! [`plan_block_shift`] is pure: it computes one edit and the selection to
//! restore, so the engine can apply both inside a single edit group.

use analyzer::{SourceMap, Span, TextEdit};

use crate::buffer::{BufferError, Selection, TextBuffer, with_edit_group};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    Indent,
    Outdent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockShift {
    /// `None` when nothing changes.
    pub edit: Option<TextEdit>,
    pub selection: Selection,
}

/// Plans a Tab (indent) or Shift+Tab (outdent) at `selection`.
///
/// A selection spanning a line break shifts every line it touches by one
/// tab stop of spaces; a trailing empty line is left alone. The selection
/// keeps covering the same text and never moves before the block or the
/// start of its last line.
///
/// Otherwise Tab replaces the selection with spaces up to the next tab stop,
/// and Shift+Tab outdents the cursor line by one tab stop, or strips all of
/// its leading spaces when fewer than a tab stop are there.
pub fn plan_block_shift(
    text: &str,
    selection: Selection,
    tab_width: usize,
    direction: ShiftDirection,
) -> BlockShift {
    let tab_width = tab_width.max(1);
    let chars: Vec<char> = text.chars().collect();
    let start = selection.start().min(chars.len());
    let end = selection.end().min(chars.len());

    if chars[start..end].contains(&'\n') {
        return shift_lines(text, &chars, start, end, tab_width, direction);
    }
    match direction {
        ShiftDirection::Indent => {
            let map = SourceMap::new(text);
            let (_, column) = map.line_col(start);
            let pad = " ".repeat(tab_width - column % tab_width);
            let caret = start + pad.len();
            BlockShift {
                edit: Some(TextEdit::replace(Span::new(start, end), pad)),
                selection: Selection::caret(caret),
            }
        }
        ShiftDirection::Outdent => outdent_line(text, start, end, tab_width),
    }
}

fn shift_lines(
    text: &str,
    chars: &[char],
    start: usize,
    end: usize,
    tab_width: usize,
    direction: ShiftDirection,
) -> BlockShift {
    let map = SourceMap::new(text);
    let (first_line, _) = map.line_col(start);
    let block_start = map.line_start(first_line).unwrap_or(0);
    let block_end = if chars[end - 1] == '\n' {
        end
    } else {
        let (last_line, _) = map.line_col(end);
        map.line_end(last_line).unwrap_or(end)
    };

    let block: String = chars[block_start..block_end].iter().collect();
    let lines: Vec<&str> = block.split('\n').collect();
    let tab = " ".repeat(tab_width);

    let last_len = lines.last().map_or(0, |line| line.chars().count()) as isize;
    let mut limit = block_end as isize - last_len;
    let mut sel_start = start as isize;
    let mut sel_end = end as isize;
    let mut shifted = String::with_capacity(block.len() + lines.len() * tab_width);

    for (idx, line) in lines.iter().enumerate() {
        let is_last = idx + 1 == lines.len();
        if line.is_empty() && is_last {
            break;
        }
        let new_line = match direction {
            ShiftDirection::Indent => format!("{tab}{line}"),
            ShiftDirection::Outdent => match line.strip_prefix(tab.as_str()) {
                Some(rest) => rest.to_string(),
                None => line.trim_start_matches(' ').to_string(),
            },
        };
        let shrink = line.chars().count() as isize - new_line.chars().count() as isize;
        shifted.push_str(&new_line);
        if !is_last {
            shifted.push('\n');
            limit -= shrink;
        }
        if idx == 0 {
            sel_start = (sel_start - shrink).max(block_start as isize);
        }
        sel_end = (sel_end - shrink).max(limit);
    }

    let edit = (shifted != block)
        .then(|| TextEdit::replace(Span::new(block_start, block_end), shifted));
    BlockShift {
        edit,
        selection: Selection::new(sel_start as usize, sel_end as usize),
    }
}

fn outdent_line(text: &str, start: usize, end: usize, tab_width: usize) -> BlockShift {
    let map = SourceMap::new(text);
    let (line, _) = map.line_col(start);
    let line_start = map.line_start(line).unwrap_or(0);
    let line_end = map.line_end(line).unwrap_or(line_start);
    let content: String = text.chars().skip(line_start).take(line_end - line_start).collect();

    let tab = " ".repeat(tab_width);
    let outdented = match content.strip_prefix(tab.as_str()) {
        Some(rest) => rest,
        None => content.trim_start_matches(' '),
    };
    let removed = content.chars().count() - outdented.chars().count();
    if removed == 0 {
        return BlockShift {
            edit: None,
            selection: Selection::new(start, end),
        };
    }
    BlockShift {
        edit: Some(TextEdit::replace(
            Span::new(line_start, line_end),
            outdented.to_string(),
        )),
        selection: Selection::new(
            start.saturating_sub(removed).max(line_start),
            end.saturating_sub(removed).max(line_start),
        ),
    }
}

/// Applies a block shift at the buffer's selection as one undo step.
pub(crate) fn shift_block<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    tab_width: usize,
    direction: ShiftDirection,
) -> Result<(), BufferError> {
    let plan = plan_block_shift(&buffer.text(), buffer.selection(), tab_width, direction);
    let Some(edit) = plan.edit else {
        return Ok(());
    };
    with_edit_group(buffer, |b| {
        b.apply_edit(&edit)?;
        b.set_selection(plan.selection)
    })
}
