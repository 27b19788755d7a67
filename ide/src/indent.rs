//! Enter auto-indent and `}` placement.

use analyzer::{Span, find_brace_insertion_column};
use tracing::trace;

use crate::buffer::{BufferError, TextBuffer, with_edit_group};
use crate::context::line_prefix;

/// Leading text for the line Enter opens after `line_before_cursor`.
///
/// Leading whitespace carries over. A `'` comment carries over too: the
/// code before it becomes spaces, the marker is repeated (`''` when the
/// line holds a doc comment) and the whitespace after it is kept.
pub fn continuation_prefix(line_before_cursor: &str) -> String {
    let chars: Vec<char> = line_before_cursor.chars().collect();
    let comment = chars.iter().position(|&c| c == '\'');
    let marker = if line_before_cursor.contains("''") {
        "''"
    } else {
        "'"
    };

    let mut prefix = String::new();
    let mut n = 0;
    while comment.is_some_and(|at| n <= at) || chars.get(n).is_some_and(|c| c.is_whitespace()) {
        if comment == Some(n) {
            prefix.push_str(marker);
        } else {
            prefix.push(' ');
        }
        n += 1;
    }
    prefix
}

/// Breaks the line at the cursor and indents the new line. Declines when
/// text is selected.
pub(crate) fn auto_indent<B: TextBuffer + ?Sized>(buffer: &mut B) -> Result<bool, BufferError> {
    if buffer.has_selection() {
        return Ok(false);
    }
    let at = buffer.position()?;
    let line = buffer.line_text(at.line)?;
    let prefix = continuation_prefix(line_prefix(&line, at.column));
    with_edit_group(buffer, |b| b.insert(&format!("\n{prefix}")))?;
    Ok(true)
}

/// Places a typed `}` one tab stop left of the cursor when it closes an
/// open brace. Only whitespace may precede the cursor on its line.
pub(crate) fn close_brace<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    tab_width: usize,
) -> Result<bool, BufferError> {
    if buffer.has_selection() {
        return Ok(false);
    }
    let cursor = buffer.cursor();
    let at = buffer.position()?;
    let text = buffer.text();
    let Some(column) = find_brace_insertion_column(&text, at.line, at.column, tab_width) else {
        return Ok(false);
    };

    let line_start = buffer.line_to_char(at.line)?;
    let lead = Span::new(line_start, cursor);
    if !buffer.slice(lead)?.chars().all(char::is_whitespace) {
        trace!(line = at.line, "code before cursor; `}}` typed in place");
        return Ok(false);
    }
    with_edit_group(buffer, |b| {
        b.replace(lead, &format!("{}}}", " ".repeat(column)))
    })?;
    Ok(true)
}
