//! Cursor-context detection helpers shared by the popup and inline engines.
//! Inputs are plain text slices ending at the cursor.

/// Whether popup completion must not open at `column` of `line`: inside a
/// `'` line comment, inside an unterminated `{` comment, or inside a string
/// literal.
pub(crate) fn completion_suppressed(text_before_cursor: &str, line: &str, column: usize) -> bool {
    in_line_comment(line_prefix(line, column))
        || in_brace_comment(text_before_cursor)
        || in_string_literal(line_prefix(line, column + 1))
}

pub(crate) fn in_line_comment(line_before_cursor: &str) -> bool {
    line_before_cursor.contains('\'')
}

/// The last `{` before the cursor has no `}` after it.
pub(crate) fn in_brace_comment(text_before_cursor: &str) -> bool {
    text_before_cursor
        .rfind('{')
        .is_some_and(|open| !text_before_cursor[open..].contains('}'))
}

/// An odd number of `"` on the cursor's line, counting the char under the
/// cursor. A cursor resting on an opening quote is inside the literal.
pub(crate) fn in_string_literal(line_through_cursor: &str) -> bool {
    line_through_cursor.matches('"').count() % 2 == 1
}

/// The whitespace-delimited token ending at the cursor, e.g. `serial` in
/// `  serial` or `pins` in `x := pins`. Empty when the cursor follows
/// whitespace or starts the line.
pub(crate) fn object_prefix_before(line_before_cursor: &str) -> &str {
    line_before_cursor
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
}

/// Chars of `line` before `column`.
pub(crate) fn line_prefix(line: &str, column: usize) -> &str {
    match line.char_indices().nth(column) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}
