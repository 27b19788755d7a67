//! Inline identifier suggestions shown under the word being typed.

use analyzer::{RawSymbol, Span, collapse_whitespace, extract_bare_identifier};
use tracing::{debug, trace};

use crate::buffer::{BufferError, TextBuffer, with_edit_group};
use crate::geometry::OverlayAnchor;
use crate::overlay::InlineSuggestions;
use crate::symbols::SymbolSource;

/// Shortest word that produces suggestions.
pub const MIN_FRAGMENT_CHARS: usize = 3;

/// Key that commits an inline suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommitKey {
    /// Also breaks the line when the cursor ends up at line end.
    Enter,
    /// Also pads with spaces to the next tab stop.
    Tab,
    BackTab,
}

/// Identifiers from `rows` that contain `typed`, case-insensitively.
///
/// Each match is widened back to the start of its whitespace-delimited token
/// and cut at the first identifier delimiter. The result is sorted without
/// regard to case, case-insensitive duplicates are dropped, and an exact
/// repeat of `typed` is left out.
pub fn inline_candidates<S: AsRef<str>>(typed: &str, rows: &[S]) -> Vec<String> {
    let needle = typed.to_ascii_lowercase();
    let mut found: Vec<String> = rows
        .iter()
        .filter_map(|row| {
            let declaration = collapse_whitespace(RawSymbol::new(row.as_ref()).declaration());
            let hit = declaration.to_ascii_lowercase().find(&needle)?;
            let token_start = declaration[..hit].rfind(' ').map_or(0, |space| space + 1);
            let candidate = extract_bare_identifier(&declaration[token_start..]);
            (!candidate.is_empty() && candidate != typed).then(|| candidate.to_string())
        })
        .collect();
    found.sort_by_cached_key(|candidate| candidate.to_lowercase());
    found.dedup_by(|later, kept| later.to_lowercase() == kept.to_lowercase());
    found
}

/// Suggestions for the word at the cursor, or `None` when nothing should
/// show: a selection is active, the cursor is inside a word, the word is
/// shorter than [`MIN_FRAGMENT_CHARS`], or nothing matches.
pub(crate) fn suggest<B, S>(
    buffer: &B,
    symbols: &S,
    file_id: &str,
) -> Result<Option<InlineSuggestions>, BufferError>
where
    B: TextBuffer + ?Sized,
    S: SymbolSource + ?Sized,
{
    if buffer.has_selection() {
        return Ok(None);
    }
    let cursor = buffer.cursor();
    if buffer.word_end_after(cursor) != cursor {
        trace!(cursor, "cursor inside a word; no inline suggestions");
        return Ok(None);
    }
    let start = buffer.word_start_before(cursor);
    if cursor - start < MIN_FRAGMENT_CHARS {
        return Ok(None);
    }

    let typed = buffer.slice(Span::new(start, cursor))?;
    let rows = symbols.lookup_members(file_id, "");
    let entries = inline_candidates(&typed, &rows);
    debug!(typed = %typed, rows = rows.len(), matches = entries.len(), "inline suggestions");
    if entries.is_empty() {
        return Ok(None);
    }

    let at = buffer.offset_to_position(start)?;
    Ok(Some(InlineSuggestions::new(
        entries,
        OverlayAnchor {
            line: at.line,
            column: at.column,
        },
    )))
}

/// Replaces the word at the cursor with the committable entry.
///
/// Returns `false` without editing when the list has several entries and
/// the user never navigated it.
pub(crate) fn commit<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    suggestions: &InlineSuggestions,
    key: CommitKey,
    tab_width: usize,
) -> Result<bool, BufferError> {
    let Some(entry) = suggestions.committable() else {
        return Ok(false);
    };
    let cursor = buffer.cursor();
    let start = buffer.word_start_before(cursor);
    debug!(entry, ?key, "commit inline suggestion");

    with_edit_group(buffer, |b| {
        b.replace(Span::new(start, cursor), entry)?;
        match key {
            CommitKey::Enter => {
                if b.is_line_end(b.cursor()) {
                    b.insert("\n")?;
                }
            }
            CommitKey::Tab => {
                let mut column = b.position()?.column;
                if matches!(b.char_at(b.cursor()), Some(' ' | '\t')) {
                    column += 1;
                }
                let pad = (tab_width - column % tab_width) % tab_width;
                if pad > 0 {
                    b.insert(&" ".repeat(pad))?;
                }
            }
            CommitKey::BackTab => {}
        }
        Ok(())
    })?;
    Ok(true)
}
