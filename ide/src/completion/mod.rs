//! Popup completion opened by `.` (members) and `#` (constants).
//!
//! Opening queries the symbol source for the token before the cursor,
//! filters and orders the rows, and builds the list with the trigger row at
//! index 0. Committing inserts the chosen row according to the popup's
//! [`CommitPolicy`].

use analyzer::{RawSymbol, Span, prune_declaration, strip_category_or_type_prefix};
use tracing::{debug, trace};

use crate::buffer::{BufferError, Selection, TextBuffer, with_edit_group};
use crate::context::{completion_suppressed, line_prefix, object_prefix_before};
use crate::geometry::OverlayAnchor;
use crate::overlay::{CommitPolicy, PopupItem, PopupList, Trigger};
use crate::prefs::Preferences;
use crate::symbols::SymbolSource;

mod items;
mod ranking;

use items::PopupItems;
pub(crate) use ranking::Scope;
use ranking::{is_filtered, order_rows};

/// Builds popup rows for a query result. `None` when no symbol survives
/// filtering.
pub(crate) fn build_items(
    rows: &[String],
    trigger: Trigger,
    scope: &Scope,
    prefs: &Preferences,
) -> Option<(Vec<PopupItem>, usize)> {
    let mut items = PopupItems::new(trigger);
    for row in order_rows(rows, trigger, scope) {
        let kind = RawSymbol::new(row).kind();
        if is_filtered(kind, trigger, scope, prefs.constant_complete) {
            continue;
        }
        items.add_symbol(kind, &prune_declaration(row));
    }
    items.has_symbols().then(|| items.finish())
}

/// Opens a popup for `trigger` at the cursor.
///
/// Returns `None` when completion is suppressed at the cursor or the query
/// yields nothing; the caller then inserts the trigger as ordinary text. An
/// active selection is removed before the query runs.
pub(crate) fn open_popup<B, S>(
    buffer: &mut B,
    symbols: &S,
    file_id: &str,
    trigger: Trigger,
    prefs: &Preferences,
) -> Result<Option<PopupList>, BufferError>
where
    B: TextBuffer + ?Sized,
    S: SymbolSource + ?Sized,
{
    let selection_start = buffer.selection().start();
    let text_before = buffer.slice(Span::new(0, selection_start))?;
    let at = buffer.offset_to_position(selection_start)?;
    let line = buffer.line_text(at.line)?;
    if completion_suppressed(&text_before, &line, at.column) {
        trace!(trigger = %trigger.as_char(), "popup suppressed in comment or string");
        return Ok(None);
    }
    buffer.delete_selection()?;

    let scope = Scope::from_prefix(object_prefix_before(line_prefix(&line, at.column)));
    let rows = match trigger {
        Trigger::Dot => symbols.lookup_members(file_id, scope.prefix()),
        Trigger::Hash => symbols.lookup_constants(file_id, scope.prefix()),
    };
    debug!(
        trigger = %trigger.as_char(),
        prefix = scope.prefix(),
        rows = rows.len(),
        "popup query"
    );

    let Some((items, max_width)) = build_items(&rows, trigger, &scope, prefs) else {
        trace!(trigger = %trigger.as_char(), "no popup rows after filtering");
        return Ok(None);
    };
    let policy = match scope {
        Scope::Object(_) => CommitPolicy::ObjectMember,
        Scope::Local => CommitPolicy::Unqualified,
    };
    Ok(Some(PopupList {
        items,
        active: 0,
        trigger,
        policy,
        max_width,
        anchor: OverlayAnchor {
            line: at.line,
            column: at.column,
        },
    }))
}

/// Text a commit of row `index` inserts.
pub(crate) fn commit_text(popup: &PopupList, index: usize) -> Option<String> {
    let item = popup.items.get(index)?;
    let body = strip_category_or_type_prefix(&item.text).trim();
    let text = match popup.policy {
        CommitPolicy::ObjectMember if index == 0 => popup.trigger.as_char().to_string(),
        CommitPolicy::ObjectMember => format!("{}{body}", popup.trigger.as_char()),
        CommitPolicy::Unqualified => body.to_string(),
    };
    Some(text)
}

/// Inserts row `index` at the cursor as one undo step.
///
/// For a call signature like `Start(pin, baud)` the arguments end up
/// selected; for `Stop()` the caret lands between the parentheses.
pub(crate) fn commit_popup<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    popup: &PopupList,
    index: usize,
) -> Result<bool, BufferError> {
    let Some(text) = commit_text(popup, index) else {
        return Ok(false);
    };
    debug!(index, text = %text, "commit popup row");

    with_edit_group(buffer, |b| {
        let start = b.selection().start();
        b.insert(&text)?;
        if let Some(args) = argument_span(&text) {
            b.set_selection(Selection::new(start + args.start, start + args.end))?;
        }
        Ok(())
    })?;
    Ok(true)
}

/// Char span between the first `(` and the last `)` of an inserted call.
/// A leading `(` or the trigger alone do not count as a call.
fn argument_span(text: &str) -> Option<Span> {
    let open = text.find('(').filter(|&open| open > 0)?;
    if text[..open].chars().all(|c| c == '.' || c == '#') {
        return None;
    }
    let after_open = text[..=open].chars().count();
    let before_close = text
        .rfind(')')
        .map(|close| text[..close].chars().count())
        .filter(|&close| close >= after_open)
        .unwrap_or(after_open);
    Some(Span::new(after_open, before_close))
}
