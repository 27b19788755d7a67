//! Builds popup rows from pruned symbol declarations.
//! Rows are not filtered or ordered here (see `ranking`).

use analyzer::{SymbolKind, prune_declaration, strip_category_or_type_prefix};

use crate::overlay::{PopupItem, SymbolIcon, Trigger};

/// Accumulates popup rows behind the trigger row, tracking the widest one.
#[derive(Debug)]
pub(crate) struct PopupItems {
    items: Vec<PopupItem>,
    max_width: usize,
}

impl PopupItems {
    pub(crate) fn new(trigger: Trigger) -> Self {
        Self {
            items: vec![PopupItem {
                text: trigger.as_char().to_string(),
                icon: SymbolIcon::Trigger,
            }],
            max_width: 0,
        }
    }

    /// Adds the names declared by one pruned row.
    ///
    /// The section/type prefix is stripped and the rest re-pruned; a row
    /// that strips to nothing keeps its pruned text. Constant, enum,
    /// variable and data rows may declare several comma-separated names,
    /// each of which becomes its own row. Exact duplicates are skipped.
    pub(crate) fn add_symbol(&mut self, kind: Option<SymbolKind>, pruned: &str) {
        let stripped = strip_category_or_type_prefix(pruned);
        let text = if stripped.is_empty() {
            pruned.to_string()
        } else {
            prune_declaration(stripped)
        };

        let icon = SymbolIcon::for_kind(kind);
        if kind.is_some_and(SymbolKind::is_multi_declaration) {
            for name in text.split(',') {
                self.push(name.trim(), icon);
            }
        } else {
            self.push(text.trim(), icon);
        }
    }

    fn push(&mut self, text: &str, icon: SymbolIcon) {
        if text.is_empty() || self.items.iter().any(|item| item.text == text) {
            return;
        }
        self.max_width = self.max_width.max(text.chars().count());
        self.items.push(PopupItem {
            text: text.to_string(),
            icon,
        });
    }

    /// Whether any row besides the trigger row was added.
    pub(crate) fn has_symbols(&self) -> bool {
        self.items.len() > 1
    }

    pub(crate) fn finish(self) -> (Vec<PopupItem>, usize) {
        (self.items, self.max_width)
    }
}
