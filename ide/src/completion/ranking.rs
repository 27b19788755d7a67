//! Row filtering and ordering for popup queries.

use analyzer::{RawSymbol, SymbolKind};

use crate::overlay::Trigger;

/// Where a popup query looks for symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Scope {
    /// Members of the object named before the trigger.
    Object(String),
    /// The current file.
    Local,
}

impl Scope {
    pub(crate) fn from_prefix(prefix: &str) -> Self {
        if prefix.is_empty() {
            Scope::Local
        } else {
            Scope::Object(prefix.to_string())
        }
    }

    pub(crate) fn prefix(&self) -> &str {
        match self {
            Scope::Object(prefix) => prefix,
            Scope::Local => "",
        }
    }
}

/// Whether a row of `kind` is left out of the popup.
///
/// An object exposes only its public methods through `.`. The unscoped `.`
/// popup leaves constants and enums to `#` when `#` completion is enabled.
pub(crate) fn is_filtered(
    kind: Option<SymbolKind>,
    trigger: Trigger,
    scope: &Scope,
    constant_complete: bool,
) -> bool {
    match (trigger, scope) {
        (Trigger::Dot, Scope::Object(_)) => matches!(
            kind,
            Some(
                SymbolKind::Constant
                    | SymbolKind::Enum
                    | SymbolKind::Object
                    | SymbolKind::PrivateMethod
                    | SymbolKind::Variable
                    | SymbolKind::DataLabel
            )
        ),
        (Trigger::Dot, Scope::Local) => {
            constant_complete && matches!(kind, Some(SymbolKind::Constant | SymbolKind::Enum))
        }
        (Trigger::Hash, _) => false,
    }
}

/// Orders raw rows for display: unscoped `.` lists object rows first and
/// keeps the remaining order; `#` sorts the raw rows.
pub(crate) fn order_rows<'a>(rows: &'a [String], trigger: Trigger, scope: &Scope) -> Vec<&'a str> {
    let mut ordered: Vec<&str> = rows.iter().map(String::as_str).collect();
    match (trigger, scope) {
        (Trigger::Dot, Scope::Local) => {
            ordered.sort_by_key(|row| RawSymbol::new(row).kind() != Some(SymbolKind::Object));
        }
        (Trigger::Hash, _) => ordered.sort_unstable(),
        (Trigger::Dot, Scope::Object(_)) => {}
    }
    ordered
}
