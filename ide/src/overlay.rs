//! Overlay state: which assistance surface is showing, its rows, the active
//! row, and how a commit inserts. At most one overlay exists per editor.

use analyzer::SymbolKind;

use crate::geometry::{OverlayAnchor, PixelPoint, ViewMetrics, popup_size};

/// Character that opened a popup. Index 0 of every popup holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Dot,
    Hash,
}

impl Trigger {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Trigger::Dot),
            '#' => Some(Trigger::Hash),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Trigger::Dot => '.',
            Trigger::Hash => '#',
        }
    }
}

/// How a popup commit inserts the chosen row, fixed when the popup opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitPolicy {
    /// `obj.member` / `obj#CONST`: the trigger character precedes the name.
    ObjectMember,
    /// Local or global scope: the bare name is inserted.
    Unqualified,
}

/// Icon class of a popup row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolIcon {
    Trigger,
    Constant,
    Object,
    PrivateMethod,
    PublicMethod,
    Variable,
    Data,
    Unknown,
}

impl SymbolIcon {
    pub fn for_kind(kind: Option<SymbolKind>) -> Self {
        match kind {
            Some(SymbolKind::Constant | SymbolKind::Enum) => SymbolIcon::Constant,
            Some(SymbolKind::Object) => SymbolIcon::Object,
            Some(SymbolKind::PrivateMethod) => SymbolIcon::PrivateMethod,
            Some(SymbolKind::PublicMethod) => SymbolIcon::PublicMethod,
            Some(SymbolKind::Variable) => SymbolIcon::Variable,
            Some(SymbolKind::DataLabel) => SymbolIcon::Data,
            None => SymbolIcon::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupItem {
    pub text: String,
    pub icon: SymbolIcon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Selectable list opened by `.` or `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupList {
    pub(crate) items: Vec<PopupItem>,
    pub(crate) active: usize,
    pub(crate) trigger: Trigger,
    pub(crate) policy: CommitPolicy,
    pub(crate) max_width: usize,
    pub(crate) anchor: OverlayAnchor,
}

impl PopupList {
    pub fn items(&self) -> &[PopupItem] {
        &self.items
    }

    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.text.as_str()).collect()
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    pub fn policy(&self) -> CommitPolicy {
        self.policy
    }

    /// Widest symbol row, in chars. The trigger row is not counted.
    pub fn max_width(&self) -> usize {
        self.max_width
    }

    pub fn anchor(&self) -> OverlayAnchor {
        self.anchor
    }

    /// Moves the active row, stopping at either end.
    pub fn move_active(&mut self, direction: Direction) {
        self.active = match direction {
            Direction::Up => self.active.saturating_sub(1),
            Direction::Down => (self.active + 1).min(self.items.len().saturating_sub(1)),
        };
    }
}

/// Identifier candidates shown under the word being typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSuggestions {
    pub(crate) entries: Vec<String>,
    pub(crate) active: usize,
    pub(crate) navigated: bool,
    pub(crate) anchor: OverlayAnchor,
}

impl InlineSuggestions {
    pub(crate) fn new(entries: Vec<String>, anchor: OverlayAnchor) -> Self {
        Self {
            entries,
            active: 0,
            navigated: false,
            anchor,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_entry(&self) -> Option<&str> {
        self.entries.get(self.active).map(String::as_str)
    }

    pub fn anchor(&self) -> OverlayAnchor {
        self.anchor
    }

    /// Cycles the active entry with wraparound. Single-entry lists stay put.
    pub fn navigate(&mut self, direction: Direction) {
        let len = self.entries.len();
        if len < 2 {
            return;
        }
        self.active = match direction {
            Direction::Up => (self.active + len - 1) % len,
            Direction::Down => (self.active + 1) % len,
        };
        self.navigated = true;
    }

    /// The entry a commit may insert: the only entry, or the one the user
    /// navigated to. `None` for an untouched multi-entry list.
    pub fn committable(&self) -> Option<&str> {
        match self.entries.len() {
            1 => self.active_entry(),
            _ if self.navigated => self.active_entry(),
            _ => None,
        }
    }

    /// Tooltip markup: the active entry in bold, rows joined by `<br/>`.
    pub fn render_rich_text(&self) -> String {
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                if idx == self.active {
                    format!("<b>{entry}</b>")
                } else {
                    entry.clone()
                }
            })
            .collect::<Vec<_>>()
            .join("<br/>")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Hidden,
    InlineTooltip(InlineSuggestions),
    Popup(PopupList),
}

impl OverlayState {
    pub fn is_hidden(&self) -> bool {
        matches!(self, OverlayState::Hidden)
    }

    pub fn inline(&self) -> Option<&InlineSuggestions> {
        match self {
            OverlayState::InlineTooltip(suggestions) => Some(suggestions),
            _ => None,
        }
    }

    pub fn popup(&self) -> Option<&PopupList> {
        match self {
            OverlayState::Popup(popup) => Some(popup),
            _ => None,
        }
    }

    /// Placement and content for the UI layer; `None` when hidden.
    pub fn view(&self, metrics: &ViewMetrics) -> Option<OverlayView<'_>> {
        match self {
            OverlayState::Hidden => None,
            OverlayState::InlineTooltip(suggestions) => Some(OverlayView::Tooltip {
                at: suggestions.anchor.to_pixels(metrics),
                rich_text: suggestions.render_rich_text(),
            }),
            OverlayState::Popup(popup) => {
                let (width, height) = popup_size(popup.max_width, metrics);
                Some(OverlayView::Popup {
                    at: popup.anchor.to_pixels(metrics),
                    width,
                    height,
                    items: &popup.items,
                    active: popup.active,
                })
            }
        }
    }
}

/// What the UI layer should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayView<'a> {
    Tooltip {
        at: PixelPoint,
        rich_text: String,
    },
    Popup {
        at: PixelPoint,
        width: u32,
        height: u32,
        items: &'a [PopupItem],
        active: usize,
    },
}
