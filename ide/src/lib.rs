//! Editing assistance for Spin sources.
//!
//! A [`SpinEditor`] sits between a text widget and the Spin symbol table. It
//! turns key events into edits on a [`TextBuffer`]: popup completion after
//! `.` and `#`, inline identifier suggestions, auto-indent, `}` placement and
//! block indent/outdent. Offsets are `char` indices, spans half-open.

mod block;
mod buffer;
mod completion;
mod context;
mod editor;
mod geometry;
mod indent;
mod overlay;
mod prefs;
mod rope_buffer;
mod suggest;
mod symbols;

pub use analyzer::{SectionBand, SectionKind, Span, TextEdit};
pub use block::{BlockShift, ShiftDirection, plan_block_shift};
pub use buffer::{BufferError, Position, Selection, TextBuffer, with_edit_group};
pub use editor::{Key, KeyOutcome, SpinEditor};
pub use geometry::{
    OverlayAnchor, POPUP_PADDING_COLUMNS, POPUP_VISIBLE_ROWS, PixelPoint, ViewMetrics,
    gutter_width, popup_size,
};
pub use indent::continuation_prefix;
pub use overlay::{
    CommitPolicy, Direction, InlineSuggestions, OverlayState, OverlayView, PopupItem, PopupList,
    SymbolIcon, Trigger,
};
pub use prefs::{ConfigError, DEFAULT_TAB_WIDTH, Language, Preferences};
pub use rope_buffer::RopeBuffer;
pub use suggest::{MIN_FRAGMENT_CHARS, inline_candidates};
pub use symbols::SymbolSource;

#[cfg(test)]
mod tests;
