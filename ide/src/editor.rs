//! Per-document editing session: routes key events to the completion,
//! suggestion, indent and block-shift engines and owns the overlay state.

use analyzer::{SectionBand, section_bands};
use tracing::debug;

use crate::block::{ShiftDirection, shift_block};
use crate::buffer::{BufferError, TextBuffer};
use crate::completion;
use crate::geometry::{ViewMetrics, gutter_width};
use crate::indent::{auto_indent, close_brace};
use crate::overlay::{Direction, OverlayState, OverlayView, PopupList, Trigger};
use crate::prefs::{Language, Preferences};
use crate::suggest::{self, CommitKey};
use crate::symbols::SymbolSource;

/// Key events the session reacts to. Other keys never reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Tab,
    BackTab,
    Up,
    Down,
    Escape,
    Backspace,
    Char(char),
}

/// Whether the host should still run its default action for the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Unhandled,
}

impl KeyOutcome {
    fn from_handled(handled: bool) -> Self {
        if handled {
            KeyOutcome::Handled
        } else {
            KeyOutcome::Unhandled
        }
    }
}

pub struct SpinEditor<S> {
    symbols: S,
    file_id: String,
    language: Language,
    prefs: Preferences,
    overlay: OverlayState,
    saved: Option<String>,
}

impl<S: SymbolSource> SpinEditor<S> {
    pub fn new(file_id: impl Into<String>, symbols: S, prefs: Preferences) -> Self {
        let file_id = file_id.into();
        Self {
            language: Language::from_file_name(&file_id),
            symbols,
            file_id,
            prefs,
            overlay: OverlayState::Hidden,
            saved: None,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn symbols(&self) -> &S {
        &self.symbols
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn set_preferences(&mut self, prefs: Preferences) {
        self.prefs = prefs;
        if !self.prefs.inline_suggest && self.overlay.inline().is_some() {
            self.hide_overlay();
        }
    }

    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    pub fn overlay_view(&self, metrics: &ViewMetrics) -> Option<OverlayView<'_>> {
        self.overlay.view(metrics)
    }

    pub fn hide_overlay(&mut self) {
        self.overlay = OverlayState::Hidden;
    }

    /// Handles one key event. `Unhandled` means the host runs its default.
    pub fn handle_key<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &mut B,
        key: Key,
    ) -> Result<KeyOutcome, BufferError> {
        if let OverlayState::Popup(popup) = &mut self.overlay {
            match key {
                Key::Up => popup.move_active(Direction::Up),
                Key::Down => popup.move_active(Direction::Down),
                Key::Enter | Key::Tab => {
                    let active = popup.active();
                    self.commit_popup(buffer, active)?;
                }
                Key::Escape => self.hide_overlay(),
                Key::Backspace => {
                    self.hide_overlay();
                    return Ok(KeyOutcome::Unhandled);
                }
                Key::Char(c) if c == popup.trigger().as_char() => {
                    self.commit_popup(buffer, 0)?;
                }
                Key::Char(_) | Key::BackTab => {
                    self.commit_popup(buffer, 0)?;
                    return self.handle_key(buffer, key);
                }
            }
            return Ok(KeyOutcome::Handled);
        }

        match key {
            Key::Enter => {
                if self.commit_inline(buffer, CommitKey::Enter)? {
                    return Ok(KeyOutcome::Handled);
                }
                Ok(KeyOutcome::from_handled(auto_indent(buffer)?))
            }
            Key::Tab | Key::BackTab => {
                let (commit_key, direction) = match key {
                    Key::Tab => (CommitKey::Tab, ShiftDirection::Indent),
                    _ => (CommitKey::BackTab, ShiftDirection::Outdent),
                };
                if !self.commit_inline(buffer, commit_key)? {
                    shift_block(buffer, self.tab_width(), direction)?;
                }
                Ok(KeyOutcome::Handled)
            }
            Key::Up | Key::Down => match &mut self.overlay {
                OverlayState::InlineTooltip(suggestions) => {
                    let direction = if key == Key::Up {
                        Direction::Up
                    } else {
                        Direction::Down
                    };
                    suggestions.navigate(direction);
                    Ok(KeyOutcome::Handled)
                }
                _ => Ok(KeyOutcome::Unhandled),
            },
            Key::Escape | Key::Backspace => {
                self.hide_overlay();
                Ok(KeyOutcome::Unhandled)
            }
            Key::Char('}') => {
                self.hide_overlay();
                if !close_brace(buffer, self.tab_width())? {
                    buffer.insert("}")?;
                }
                Ok(KeyOutcome::Handled)
            }
            Key::Char(c) => {
                if let Some(trigger) = Trigger::from_char(c)
                    && self.popup_enabled(trigger)
                {
                    self.open_popup(buffer, trigger)?;
                    return Ok(KeyOutcome::Handled);
                }
                buffer.insert(c.encode_utf8(&mut [0; 4]))?;
                self.refresh_inline(buffer)?;
                Ok(KeyOutcome::Handled)
            }
        }
    }

    /// Commits popup row `index` (pointer selection). Returns `false` when
    /// no popup is open or the index is out of range; the popup closes
    /// either way.
    pub fn commit_popup<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &mut B,
        index: usize,
    ) -> Result<bool, BufferError> {
        let OverlayState::Popup(popup) = std::mem::take(&mut self.overlay) else {
            return Ok(false);
        };
        completion::commit_popup(buffer, &popup, index)
    }

    /// Recomputes inline suggestions for the word at the cursor.
    pub fn refresh_inline<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &B,
    ) -> Result<(), BufferError> {
        if !self.prefs.inline_suggest || self.overlay.popup().is_some() {
            return Ok(());
        }
        self.overlay = match suggest::suggest(buffer, &self.symbols, &self.file_id)? {
            Some(suggestions) => OverlayState::InlineTooltip(suggestions),
            None => OverlayState::Hidden,
        };
        Ok(())
    }

    /// Section bands of the buffer for background painting.
    pub fn section_bands<B: TextBuffer + ?Sized>(&self, buffer: &B) -> Vec<SectionBand> {
        section_bands(&buffer.text())
    }

    /// Gutter width in pixels for the buffer's line count.
    pub fn gutter_width<B: TextBuffer + ?Sized>(&self, buffer: &B, char_width: u32) -> u32 {
        gutter_width(buffer.len_lines(), char_width)
    }

    /// Records the buffer text as the saved state.
    pub fn mark_saved<B: TextBuffer + ?Sized>(&mut self, buffer: &B) {
        self.saved = Some(buffer.text());
    }

    /// Whether the buffer differs from the last saved state. A session that
    /// was never saved counts any non-empty buffer as modified.
    pub fn is_modified<B: TextBuffer + ?Sized>(&self, buffer: &B) -> bool {
        match &self.saved {
            Some(saved) => *saved != buffer.text(),
            None => buffer.len_chars() > 0,
        }
    }

    fn tab_width(&self) -> usize {
        self.prefs.tab_width.max(1)
    }

    fn popup_enabled(&self, trigger: Trigger) -> bool {
        self.language == Language::Spin
            && match trigger {
                Trigger::Dot => self.prefs.dot_complete,
                Trigger::Hash => self.prefs.constant_complete,
            }
    }

    fn open_popup<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &mut B,
        trigger: Trigger,
    ) -> Result<(), BufferError> {
        self.hide_overlay();
        match completion::open_popup(buffer, &self.symbols, &self.file_id, trigger, &self.prefs)? {
            Some(popup) => self.show_popup(popup),
            None => buffer.insert(trigger.as_char().encode_utf8(&mut [0; 4]))?,
        }
        Ok(())
    }

    fn show_popup(&mut self, popup: PopupList) {
        debug!(rows = popup.items().len(), "show popup");
        self.overlay = OverlayState::Popup(popup);
    }

    /// Commits the inline suggestion, if one is showing and committable.
    /// The tooltip is hidden either way.
    fn commit_inline<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &mut B,
        key: CommitKey,
    ) -> Result<bool, BufferError> {
        let OverlayState::InlineTooltip(suggestions) = std::mem::take(&mut self.overlay) else {
            return Ok(false);
        };
        if !self.prefs.inline_suggest {
            return Ok(false);
        }
        suggest::commit(buffer, &suggestions, key, self.tab_width())
    }
}
