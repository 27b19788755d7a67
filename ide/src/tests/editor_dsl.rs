use std::cell::RefCell;
use std::collections::HashMap;

use crate::{
    Key, KeyOutcome, Language, OverlayState, Preferences, RopeBuffer, Selection, SpinEditor,
    SymbolSource, TextBuffer,
};

// ----------------------------
// Symbol table double
// ----------------------------

/// Symbol source answering from fixed rows and logging every query as
/// `members:<prefix>` or `constants:<prefix>`.
#[derive(Debug, Clone, Default)]
pub struct StaticSymbols {
    members: HashMap<String, Vec<String>>,
    any_members: Option<Vec<String>>,
    constants: HashMap<String, Vec<String>>,
    queries: RefCell<Vec<String>>,
}

impl StaticSymbols {
    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }
}

impl SymbolSource for StaticSymbols {
    fn lookup_members(&self, _file_id: &str, object_prefix: &str) -> Vec<String> {
        self.queries
            .borrow_mut()
            .push(format!("members:{object_prefix}"));
        self.members
            .get(object_prefix)
            .or(self.any_members.as_ref())
            .cloned()
            .unwrap_or_default()
    }

    fn lookup_constants(&self, _file_id: &str, object_prefix: &str) -> Vec<String> {
        self.queries
            .borrow_mut()
            .push(format!("constants:{object_prefix}"));
        self.constants
            .get(object_prefix)
            .cloned()
            .unwrap_or_default()
    }
}

fn rows(rows: &[&str]) -> Vec<String> {
    rows.iter().map(|row| row.to_string()).collect()
}

// ----------------------------
// Fixtures
// ----------------------------

/// Splits a fixture into text and selection. `$0` marks the cursor (the
/// selection head), `$1` the selection anchor when text is selected.
pub fn parse_fixture(fixture: &str) -> (String, Selection) {
    let mut text = String::new();
    let mut head = None;
    let mut anchor = None;
    let mut offset = 0;
    let mut chars = fixture.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '$'
            && let Some(&marker) = chars.peek()
            && (marker == '0' || marker == '1')
        {
            chars.next();
            if marker == '0' {
                head = Some(offset);
            } else {
                anchor = Some(offset);
            }
            continue;
        }
        text.push(c);
        offset += 1;
    }
    let head = head.expect("fixture must contain $0 marker");
    (text, Selection::new(anchor.unwrap_or(head), head))
}

/// Inverse of [`parse_fixture`].
pub fn render_fixture(buffer: &RopeBuffer) -> String {
    let selection = buffer.selection();
    let mut markers = vec![(selection.head, "$0")];
    if !selection.is_empty() {
        markers.push((selection.anchor, "$1"));
    }
    markers.sort_by(|a, b| b.0.cmp(&a.0));

    let mut chars: Vec<String> = buffer.text().chars().map(String::from).collect();
    for (offset, marker) in markers {
        chars.insert(offset, marker.to_string());
    }
    chars.concat()
}

pub fn buffer(fixture: &str) -> RopeBuffer {
    let (text, selection) = parse_fixture(fixture);
    RopeBuffer::with_selection(&text, selection)
}

// ----------------------------
// Editor Test DSL
// ----------------------------

pub fn t(fixture: &str) -> EditorTest {
    EditorTest::new(fixture)
}

pub struct EditorTest {
    buffer: RopeBuffer,
    symbols: StaticSymbols,
    prefs: Preferences,
    language: Language,
    editor: Option<SpinEditor<StaticSymbols>>,
    last_outcome: Option<KeyOutcome>,
    last_commit: Option<bool>,
}

impl EditorTest {
    fn new(fixture: &str) -> Self {
        super::init_tracing();
        Self {
            buffer: buffer(fixture),
            symbols: StaticSymbols::default(),
            prefs: Preferences::default(),
            language: Language::Spin,
            editor: None,
            last_outcome: None,
            last_commit: None,
        }
    }

    /// Rows returned for `.` queries with exactly this object prefix.
    pub fn members(mut self, prefix: &str, members: &[&str]) -> Self {
        self.symbols
            .members
            .insert(prefix.to_string(), rows(members));
        self
    }

    /// Rows returned for `.` queries with any other prefix.
    pub fn any_members(mut self, members: &[&str]) -> Self {
        self.symbols.any_members = Some(rows(members));
        self
    }

    pub fn constants(mut self, prefix: &str, constants: &[&str]) -> Self {
        self.symbols
            .constants
            .insert(prefix.to_string(), rows(constants));
        self
    }

    pub fn prefs(mut self, prefs: Preferences) -> Self {
        self.prefs = prefs;
        self
    }

    pub fn tab_width(mut self, tab_width: usize) -> Self {
        self.prefs.tab_width = tab_width;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    fn editor(&mut self) -> &mut SpinEditor<StaticSymbols> {
        self.editor.get_or_insert_with(|| {
            SpinEditor::new("top.spin", self.symbols.clone(), self.prefs.clone())
                .with_language(self.language)
        })
    }

    pub fn key(mut self, key: Key) -> Self {
        self.editor();
        let editor = self.editor.as_mut().unwrap();
        let outcome = editor
            .handle_key(&mut self.buffer, key)
            .expect("key handling failed");
        self.last_outcome = Some(outcome);
        self
    }

    pub fn keys(self, keys: &[Key]) -> Self {
        keys.iter().fold(self, |test, &key| test.key(key))
    }

    pub fn type_text(self, text: &str) -> Self {
        text.chars().fold(self, |test, c| test.key(Key::Char(c)))
    }

    /// Pointer selection of popup row `index`.
    pub fn click(mut self, index: usize) -> Self {
        self.editor();
        let editor = self.editor.as_mut().unwrap();
        let committed = editor
            .commit_popup(&mut self.buffer, index)
            .expect("popup commit failed");
        self.last_commit = Some(committed);
        self
    }

    pub fn undo(mut self) -> Self {
        assert!(self.buffer.undo(), "expected an undoable edit group");
        self
    }

    /// Overlay after the keys so far; hidden before the first key.
    pub fn overlay(&self) -> OverlayState {
        self.editor
            .as_ref()
            .map(|editor| editor.overlay().clone())
            .unwrap_or_default()
    }

    pub fn spin_editor(&mut self) -> &SpinEditor<StaticSymbols> {
        self.editor()
    }

    pub fn rich_text(&self) -> String {
        self.overlay()
            .inline()
            .expect("expected inline suggestions")
            .render_rich_text()
    }

    pub fn expect_text(self, fixture: &str) -> Self {
        assert_eq!(render_fixture(&self.buffer), fixture);
        self
    }

    pub fn expect_popup(self, expected: &[&str]) -> Self {
        let overlay = self.overlay();
        let popup = overlay
            .popup()
            .unwrap_or_else(|| panic!("expected a popup, got {overlay:?}"));
        assert_eq!(popup.labels(), expected);
        self
    }

    pub fn expect_popup_active(self, expected: usize) -> Self {
        let overlay = self.overlay();
        let popup = overlay.popup().expect("expected a popup");
        assert_eq!(popup.active(), expected);
        self
    }

    pub fn expect_inline(self, expected: &[&str]) -> Self {
        let overlay = self.overlay();
        let inline = overlay
            .inline()
            .unwrap_or_else(|| panic!("expected inline suggestions, got {overlay:?}"));
        assert_eq!(inline.entries(), expected);
        self
    }

    pub fn expect_hidden(self) -> Self {
        let overlay = self.overlay();
        assert!(overlay.is_hidden(), "expected no overlay, got {overlay:?}");
        self
    }

    pub fn expect_outcome(self, expected: KeyOutcome) -> Self {
        assert_eq!(self.last_outcome, Some(expected));
        self
    }

    pub fn expect_committed(self, expected: bool) -> Self {
        assert_eq!(self.last_commit, Some(expected));
        self
    }

    pub fn expect_queries(mut self, expected: &[&str]) -> Self {
        let queries = self.editor().symbols().queries();
        assert_eq!(queries, expected);
        self
    }

    pub fn expect_undo_depth(self, expected: usize) -> Self {
        assert_eq!(self.buffer.undo_depth(), expected);
        self
    }
}

#[test]
fn fixture_round_trips_markers() {
    let forwards = buffer("ab$1cd$0e");
    assert_eq!(forwards.text(), "abcde");
    assert_eq!(forwards.selection(), Selection::new(2, 4));
    assert_eq!(render_fixture(&forwards), "ab$1cd$0e");

    let backwards = buffer("a$0bc$1");
    assert_eq!(backwards.selection(), Selection::new(3, 1));
    assert_eq!(render_fixture(&backwards), "a$0bc$1");
}
