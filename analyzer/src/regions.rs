//! Section bands: the line ranges covered by each `CON`/`VAR`/`OBJ`/`PUB`/
//! `PRI`/`DAT` block, used to tint block backgrounds.

use crate::keywords::is_word_char;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Con,
    Var,
    Obj,
    Pub,
    Pri,
    Dat,
}

impl SectionKind {
    const ALL: [SectionKind; 6] = [
        SectionKind::Con,
        SectionKind::Var,
        SectionKind::Obj,
        SectionKind::Pub,
        SectionKind::Pri,
        SectionKind::Dat,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            SectionKind::Con => "CON",
            SectionKind::Var => "VAR",
            SectionKind::Obj => "OBJ",
            SectionKind::Pub => "PUB",
            SectionKind::Pri => "PRI",
            SectionKind::Dat => "DAT",
        }
    }

    /// Section opened by `line`, if it starts with a header keyword.
    ///
    /// `CONSTANT` and friends are not headers: the character after the
    /// keyword must not be a word character.
    pub fn from_header(line: &str) -> Option<Self> {
        if line.chars().nth(3).is_some_and(is_word_char) {
            return None;
        }
        Self::ALL.into_iter().find(|kind| {
            line.get(..3)
                .is_some_and(|head| head.eq_ignore_ascii_case(kind.keyword()))
        })
    }
}

/// Lines `[start_line, end_line)` belonging to one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionBand {
    pub kind: SectionKind,
    pub start_line: usize,
    pub end_line: usize,
    /// Second tone, set on every other band in a run of same-kind bands.
    pub alternate: bool,
}

/// Splits `text` into section bands.
///
/// Lines before the first header form an implicit `CON` band. Headers inside
/// a `{ }` comment region are ignored.
pub fn section_bands(text: &str) -> Vec<SectionBand> {
    let mut bands: Vec<SectionBand> = Vec::new();
    let mut current = SectionBand {
        kind: SectionKind::Con,
        start_line: 0,
        end_line: 0,
        alternate: false,
    };
    let mut comment_depth = 0usize;
    let mut line_count = 0usize;

    for (idx, line) in text.split('\n').enumerate() {
        line_count = idx + 1;
        if line.contains('{') {
            comment_depth += 1;
        }
        if line.contains('}') && comment_depth > 0 {
            comment_depth -= 1;
        }
        if comment_depth > 0 {
            continue;
        }
        let Some(kind) = SectionKind::from_header(line) else {
            continue;
        };

        current.end_line = idx;
        if current.end_line > current.start_line {
            bands.push(current);
        }
        let alternate = match bands.last() {
            Some(last) if last.kind == kind => !last.alternate,
            _ => false,
        };
        current = SectionBand {
            kind,
            start_line: idx,
            end_line: idx,
            alternate,
        };
    }

    current.end_line = line_count;
    if current.end_line > current.start_line {
        bands.push(current);
    }
    bands
}
