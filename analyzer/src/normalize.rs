//! Turns raw symbol-table rows into display-ready symbol text.
//!
//! Every function here is pure and total: malformed input degrades to a
//! partially stripped string, never a panic. The popup and inline engines
//! both route through these so display strings agree between them.

use crate::keywords::{
    DECLARATION_STOP_KEYWORDS, SECTION_KEYWORDS, TYPE_KEYWORDS, find_keyword, leading_keyword,
};
use crate::symbol::RawSymbol;

/// Characters that end a bare identifier.
pub const IDENTIFIER_DELIMITERS: &[char] = &[
    ' ', '[', ',', '(', ')', '<', '>', ':', '=', '+', '-', '*', '/', '!', '@', '#', '$', '%', '^',
    '&', '|', '\t', '\r', '\n',
];

/// Reduces a raw `<tag>\t<declaration>` row to its display form.
///
/// Drops the tag field, then cuts suffix noise in priority order:
/// after the last `)` (call signatures survive intact), otherwise at the
/// last `:`, `|`, `[` or `=`, otherwise at the first standalone
/// `byte`/`long`/`word`/`org`. A cut only happens past position 0.
/// Cuts repeat until nothing changes, so the result is a fixed point:
/// `prune_declaration(&prune_declaration(s)) == prune_declaration(s)`.
pub fn prune_declaration(raw: &str) -> String {
    let mut pruned = collapse_whitespace(RawSymbol::new(raw).declaration());
    loop {
        let next = cut_suffix_noise(&pruned);
        if next.len() == pruned.len() {
            return pruned;
        }
        pruned = next.to_string();
    }
}

fn cut_suffix_noise(s: &str) -> &str {
    let cut = if let Some(close) = s.rfind(')').filter(|&i| i > 0) {
        &s[..=close]
    } else if let Some(i) = [':', '|', '[', '=']
        .iter()
        .find_map(|&c| s.rfind(c).filter(|&i| i > 0))
    {
        &s[..i]
    } else if let Some(i) = find_keyword(s, DECLARATION_STOP_KEYWORDS).filter(|&i| i > 0) {
        &s[..i]
    } else {
        s
    };
    cut.trim()
}

/// Drops a leading section keyword (`con dat pub pri obj var`) together
/// with the separator after it, then a leading `byte`/`long`/`word` the
/// same way. Keywords only count at position 0 and as whole words.
pub fn strip_category_or_type_prefix(s: &str) -> &str {
    let mut body = s;
    if let Some(kw) = leading_keyword(body, SECTION_KEYWORDS) {
        body = skip_chars(body, kw.len() + 1);
    }
    if let Some(kw) = leading_keyword(body, TYPE_KEYWORDS) {
        body = skip_chars(body, kw.len() + 1);
    }
    body
}

/// Truncates at the first identifier delimiter and trims.
pub fn extract_bare_identifier(s: &str) -> &str {
    let end = s.find(IDENTIFIER_DELIMITERS).unwrap_or(s.len());
    s[..end].trim()
}

/// Collapses every whitespace run to one space and trims the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn skip_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}
