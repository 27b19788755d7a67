//! Spin keyword tables and whole-word, ASCII-case-insensitive keyword search.
//!
//! A "whole word" match has no word character (`[A-Za-z0-9_]` or any
//! alphanumeric) immediately before or after it.

/// Section (block) keywords that open a region of a Spin source file.
pub const SECTION_KEYWORDS: &[&str] = &["con", "dat", "pub", "pri", "obj", "var"];

/// Storage-size keywords that may prefix a declaration.
pub const TYPE_KEYWORDS: &[&str] = &["byte", "long", "word"];

/// Keywords that terminate the name part of a declaration.
pub const DECLARATION_STOP_KEYWORDS: &[&str] = &["byte", "long", "word", "org"];

pub fn is_word_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Byte index of the first whole-word occurrence of any keyword in `set`.
pub fn find_keyword(text: &str, set: &[&str]) -> Option<usize> {
    let mut prev_is_word = false;
    for (idx, c) in text.char_indices() {
        if !prev_is_word && keyword_at(text, idx, set).is_some() {
            return Some(idx);
        }
        prev_is_word = is_word_char(c);
    }
    None
}

/// The keyword from `set` found as a whole word at byte offset 0, if any.
pub fn leading_keyword<'k>(text: &str, set: &[&'k str]) -> Option<&'k str> {
    keyword_at(text, 0, set)
}

fn keyword_at<'k>(text: &str, idx: usize, set: &[&'k str]) -> Option<&'k str> {
    let rest = text.get(idx..)?;
    set.iter().copied().find(|kw| {
        let Some(head) = rest.get(..kw.len()) else {
            return false;
        };
        head.eq_ignore_ascii_case(kw) && !rest[kw.len()..].starts_with(is_word_char)
    })
}
