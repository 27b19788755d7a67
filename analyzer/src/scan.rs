//! Whole-document delimiter scans.
//!
//! Counting is per line: a line contributes at most one open and one close,
//! whatever the number of markers on it. Empty lines contribute nothing.
//! Line indices are document line indices (0-based).

use tracing::trace;

/// An open/close marker pair for a multi-line region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterPair {
    pub open: &'static str,
    pub close: &'static str,
}

/// C-style `/* ... */` block comments.
pub const BLOCK_COMMENT: DelimiterPair = DelimiterPair {
    open: "/*",
    close: "*/",
};

/// Spin `{ ... }` comment regions.
pub const BRACE_COMMENT: DelimiterPair = DelimiterPair {
    open: "{",
    close: "}",
};

/// Open/close line counts for one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DelimiterBalance {
    pub opens: usize,
    pub closes: usize,
}

impl DelimiterBalance {
    pub fn is_balanced(&self) -> bool {
        self.opens == self.closes
    }

    pub fn is_open(&self) -> bool {
        self.opens > self.closes
    }

    fn count_line(&mut self, line: &str, pair: DelimiterPair) {
        if line.contains(pair.open) {
            self.opens += 1;
        }
        if line.contains(pair.close) {
            self.closes += 1;
        }
    }
}

/// Result of scanning a document for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockScan {
    /// A region is unterminated at the end of the line, its own markers counted.
    pub open_at_line: bool,
    /// Totals over the whole document.
    pub balance: DelimiterBalance,
}

/// Counts `pair` over every line of `text`.
pub fn delimiter_balance(text: &str, pair: DelimiterPair) -> DelimiterBalance {
    let mut balance = DelimiterBalance::default();
    for line in text.lines().filter(|line| !line.is_empty()) {
        balance.count_line(line, pair);
    }
    balance
}

/// Scans the whole document, recording the state at `line_idx`.
pub fn scan_block(text: &str, line_idx: usize, pair: DelimiterPair) -> BlockScan {
    let mut balance = DelimiterBalance::default();
    let mut open_at_line = false;
    for (idx, line) in text.lines().enumerate() {
        if !line.is_empty() {
            balance.count_line(line, pair);
        }
        if idx == line_idx {
            open_at_line = balance.is_open();
        }
    }
    BlockScan {
        open_at_line,
        balance,
    }
}

/// Whether a region of `pair` is open at `line_idx`.
///
/// Counts run from the first line through `line_idx` inclusive, so the line
/// that opens a region reports open and the line that closes it does not.
/// Lines past the end of the document are never open.
pub fn is_block_open_at(text: &str, line_idx: usize, pair: DelimiterPair) -> bool {
    scan_block(text, line_idx, pair).open_at_line
}

/// Column at which a `}` should be auto-inserted, one tab stop left of
/// `column`, or `None` when no action applies.
///
/// No action when the cursor is within one tab stop of the line start, when
/// the current line already contains `{`, when brace regions are balanced
/// over the whole document (same-line `/* */` spans ignored), or when there
/// is no line above the cursor to close against.
pub fn find_brace_insertion_column(
    text: &str,
    line_idx: usize,
    column: usize,
    tab_width: usize,
) -> Option<usize> {
    if column <= tab_width {
        return None;
    }

    let current = text.lines().nth(line_idx).unwrap_or("");
    if current.contains(BRACE_COMMENT.open) {
        return None;
    }

    let mut balance = DelimiterBalance::default();
    for line in text.lines().filter(|line| !line.is_empty()) {
        balance.count_line(&strip_inline_block_comment(line), BRACE_COMMENT);
    }
    if balance.is_balanced() {
        return None;
    }

    if line_idx == 0 {
        return None;
    }

    trace!(
        line = line_idx,
        opens = balance.opens,
        closes = balance.closes,
        "unbalanced brace region"
    );
    Some(column - tab_width)
}

/// Removes a `/* ... */` span (first open to last close) from one line.
fn strip_inline_block_comment(line: &str) -> String {
    let Some(start) = line.find(BLOCK_COMMENT.open) else {
        return line.to_string();
    };
    match line.rfind(BLOCK_COMMENT.close) {
        Some(end) if end >= start + BLOCK_COMMENT.open.len() => {
            let mut out = String::with_capacity(line.len());
            out.push_str(&line[..start]);
            out.push_str(&line[end + BLOCK_COMMENT.close.len()..]);
            out
        }
        _ => line.to_string(),
    }
}
