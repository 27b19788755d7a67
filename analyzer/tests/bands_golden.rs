mod common;

use std::path::Path;

use common::golden::check_spin_snapshots;
use spin_analyzer::{BRACE_COMMENT, delimiter_balance, section_bands};

#[test]
fn bands_golden() {
    check_spin_snapshots(Path::new("tests/bands"), "snap", |source| {
        let mut out = String::new();
        for band in section_bands(source) {
            let tone = if band.alternate { " alt" } else { "" };
            out.push_str(&format!(
                "{} {}..{}{}\n",
                band.kind.keyword(),
                band.start_line,
                band.end_line,
                tone
            ));
        }
        let balance = delimiter_balance(source, BRACE_COMMENT);
        out.push_str(&format!(
            "braces: {} open, {} close\n",
            balance.opens, balance.closes
        ));
        out
    });
}
