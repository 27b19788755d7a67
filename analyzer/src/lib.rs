//! Buffer-independent text analysis for Spin source.
//!
//! Pipeline: raw symbol rows → normalizer → display tokens; document text → structural scans.
//! All offsets are `char` indices into the original text, using `[start, end)`.
//! Pixel geometry and buffer mutation live in `spin-ide`.

pub mod keywords;
pub mod normalize;
pub mod regions;
pub mod scan;
mod source_map;
mod span;
pub mod symbol;
mod tests;
mod text_edit;

pub use normalize::{
    collapse_whitespace, extract_bare_identifier, prune_declaration, strip_category_or_type_prefix,
};
pub use regions::{SectionBand, SectionKind, section_bands};
pub use scan::{
    BLOCK_COMMENT, BRACE_COMMENT, BlockScan, DelimiterBalance, DelimiterPair, delimiter_balance,
    find_brace_insertion_column, is_block_open_at, scan_block,
};
pub use source_map::SourceMap;
pub use span::Span;
pub use symbol::{RawSymbol, SymbolKind};
pub use text_edit::TextEdit;
