//! Text-to-pixel placement for overlays.

/// Rows shown by the popup list before it scrolls.
pub const POPUP_VISIBLE_ROWS: u32 = 10;

/// Extra columns added to the widest popup entry.
pub const POPUP_PADDING_COLUMNS: u32 = 10;

/// Font and viewport measurements supplied by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewMetrics {
    pub char_width: u32,
    pub line_height: u32,
    pub gutter_width: u32,
    pub first_visible_line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

/// Text position an overlay hangs from: it is drawn directly below `line`,
/// starting at `column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayAnchor {
    pub line: usize,
    pub column: usize,
}

impl OverlayAnchor {
    pub fn to_pixels(self, metrics: &ViewMetrics) -> PixelPoint {
        let rows_below_top = self.line as i64 + 1 - metrics.first_visible_line as i64;
        PixelPoint {
            x: i64::from(metrics.gutter_width) + self.column as i64 * i64::from(metrics.char_width),
            y: rows_below_top * i64::from(metrics.line_height),
        }
    }
}

/// Pixel size of a popup whose widest entry is `max_chars` wide.
pub fn popup_size(max_chars: usize, metrics: &ViewMetrics) -> (u32, u32) {
    let columns = u32::try_from(max_chars)
        .unwrap_or(u32::MAX)
        .saturating_add(POPUP_PADDING_COLUMNS);
    (
        columns.saturating_mul(metrics.char_width),
        POPUP_VISIBLE_ROWS.saturating_mul(metrics.line_height),
    )
}

/// Width of the line-number gutter: the digits of `line_count` plus two.
pub fn gutter_width(line_count: usize, char_width: u32) -> u32 {
    let mut digits = 1u32;
    let mut max = line_count.max(1);
    while max >= 10 {
        max /= 10;
        digits += 1;
    }
    (digits + 2).saturating_mul(char_width)
}
