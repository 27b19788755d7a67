/// Line-start table over a text, in `char` offsets.
#[derive(Debug, Clone)]
pub struct SourceMap {
    line_starts: Vec<usize>,
    len_chars: usize,
}

impl SourceMap {
    pub fn new(src: &str) -> Self {
        let mut line_starts = vec![0];
        let mut len_chars = 0;
        for (i, c) in src.chars().enumerate() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
            len_chars = i + 1;
        }
        Self {
            line_starts,
            len_chars,
        }
    }

    /// Returns `(line, column)`, both 0-based.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.len_chars);
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        (line_idx, offset - self.line_starts[line_idx])
    }

    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Offset of the end of `line`, excluding its `\n`.
    pub fn line_end(&self, line: usize) -> Option<usize> {
        self.line_start(line)?;
        Some(match self.line_starts.get(line + 1) {
            Some(next) => next - 1,
            None => self.len_chars,
        })
    }
}
