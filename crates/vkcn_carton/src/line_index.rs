//! Byte offset to line/column conversion.

/// Index of line start offsets for a source text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    /// Build the index for a source text.
    pub fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .bytes()
                    .enumerate()
                    .filter_map(|(i, b)| (b == b'\n').then_some(i as u32 + 1)),
            )
            .collect();
        Self { line_starts }
    }

    /// 1-based line number containing the offset.
    #[inline]
    pub fn line(&self, offset: u32) -> u32 {
        self.line_starts.partition_point(|&start| start <= offset) as u32
    }

    /// 1-based line and column (in chars) for an offset.
    pub fn line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line(offset);
        let line_start = self.line_starts[(line - 1) as usize] as usize;
        let end = (offset as usize).min(source.len());
        let column = source
            .get(line_start..end)
            .map(|s| s.chars().count())
            .unwrap_or(end - line_start);
        (line, column as u32 + 1)
    }

    /// Number of lines.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
