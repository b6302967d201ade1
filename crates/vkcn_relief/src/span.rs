//! Source spans.

use serde::Serialize;

/// Byte range `[start, end)` in the analysed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Span from `usize` offsets.
    #[inline]
    pub fn from_range(start: usize, end: usize) -> Self {
        Self::new(start as u32, end as u32)
    }

    /// Shift both ends by a base offset.
    #[inline]
    pub const fn shift(self, offset: u32) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Slice the text this span covers.
    #[inline]
    pub fn text(self, source: &str) -> &str {
        source
            .get(self.start as usize..self.end as usize)
            .unwrap_or_default()
    }
}
