//! Byte ranges into the source text.
//!
//! The lexer tags every line with the `Span` it occupies, and the block
//! scanner merges them to report where multi-line constructs sit. The
//! document itself carries the span of the whole input.

/// A half-open byte range `[start, end)` in the source text.
///
/// # Example
///
/// ```rust
/// use rivit_core::span::Span;
///
/// let span = Span::new(4, 10);
/// assert_eq!(span.len(), 6);
/// assert_eq!(span.merge(Span::new(0, 2)), Span::new(0, 10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Starting byte offset (inclusive).
    pub start: usize,
    /// Ending byte offset (exclusive).
    pub end: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of this span in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_covers_both() {
        let merged = Span::new(3, 5).merge(Span::new(10, 12));
        assert_eq!(merged, Span::new(3, 12));
        assert_eq!(merged.len(), 9);
    }

    #[test]
    fn inverted_span_is_empty() {
        let span = Span::new(8, 2);
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
    }
}
