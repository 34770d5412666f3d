//! Source spans and positions.
//!
//! [`Span`] is the position currency for the whole crate: every token, AST
//! node, parse error, and diagnostic carries one. Spans are half-open byte
//! ranges (`start..end`) into the original source text.

/// A half-open byte range into source text.
///
/// Spans are plain values: 8 bytes, `Copy`, never heap-owned. Offsets are
/// `u32`, which bounds a single input at 4 GiB.
///
/// # Clamping Behavior
///
/// `len()` uses saturating subtraction, so an inverted span (`end < start`)
/// reports length `0` rather than wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: u32,
    /// End byte offset (exclusive).
    pub end: u32,
}

impl Span {
    /// An empty span at offset zero, used for synthesized tokens.
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    /// Creates a new span from start and end offsets.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Creates an empty span at a single offset.
    #[inline]
    pub const fn at(offset: u32) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Returns the length of this span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` when the span covers no bytes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Joins two spans into one covering both regions.
    ///
    /// Takes the earliest start and the latest end, so the result covers
    /// both inputs even when they are disjoint.
    #[inline]
    pub fn join(&self, other: &Self) -> Self {
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Returns `true` when `offset` falls inside this span.
    #[inline]
    pub const fn contains(&self, offset: u32) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Returns `true` when `other` lies entirely within this span.
    #[inline]
    pub const fn contains_span(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns `true` when the two spans share at least one byte.
    #[inline]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Slices the spanned region out of `source`.
    ///
    /// Returns `None` when the span is out of bounds or does not fall on
    /// UTF-8 character boundaries.
    #[inline]
    pub fn text<'src>(&self, source: &'src str) -> Option<&'src str> {
        source.get(self.start as usize..self.end as usize)
    }

    /// Computes the 1-based line/column of the span's start within `source`.
    ///
    /// Intended for human-facing renderers; columns count characters, not
    /// bytes.
    pub fn position(&self, source: &str) -> Position {
        let upto = source
            .get(..self.start as usize)
            .unwrap_or(source);
        let line = upto.bytes().filter(|&b| b == b'\n').count() as u32 + 1;
        let column = match upto.rfind('\n') {
            Some(nl) => upto[nl + 1..].chars().count() as u32 + 1,
            None => upto.chars().count() as u32 + 1,
        };
        Position { line, column }
    }
}

impl core::fmt::Display for Span {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A 1-based line/column pair, derived from a [`Span`] on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_and_is_empty() {
        let span = Span::new(3, 7);
        assert_eq!(span.len(), 4);
        assert!(!span.is_empty());
        assert!(Span::at(5).is_empty());
    }

    #[test]
    fn test_inverted_span_saturates() {
        let span = Span::new(7, 3);
        assert_eq!(span.len(), 0);
        assert!(span.is_empty());
    }

    #[test]
    fn test_join() {
        let a = Span::new(2, 5);
        let b = Span::new(8, 12);
        assert_eq!(a.join(&b), Span::new(2, 12));
        assert_eq!(b.join(&a), Span::new(2, 12));
    }

    #[test]
    fn test_contains() {
        let span = Span::new(2, 5);
        assert!(span.contains(2));
        assert!(span.contains(4));
        assert!(!span.contains(5));
        assert!(!span.contains(1));
    }

    #[test]
    fn test_contains_span_and_overlaps() {
        let outer = Span::new(0, 10);
        let inner = Span::new(3, 7);
        assert!(outer.contains_span(&inner));
        assert!(!inner.contains_span(&outer));

        assert!(Span::new(0, 5).overlaps(&Span::new(4, 8)));
        assert!(!Span::new(0, 4).overlaps(&Span::new(4, 8)));
    }

    #[test]
    fn test_text_slicing() {
        let source = r#"{"a": 1}"#;
        assert_eq!(Span::new(1, 4).text(source), Some("\"a\""));
        assert_eq!(Span::new(0, 100).text(source), None);
    }

    #[test]
    fn test_position() {
        let source = "{\n  \"a\": 1\n}";
        let pos = Span::new(4, 7).position(source);
        assert_eq!(pos, Position { line: 2, column: 3 });
        assert_eq!(
            Span::at(0).position(source),
            Position { line: 1, column: 1 }
        );
    }
}
