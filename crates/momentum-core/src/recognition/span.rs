//! Source spans for text candidates.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Contiguous byte range in the recognized text.
///
/// Offsets always fall on UTF-8 char boundaries and `start < end`, so
/// `&text[span.range()]` is the matched substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span of a regex match.
    pub(crate) fn of(m: regex::Match<'_>) -> Self {
        Self::new(m.start(), m.end())
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// True when the span is non-empty and addresses a valid slice of `text`.
    pub fn is_valid_for(&self, text: &str) -> bool {
        !self.is_empty() && text.get(self.range()).is_some()
    }

    /// The matched substring, or `None` if the span does not belong to `text`.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        if self.is_empty() {
            return None;
        }
        text.get(self.range())
    }

    /// Convert to character indices, for callers that address text by chars.
    pub fn char_range(&self, text: &str) -> Option<Range<usize>> {
        if !self.is_valid_for(text) {
            return None;
        }
        let start = text[..self.start].chars().count();
        let len = text[self.range()].chars().count();
        Some(start..start + len)
    }

    /// True if the two spans share at least one byte.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_returns_matched_text() {
        let text = "call mom tomorrow";
        let span = Span::new(9, 17);
        assert_eq!(span.slice(text), Some("tomorrow"));
        assert_eq!(span.len(), 8);
    }

    #[test]
    fn invalid_spans_are_rejected() {
        let text = "café";
        // 'é' is two bytes, 4..5 splits it
        assert!(!Span::new(4, 5).is_valid_for(text));
        assert!(!Span::new(2, 2).is_valid_for(text));
        assert!(!Span::new(0, 99).is_valid_for(text));
        assert_eq!(Span::new(3, 5).slice(text), Some("é"));
    }

    #[test]
    fn char_range_counts_characters() {
        let text = "résumé 3/20";
        let start = text.find("3/20").unwrap();
        let span = Span::new(start, start + 4);
        assert_eq!(span.char_range(text), Some(7..11));
    }

    #[test]
    fn overlap_detection() {
        let a = Span::new(0, 5);
        assert!(a.overlaps(&Span::new(4, 8)));
        assert!(!a.overlaps(&Span::new(5, 8)));
    }
}
