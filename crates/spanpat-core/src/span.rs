use std::fmt;
use std::ops::Range;

/// Half-open offset range `[begin, end)` over a document.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
}

impl Span {
    /// Panics if `end < begin`.
    pub fn new(begin: usize, end: usize) -> Self {
        assert!(begin <= end, "span end {end} precedes begin {begin}");
        Self { begin, end }
    }

    /// Zero-length span at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self {
            begin: offset,
            end: offset,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains(&self, other: Span) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }

    pub fn contains_offset(&self, offset: usize) -> bool {
        self.begin <= offset && offset < self.end
    }

    /// The part of `self` from `offset` on, or an empty span at `end` if `offset` is past it.
    pub fn tail_from(&self, offset: usize) -> Span {
        let begin = offset.clamp(self.begin, self.end);
        Span::new(begin, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.begin, self.end)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.begin..span.end
    }
}
