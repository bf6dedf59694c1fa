use spanpat_core::Span;

/// Cursor value threaded through the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct State {
    /// Begin of the first label consumed in the current capture scope.
    pub start: Option<usize>,
    /// Span of the most recently consumed label, or the cursor.
    pub begin: usize,
    pub end: usize,
    pub limit: usize,
}

/// `Some(state)` on a hit, `None` on a miss.
pub type Outcome = Option<State>;

impl State {
    pub fn new(at: usize, limit: usize) -> Self {
        Self {
            start: None,
            begin: at,
            end: at,
            limit,
        }
    }

    /// State after consuming a label at `span`.
    pub fn advance(self, span: Span) -> Self {
        Self {
            start: self.start.or(Some(span.begin)),
            begin: span.begin,
            end: span.end,
            limit: self.limit,
        }
    }

    /// Fresh scope confined to the last consumed span, for pin conditions.
    pub fn pin(self) -> Self {
        Self {
            start: None,
            begin: self.begin,
            end: self.begin,
            limit: self.end,
        }
    }

    /// The part of the range not yet passed over.
    pub fn uncovered(&self) -> Span {
        Span::new(self.end, self.limit)
    }

    /// Span consumed in the current scope; empty at the cursor when nothing was consumed.
    pub fn matched(&self) -> Span {
        Span::new(self.start.unwrap_or(self.end), self.end)
    }

    pub fn last(&self) -> Span {
        Span::new(self.begin, self.end)
    }
}
