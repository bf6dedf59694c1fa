//! Search driver over a document range.

use spanpat_automaton::{GroupIndex, NodeId, Pattern};
use spanpat_core::{Label, LabelStore, Span};

use crate::engine::Engine;
use crate::registers::Registers;
use crate::state::State;
use crate::trace::{NoopTracer, Tracer};

/// One cursor over one range of a store, running one pattern.
///
/// Every call clears the registers first. Result accessors answer for the most
/// recent call and return `None` after a miss.
#[derive(Debug)]
pub struct Session<'p, 'd, S: LabelStore> {
    pattern: &'p Pattern,
    store: &'d S,
    range: Span,
    cursor: usize,
    registers: Registers<'d>,
    result: Option<Span>,
}

impl<'p, 'd, S: LabelStore> Session<'p, 'd, S> {
    /// Session over the store's whole document.
    pub fn new(pattern: &'p Pattern, store: &'d S) -> Self {
        Self::with_range(pattern, store, store.document_span())
    }

    pub fn with_range(pattern: &'p Pattern, store: &'d S, range: Span) -> Self {
        Self {
            pattern,
            store,
            range,
            cursor: range.begin,
            registers: Registers::new(pattern.group_count(), pattern.local_count()),
            result: None,
        }
    }

    pub fn pattern(&self) -> &'p Pattern {
        self.pattern
    }

    pub fn range(&self) -> Span {
        self.range
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Restricts the session to `range` and moves the cursor to its begin.
    pub fn set_range(&mut self, range: Span) {
        self.range = range;
        self.cursor = range.begin;
        self.result = None;
        self.registers.reset();
    }

    /// Finds the next match at or after the cursor.
    ///
    /// On a hit the cursor moves to the match end, or one past it for an empty
    /// match, so repeated calls return non-overlapping matches in order.
    pub fn search(&mut self) -> bool {
        self.search_traced(&mut NoopTracer)
    }

    pub fn search_in(&mut self, range: Span) -> bool {
        self.set_range(range);
        self.search()
    }

    pub fn search_traced<T: Tracer>(&mut self, tracer: &mut T) -> bool {
        let found = self.run(self.pattern.search_root(), tracer);
        if let Some(span) = self.result {
            self.cursor = if span.is_empty() { span.end + 1 } else { span.end };
        }
        found
    }

    /// Matches at the cursor without scanning forward. The cursor does not move.
    pub fn match_here(&mut self) -> bool {
        self.match_traced(&mut NoopTracer)
    }

    pub fn match_in(&mut self, range: Span) -> bool {
        self.set_range(range);
        self.match_here()
    }

    pub fn match_traced<T: Tracer>(&mut self, tracer: &mut T) -> bool {
        self.run(self.pattern.root(), tracer)
    }

    fn run<T: Tracer>(&mut self, entry: NodeId, tracer: &mut T) -> bool {
        self.registers.reset();
        self.result = None;

        if self.cursor <= self.range.end {
            let state = State::new(self.cursor, self.range.end);
            let outcome = Engine::new(
                self.pattern.automaton(),
                self.store,
                &mut self.registers,
                tracer,
            )
            .search(entry, state);
            match outcome {
                Some(state) => self.result = Some(state.matched()),
                None => self.registers.reset(),
            }
        }

        tracer.trace_result(self.result);
        self.result.is_some()
    }

    pub fn found(&self) -> bool {
        self.result.is_some()
    }

    /// The last match covered the whole range.
    pub fn is_full_match(&self) -> bool {
        self.result == Some(self.range)
    }

    pub fn span(&self) -> Option<Span> {
        self.result
    }

    pub fn span_of(&self, name: &str) -> Option<Span> {
        self.group_span(self.pattern.group_index(name)?.index())
    }

    pub fn label_of(&self, name: &str) -> Option<Label<'d>> {
        self.group_label(self.pattern.group_index(name)?.index())
    }

    /// Span captured by group `index`; groups are numbered by their opening token.
    pub fn group_span(&self, index: usize) -> Option<Span> {
        self.result?;
        self.registers.group_span(self.group(index)?)
    }

    pub fn group_label(&self, index: usize) -> Option<Label<'d>> {
        self.result?;
        self.registers.label(self.group(index)?)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &'p str> {
        self.pattern.group_names()
    }

    fn group(&self, index: usize) -> Option<GroupIndex> {
        (index < self.registers.group_count()).then(|| GroupIndex(index as u16))
    }
}
