//! Label index interface and an in-memory implementation.

use std::collections::HashMap;

use crate::{Label, LabelTypeId, LabelValue, Span};

/// Query surface the VM runs against.
///
/// Implementations must be safe to share between concurrent searches.
pub trait LabelStore {
    type Labels<'a>: Iterator<Item = Label<'a>>
    where
        Self: 'a;

    /// Extent of the whole document.
    fn document_span(&self) -> Span;

    /// Labels of `type_id` with `range.begin <= begin` and `end <= range.end`,
    /// ordered by `(begin, end)` ascending.
    fn labels_within(&self, type_id: LabelTypeId, range: Span) -> Self::Labels<'_>;

    fn first_within(&self, type_id: LabelTypeId, range: Span) -> Option<Label<'_>> {
        self.labels_within(type_id, range).next()
    }
}

#[derive(Debug)]
struct Entry {
    span: Span,
    value: Box<dyn LabelValue>,
}

/// Per-type sorted label lists.
#[derive(Debug, Default)]
pub struct MemoryStore {
    span: Span,
    labels: HashMap<LabelTypeId, Vec<Entry>>,
}

impl MemoryStore {
    pub fn new(span: Span) -> Self {
        Self {
            span,
            labels: HashMap::new(),
        }
    }

    /// Document of `len` offsets starting at zero.
    pub fn with_len(len: usize) -> Self {
        Self::new(Span::new(0, len))
    }

    /// Adds a label, widening the document span if the label lies outside it.
    ///
    /// Labels with equal spans keep insertion order.
    pub fn add(
        &mut self,
        type_id: LabelTypeId,
        span: Span,
        value: impl LabelValue + 'static,
    ) -> &mut Self {
        self.span.begin = self.span.begin.min(span.begin);
        self.span.end = self.span.end.max(span.end);

        let list = self.labels.entry(type_id).or_default();
        let at = list.partition_point(|e| (e.span.begin, e.span.end) <= (span.begin, span.end));
        list.insert(
            at,
            Entry {
                span,
                value: Box::new(value),
            },
        );
        self
    }

    pub fn count(&self, type_id: LabelTypeId) -> usize {
        self.labels.get(&type_id).map_or(0, Vec::len)
    }

    pub fn len(&self) -> usize {
        self.labels.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LabelStore for MemoryStore {
    type Labels<'a> = Within<'a>;

    fn document_span(&self) -> Span {
        self.span
    }

    fn labels_within(&self, type_id: LabelTypeId, range: Span) -> Within<'_> {
        let entries = self.labels.get(&type_id).map_or(&[][..], Vec::as_slice);
        let start = entries.partition_point(|e| e.span.begin < range.begin);
        Within {
            type_id,
            range,
            entries: entries[start..].iter(),
        }
    }
}

/// Iterator returned by [`MemoryStore::labels_within`].
#[derive(Debug)]
pub struct Within<'a> {
    type_id: LabelTypeId,
    range: Span,
    entries: std::slice::Iter<'a, Entry>,
}

impl<'a> Iterator for Within<'a> {
    type Item = Label<'a>;

    fn next(&mut self) -> Option<Label<'a>> {
        loop {
            let entry = self.entries.next()?;
            if entry.span.begin > self.range.end {
                return None;
            }
            if entry.span.end <= self.range.end {
                return Some(Label::new(self.type_id, entry.span, entry.value.as_ref()));
            }
        }
    }
}
