//! Capture slots, bound labels and local registers, with an undo trail.

use spanpat_automaton::{GroupIndex, LocalIndex};
use spanpat_core::{Label, Span};

#[derive(Clone, Copy, Debug)]
struct Undo<'d> {
    group: GroupIndex,
    begin: Option<usize>,
    end: Option<usize>,
    label: Option<Label<'d>>,
}

/// Per-session mutable search state.
///
/// Capture writes are journaled; [`Registers::rollback`] restores every write made
/// after a [`Registers::mark`]. Locals are saved and restored by their writers.
#[derive(Debug)]
pub struct Registers<'d> {
    slots: Vec<Option<usize>>,
    labels: Vec<Option<Label<'d>>>,
    locals: Vec<Option<usize>>,
    trail: Vec<Undo<'d>>,
}

impl<'d> Registers<'d> {
    pub fn new(group_count: usize, local_count: usize) -> Self {
        Self {
            slots: vec![None; 2 * group_count],
            labels: vec![None; group_count],
            locals: vec![None; local_count],
            trail: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.slots.fill(None);
        self.labels.fill(None);
        self.locals.fill(None);
        self.trail.clear();
    }

    #[inline]
    pub fn mark(&self) -> usize {
        self.trail.len()
    }

    /// Undoes capture writes made since `mark`. Returns how many were undone.
    pub fn rollback(&mut self, mark: usize) -> usize {
        let undone = self.trail.len().saturating_sub(mark);
        while self.trail.len() > mark {
            let Some(undo) = self.trail.pop() else { break };
            self.slots[undo.group.begin_slot()] = undo.begin;
            self.slots[undo.group.end_slot()] = undo.end;
            self.labels[undo.group.index()] = undo.label;
        }
        undone
    }

    fn journal(&mut self, group: GroupIndex) {
        self.trail.push(Undo {
            group,
            begin: self.slots[group.begin_slot()],
            end: self.slots[group.end_slot()],
            label: self.labels[group.index()],
        });
    }

    /// Records the group's span, keeping its bound label.
    pub fn capture(&mut self, group: GroupIndex, span: Span) {
        self.journal(group);
        self.slots[group.begin_slot()] = Some(span.begin);
        self.slots[group.end_slot()] = Some(span.end);
    }

    /// Records the label and its span for the group.
    pub fn bind(&mut self, group: GroupIndex, label: Label<'d>) {
        self.journal(group);
        self.slots[group.begin_slot()] = Some(label.span.begin);
        self.slots[group.end_slot()] = Some(label.span.end);
        self.labels[group.index()] = Some(label);
    }

    pub fn group_span(&self, group: GroupIndex) -> Option<Span> {
        let begin = (*self.slots.get(group.begin_slot())?)?;
        let end = (*self.slots.get(group.end_slot())?)?;
        Some(Span::new(begin, end))
    }

    pub fn label(&self, group: GroupIndex) -> Option<Label<'d>> {
        self.labels.get(group.index()).copied().flatten()
    }

    pub fn local(&self, local: LocalIndex) -> Option<usize> {
        self.locals[local.index()]
    }

    /// Writes a local and returns its previous value for the caller to restore.
    pub fn set_local(&mut self, local: LocalIndex, value: Option<usize>) -> Option<usize> {
        std::mem::replace(&mut self.locals[local.index()], value)
    }

    pub fn group_count(&self) -> usize {
        self.labels.len()
    }
}
