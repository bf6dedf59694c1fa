//! Recursive backtracking evaluator.
//!
//! `search(node, state)` returns the state at which the whole continuation of
//! `node` reached `Accept`, or `None`. There is no explicit backtrack stack: a
//! choice point is a loop over alternatives, and backtracking is returning `None`.
//!
//! Register discipline:
//! - locals are written before a continuation runs and restored after it returns;
//! - capture writes are journaled, and every writer rolls back to its mark on a miss;
//! - lookaheads always roll back, atomic constructs roll back when their continuation misses.

use spanpat_automaton::{
    Automaton, Condition, Expected, LabelMatch, LoopNode, Mode, Node, NodeId, PropertyCheck,
};
use spanpat_core::{Label, LabelStore, LabelTypeId, PropertyValue, VariantId};

use crate::registers::Registers;
use crate::state::{Outcome, State};
use crate::trace::Tracer;

/// Headroom left on the current stack segment before `search` grows a new one.
const RED_ZONE: usize = 128 * 1024;
/// Size of each additional stack segment.
const STACK_SEGMENT: usize = 4 * 1024 * 1024;

pub(crate) struct Engine<'a, 'd, S: LabelStore, T: Tracer> {
    automaton: &'a Automaton,
    store: &'d S,
    regs: &'a mut Registers<'d>,
    tracer: &'a mut T,
}

impl<'a, 'd, S: LabelStore, T: Tracer> Engine<'a, 'd, S, T> {
    pub(crate) fn new(
        automaton: &'a Automaton,
        store: &'d S,
        regs: &'a mut Registers<'d>,
        tracer: &'a mut T,
    ) -> Self {
        Self {
            automaton,
            store,
            regs,
            tracer,
        }
    }

    /// Every loop iteration nests several calls, so long repetitions recurse
    /// deeply; the stack is extended on the heap as needed.
    pub(crate) fn search(&mut self, id: NodeId, state: State) -> Outcome {
        stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || self.dispatch(id, state))
    }

    #[inline(never)]
    fn dispatch(&mut self, id: NodeId, state: State) -> Outcome {
        let automaton = self.automaton;
        let node = &automaton[id];
        self.tracer.trace_node(id, node, &state);

        match node {
            Node::Accept => Some(state),
            Node::TypeMatch { matcher, next } => self.match_label(matcher, None, *next, state),
            Node::EnumMatch {
                matcher,
                variant,
                next,
                ..
            } => self.match_label(matcher, Some(*variant), *next, state),
            Node::Branch { arms } => arms.iter().find_map(|&arm| self.search(arm, state)),
            Node::Optional { mode, body, next } => self.optional(*mode, *body, *next, state),
            Node::LoopHead { looped: target } => {
                let Node::Loop(looped) = &automaton[*target] else {
                    panic!("loop head {id} points at node {target}, which is not a loop");
                };
                self.enter_loop(looped, state)
            }
            Node::Loop(looped) => match looped.mode {
                // Iteration boundary; the head drives possessive repetition.
                Mode::Possessive => Some(state),
                Mode::Greedy | Mode::Lazy => self.iterate(looped, state),
            },
            Node::PositiveLookahead { condition, next } => {
                self.lookahead(*condition, false, *next, state)
            }
            Node::NegativeLookahead { condition, next } => {
                self.lookahead(*condition, true, *next, state)
            }
            Node::Independent { body, next } => {
                let mark = self.regs.mark();
                let after = self.search(*body, state)?;
                self.commit(mark, *next, after)
            }
            Node::InnerConditions { conditions, next } => {
                self.inner_conditions(conditions, *next, state)
            }
            Node::SaveBegin { local, next } => {
                let saved = self.regs.set_local(*local, state.start);
                let outcome = self.search(
                    *next,
                    State {
                        start: None,
                        ..state
                    },
                );
                self.regs.set_local(*local, saved);
                outcome
            }
            Node::LoadBegin { local, next } => {
                let outer = self.regs.local(*local);
                self.search(
                    *next,
                    State {
                        start: outer.or(state.start),
                        ..state
                    },
                )
            }
            Node::GroupTail { group, next } => {
                let mark = self.regs.mark();
                self.regs.capture(*group, state.matched());
                self.commit(mark, *next, state)
            }
            Node::PositionStepping { next } => (state.end..state.limit)
                .find_map(|at| self.search(*next, State::new(at, state.limit))),
            Node::TypeIndexed { type_id, next } => self.type_indexed(*type_id, *next, state),
        }
    }

    #[inline(never)]
    fn type_indexed(&mut self, type_id: LabelTypeId, next: NodeId, state: State) -> Outcome {
        let store = self.store;
        let mut previous = None;
        for label in store.labels_within(type_id, state.uncovered()) {
            let at = label.begin();
            if at >= state.limit {
                break;
            }
            if previous == Some(at) {
                continue;
            }
            previous = Some(at);
            if let Some(hit) = self.search(next, State::new(at, state.limit)) {
                return Some(hit);
            }
        }
        None
    }

    /// Runs `next` from `state`, undoing capture writes since `mark` on a miss.
    fn commit(&mut self, mark: usize, next: NodeId, state: State) -> Outcome {
        let outcome = self.search(next, state);
        if outcome.is_none() {
            self.rollback(mark);
        }
        outcome
    }

    fn rollback(&mut self, mark: usize) {
        let undone = self.regs.rollback(mark);
        if undone > 0 {
            self.tracer.trace_rollback(undone);
        }
    }

    #[inline(never)]
    fn match_label(
        &mut self,
        matcher: &LabelMatch,
        variant: Option<VariantId>,
        next: NodeId,
        state: State,
    ) -> Outcome {
        let store = self.store;
        let range = state.uncovered();

        if !matcher.seek {
            let label = store.first_within(matcher.type_id, range)?;
            return self.try_label(matcher, variant, label, next, state);
        }

        for label in store.labels_within(matcher.type_id, range) {
            if let Some(hit) = self.try_label(matcher, variant, label, next, state) {
                return Some(hit);
            }
        }
        None
    }

    #[inline(never)]
    fn try_label(
        &mut self,
        matcher: &LabelMatch,
        variant: Option<VariantId>,
        label: Label<'d>,
        next: NodeId,
        state: State,
    ) -> Outcome {
        let accepted = self.accepts(matcher, variant, &label);
        self.tracer.trace_label(matcher, &label, accepted);
        if !accepted {
            return None;
        }

        let mark = self.regs.mark();
        if let Some(group) = matcher.bind {
            self.regs.bind(group, label);
        }
        self.commit(mark, next, state.advance(label.span))
    }

    fn accepts(&self, matcher: &LabelMatch, variant: Option<VariantId>, label: &Label<'_>) -> bool {
        if variant.is_some() && label.variant() != variant {
            return false;
        }
        matcher.checks.iter().all(|check| self.check(check, label))
    }

    /// An absent property, or a reference to a group that is not set, fails the check.
    fn check(&self, check: &PropertyCheck, label: &Label<'_>) -> bool {
        let Some(actual) = label.property(check.property) else {
            return false;
        };
        match &check.expected {
            Expected::Str(s) => actual.matches(&PropertyValue::Str(s)),
            Expected::Number(n) => actual.matches(&PropertyValue::Number(*n)),
            Expected::Bool(b) => actual.matches(&PropertyValue::Bool(*b)),
            Expected::Span(group) => self
                .regs
                .group_span(*group)
                .is_some_and(|span| actual.matches(&PropertyValue::Span(span))),
            Expected::Property {
                group, property, ..
            } => self
                .regs
                .label(*group)
                .and_then(|bound| bound.property(*property))
                .is_some_and(|other| actual.matches(&other)),
        }
    }

    #[inline(never)]
    fn optional(&mut self, mode: Mode, body: NodeId, next: NodeId, state: State) -> Outcome {
        match mode {
            Mode::Greedy => self
                .search(body, state)
                .or_else(|| self.search(next, state)),
            Mode::Lazy => self
                .search(next, state)
                .or_else(|| self.search(body, state)),
            Mode::Possessive => {
                // The body ends at Accept; once it matches, absence is never tried.
                let mark = self.regs.mark();
                match self.search(body, state) {
                    Some(after) => self.commit(mark, next, after),
                    None => self.search(next, state),
                }
            }
        }
    }

    #[inline(never)]
    fn lookahead(&mut self, condition: NodeId, negative: bool, next: NodeId, state: State) -> Outcome {
        let mark = self.regs.mark();
        let found = self.search(condition, state).is_some();
        self.rollback(mark);
        if found == negative {
            return None;
        }
        self.search(next, state)
    }

    #[inline(never)]
    fn inner_conditions(&mut self, conditions: &[Condition], next: NodeId, state: State) -> Outcome {
        let pinned = state.pin();
        let span = state.last();
        let mark = self.regs.mark();

        for condition in conditions {
            let holds = match self.search(condition.entry, pinned) {
                Some(after) => !condition.covered || after.matched() == span,
                None => false,
            };
            if !holds {
                self.rollback(mark);
                return None;
            }
        }
        self.commit(mark, next, state)
    }

    #[inline(never)]
    fn enter_loop(&mut self, looped: &LoopNode, state: State) -> Outcome {
        if looped.mode == Mode::Possessive {
            return self.possessive_loop(looped, state);
        }

        let saved_count = self.regs.set_local(looped.count, Some(0));
        let saved_progress = self.regs.set_local(looped.progress, Some(state.end));

        let outcome = self.choose(looped, looped.max > 0, looped.min == 0, state);

        self.regs.set_local(looped.count, saved_count);
        self.regs.set_local(looped.progress, saved_progress);
        outcome
    }

    /// Reached after each greedy or lazy iteration.
    #[inline(never)]
    fn iterate(&mut self, looped: &LoopNode, state: State) -> Outcome {
        let count = self.regs.local(looped.count).unwrap_or(0) + 1;
        // An iteration that consumed nothing satisfies the minimum.
        if self.regs.local(looped.progress) == Some(state.end) {
            return self.search(looped.next, state);
        }

        let saved_count = self.regs.set_local(looped.count, Some(count));
        let saved_progress = self.regs.set_local(looped.progress, Some(state.end));

        let again = count < looped.max as usize;
        let done = count >= looped.min as usize;
        let outcome = self.choose(looped, again, done, state);

        self.regs.set_local(looped.count, saved_count);
        self.regs.set_local(looped.progress, saved_progress);
        outcome
    }

    /// Another iteration and the continuation, in the loop's preferred order.
    fn choose(&mut self, looped: &LoopNode, again: bool, done: bool, state: State) -> Outcome {
        let (first, second) = match looped.mode {
            Mode::Lazy => ((done, looped.next), (again, looped.body)),
            Mode::Greedy | Mode::Possessive => ((again, looped.body), (done, looped.next)),
        };
        self.step(first, state).or_else(|| self.step(second, state))
    }

    fn step(&mut self, (enabled, node): (bool, NodeId), state: State) -> Outcome {
        if enabled { self.search(node, state) } else { None }
    }

    /// Iterates the body in isolation as often as it matches, then runs the
    /// continuation once. Iterations are never given back, and a body that
    /// would still match after `max` iterations fails the loop.
    #[inline(never)]
    fn possessive_loop(&mut self, looped: &LoopNode, state: State) -> Outcome {
        let mark = self.regs.mark();
        let mut current = state;
        let mut count = 0;
        let mut stalled = false;

        while count < looped.max {
            let Some(after) = self.search(looped.body, current) else {
                break;
            };
            count += 1;
            stalled = after.end == current.end;
            current = after;
            if stalled {
                break;
            }
        }

        if count < looped.min && !stalled {
            self.rollback(mark);
            return None;
        }
        if count == looped.max && !stalled && self.search(looped.body, current).is_some() {
            self.rollback(mark);
            return None;
        }
        self.commit(mark, looped.next, current)
    }
}
