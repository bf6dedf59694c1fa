//! Execution tracing.
//!
//! The engine reports to a [`Tracer`] at fixed points. [`NoopTracer`] compiles
//! away; [`PrintTracer`] collects readable lines for debugging and tests.

use spanpat_automaton::{LabelMatch, Node, NodeId};
use spanpat_core::{Colors, Label, Span};

use crate::state::State;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Label candidates and the outcome.
    #[default]
    Default,
    /// Adds one line per visited node.
    Verbose,
    /// Adds capture rollbacks and the cursor state on every node line.
    VeryVerbose,
}

/// Instrumentation hooks called by the engine.
///
/// - `trace_node`: before evaluating a node
/// - `trace_label`: after a candidate label was accepted or rejected by its constraints
/// - `trace_rollback`: after capture writes were undone
/// - `trace_result`: once per session call
pub trait Tracer {
    fn trace_node(&mut self, id: NodeId, node: &Node, state: &State);

    fn trace_label(&mut self, matcher: &LabelMatch, label: &Label<'_>, accepted: bool);

    /// `undone` is the number of capture writes reverted.
    fn trace_rollback(&mut self, undone: usize);

    fn trace_result(&mut self, result: Option<Span>);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_node(&mut self, _id: NodeId, _node: &Node, _state: &State) {}

    #[inline(always)]
    fn trace_label(&mut self, _matcher: &LabelMatch, _label: &Label<'_>, _accepted: bool) {}

    #[inline(always)]
    fn trace_rollback(&mut self, _undone: usize) {}

    #[inline(always)]
    fn trace_result(&mut self, _result: Option<Span>) {}
}

/// Tracer that collects one line per event.
#[derive(Debug, Default)]
pub struct PrintTracer {
    /// Verbosity level for output filtering.
    verbosity: Verbosity,
    /// Color palette.
    colors: Colors,
    /// Collected trace lines.
    lines: Vec<String>,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            colors,
            lines: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }

    fn format_state(&self, state: &State) -> String {
        let start = match state.start {
            Some(start) => start.to_string(),
            None => "-".to_string(),
        };
        format!(
            "start {} at {} limit {}",
            start,
            self.colors.paint(self.colors.value, &state.last().to_string()),
            state.limit
        )
    }
}

impl Tracer for PrintTracer {
    fn trace_node(&mut self, id: NodeId, node: &Node, state: &State) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        let kind = self.colors.paint(self.colors.kind, node.kind_name());
        let line = if self.verbosity == Verbosity::VeryVerbose {
            format!("{:>4} {} {}", id.0, kind, self.format_state(state))
        } else {
            format!("{:>4} {}", id.0, kind)
        };
        self.lines.push(line);
    }

    fn trace_label(&mut self, matcher: &LabelMatch, label: &Label<'_>, accepted: bool) {
        let span = self.colors.paint(self.colors.value, &label.span.to_string());
        let line = if accepted {
            format!("     + {} {}", matcher.type_name, span)
        } else {
            let name = self.colors.paint(self.colors.miss, &matcher.type_name);
            format!("     - {} {}", name, span)
        };
        self.lines.push(line);
    }

    fn trace_rollback(&mut self, undone: usize) {
        if self.verbosity != Verbosity::VeryVerbose {
            return;
        }
        let text = self.colors.paint(self.colors.dim, &format!("rollback {undone}"));
        self.lines.push(format!("     {text}"));
    }

    fn trace_result(&mut self, result: Option<Span>) {
        let line = match result {
            Some(span) => format!("hit {}", self.colors.paint(self.colors.value, &span.to_string())),
            None => self.colors.paint(self.colors.miss, "miss"),
        };
        self.lines.push(line);
    }
}
