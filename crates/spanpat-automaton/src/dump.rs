//! Human-readable listing of a compiled pattern.

use std::fmt::Write as _;

use spanpat_core::Colors;

use crate::node::{Expected, LabelMatch, Node, NodeId};
use crate::pattern::Pattern;

pub fn dump(pattern: &Pattern, colors: Colors) -> String {
    let mut out = String::new();
    let c = colors;

    writeln!(
        out,
        "{}root{} {}  {}search{} {}  {}groups{} {}  {}locals{} {}",
        c.dim,
        c.reset,
        pattern.root(),
        c.dim,
        c.reset,
        pattern.search_root(),
        c.dim,
        c.reset,
        pattern.group_count(),
        c.dim,
        c.reset,
        pattern.local_count(),
    )
    .unwrap();
    for name in pattern.group_names() {
        if let Some(group) = pattern.group_index(name) {
            writeln!(out, "  {}{name}{} = G{}", c.value, c.reset, group.0).unwrap();
        }
    }

    let automaton = pattern.automaton();
    let width = width_for_count(automaton.len());
    for (id, node) in automaton.iter() {
        writeln!(out, "{:>width$}  {}", id.0, node_line(node, c)).unwrap();
    }
    out
}

fn width_for_count(count: usize) -> usize {
    count.saturating_sub(1).max(1).to_string().len()
}

fn node_line(node: &Node, c: Colors) -> String {
    let kind = c.paint(c.kind, node.kind_name());
    let arrow = |next: &NodeId| format!("{}->{} {next}", c.dim, c.reset);

    match node {
        Node::Accept => kind,
        Node::TypeMatch { matcher, next } => {
            format!("{kind} {} {}", format_matcher(matcher, None), arrow(next))
        }
        Node::EnumMatch {
            matcher,
            variant_name,
            next,
            ..
        } => format!(
            "{kind} {} {}",
            format_matcher(matcher, Some(variant_name)),
            arrow(next)
        ),
        Node::Branch { arms } => format!("{kind} [{}]", join(arms.iter().map(|a| a.to_string()))),
        Node::Optional { mode, body, next } => {
            format!("{kind}({mode:?}) {body} {}", arrow(next))
        }
        Node::Loop(l) => format!(
            "{kind}({:?}) {{{},{}}} {} L{} L{} {}",
            l.mode,
            l.min,
            l.max,
            l.body,
            l.count.0,
            l.progress.0,
            arrow(&l.next)
        ),
        Node::LoopHead { looped } => format!("{kind} {looped}"),
        Node::PositiveLookahead { condition, next }
        | Node::NegativeLookahead { condition, next } => {
            format!("{kind} {condition} {}", arrow(next))
        }
        Node::Independent { body, next } => format!("{kind} {body} {}", arrow(next)),
        Node::InnerConditions { conditions, next } => {
            let conds = conditions
                .iter()
                .map(|cond| format!("{}{}", if cond.covered { "!" } else { "" }, cond.entry));
            format!("{kind} [{}] {}", join(conds), arrow(next))
        }
        Node::SaveBegin { local, next } | Node::LoadBegin { local, next } => {
            format!("{kind} L{} {}", local.0, arrow(next))
        }
        Node::GroupTail { group, next } => format!("{kind} G{} {}", group.0, arrow(next)),
        Node::PositionStepping { next } => format!("{kind} {}", arrow(next)),
        Node::TypeIndexed { type_id, next } => format!("{kind} T{type_id} {}", arrow(next)),
    }
}

fn format_matcher(matcher: &LabelMatch, variant: Option<&String>) -> String {
    let mut out = String::new();
    if matcher.seek {
        out.push('?');
    }
    out.push_str(&matcher.type_name);
    if let Some(variant) = variant {
        write!(out, "={variant}").unwrap();
    }
    if let Some(group) = matcher.bind {
        write!(out, "@G{}", group.0).unwrap();
    }
    if !matcher.checks.is_empty() {
        let checks = matcher.checks.iter().map(|check| {
            let value = match &check.expected {
                Expected::Str(s) => format!("{s:?}"),
                Expected::Number(n) => n.to_string(),
                Expected::Bool(b) => b.to_string(),
                Expected::Span(g) => format!("$G{}", g.0),
                Expected::Property { group, name, .. } => format!("$G{}.{name}", group.0),
            };
            format!("{}={value}", check.name)
        });
        write!(out, "{{{}}}", join(checks)).unwrap();
    }
    out
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}
