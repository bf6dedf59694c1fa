use std::fmt;

use indexmap::IndexMap;

use crate::automaton::Automaton;
use crate::node::{GroupIndex, NodeId};

/// A compiled, immutable pattern. Shareable across threads.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    automaton: Automaton,
    root: NodeId,
    search_root: NodeId,
    group_count: usize,
    local_count: usize,
    group_names: IndexMap<String, GroupIndex>,
}

impl Pattern {
    pub fn new(
        source: impl Into<String>,
        automaton: Automaton,
        root: NodeId,
        search_root: NodeId,
        group_count: usize,
        local_count: usize,
        group_names: IndexMap<String, GroupIndex>,
    ) -> Self {
        Self {
            source: source.into(),
            automaton,
            root,
            search_root,
            group_count,
            local_count,
            group_names,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Entry used for anchored matching.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Entry used for scanning search: the root behind a stepping or type-indexed prefix.
    pub fn search_root(&self) -> NodeId {
        self.search_root
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn local_count(&self) -> usize {
        self.local_count
    }

    /// Named groups in declaration order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.group_names.keys().map(String::as_str)
    }

    pub fn group_index(&self, name: &str) -> Option<GroupIndex> {
        self.group_names.get(name).copied()
    }

    pub fn group_name(&self, group: GroupIndex) -> Option<&str> {
        self.group_names
            .iter()
            .find(|(_, g)| **g == group)
            .map(|(name, _)| name.as_str())
    }

    /// Whether scanning search skips to begins of the leading label type.
    pub fn is_type_indexed(&self) -> bool {
        matches!(
            self.automaton.get(self.search_root),
            crate::Node::TypeIndexed { .. }
        )
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
