use std::ops::Index;

use spanpat_core::LabelTypeId;

use crate::node::{Node, NodeId};

/// Arena of nodes. Node 0 is always [`Node::Accept`].
#[derive(Clone, Debug, PartialEq)]
pub struct Automaton {
    nodes: Vec<Node>,
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::Accept],
        }
    }

    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Allocates a slot to be filled later, for nodes that are their own successor's target.
    pub fn reserve(&mut self) -> NodeId {
        self.push(Node::Accept)
    }

    pub fn fill(&mut self, id: NodeId, node: Node) {
        let slot = self
            .nodes
            .get_mut(id.index())
            .unwrap_or_else(|| panic!("node {id} is not allocated"));
        *slot = node;
    }

    pub fn get(&self, id: NodeId) -> &Node {
        self.nodes
            .get(id.index())
            .unwrap_or_else(|| panic!("node {id} is out of range ({} nodes)", self.nodes.len()))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    /// Label type that every match starting at `id` consumes first, if fixed.
    ///
    /// `None` when the first consumed element may vary in type, may be absent,
    /// or depends on a lookahead.
    pub fn leading_type(&self, id: NodeId) -> Option<LabelTypeId> {
        match self.get(id) {
            Node::TypeMatch { matcher, .. } | Node::EnumMatch { matcher, .. } => {
                Some(matcher.type_id)
            }
            Node::SaveBegin { next, .. } | Node::LoadBegin { next, .. } => self.leading_type(*next),
            Node::Independent { body, .. } => self.leading_type(*body),
            Node::LoopHead { looped } => match self.get(*looped) {
                Node::Loop(l) if l.min >= 1 => self.leading_type(l.body),
                _ => None,
            },
            Node::Branch { arms } => {
                let (first, rest) = arms.split_first()?;
                let ty = self.leading_type(*first)?;
                rest.iter()
                    .all(|arm| self.leading_type(*arm) == Some(ty))
                    .then_some(ty)
            }
            Node::Accept
            | Node::Optional { .. }
            | Node::Loop(_)
            | Node::PositiveLookahead { .. }
            | Node::NegativeLookahead { .. }
            | Node::InnerConditions { .. }
            | Node::GroupTail { .. }
            | Node::PositionStepping { .. }
            | Node::TypeIndexed { .. } => None,
        }
    }
}

impl Index<NodeId> for Automaton {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.get(id)
    }
}
