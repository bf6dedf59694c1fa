//! Node variants of the automaton.

use std::fmt;

use spanpat_core::{LabelTypeId, PropertyId, VariantId};

/// Index of a node in its [`Automaton`](crate::Automaton).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Node 0 of every automaton.
    pub const ACCEPT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Capture group number. Group `g` owns capture slots `2g` and `2g + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupIndex(pub u16);

impl GroupIndex {
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    pub fn begin_slot(self) -> usize {
        2 * self.index()
    }

    pub fn end_slot(self) -> usize {
        2 * self.index() + 1
    }
}

/// Local register: loop counters, loop progress marks and saved scope begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalIndex(pub u16);

impl LocalIndex {
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

/// Backtracking order of a quantifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Greedy,
    Lazy,
    Possessive,
}

impl Mode {
    /// Suffix following the quantifier in pattern text.
    pub fn suffix(self) -> &'static str {
        match self {
            Mode::Greedy => "",
            Mode::Lazy => "?",
            Mode::Possessive => "+",
        }
    }
}

/// Right-hand side of a property constraint.
#[derive(Clone, Debug, PartialEq)]
pub enum Expected {
    Str(String),
    Number(f64),
    Bool(bool),
    /// The property is a span equal to the group's captured span.
    Span(GroupIndex),
    /// Equal to a property of the label bound by the group.
    Property {
        group: GroupIndex,
        property: PropertyId,
        name: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyCheck {
    pub property: PropertyId,
    pub name: String,
    pub expected: Expected,
}

/// Label selection shared by `TypeMatch` and `EnumMatch`.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelMatch {
    pub type_id: LabelTypeId,
    pub type_name: String,
    /// Try every candidate in the uncovered range instead of only the first.
    pub seek: bool,
    /// Group recording the label's span and value.
    pub bind: Option<GroupIndex>,
    pub checks: Vec<PropertyCheck>,
}

impl LabelMatch {
    pub fn new(type_id: LabelTypeId, type_name: impl Into<String>) -> Self {
        Self {
            type_id,
            type_name: type_name.into(),
            seek: false,
            bind: None,
            checks: Vec::new(),
        }
    }
}

/// Bounded repetition. `count` and `progress` are locals owned by this loop.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopNode {
    pub mode: Mode,
    pub body: NodeId,
    pub min: u32,
    pub max: u32,
    pub count: LocalIndex,
    pub progress: LocalIndex,
    pub next: NodeId,
}

/// One conjunct of a pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Condition {
    pub entry: NodeId,
    /// The condition's match must equal the pinned span.
    pub covered: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Accept,
    TypeMatch {
        matcher: LabelMatch,
        next: NodeId,
    },
    EnumMatch {
        matcher: LabelMatch,
        variant: VariantId,
        variant_name: String,
        next: NodeId,
    },
    Branch {
        arms: Vec<NodeId>,
    },
    Optional {
        mode: Mode,
        body: NodeId,
        next: NodeId,
    },
    /// Reached after every iteration of the body.
    Loop(LoopNode),
    /// Entry of a loop; `looped` is the `Loop` node.
    LoopHead {
        looped: NodeId,
    },
    PositiveLookahead {
        condition: NodeId,
        next: NodeId,
    },
    NegativeLookahead {
        condition: NodeId,
        next: NodeId,
    },
    Independent {
        body: NodeId,
        next: NodeId,
    },
    InnerConditions {
        conditions: Vec<Condition>,
        next: NodeId,
    },
    SaveBegin {
        local: LocalIndex,
        next: NodeId,
    },
    LoadBegin {
        local: LocalIndex,
        next: NodeId,
    },
    GroupTail {
        group: GroupIndex,
        next: NodeId,
    },
    PositionStepping {
        next: NodeId,
    },
    TypeIndexed {
        type_id: LabelTypeId,
        next: NodeId,
    },
}

impl Node {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Accept => "Accept",
            Node::TypeMatch { .. } => "TypeMatch",
            Node::EnumMatch { .. } => "EnumMatch",
            Node::Branch { .. } => "Branch",
            Node::Optional { .. } => "Optional",
            Node::Loop(_) => "Loop",
            Node::LoopHead { .. } => "LoopHead",
            Node::PositiveLookahead { .. } => "PositiveLookahead",
            Node::NegativeLookahead { .. } => "NegativeLookahead",
            Node::Independent { .. } => "Independent",
            Node::InnerConditions { .. } => "InnerConditions",
            Node::SaveBegin { .. } => "SaveBegin",
            Node::LoadBegin { .. } => "LoadBegin",
            Node::GroupTail { .. } => "GroupTail",
            Node::PositionStepping { .. } => "PositionStepping",
            Node::TypeIndexed { .. } => "TypeIndexed",
        }
    }
}
