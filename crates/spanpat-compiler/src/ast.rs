//! Resolved syntax tree: names are already mapped to ids.

use spanpat_automaton::{GroupIndex, LabelMatch, Mode};
use spanpat_core::VariantId;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Empty,
    Seq(Vec<Expr>),
    Alt(Vec<Expr>),
    Match(LabelMatch),
    EnumMatch {
        matcher: LabelMatch,
        variant: VariantId,
        variant_name: String,
    },
    Group {
        kind: GroupKind,
        body: Box<Expr>,
    },
    Pin {
        pinned: Box<Expr>,
        conditions: Vec<PinCondition>,
    },
    Optional {
        body: Box<Expr>,
        mode: Mode,
    },
    Repeat {
        body: Box<Expr>,
        min: u32,
        max: u32,
        mode: Mode,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupKind {
    Capture(GroupIndex),
    Lookahead { negative: bool },
    Atomic,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PinCondition {
    pub expr: Expr,
    pub covered: bool,
}

impl Expr {
    pub fn matcher_mut(&mut self) -> Option<&mut LabelMatch> {
        match self {
            Expr::Match(matcher) | Expr::EnumMatch { matcher, .. } => Some(matcher),
            _ => None,
        }
    }
}
