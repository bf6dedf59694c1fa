#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Compiled form of a spanpat pattern.
//!
//! An [`Automaton`] is an arena of [`Node`]s addressed by [`NodeId`]. Loops are the
//! only cycles: a loop body's last node continues to the loop node, by index.
//! A [`Pattern`] bundles the arena with its roots and group metadata.

mod automaton;
mod dump;
mod node;
mod pattern;

#[cfg(test)]
mod dump_tests;

pub use automaton::Automaton;
pub use dump::dump;
pub use node::{
    Condition, Expected, GroupIndex, LabelMatch, LocalIndex, LoopNode, Mode, Node, NodeId,
    PropertyCheck,
};
pub use pattern::Pattern;
