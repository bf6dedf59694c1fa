//! Lowering from [`Expr`] to automaton nodes.
//!
//! Continuation-passing: every expression is lowered knowing the node it continues
//! to (`exit`), and returns its own entry node. Sequences therefore lower right to
//! left, and a loop body's exit is the loop node itself.

use std::ops::Range;

use spanpat_automaton::{Automaton, Condition, LocalIndex, LoopNode, Mode, Node, NodeId};

use crate::ast::{Expr, GroupKind};
use crate::error::{CompileError, ErrorKind};

pub struct Lowering {
    automaton: Automaton,
    local_count: usize,
    /// Reported when registers run out; lowering has no finer position.
    source: Range<usize>,
}

impl Lowering {
    pub fn new(source: Range<usize>) -> Self {
        Self {
            automaton: Automaton::default(),
            local_count: 0,
            source,
        }
    }

    pub fn finish(self) -> (Automaton, usize) {
        (self.automaton, self.local_count)
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn push(&mut self, node: Node) -> NodeId {
        self.automaton.push(node)
    }

    fn alloc_local(&mut self) -> Result<LocalIndex, CompileError> {
        let Ok(index) = u16::try_from(self.local_count) else {
            return Err(CompileError::new(
                ErrorKind::TooManyRegisters,
                self.source.clone(),
            ));
        };
        self.local_count += 1;
        Ok(LocalIndex(index))
    }

    pub fn lower(&mut self, expr: Expr, exit: NodeId) -> Result<NodeId, CompileError> {
        let entry = match expr {
            Expr::Empty => exit,
            Expr::Seq(items) => {
                let mut next = exit;
                for item in items.into_iter().rev() {
                    next = self.lower(item, next)?;
                }
                next
            }
            Expr::Alt(arms) => {
                let arms = arms
                    .into_iter()
                    .map(|arm| self.lower(arm, exit))
                    .collect::<Result<_, _>>()?;
                self.push(Node::Branch { arms })
            }
            Expr::Match(matcher) => self.push(Node::TypeMatch {
                matcher,
                next: exit,
            }),
            Expr::EnumMatch {
                matcher,
                variant,
                variant_name,
            } => self.push(Node::EnumMatch {
                matcher,
                variant,
                variant_name,
                next: exit,
            }),
            Expr::Group { kind, body } => self.lower_group(kind, *body, exit)?,
            Expr::Pin { pinned, conditions } => {
                let conditions = conditions
                    .into_iter()
                    .map(|cond| {
                        Ok::<_, CompileError>(Condition {
                            entry: self.lower(cond.expr, NodeId::ACCEPT)?,
                            covered: cond.covered,
                        })
                    })
                    .collect::<Result<_, _>>()?;
                let inner = self.push(Node::InnerConditions {
                    conditions,
                    next: exit,
                });
                self.lower(*pinned, inner)?
            }
            Expr::Optional { body, mode } => {
                let body_exit = match mode {
                    Mode::Possessive => NodeId::ACCEPT,
                    Mode::Greedy | Mode::Lazy => exit,
                };
                let body = self.lower(*body, body_exit)?;
                self.push(Node::Optional {
                    mode,
                    body,
                    next: exit,
                })
            }
            Expr::Repeat {
                body,
                min,
                max,
                mode,
            } => {
                let looped = self.automaton.reserve();
                let count = self.alloc_local()?;
                let progress = self.alloc_local()?;
                let body = self.lower(*body, looped)?;
                self.automaton.fill(
                    looped,
                    Node::Loop(LoopNode {
                        mode,
                        body,
                        min,
                        max,
                        count,
                        progress,
                        next: exit,
                    }),
                );
                self.push(Node::LoopHead { looped })
            }
        };
        Ok(entry)
    }

    fn lower_group(
        &mut self,
        kind: GroupKind,
        body: Expr,
        exit: NodeId,
    ) -> Result<NodeId, CompileError> {
        let entry = match kind {
            GroupKind::Capture(group) => {
                let local = self.alloc_local()?;
                let load = self.push(Node::LoadBegin { local, next: exit });
                let tail = self.push(Node::GroupTail { group, next: load });
                let body = self.lower(body, tail)?;
                self.push(Node::SaveBegin { local, next: body })
            }
            GroupKind::Lookahead { negative } => {
                let condition = self.lower(body, NodeId::ACCEPT)?;
                if negative {
                    self.push(Node::NegativeLookahead {
                        condition,
                        next: exit,
                    })
                } else {
                    self.push(Node::PositiveLookahead {
                        condition,
                        next: exit,
                    })
                }
            }
            GroupKind::Atomic => {
                let body = self.lower(body, NodeId::ACCEPT)?;
                self.push(Node::Independent { body, next: exit })
            }
        };
        Ok(entry)
    }

    /// Scanning entry: type-indexed when every match starts with one label type.
    pub fn search_root(&mut self, root: NodeId) -> NodeId {
        match self.automaton.leading_type(root) {
            Some(type_id) => self.push(Node::TypeIndexed {
                type_id,
                next: root,
            }),
            None => self.push(Node::PositionStepping { next: root }),
        }
    }
}
