use spanpat_automaton::{GroupIndex, LocalIndex};
use spanpat_core::{Label, Record, Span};

use crate::Registers;

#[test]
fn fresh_registers_are_unset() {
    let regs = Registers::new(2, 1);

    assert_eq!(regs.group_span(GroupIndex(0)), None);
    assert_eq!(regs.group_span(GroupIndex(5)), None);
    assert!(regs.label(GroupIndex(1)).is_none());
    assert_eq!(regs.local(LocalIndex(0)), None);
    assert_eq!(regs.group_count(), 2);
}

#[test]
fn rollback_restores_previous_captures() {
    let value = Record::new();
    let mut regs = Registers::new(2, 0);

    regs.capture(GroupIndex(0), Span::new(0, 3));
    let mark = regs.mark();
    regs.bind(GroupIndex(0), Label::new(0, Span::new(4, 7), &value));
    regs.capture(GroupIndex(1), Span::new(4, 7));

    assert_eq!(regs.group_span(GroupIndex(0)), Some(Span::new(4, 7)));
    assert_eq!(regs.rollback(mark), 2);
    assert_eq!(regs.group_span(GroupIndex(0)), Some(Span::new(0, 3)));
    assert!(regs.label(GroupIndex(0)).is_none());
    assert_eq!(regs.group_span(GroupIndex(1)), None);
    assert_eq!(regs.rollback(mark), 0);
}

#[test]
fn capture_keeps_bound_label() {
    let value = Record::new();
    let mut regs = Registers::new(1, 0);

    regs.bind(GroupIndex(0), Label::new(3, Span::new(2, 4), &value));
    regs.capture(GroupIndex(0), Span::new(0, 4));

    assert_eq!(regs.group_span(GroupIndex(0)), Some(Span::new(0, 4)));
    assert_eq!(regs.label(GroupIndex(0)).map(|l| l.type_id), Some(3));
}

#[test]
fn set_local_returns_previous_value() {
    let mut regs = Registers::new(0, 2);

    assert_eq!(regs.set_local(LocalIndex(1), Some(4)), None);
    assert_eq!(regs.set_local(LocalIndex(1), Some(9)), Some(4));
    assert_eq!(regs.local(LocalIndex(1)), Some(9));

    regs.reset();
    assert_eq!(regs.local(LocalIndex(1)), None);
}
