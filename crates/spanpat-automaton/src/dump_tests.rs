use indexmap::IndexMap;
use spanpat_core::Colors;

use crate::{
    Automaton, Condition, Expected, GroupIndex, LabelMatch, Node, NodeId, Pattern, PropertyCheck,
    dump,
};

#[test]
fn dump_lists_nodes_and_groups() {
    let mut automaton = Automaton::new();
    let mut dog = LabelMatch::new(0, "Word");
    dog.checks.push(PropertyCheck {
        property: 0,
        name: "text".into(),
        expected: Expected::Str("dog".into()),
    });
    let second = automaton.push(Node::TypeMatch {
        matcher: dog,
        next: NodeId::ACCEPT,
    });
    let mut first = LabelMatch::new(0, "Word");
    first.bind = Some(GroupIndex(0));
    let root = automaton.push(Node::TypeMatch {
        matcher: first,
        next: second,
    });
    let search = automaton.push(Node::TypeIndexed {
        type_id: 0,
        next: root,
    });
    let mut names = IndexMap::new();
    names.insert("a".to_owned(), GroupIndex(0));
    let pattern = Pattern::new("a:Word Word{text=\"dog\"}", automaton, root, search, 1, 0, names);

    insta::assert_snapshot!(dump(&pattern, Colors::OFF), @r#"
    root 2  search 3  groups 1  locals 0
      a = G0
    0  Accept
    1  TypeMatch Word{text="dog"} -> 0
    2  TypeMatch Word@G0 -> 1
    3  TypeIndexed T0 -> 2
    "#);
}

#[test]
fn dump_pin_and_backreference() {
    let mut automaton = Automaton::new();
    let mut cond = LabelMatch::new(1, "Phrase");
    cond.seek = true;
    cond.checks.push(PropertyCheck {
        property: 2,
        name: "head".into(),
        expected: Expected::Property {
            group: GroupIndex(0),
            property: 0,
            name: "text".into(),
        },
    });
    let cond = automaton.push(Node::TypeMatch {
        matcher: cond,
        next: NodeId::ACCEPT,
    });
    let inner = automaton.push(Node::InnerConditions {
        conditions: vec![Condition {
            entry: cond,
            covered: true,
        }],
        next: NodeId::ACCEPT,
    });
    let root = automaton.push(Node::TypeMatch {
        matcher: LabelMatch::new(0, "Word"),
        next: inner,
    });
    let search = automaton.push(Node::PositionStepping { next: root });
    let pattern = Pattern::new("", automaton, root, search, 1, 0, IndexMap::new());

    insta::assert_snapshot!(dump(&pattern, Colors::OFF), @r#"
    root 3  search 4  groups 1  locals 0
    0  Accept
    1  TypeMatch ?Phrase{head=$G0.text} -> 0
    2  InnerConditions [!1] -> 0
    3  TypeMatch Word -> 2
    4  PositionStepping -> 3
    "#);
}

#[test]
fn dump_colors_node_kinds() {
    let pattern = Pattern::new("", Automaton::new(), NodeId::ACCEPT, NodeId::ACCEPT, 0, 0, IndexMap::new());
    let out = dump(&pattern, Colors::ON);
    assert!(out.contains("\x1b[34mAccept\x1b[0m"));
}
