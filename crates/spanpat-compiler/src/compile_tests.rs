use crate::test_utils::{dump_of, registry};
use crate::{CompileOptions, ErrorKind, compile, compile_with};

#[test]
fn sequence_lowers_right_to_left() {
    insta::assert_snapshot!(dump_of(r#"Word{text="cat"} Word{text="dog"}"#), @r#"
    root 2  search 3  groups 0  locals 0
    0  Accept
    1  TypeMatch Word{text="dog"} -> 0
    2  TypeMatch Word{text="cat"} -> 1
    3  TypeIndexed T0 -> 2
    "#);
}

#[test]
fn quantified_named_group() {
    insta::assert_snapshot!(dump_of("(?<a>Word)+"), @r"
    root 6  search 7  groups 1  locals 3
      a = G0
    0  Accept
    1  Loop(Greedy) {1,10000} 5 L0 L1 -> 0
    2  LoadBegin L2 -> 1
    3  GroupTail G0 -> 2
    4  TypeMatch Word@G0 -> 3
    5  SaveBegin L2 -> 4
    6  LoopHead 1
    7  TypeIndexed T0 -> 6
    ");
}

#[test]
fn pin_and_enum_alternation() {
    insta::assert_snapshot!(dump_of("[?Word & !Phrase] | Pos=Noun"), @r"
    root 5  search 6  groups 0  locals 0
    0  Accept
    1  TypeMatch Phrase -> 0
    2  InnerConditions [!1] -> 0
    3  TypeMatch ?Word -> 2
    4  EnumMatch Pos=Noun -> 0
    5  Branch [3, 4]
    6  PositionStepping -> 5
    ");
}

#[test]
fn possessive_optional_and_negative_lookahead() {
    insta::assert_snapshot!(dump_of("Word?+ (?!Phrase)"), @r"
    root 4  search 5  groups 0  locals 0
    0  Accept
    1  TypeMatch Phrase -> 0
    2  NegativeLookahead 1 -> 0
    3  TypeMatch Word -> 0
    4  Optional(Possessive) 3 -> 2
    5  PositionStepping -> 4
    ");
}

#[test]
fn atomic_group_with_backreferences() {
    insta::assert_snapshot!(dump_of("(?>w:Word{score=0.5}) Word{text=$w.text, span=$w}"), @r"
    root 3  search 4  groups 1  locals 0
      w = G0
    0  Accept
    1  TypeMatch Word{text=$G0.text, span=$G0} -> 0
    2  TypeMatch Word@G0{score=0.5} -> 0
    3  Independent 2 -> 1
    4  TypeIndexed T0 -> 3
    ");
}

#[test]
fn empty_pattern_is_accept() {
    insta::assert_snapshot!(dump_of(""), @r"
    root 0  search 1  groups 0  locals 0
    0  Accept
    1  PositionStepping -> 0
    ");
}

#[test]
fn leading_type_selection() {
    let registry = registry();
    let indexed = ["Word", "Word+ Phrase", "(?<a>Word) Phrase", "(?>Word|Word{flag=true})", "[Word & Phrase]"];
    for text in indexed {
        assert!(compile(text, &registry).unwrap().is_type_indexed(), "{text}");
    }
    let stepping = ["Word?", "Word*", "Word|Phrase", "(?=Word) Word", ""];
    for text in stepping {
        assert!(!compile(text, &registry).unwrap().is_type_indexed(), "{text}");
    }
}

#[test]
fn display_round_trips() {
    let registry = registry();
    let text = "(?<a>Word)  Word{text=$a.text}*?";
    let first = compile(text, &registry).unwrap();
    let second = compile(&first.to_string(), &registry).unwrap();

    assert_eq!(first.to_string(), text);
    assert_eq!(first.automaton(), second.automaton());
    assert_eq!(first.root(), second.root());
}

#[test]
fn compile_with_options() {
    let options = CompileOptions::new().loop_limit(3);
    let pattern = compile_with("Word*", &registry(), options).unwrap();
    let dump = spanpat_automaton::dump(&pattern, spanpat_core::Colors::OFF);
    assert!(dump.contains("Loop(Greedy) {0,3}"), "{dump}");
}

#[test]
fn register_count_fits_local_index() {
    let text = "Word* ".repeat(32_769);
    let err = compile(&text, &registry()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TooManyRegisters);
    assert_eq!(err.range(), 0..text.len());
}
