use indoc::indoc;
use spanpat_core::Colors;

use crate::test_utils::{pattern, words};
use crate::{PrintTracer, Session, Verbosity};

fn trace(text: &str, verbosity: Verbosity) -> String {
    let store = words(&["cat", "dog"]);
    let pattern = pattern(text);
    let mut session = Session::new(&pattern, &store);
    let mut tracer = PrintTracer::new(verbosity, Colors::OFF);
    session.search_traced(&mut tracer);
    tracer.lines().join("\n")
}

#[test]
fn default_shows_labels_and_outcome() {
    assert_eq!(
        trace(r#"Word{text="dog"}"#, Verbosity::Default),
        indoc! {"
                 - Word 0..3
                 + Word 4..7
            hit 4..7"}
    );
}

#[test]
fn verbose_adds_nodes() {
    assert_eq!(
        trace(r#"Word{text="dog"}"#, Verbosity::Verbose),
        indoc! {"
               2 TypeIndexed
               1 TypeMatch
                 - Word 0..3
               1 TypeMatch
                 + Word 4..7
               0 Accept
            hit 4..7"}
    );
}

#[test]
fn very_verbose_shows_rollbacks_and_state() {
    assert_eq!(
        trace(r#"(?<a>Word) Word{text="cat"}"#, Verbosity::VeryVerbose),
        indoc! {"
               6 TypeIndexed start - at 0..0 limit 8
               5 SaveBegin start - at 0..0 limit 8
               4 TypeMatch start - at 0..0 limit 8
                 + Word 0..3
               3 GroupTail start 0 at 0..3 limit 8
               2 LoadBegin start 0 at 0..3 limit 8
               1 TypeMatch start 0 at 0..3 limit 8
                 - Word 4..7
                 rollback 1
                 rollback 1
               5 SaveBegin start - at 4..4 limit 8
               4 TypeMatch start - at 4..4 limit 8
                 + Word 4..7
               3 GroupTail start 4 at 4..7 limit 8
               2 LoadBegin start 4 at 4..7 limit 8
               1 TypeMatch start 4 at 4..7 limit 8
                 rollback 1
                 rollback 1
            miss"}
    );
}

#[test]
fn miss_is_reported() {
    let store = words(&["cat"]);
    let pattern = pattern("Phrase");
    let mut session = Session::new(&pattern, &store);
    let mut tracer = PrintTracer::new(Verbosity::Default, Colors::OFF);

    assert!(!session.search_traced(&mut tracer));
    assert_eq!(tracer.into_lines(), vec!["miss".to_string()]);
}

#[test]
fn colors_wrap_values() {
    let store = words(&["cat"]);
    let pattern = pattern("Word");
    let mut session = Session::new(&pattern, &store);
    let mut tracer = PrintTracer::new(Verbosity::Default, Colors::ON);

    assert!(session.search_traced(&mut tracer));
    assert_eq!(tracer.lines().last().map(String::as_str), Some("hit \x1b[32m0..3\x1b[0m"));
}
