use spanpat_core::Span;

use crate::Session;
use crate::test_utils::{pattern, word_span, words};

#[test]
fn search_iterates_non_overlapping_matches() {
    let store = words(&["a", "b", "c", "d", "e"]);
    let pattern = pattern("Word Word");
    let mut session = Session::new(&pattern, &store);

    let mut spans = Vec::new();
    while session.search() {
        spans.extend(session.span());
    }

    assert_eq!(spans, vec![Span::new(0, 7), Span::new(8, 15)]);
    assert_eq!(session.span(), None);
}

#[test]
fn empty_matches_advance_past_themselves() {
    let store = words(&["a"]);
    let pattern = pattern("Word?");
    let mut session = Session::with_range(&pattern, &store, Span::new(0, 6));

    let mut spans = Vec::new();
    while session.search() {
        spans.extend(session.span());
    }

    assert_eq!(
        spans,
        vec![Span::new(0, 3), Span::new(3, 3), Span::new(4, 4), Span::new(5, 5)]
    );
}

#[test]
fn failed_call_exposes_nothing() {
    let store = words(&["a", "b"]);
    let pattern = pattern(r#"(?<x>Word) Word{text="z"}"#);
    let mut session = Session::new(&pattern, &store);

    assert!(!session.search());
    assert!(!session.found());
    assert_eq!(session.span(), None);
    assert_eq!(session.span_of("x"), None);
    assert!(session.label_of("x").is_none());
    assert_eq!(session.group_span(0), None);
}

#[test]
fn match_here_does_not_scan() {
    let store = words(&["a", "b"]);
    let pattern = pattern(r#"Word{text="b"}"#);
    let mut session = Session::new(&pattern, &store);

    assert!(!session.match_here());
    assert!(session.match_in(Span::new(4, 8)));
    assert_eq!(session.span(), Some(word_span(1)));
    assert_eq!(session.cursor(), 4);
}

#[test]
fn match_here_skips_to_first_label_after_cursor() {
    let store = words(&["a", "b"]);
    let pattern = pattern("Word");
    let mut session = Session::with_range(&pattern, &store, Span::new(1, 8));

    assert!(session.match_here());
    assert_eq!(session.span(), Some(word_span(1)));
}

#[test]
fn full_match_covers_the_range() {
    let store = words(&["a", "b", "c"]);
    let pattern = pattern("Word+");

    let mut session = Session::new(&pattern, &store);
    assert!(session.search());
    assert_eq!(session.span(), Some(Span::new(0, 11)));
    assert!(!session.is_full_match());

    assert!(session.match_in(Span::new(0, 11)));
    assert!(session.is_full_match());
}

#[test]
fn search_in_restricts_the_range() {
    let store = words(&["a", "b", "c"]);
    let pattern = pattern("Word");
    let mut session = Session::new(&pattern, &store);

    assert!(session.search_in(Span::new(3, 11)));
    assert_eq!(session.span(), Some(word_span(1)));
    assert!(session.search());
    assert_eq!(session.span(), Some(word_span(2)));
    assert!(!session.search());
    assert_eq!(session.range(), Span::new(3, 11));
}

#[test]
fn group_accessors() {
    let store = words(&["a", "b"]);
    let pattern = pattern("(?<first>Word) (Word) (?<last>Word)?");
    let mut session = Session::new(&pattern, &store);

    assert!(session.search());
    assert_eq!(session.group_names().collect::<Vec<_>>(), vec!["first", "last"]);
    assert_eq!(session.group_span(0), Some(word_span(0)));
    assert_eq!(session.group_span(1), Some(word_span(1)));
    assert_eq!(session.group_span(2), None);
    assert_eq!(session.group_span(7), None);
    assert_eq!(session.group_label(1).map(|l| l.span), Some(word_span(1)));
    assert_eq!(session.span_of("missing"), None);
}

#[test]
fn sessions_are_independent() {
    let store = words(&["a", "b"]);
    let pattern = pattern("(?<w>Word)");
    let mut first = Session::new(&pattern, &store);
    let mut second = Session::new(&pattern, &store);

    assert!(first.search());
    assert!(second.search());
    assert!(second.search());

    assert_eq!(first.span_of("w"), Some(word_span(0)));
    assert_eq!(second.span_of("w"), Some(word_span(1)));
}
