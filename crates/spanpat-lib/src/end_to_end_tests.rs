use crate::test_utils::{PHRASE, TOKEN, all_matches, pattern, tokens};
use crate::{MemoryStore, Record, Session, Span};

#[test]
fn consecutive_tokens_match_once() {
    let store = tokens(&["cat", "dog", "cat"]);
    let pattern = pattern(r#"Token{text="cat"} Token{text="dog"}"#);

    assert_eq!(all_matches(&pattern, &store), vec![Span::new(0, 7)]);
}

#[test]
fn repeated_capture_binds_last_iteration() {
    let store = tokens(&["a", "b", "c"]);
    let pattern = pattern("(?<a>Token)+");
    let mut session = Session::new(&pattern, &store);

    assert!(session.search());
    assert_eq!(session.span(), Some(Span::new(0, 5)));
    assert_eq!(session.span_of("a"), Some(Span::new(4, 5)));
    assert!(session.is_full_match());
}

#[test]
fn backreference_compares_properties() {
    let pattern = pattern("(?<a>Token) Token{text=$a.text}");

    assert!(all_matches(&pattern, &tokens(&["cat", "dog"])).is_empty());
    assert_eq!(all_matches(&pattern, &tokens(&["cat", "cat"])), vec![Span::new(0, 7)]);
}

#[test]
fn pin_requires_covering_condition() {
    let pattern = pattern("[?Token & !Phrase]");

    let mut store = tokens(&["big", "dog"]);
    store.add(PHRASE, Span::new(0, 7), ());
    assert!(all_matches(&pattern, &store).is_empty());

    store.add(PHRASE, Span::new(4, 7), ());
    assert_eq!(all_matches(&pattern, &store), vec![Span::new(4, 7)]);
}

#[test]
fn empty_range_never_matches_a_token() {
    let mut store = MemoryStore::with_len(10);
    store.add(TOKEN, Span::new(0, 3), Record::new());

    for text in ["Token", "Token+", "Token | Phrase", "[?Token]"] {
        let pattern = pattern(text);
        let mut session = Session::with_range(&pattern, &store, Span::new(10, 10));
        assert!(!session.search(), "{text}");
    }
}
