use spanpat_core::Span;

use crate::State;

#[test]
fn advance_keeps_first_start() {
    let state = State::new(0, 20)
        .advance(Span::new(2, 5))
        .advance(Span::new(6, 9));

    assert_eq!(state.start, Some(2));
    assert_eq!(state.last(), Span::new(6, 9));
    assert_eq!(state.matched(), Span::new(2, 9));
    assert_eq!(state.uncovered(), Span::new(9, 20));
}

#[test]
fn nothing_consumed_matches_empty_at_cursor() {
    let state = State::new(7, 20);

    assert_eq!(state.matched(), Span::new(7, 7));
    assert_eq!(state.uncovered(), Span::new(7, 20));
}

#[test]
fn pin_confines_to_last_span() {
    let pinned = State::new(0, 20).advance(Span::new(4, 8)).pin();

    assert_eq!(pinned.start, None);
    assert_eq!(pinned.uncovered(), Span::new(4, 8));
    assert_eq!(pinned.limit, 8);
}
