use indoc::indoc;

use crate::{MemoryStore, Pattern, Record, Session, Span, TypeRegistry, compile};

pub const TOKEN: u16 = 0;
pub const POS: u16 = 1;
pub const PHRASE: u16 = 2;

pub const TEXT: u16 = 0;
pub const SCORE: u16 = 1;

pub const NOUN: u16 = 0;
pub const VERB: u16 = 1;
pub const DET: u16 = 2;

pub const SCHEMA: &str = indoc! {r#"
    [
        { "name": "Token", "aliases": ["nlp.Token"], "properties": ["text", "score"] },
        { "name": "Pos", "variants": ["Noun", "Verb", "Det"] },
        { "name": "Phrase", "properties": ["head"] }
    ]
"#};

pub fn registry() -> TypeRegistry {
    TypeRegistry::from_json(SCHEMA).unwrap()
}

pub fn pattern(text: &str) -> Pattern {
    compile(text, &registry()).unwrap_or_else(|e| panic!("{e}"))
}

/// Tokens separated by single spaces, as in the text `words.join(" ")`.
pub fn tokens(words: &[&str]) -> MemoryStore {
    let mut store = MemoryStore::new(Span::new(0, 0));
    let mut at = 0;
    for word in words {
        let span = Span::new(at, at + word.len());
        store.add(TOKEN, span, Record::new().with(TEXT, *word));
        at = span.end + 1;
    }
    store
}

/// "the cat saw the dog" with part-of-speech tags and two noun phrases.
pub fn sentence() -> MemoryStore {
    let mut store = tokens(&["the", "cat", "saw", "the", "dog"]);
    let tags = [DET, NOUN, VERB, DET, NOUN];
    let spans = [(0, 3), (4, 7), (8, 11), (12, 15), (16, 19)];
    for (tag, (begin, end)) in tags.into_iter().zip(spans) {
        store.add(POS, Span::new(begin, end), Record::new().with_variant(tag));
    }
    store
        .add(PHRASE, Span::new(0, 7), Record::new().with(0, Span::new(4, 7)))
        .add(PHRASE, Span::new(12, 19), Record::new().with(0, Span::new(16, 19)));
    store
}

pub fn all_matches(pattern: &Pattern, store: &MemoryStore) -> Vec<Span> {
    let mut session = Session::new(pattern, store);
    let mut spans = Vec::new();
    while session.search() {
        spans.extend(session.span());
    }
    spans
}
