use spanpat_automaton::Pattern;
use spanpat_compiler::compile;
use spanpat_core::{MemoryStore, Record, Span, TypeDef, TypeRegistry};

pub const WORD: u16 = 0;
pub const PHRASE: u16 = 1;
pub const POS: u16 = 2;

pub const TEXT: u16 = 0;
pub const SCORE: u16 = 1;
pub const SPAN: u16 = 3;

pub const NOUN: u16 = 0;
pub const VERB: u16 = 1;

pub fn registry() -> TypeRegistry {
    TypeRegistry::new()
        .with(
            TypeDef::new("Word")
                .property("text")
                .property("score")
                .property("flag")
                .property("span"),
        )
        .and_then(|r| r.with(TypeDef::new("Phrase").property("text").property("head")))
        .and_then(|r| r.with(TypeDef::new("Pos").variant("Noun").variant("Verb")))
        .unwrap()
}

pub fn pattern(text: &str) -> Pattern {
    compile(text, &registry()).unwrap_or_else(|e| panic!("{e}"))
}

/// Word `i` occupies `4i..4i+3`.
pub fn word_span(i: usize) -> Span {
    Span::new(4 * i, 4 * i + 3)
}

pub fn words(texts: &[&str]) -> MemoryStore {
    let mut store = MemoryStore::with_len(4 * texts.len());
    for (i, text) in texts.iter().enumerate() {
        store.add(WORD, word_span(i), Record::new().with(TEXT, *text));
    }
    store
}
