use spanpat_automaton::dump;
use spanpat_core::{Colors, TypeDef, TypeRegistry};

use crate::{CompileError, compile};

/// `Word` (id 0), `Phrase` (id 1), `Pos` (id 2).
pub fn registry() -> TypeRegistry {
    TypeRegistry::new()
        .with(
            TypeDef::new("Word")
                .alias("org.example.Word")
                .property("text")
                .property("score")
                .property("flag")
                .property("span"),
        )
        .and_then(|r| r.with(TypeDef::new("Phrase").property("text").property("head")))
        .and_then(|r| r.with(TypeDef::new("Pos").variant("Noun").variant("Verb")))
        .unwrap()
}

pub fn dump_of(text: &str) -> String {
    let pattern = compile(text, &registry()).unwrap_or_else(|e| panic!("{e}"));
    dump(&pattern, Colors::OFF)
}

pub fn error_of(text: &str) -> CompileError {
    match compile(text, &registry()) {
        Ok(_) => panic!("expected `{text}` to fail"),
        Err(e) => e,
    }
}
