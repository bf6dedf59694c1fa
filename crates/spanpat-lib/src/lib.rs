//! spanpat: regex-like patterns over typed, spanned annotations.
//!
//! # Example
//!
//! ```
//! use spanpat_lib::{MemoryStore, Record, Session, Span, TypeDef, TypeRegistry, compile};
//!
//! let registry = TypeRegistry::new().with(TypeDef::new("Word").property("text")).unwrap();
//! let pattern = compile(r#"Word{text="cat"} (?<next>Word)"#, &registry).unwrap();
//!
//! let mut store = MemoryStore::with_len(12);
//! store
//!     .add(0, Span::new(0, 3), Record::new().with(0, "cat"))
//!     .add(0, Span::new(4, 7), Record::new().with(0, "dog"));
//!
//! let mut session = Session::new(&pattern, &store);
//! assert!(session.search());
//! assert_eq!(session.span(), Some(Span::new(0, 7)));
//! assert_eq!(session.span_of("next"), Some(Span::new(4, 7)));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

#[cfg(test)]
mod end_to_end_tests;
#[cfg(test)]
mod test_utils;

pub use spanpat_automaton::{Automaton, Node, NodeId, Pattern, dump};
pub use spanpat_compiler::{
    CompileError, CompileOptions, DEFAULT_LOOP_LIMIT, DEFAULT_RECURSION_LIMIT, ErrorKind,
    ErrorPrinter, compile, compile_with,
};
pub use spanpat_core::{
    Colors, Label, LabelStore, LabelTypeId, LabelValue, MemoryStore, NUMBER_TOLERANCE, Property,
    PropertyId, PropertyValue, Record, RegistryError, Span, TypeDef, TypeRegistry, TypeResolver,
    VariantId,
};
pub use spanpat_vm::{NoopTracer, PrintTracer, Session, State, Tracer, Verbosity};

/// Errors of the setup path: loading a registry and compiling patterns against it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// Loads a [`TypeRegistry`] from JSON and compiles `patterns` against it, in order.
pub fn compile_all<'a>(
    registry_json: &str,
    patterns: impl IntoIterator<Item = &'a str>,
) -> Result<(TypeRegistry, Vec<Pattern>), Error> {
    let registry = TypeRegistry::from_json(registry_json)?;
    let patterns = patterns
        .into_iter()
        .map(|text| compile(text, &registry))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((registry, patterns))
}
