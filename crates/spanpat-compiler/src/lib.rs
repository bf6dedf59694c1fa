#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Compiler for the spanpat pattern language.
//!
//! Pipeline: [`lexer`] → [`parser`] (resolves names through a
//! [`TypeResolver`](spanpat_core::TypeResolver)) → [`lower`] (continuation-passing
//! lowering into an [`Automaton`](spanpat_automaton::Automaton)).

pub mod ast;
pub mod error;
pub mod lexer;
pub mod lower;
pub mod options;
pub mod parser;

#[cfg(test)]
mod compile_tests;
#[cfg(test)]
mod test_utils;

pub use error::{CompileError, ErrorKind, ErrorPrinter};
pub use options::{CompileOptions, DEFAULT_LOOP_LIMIT, DEFAULT_RECURSION_LIMIT};

use spanpat_automaton::{NodeId, Pattern};
use spanpat_core::TypeResolver;

/// Compile `text` with default options.
pub fn compile(text: &str, resolver: &dyn TypeResolver) -> Result<Pattern, CompileError> {
    compile_with(text, resolver, CompileOptions::default())
}

pub fn compile_with(
    text: &str,
    resolver: &dyn TypeResolver,
    options: CompileOptions,
) -> Result<Pattern, CompileError> {
    let parsed = parser::parse(text, resolver, options)?;

    let mut lowering = lower::Lowering::new(0..text.len());
    let root = lowering.lower(parsed.expr, NodeId::ACCEPT)?;
    let search_root = lowering.search_root(root);
    let (automaton, local_count) = lowering.finish();

    Ok(Pattern::new(
        text,
        automaton,
        root,
        search_root,
        parsed.group_count,
        local_count,
        parsed.group_names,
    ))
}
