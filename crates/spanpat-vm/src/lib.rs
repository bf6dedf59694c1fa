#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Execution of compiled spanpat patterns against a label store.
//!
//! [`Session`] is the entry point: it owns the per-search [`Registers`] and drives
//! the recursive backtracking engine over a document range.

mod engine;
mod registers;
mod session;
mod state;
pub mod trace;

#[cfg(test)]
mod registers_tests;
#[cfg(test)]
mod session_tests;
#[cfg(test)]
mod state_tests;
#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod trace_tests;

pub use registers::Registers;
pub use session::Session;
pub use state::{Outcome, State};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
