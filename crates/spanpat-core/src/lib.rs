#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared by the spanpat compiler and VM.
//!
//! Two collaborator surfaces are defined here:
//! - **Label index** ([`LabelStore`]): labels of one type, restricted to a range,
//!   ordered by `(begin, end)`.
//! - **Type resolution** ([`TypeResolver`]): maps pattern type names to label type
//!   ids and property/variant names to ids, once, at compile time.
//!
//! Reference implementations ([`MemoryStore`], [`TypeRegistry`]) are provided for
//! hosts without their own annotation store.

mod colors;
mod label;
mod registry;
mod span;
mod store;


pub use colors::Colors;
pub use label::{Label, LabelValue, NUMBER_TOLERANCE, Property, PropertyValue, Record};
pub use registry::{RegistryError, TypeDef, TypeRegistry, TypeResolver};
pub use span::Span;
pub use store::{LabelStore, MemoryStore, Within};

/// Label type id, assigned by the type resolver.
pub type LabelTypeId = u16;

/// Property id, unique within one label type.
pub type PropertyId = u16;

/// Enum variant id, unique within one label type.
pub type VariantId = u16;
