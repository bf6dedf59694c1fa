//! Labels and their property values.

use std::fmt;

use crate::{LabelTypeId, PropertyId, Span, VariantId};

/// Two numbers closer than this compare equal in property constraints.
pub const NUMBER_TOLERANCE: f64 = 1e-10;

/// Host-side payload of a label.
///
/// Property ids are those handed out by the type resolver for the label's type.
pub trait LabelValue: fmt::Debug + Send + Sync {
    fn property(&self, id: PropertyId) -> Option<PropertyValue<'_>>;

    /// Variant of an enum-typed label.
    fn variant(&self) -> Option<VariantId> {
        None
    }
}

impl LabelValue for () {
    fn property(&self, _id: PropertyId) -> Option<PropertyValue<'_>> {
        None
    }
}

/// Borrowed view of a property value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyValue<'a> {
    Str(&'a str),
    Number(f64),
    Bool(bool),
    Span(Span),
}

impl PropertyValue<'_> {
    /// Equality used by property constraints.
    ///
    /// Numbers compare with [`NUMBER_TOLERANCE`]; values of different kinds never match.
    pub fn matches(&self, other: &PropertyValue<'_>) -> bool {
        match (self, other) {
            (PropertyValue::Str(a), PropertyValue::Str(b)) => a == b,
            (PropertyValue::Number(a), PropertyValue::Number(b)) => (a - b).abs() < NUMBER_TOLERANCE,
            (PropertyValue::Bool(a), PropertyValue::Bool(b)) => a == b,
            (PropertyValue::Span(a), PropertyValue::Span(b)) => a == b,
            _ => false,
        }
    }

    pub fn to_owned_property(&self) -> Property {
        match *self {
            PropertyValue::Str(s) => Property::Str(s.to_owned()),
            PropertyValue::Number(n) => Property::Number(n),
            PropertyValue::Bool(b) => Property::Bool(b),
            PropertyValue::Span(s) => Property::Span(s),
        }
    }
}

impl fmt::Display for PropertyValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Str(s) => write!(f, "{s:?}"),
            PropertyValue::Number(n) => write!(f, "{n}"),
            PropertyValue::Bool(b) => write!(f, "{b}"),
            PropertyValue::Span(s) => write!(f, "{s}"),
        }
    }
}

/// A typed, spanned annotation over the document.
#[derive(Clone, Copy, Debug)]
pub struct Label<'a> {
    pub type_id: LabelTypeId,
    pub span: Span,
    pub value: &'a dyn LabelValue,
}

impl<'a> Label<'a> {
    pub fn new(type_id: LabelTypeId, span: Span, value: &'a dyn LabelValue) -> Self {
        Self {
            type_id,
            span,
            value,
        }
    }

    pub fn begin(&self) -> usize {
        self.span.begin
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    pub fn property(&self, id: PropertyId) -> Option<PropertyValue<'a>> {
        self.value.property(id)
    }

    pub fn variant(&self) -> Option<VariantId> {
        self.value.variant()
    }
}

/// Owned property value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Property {
    Bool(bool),
    Number(f64),
    Str(String),
    Span(Span),
}

impl Property {
    pub fn as_value(&self) -> PropertyValue<'_> {
        match self {
            Property::Str(s) => PropertyValue::Str(s),
            Property::Number(n) => PropertyValue::Number(*n),
            Property::Bool(b) => PropertyValue::Bool(*b),
            Property::Span(s) => PropertyValue::Span(*s),
        }
    }
}

impl From<&str> for Property {
    fn from(value: &str) -> Self {
        Property::Str(value.to_owned())
    }
}

impl From<String> for Property {
    fn from(value: String) -> Self {
        Property::Str(value)
    }
}

impl From<f64> for Property {
    fn from(value: f64) -> Self {
        Property::Number(value)
    }
}

impl From<i32> for Property {
    fn from(value: i32) -> Self {
        Property::Number(f64::from(value))
    }
}

impl From<bool> for Property {
    fn from(value: bool) -> Self {
        Property::Bool(value)
    }
}

impl From<Span> for Property {
    fn from(value: Span) -> Self {
        Property::Span(value)
    }
}

/// Map-backed [`LabelValue`] for hosts without their own label payloads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    properties: Vec<(PropertyId, Property)>,
    variant: Option<VariantId>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets property `id`, replacing any previous value.
    pub fn with(mut self, id: PropertyId, value: impl Into<Property>) -> Self {
        self.set(id, value);
        self
    }

    pub fn with_variant(mut self, variant: VariantId) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn set(&mut self, id: PropertyId, value: impl Into<Property>) {
        let value = value.into();
        match self.properties.iter_mut().find(|(pid, _)| *pid == id) {
            Some(slot) => slot.1 = value,
            None => self.properties.push((id, value)),
        }
    }

    pub fn get(&self, id: PropertyId) -> Option<&Property> {
        self.properties
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(_, value)| value)
    }
}

impl LabelValue for Record {
    fn property(&self, id: PropertyId) -> Option<PropertyValue<'_>> {
        self.get(id).map(Property::as_value)
    }

    fn variant(&self) -> Option<VariantId> {
        self.variant
    }
}
