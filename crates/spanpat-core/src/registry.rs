//! Type resolution: pattern names to label type, property and variant ids.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{LabelTypeId, PropertyId, VariantId};

/// Resolves names used in pattern text. Consulted only while compiling.
pub trait TypeResolver {
    fn resolve_type(&self, name: &str) -> Option<LabelTypeId>;

    fn resolve_property(&self, type_id: LabelTypeId, name: &str) -> Option<PropertyId>;

    fn resolve_variant(&self, type_id: LabelTypeId, name: &str) -> Option<VariantId>;
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("label type `{0}` is already registered")]
    DuplicateType(String),

    #[error("type `{type_name}` declares `{name}` twice")]
    DuplicateMember { type_name: String, name: String },

    #[error("too many label types (limit {})", LabelTypeId::MAX)]
    TooManyTypes,

    #[error("invalid type registry JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Declaration of one label type.
///
/// Property ids and variant ids are positions in `properties` and `variants`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TypeDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<String>,
}

impl TypeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Additional name (e.g. a fully qualified one) resolving to the same type.
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.aliases.push(name.into());
        self
    }

    pub fn property(mut self, name: impl Into<String>) -> Self {
        self.properties.push(name.into());
        self
    }

    pub fn variant(mut self, name: impl Into<String>) -> Self {
        self.variants.push(name.into());
        self
    }

    fn position(list: &[String], name: &str) -> Option<u16> {
        list.iter()
            .position(|n| n == name)
            .and_then(|i| u16::try_from(i).ok())
    }

    fn check_members(&self) -> Result<(), RegistryError> {
        for list in [&self.properties, &self.variants] {
            for (i, name) in list.iter().enumerate() {
                if list[..i].contains(name) {
                    return Err(RegistryError::DuplicateMember {
                        type_name: self.name.clone(),
                        name: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// In-memory [`TypeResolver`]. Type ids are registration order.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    types: IndexMap<String, TypeDef>,
    aliases: HashMap<String, LabelTypeId>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a JSON array of type declarations:
    ///
    /// ```json
    /// [{ "name": "Token", "properties": ["text", "score"] },
    ///  { "name": "Pos", "variants": ["Noun", "Verb"] }]
    /// ```
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let defs: Vec<TypeDef> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for def in defs {
            registry.register(def)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, def: TypeDef) -> Result<LabelTypeId, RegistryError> {
        if self.type_id(&def.name).is_some() {
            return Err(RegistryError::DuplicateType(def.name));
        }
        if let Some(alias) = def.aliases.iter().find(|a| self.type_id(a).is_some()) {
            return Err(RegistryError::DuplicateType(alias.clone()));
        }
        def.check_members()?;

        let id = LabelTypeId::try_from(self.types.len()).map_err(|_| RegistryError::TooManyTypes)?;
        for alias in &def.aliases {
            self.aliases.insert(alias.clone(), id);
        }
        self.types.insert(def.name.clone(), def);
        Ok(id)
    }

    /// Chained form of [`register`](Self::register).
    pub fn with(mut self, def: TypeDef) -> Result<Self, RegistryError> {
        self.register(def)?;
        Ok(self)
    }

    pub fn type_id(&self, name: &str) -> Option<LabelTypeId> {
        if let Some(index) = self.types.get_index_of(name) {
            return LabelTypeId::try_from(index).ok();
        }
        self.aliases.get(name).copied()
    }

    pub fn type_def(&self, id: LabelTypeId) -> Option<&TypeDef> {
        self.types.get_index(usize::from(id)).map(|(_, def)| def)
    }

    pub fn type_name(&self, id: LabelTypeId) -> Option<&str> {
        self.type_def(id).map(|def| def.name.as_str())
    }

    pub fn property_id(&self, type_name: &str, property: &str) -> Option<PropertyId> {
        let id = self.type_id(type_name)?;
        self.resolve_property(id, property)
    }

    pub fn variant_id(&self, type_name: &str, variant: &str) -> Option<VariantId> {
        let id = self.type_id(type_name)?;
        self.resolve_variant(id, variant)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeResolver for TypeRegistry {
    fn resolve_type(&self, name: &str) -> Option<LabelTypeId> {
        self.type_id(name)
    }

    fn resolve_property(&self, type_id: LabelTypeId, name: &str) -> Option<PropertyId> {
        TypeDef::position(&self.type_def(type_id)?.properties, name)
    }

    fn resolve_variant(&self, type_id: LabelTypeId, name: &str) -> Option<VariantId> {
        TypeDef::position(&self.type_def(type_id)?.variants, name)
    }
}
