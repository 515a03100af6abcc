//! Schema model definitions

use crate::conversion::Conversion;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use yr_ir::ElementPath;

/// Prefix marking a field name as an attribute lookup
pub const ATTRIBUTE_SIGIL: char = '@';

/// How to produce one field of a mapped record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSpec {
    /// Convert the attribute value or child text
    Leaf(Conversion),

    /// Apply a sub-schema to the nodes found at a relative path
    Nested(NestedSchema),
}

/// A sub-schema applied to every node matching `path`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedSchema {
    /// Path relative to the current node
    pub path: String,

    /// Fields extracted from each matched node
    #[serde(rename = "fields")]
    pub schema: Schema,
}

/// Field name to field spec
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: BTreeMap<String, FieldSpec>,
}

/// A parsed schema field name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldName<'a> {
    /// `@name`: attribute on the current node
    Attribute(&'a str),

    /// `name`: child element of the current node
    Element(&'a str),
}

impl<'a> FieldName<'a> {
    /// Split a declared field name into its lookup kind and bare name
    pub fn parse(declared: &'a str) -> Self {
        match declared.strip_prefix(ATTRIBUTE_SIGIL) {
            Some(attribute) => FieldName::Attribute(attribute),
            None => FieldName::Element(declared),
        }
    }

    /// Key under which the field is stored in a mapped record
    pub fn key(self) -> &'a str {
        match self {
            FieldName::Attribute(name) | FieldName::Element(name) => name,
        }
    }
}

impl NestedSchema {
    pub fn new(path: impl Into<String>, schema: Schema) -> Self {
        Self {
            path: path.into(),
            schema,
        }
    }
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a leaf field
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, conversion: Conversion) -> Self {
        self.fields.insert(name.into(), FieldSpec::Leaf(conversion));
        self
    }

    /// Add a nested field that applies `schema` to the nodes at `path`
    #[must_use]
    pub fn nested(mut self, name: impl Into<String>, path: impl Into<String>, schema: Schema) -> Self {
        self.fields
            .insert(name.into(), FieldSpec::Nested(NestedSchema::new(path, schema)));
        self
    }

    /// Look up a declared field
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Declared fields in name order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check the schema is well formed.
    ///
    /// Field names must be non-empty, nested specs must not sit under an
    /// attribute name, nested paths must parse, and two declared names must
    /// not map to the same record key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        self.validate_at("")
    }

    fn validate_at(&self, prefix: &str) -> Result<()> {
        let mut keys = std::collections::HashSet::new();

        for (declared, spec) in self.fields() {
            let location = format!("{prefix}{declared}");
            let name = FieldName::parse(declared);

            if name.key().is_empty() {
                return Err(Error::InvalidFormat(format!(
                    "Empty field name at '{location}'"
                )));
            }
            if !keys.insert(name.key()) {
                return Err(Error::InvalidFormat(format!(
                    "Field '{location}' collides with another field named '{}'",
                    name.key()
                )));
            }

            if let FieldSpec::Nested(nested) = spec {
                if let FieldName::Attribute(_) = name {
                    return Err(Error::InvalidFormat(format!(
                        "Attribute field '{location}' cannot hold a nested schema"
                    )));
                }
                ElementPath::parse(&nested.path).map_err(|e| {
                    Error::InvalidFormat(format!("Field '{location}': {e}"))
                })?;
                nested.schema.validate_at(&format!("{location}/"))?;
            }
        }

        Ok(())
    }
}
