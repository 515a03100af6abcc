//! Mapping runtime
//!
//! Applies schemas to document trees. Absent attributes become empty text;
//! absent child elements and empty nested matches follow [`MappingConfig`].

use tracing::{debug, trace};
use yr_ir::{Cursor, Document, ElementPath, Node, Record, Value};
use yr_schema::{FieldName, FieldSpec, Schema};

use crate::policies::{EmptyMatchPolicy, MappingConfig, MissingElementPolicy};
use crate::{Error, Result};

/// Runtime for applying schemas to document nodes
#[derive(Debug, Clone, Default)]
pub struct Mapper {
    config: MappingConfig,
}

impl Mapper {
    /// Create a mapper with the default policies
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapper with explicit policies
    pub fn with_config(config: MappingConfig) -> Self {
        Self { config }
    }

    /// Map every declared field of `schema` from `node`.
    ///
    /// The returned record holds exactly one entry per declared field, keyed
    /// by the field name without its `@` sigil.
    ///
    /// # Errors
    ///
    /// Fails when a nested path matches nothing (under
    /// [`EmptyMatchPolicy::Fail`]), a child element is missing (under
    /// [`MissingElementPolicy::Fail`]), or a conversion rejects its input.
    pub fn convert_node(&self, node: &Node, schema: &Schema) -> Result<Record> {
        self.convert_at(&Cursor::new(node), schema)
    }

    /// Apply `schema` to the nodes at `path` below `node`.
    ///
    /// A single match yields [`Value::Record`]; several yield [`Value::List`]
    /// in document order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when nothing matches under the default
    /// policy, and any error from mapping the matches.
    pub fn locate_and_convert(&self, node: &Node, path: &str, schema: &Schema) -> Result<Value> {
        self.locate_at(&Cursor::new(node), path, schema)
    }

    /// Map a whole document by applying `schema` to its root element
    ///
    /// # Errors
    ///
    /// See [`Mapper::convert_node`].
    pub fn convert_document(&self, document: &Document, schema: &Schema) -> Result<Record> {
        debug!(root = %document.root.name, "Mapping document");
        self.convert_node(&document.root, schema)
    }

    fn convert_at(&self, cursor: &Cursor<'_>, schema: &Schema) -> Result<Record> {
        let node = cursor.node();
        let mut record = Record::new();

        for (declared, spec) in schema.fields() {
            let name = FieldName::parse(declared);

            let value = match (name, spec) {
                (FieldName::Attribute(attribute), FieldSpec::Leaf(conversion)) => {
                    match node.attribute(attribute) {
                        Some(raw) => conversion
                            .apply(raw)
                            .map_err(|source| conversion_error(cursor, declared, source))?,
                        None => {
                            trace!(at = %cursor.location(), attribute, "Attribute absent");
                            Value::empty()
                        }
                    }
                }
                (FieldName::Attribute(_), FieldSpec::Nested(_)) => {
                    return Err(Error::InvalidSchema(format!(
                        "Attribute field '{declared}' cannot hold a nested schema"
                    )));
                }
                (FieldName::Element(_), FieldSpec::Nested(nested)) => {
                    self.locate_at(cursor, &nested.path, &nested.schema)?
                }
                (FieldName::Element(element), FieldSpec::Leaf(conversion)) => {
                    match node.find_text(element) {
                        Some(raw) => conversion
                            .apply(raw)
                            .map_err(|source| conversion_error(cursor, declared, source))?,
                        None => self.missing_element(cursor, element)?,
                    }
                }
            };

            record.insert(name.key().to_string(), value);
        }

        Ok(record)
    }

    fn locate_at(&self, cursor: &Cursor<'_>, path: &str, schema: &Schema) -> Result<Value> {
        let element_path = ElementPath::parse(path)
            .map_err(|e| Error::InvalidSchema(e.to_string()))?;
        let matches = cursor.select(&element_path);

        debug!(at = %cursor.location(), path, matches = matches.len(), "Located nodes");

        match matches.as_slice() {
            [] => match self.config.empty_match {
                EmptyMatchPolicy::Fail => {
                    Err(Error::not_found(format!("{}/{}", cursor.location(), path)))
                }
                EmptyMatchPolicy::EmptyList => Ok(Value::List(Vec::new())),
            },
            [single] => self.convert_at(single, schema).map(Value::Record),
            many => many
                .iter()
                .map(|each| self.convert_at(each, schema))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
        }
    }

    fn missing_element(&self, cursor: &Cursor<'_>, element: &str) -> Result<Value> {
        match self.config.missing_element {
            MissingElementPolicy::Tolerate => {
                trace!(at = %cursor.location(), element, "Element absent");
                Ok(Value::empty())
            }
            MissingElementPolicy::Fail => Err(Error::MissingElement {
                path: format!("{}/{}", cursor.location(), element),
            }),
        }
    }
}

fn conversion_error(cursor: &Cursor<'_>, declared: &str, source: yr_schema::Error) -> Error {
    Error::Conversion {
        path: format!("{}/{}", cursor.location(), declared),
        source,
    }
}
