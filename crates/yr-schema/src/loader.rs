//! Schema loader for YAML and JSON schema files
//!
//! A schema file is a mapping of section name to `{ path, fields }`, where
//! each field is a conversion name or another `{ path, fields }` block:
//!
//! ```yaml
//! sun:
//!   path: sun
//!   fields:
//!     "@rise": date
//!     "@set": date
//! ```

use crate::model::Schema;
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

/// Loads and validates schema descriptions
#[derive(Debug, Default)]
pub struct SchemaLoader;

impl SchemaLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a schema file; `.yaml`/`.yml` are read as YAML, anything else as JSON
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read and
    /// [`Error::InvalidFormat`] when it does not describe a valid schema.
    pub fn load_from_file(&self, path: &Path) -> Result<Schema> {
        info!("Loading schema from {}", path.display());

        let content = std::fs::read_to_string(path)?;

        if path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml")
        {
            self.load_from_yaml(&content)
        } else {
            self.load_from_json(&content)
        }
    }

    /// Load a schema from JSON string
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] on syntax errors, unknown conversion
    /// names, or a schema that fails validation.
    pub fn load_from_json(&self, json: &str) -> Result<Schema> {
        let schema: Schema = serde_json::from_str(json)
            .map_err(|e| Error::InvalidFormat(format!("JSON parse error: {e}")))?;

        Self::checked(schema)
    }

    /// Load a schema from YAML string
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] on syntax errors, unknown conversion
    /// names, or a schema that fails validation.
    pub fn load_from_yaml(&self, yaml: &str) -> Result<Schema> {
        let schema: Schema = serde_yaml::from_str(yaml)
            .map_err(|e| Error::InvalidFormat(format!("YAML parse error: {e}")))?;

        Self::checked(schema)
    }

    fn checked(schema: Schema) -> Result<Schema> {
        if schema.is_empty() {
            return Err(Error::InvalidFormat("Schema declares no fields".to_string()));
        }
        schema.validate()?;
        debug!(fields = schema.len(), "Loaded schema");
        Ok(schema)
    }
}
