//! # yr-schema
//!
//! Declarative schemas describing which parts of a forecast document to
//! extract and how to convert them.
//!
//! A [`Schema`] maps field names to a [`FieldSpec`]: either a leaf
//! [`Conversion`] applied to an attribute value or element text, or a nested
//! schema applied to the nodes found at a relative path. Field names starting
//! with `@` read attributes; all others read child elements.

pub mod conversion;
pub mod loader;
pub mod model;
pub mod weather;

pub use conversion::Conversion;
pub use loader::SchemaLoader;
pub use model::{FieldName, FieldSpec, NestedSchema, Schema, ATTRIBUTE_SIGIL};
pub use weather::{weather_schema, SECTIONS};

use thiserror::Error;

/// Errors that can occur when working with schemas
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot convert '{input}' to {conversion}: {message}")]
    Conversion {
        conversion: &'static str,
        input: String,
        message: String,
    },

    #[error("Invalid schema format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a conversion error for the given input
    pub fn conversion(
        conversion: &'static str,
        input: impl Into<String>,
        message: impl ToString,
    ) -> Self {
        Self::Conversion {
            conversion,
            input: input.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
