#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # yr-ir
//!
//! Document tree, XML loading, and result values for yr forecast documents.
//!
//! An XML document is parsed once into an owned [`Node`] tree. The tree
//! supports path lookup relative to any node (`forecast/tabular/time`) and
//! attribute/text access, which is all the schema mapper needs. Mapped output
//! is expressed as [`Value`]s collected into [`Record`]s.

/// Document container and XML loading.
pub mod document;
/// Element nodes with attributes, text, and child lookup.
pub mod node;
/// Relative path selection and cursor navigation.
pub mod traversal;
/// Typed values and records produced by schema mapping.
pub mod value;

/// Primary document type.
pub use document::{Document, DocumentMetadata};
/// Element node primitive.
pub use node::Node;
/// Path selection entry points.
pub use traversal::{Cursor, ElementPath};
/// Mapped output values.
pub use value::{Record, Value};

use thiserror::Error;

/// Errors that can occur when loading or navigating a document
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed XML document: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Document is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
}

impl Error {
    /// Build an invalid-path error with input path and parsing reason.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Crate-local result type for document operations.
pub type Result<T> = std::result::Result<T, Error>;
