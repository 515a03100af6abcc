//! # yr-mapping
//!
//! Schema-driven mapping of document trees into typed records.
//!
//! The [`Mapper`] walks a [`yr_ir::Node`] against a [`yr_schema::Schema`]:
//! attribute fields read the current node, element fields read the first
//! matching child's text, and nested fields locate nodes by relative path and
//! recurse. One match yields a record, several yield a list.

pub mod policies;
pub mod runtime;

pub use policies::{EmptyMatchPolicy, MappingConfig, MissingElementPolicy};
pub use runtime::Mapper;

use thiserror::Error;

/// Errors that can occur during mapping
#[derive(Error, Debug)]
pub enum Error {
    /// A nested path matched nothing
    #[error("No nodes match '{path}'")]
    NotFound { path: String },

    /// A child element field is absent and the policy forbids it
    #[error("Missing element at '{path}'")]
    MissingElement { path: String },

    /// A leaf conversion rejected its input
    #[error("Conversion failed at '{path}': {source}")]
    Conversion {
        path: String,
        #[source]
        source: yr_schema::Error,
    },

    /// The schema cannot be applied as written
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}

impl Error {
    /// Build a not-found error for a located path
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
