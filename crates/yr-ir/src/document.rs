//! Document container and XML loading
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

use crate::node::Node;
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A parsed XML document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Root element of the document
    pub root: Node,

    /// Document-level metadata
    pub metadata: DocumentMetadata,
}

/// Metadata associated with a document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Where the document came from (URL or file path)
    pub source: Option<String>,

    /// When the document was loaded
    pub loaded_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Document {
    /// Create a new document with the given root element
    pub fn new(root: Node) -> Self {
        Self {
            root,
            metadata: DocumentMetadata::default(),
        }
    }

    /// Parse an XML string into an owned element tree.
    ///
    /// Comments, processing instructions and namespace prefixes are dropped;
    /// only elements, attributes and element text survive.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Xml`] when the input is not well-formed XML.
    pub fn parse_str(xml: &str) -> Result<Self> {
        let parsed = roxmltree::Document::parse(xml)?;
        let root = build_node(parsed.root_element());
        debug!(root = %root.name, "Parsed XML document");

        let mut document = Self::new(root);
        document.metadata.loaded_at = Some(chrono::Utc::now());
        Ok(document)
    }

    /// Parse raw UTF-8 bytes into an owned element tree.
    ///
    /// A leading byte order mark is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Encoding`] for invalid UTF-8 and
    /// [`crate::Error::Xml`] for malformed XML.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        Self::parse_str(std::str::from_utf8(bytes)?)
    }

    /// Record where the document came from
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.metadata.source = Some(source.into());
        self
    }
}

fn build_node(element: roxmltree::Node<'_, '_>) -> Node {
    let mut node = Node::new(element.tag_name().name());

    for attribute in element.attributes() {
        node.set_attribute(attribute.name(), attribute.value());
    }

    node.text = element.text().map(str::to_string);

    for child in element.children().filter(roxmltree::Node::is_element) {
        node.add_child(build_node(child));
    }

    node
}
