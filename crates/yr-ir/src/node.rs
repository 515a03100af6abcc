//! Element nodes of a parsed document

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An element in the document tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Element tag name, without namespace prefix
    pub name: String,

    /// Text content preceding the first child element, if any
    pub text: Option<String>,

    /// Child elements in document order
    pub children: Vec<Node>,

    /// Element attributes
    pub attributes: HashMap<String, String>,
}

impl Node {
    /// Create a new element node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            children: Vec::new(),
            attributes: HashMap::new(),
        }
    }

    /// Create an element node carrying text
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(name)
        }
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) -> &mut Self {
        self.children.push(child);
        self
    }

    /// Set an attribute
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Look up an attribute value
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Text content, empty when the element has none
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Find the first child by name
    pub fn find_child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Find all children by name
    pub fn find_children(&self, name: &str) -> Vec<&Node> {
        self.children.iter().filter(|c| c.name == name).collect()
    }

    /// Text of the first child named `name`.
    ///
    /// Returns `None` when no such child exists and `Some("")` when the child
    /// exists but carries no text.
    pub fn find_text(&self, name: &str) -> Option<&str> {
        self.find_child(name).map(Node::text)
    }
}
