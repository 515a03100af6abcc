//! Relative path selection and cursor navigation
//!
//! Paths use the limited syntax needed for forecast documents:
//! `name` steps separated by `/`, `*` for any element, `.` for the current
//! element, and an optional zero-based `[index]` suffix to pick one match
//! among same-named siblings. Absolute paths are rejected; every path is
//! relative to the node it is applied to.

use crate::node::Node;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A parsed relative element path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementPath {
    raw: String,
    steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    test: NameTest,
    index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameTest {
    Current,
    Any,
    Named(String),
}

impl ElementPath {
    /// Parse a relative path such as `forecast/tabular/time`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for empty, absolute, or malformed paths.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(Error::invalid_path(path, "path is empty"));
        }
        if path.starts_with('/') {
            return Err(Error::invalid_path(path, "absolute paths are not supported"));
        }

        let steps = path
            .split('/')
            .map(|segment| parse_step(path, segment))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            raw: path.to_string(),
            steps,
        })
    }

    /// The path as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// All nodes under `node` matching this path, in document order
    pub fn select<'a>(&self, node: &'a Node) -> Vec<&'a Node> {
        let mut current = vec![node];

        for step in &self.steps {
            let mut next = Vec::new();
            for parent in current {
                next.extend(step.apply(parent));
            }
            current = next;
        }

        current
    }
}

fn parse_step(path: &str, segment: &str) -> Result<Step> {
    if segment.is_empty() {
        return Err(Error::invalid_path(path, "empty path segment"));
    }

    let (name, index) = match segment.find('[') {
        Some(open_bracket) => {
            let close_bracket = segment
                .find(']')
                .filter(|close| *close == segment.len() - 1)
                .ok_or_else(|| {
                    Error::invalid_path(path, format!("Unclosed bracket in: {segment}"))
                })?;
            let index: usize = segment[open_bracket + 1..close_bracket]
                .parse()
                .map_err(|_| Error::invalid_path(path, format!("Invalid index in: {segment}")))?;
            (&segment[..open_bracket], Some(index))
        }
        None => (segment, None),
    };

    let test = match name {
        "" => return Err(Error::invalid_path(path, format!("Missing name in: {segment}"))),
        "." => NameTest::Current,
        "*" => NameTest::Any,
        other => NameTest::Named(other.to_string()),
    };

    Ok(Step { test, index })
}

impl Step {
    fn apply<'a>(&self, parent: &'a Node) -> Vec<&'a Node> {
        let matches: Vec<&'a Node> = match &self.test {
            NameTest::Current => vec![parent],
            NameTest::Any => parent.children.iter().collect(),
            NameTest::Named(name) => parent.find_children(name),
        };

        match self.index {
            Some(index) => matches.get(index).copied().into_iter().collect(),
            None => matches,
        }
    }
}

impl FromStr for ElementPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A position in the document tree that remembers how it was reached
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    /// Current node
    node: &'a Node,

    /// Path to current node (for error reporting)
    path: Vec<String>,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the given node
    pub fn new(node: &'a Node) -> Self {
        Self {
            node,
            path: vec![node.name.clone()],
        }
    }

    /// Get the current node
    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// Current path joined with `/`
    pub fn location(&self) -> String {
        self.path.join("/")
    }

    /// All nodes matching `path`, each with its own location.
    ///
    /// Matches are labelled `name[i]` when a path yields more than one.
    pub fn select(&self, path: &ElementPath) -> Vec<Cursor<'a>> {
        let matches = path.select(self.node);
        let repeated = matches.len() > 1;

        matches
            .into_iter()
            .enumerate()
            .map(|(idx, node)| {
                let label = if repeated {
                    format!("{}[{}]", path.as_str(), idx)
                } else {
                    path.as_str().to_string()
                };
                self.descend(node, label)
            })
            .collect()
    }

    fn descend(&self, node: &'a Node, label: String) -> Cursor<'a> {
        let mut path = self.path.clone();
        path.push(label);
        Cursor { node, path }
    }
}
