//! Absence policies and mapper configuration

/// What to do when a child-element field has no matching element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingElementPolicy {
    /// Store an empty text value, the same as a missing attribute
    #[default]
    Tolerate,

    /// Fail the whole mapping
    Fail,
}

/// What to do when a nested path matches no nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyMatchPolicy {
    /// Fail the whole mapping with a not-found error
    #[default]
    Fail,

    /// Store an empty list
    EmptyList,
}

/// Mapper configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MappingConfig {
    /// Handling of absent child elements
    pub missing_element: MissingElementPolicy,

    /// Handling of nested paths with zero matches
    pub empty_match: EmptyMatchPolicy,
}

impl MappingConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the missing element policy
    #[must_use]
    pub fn missing_element(mut self, policy: MissingElementPolicy) -> Self {
        self.missing_element = policy;
        self
    }

    /// Set the empty match policy
    #[must_use]
    pub fn empty_match(mut self, policy: EmptyMatchPolicy) -> Self {
        self.empty_match = policy;
        self
    }

    /// Fail on every kind of missing structure
    pub fn strict() -> Self {
        Self {
            missing_element: MissingElementPolicy::Fail,
            empty_match: EmptyMatchPolicy::Fail,
        }
    }
}
