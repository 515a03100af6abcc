//! Client configuration options

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use yr_mapping::MappingConfig;

/// Public yr.no server
pub const DEFAULT_SERVER: &str = "https://www.yr.no";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for fetching forecasts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL that place paths are appended to (default: `https://www.yr.no`)
    pub server: String,
    /// Request timeout in seconds; `None` waits as long as the transport allows
    pub timeout_secs: Option<u64>,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Fail on missing child elements instead of storing empty text
    pub strict: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("yr-forecast/", env!("CARGO_PKG_VERSION")).to_string(),
            strict: false,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server base URL
    #[must_use]
    pub fn server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Remove the request timeout
    #[must_use]
    pub fn without_timeout(mut self) -> Self {
        self.timeout_secs = None;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Configure strict element handling
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Timeout as a duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Mapper policies implied by this configuration
    pub fn mapping_config(&self) -> MappingConfig {
        if self.strict {
            MappingConfig::strict()
        } else {
            MappingConfig::default()
        }
    }

    /// Parse a YAML configuration; omitted keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed YAML or unknown keys.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::Config {
            details: format!("YAML parse error: {e}"),
        })
    }

    /// Load a YAML configuration file
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            details: format!("Cannot read {}: {e}", path.display()),
        })?;
        Self::from_yaml(&content)
    }
}
