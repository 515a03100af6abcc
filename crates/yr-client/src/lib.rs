//! # yr-client
//!
//! Fetches place forecasts from the yr.no XML API and maps them into records.
//!
//! A [`ForecastClient`] builds the place URL, performs one blocking GET
//! through its [`Transport`], parses the body, and applies the weather schema.
//! Transport failures are returned to the caller as [`Error::Transport`] or
//! [`Error::Status`]; nothing is retried.

pub mod client;
pub mod config;
pub mod place;
pub mod transport;

pub use client::{fetch_forecast, ForecastClient};
pub use config::ClientConfig;
pub use place::forecast_url;
pub use transport::{HttpTransport, Transport};

use thiserror::Error;

/// Errors that can occur when fetching a forecast
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Cannot read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Document error: {0}")]
    Document(#[from] yr_ir::Error),

    #[error("Mapping error: {0}")]
    Mapping(#[from] yr_mapping::Error),

    #[error("Configuration error: {details}")]
    Config { details: String },
}

impl Error {
    /// Build an invalid-URL error
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a transport error
    pub fn transport(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Whether the failure happened before a document was received
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Status { .. } | Self::Body { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
