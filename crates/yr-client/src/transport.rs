//! Blocking HTTP transport

use crate::config::ClientConfig;
use crate::{Error, Result};
use std::fmt;
use std::io::Read;
use tracing::{debug, warn};
use url::Url;

/// Fetches a document body for a URL
pub trait Transport: Send + Sync {
    /// Perform one blocking GET and return the raw body.
    ///
    /// The body is left undecoded; the XML parser decides its encoding.
    ///
    /// # Errors
    ///
    /// Returns a transport, status, or body error; implementations must not retry.
    fn get(&self, url: &Url) -> Result<Vec<u8>>;
}

/// [`Transport`] backed by a `ureq` agent
#[derive(Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Build an agent honouring the configured timeout and User-Agent
    pub fn new(config: &ClientConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Self {
            agent: builder.build(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<Vec<u8>> {
        debug!(%url, "GET");

        match self.agent.get(url.as_str()).call() {
            Ok(response) => {
                let mut body = Vec::new();
                response
                    .into_reader()
                    .read_to_end(&mut body)
                    .map_err(|source| Error::Body {
                        url: url.to_string(),
                        source,
                    })?;
                Ok(body)
            }
            Err(ureq::Error::Status(status, _)) => {
                warn!(%url, status, "Forecast request rejected");
                Err(Error::Status {
                    url: url.to_string(),
                    status,
                })
            }
            Err(ureq::Error::Transport(transport)) => {
                warn!(%url, error = %transport, "Forecast request failed");
                Err(Error::transport(url.as_str(), transport))
            }
        }
    }
}
