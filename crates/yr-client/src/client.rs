//! Forecast client

use crate::config::ClientConfig;
use crate::place::forecast_url;
use crate::transport::{HttpTransport, Transport};
use crate::Result;
use tracing::{debug, info};
use url::Url;
use yr_ir::{Document, Record};
use yr_mapping::Mapper;
use yr_schema::{weather_schema, Schema};

/// Fetches place forecasts and maps them with a schema
#[derive(Debug)]
pub struct ForecastClient<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
    mapper: Mapper,
    schema: Option<Schema>,
}

impl ForecastClient<HttpTransport> {
    /// Client for the public server with default settings
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Client using an HTTP transport built from `config`
    pub fn with_config(config: ClientConfig) -> Self {
        let transport = HttpTransport::new(&config);
        Self::with_transport(config, transport)
    }
}

impl Default for ForecastClient<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> ForecastClient<T> {
    /// Client using a caller-supplied transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let mapper = Mapper::with_config(config.mapping_config());
        Self {
            config,
            transport,
            mapper,
            schema: None,
        }
    }

    /// Map with `schema` instead of the built-in weather schema
    #[must_use]
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Schema applied to fetched documents
    pub fn schema(&self) -> &Schema {
        self.schema.as_ref().unwrap_or_else(|| weather_schema())
    }

    /// URL of the forecast document for a place
    ///
    /// # Errors
    ///
    /// See [`forecast_url`].
    pub fn forecast_url(&self, country: &str, area: &str, city: &str) -> Result<Url> {
        forecast_url(&self.config.server, country, area, city)
    }

    /// Fetch and map the forecast for a place.
    ///
    /// The result holds one entry per top-level schema section (`location`,
    /// `credit`, `sun`, `forecast` for the built-in schema).
    ///
    /// # Errors
    ///
    /// Returns a transport error when the document cannot be fetched, a
    /// document error when it is not well-formed XML, and a mapping error when
    /// a section is missing or a value does not convert. No partial result is
    /// returned.
    pub fn fetch_forecast(&self, country: &str, area: &str, city: &str) -> Result<Record> {
        let url = self.forecast_url(country, area, city)?;
        info!(%url, "Fetching forecast");

        let body = self.transport.get(&url)?;
        debug!(bytes = body.len(), "Received forecast document");

        let document = Document::parse_bytes(&body)?.with_source(url.as_str());
        let record = self.map_document(&document)?;

        info!(%url, sections = record.len(), "Forecast mapped");
        Ok(record)
    }

    /// Parse and map a forecast document that is already in memory
    ///
    /// # Errors
    ///
    /// Returns a document error for malformed XML and a mapping error for
    /// missing sections or unconvertible values.
    pub fn parse_forecast(&self, xml: &str) -> Result<Record> {
        let document = Document::parse_str(xml)?;
        self.map_document(&document)
    }

    fn map_document(&self, document: &Document) -> Result<Record> {
        Ok(self.mapper.convert_document(document, self.schema())?)
    }
}

/// Fetch and map a place forecast from the public server with default settings
///
/// # Errors
///
/// See [`ForecastClient::fetch_forecast`].
pub fn fetch_forecast(country: &str, area: &str, city: &str) -> Result<Record> {
    ForecastClient::new().fetch_forecast(country, area, city)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct StaticTransport(&'static str);

    impl Transport for StaticTransport {
        fn get(&self, _url: &Url) -> Result<Vec<u8>> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    #[test]
    fn test_forecast_url_uses_configured_server() {
        let client = ForecastClient::with_transport(
            ClientConfig::new().server("http://localhost:8080"),
            StaticTransport(""),
        );

        assert_eq!(client.config().server, "http://localhost:8080");
        let url = client.forecast_url("Norway", "Oslo", "Oslo").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/place/Norway/Oslo/Oslo/forecast.xml");
    }

    #[test]
    fn test_malformed_body_is_document_error() {
        let client = ForecastClient::with_transport(ClientConfig::new(), StaticTransport("<weatherdata>"));

        let err = client.fetch_forecast("Norway", "Oslo", "Oslo").unwrap_err();
        assert!(matches!(err, Error::Document(_)));
        assert!(!err.is_transport());
    }

    struct BytesTransport(&'static [u8]);

    impl Transport for BytesTransport {
        fn get(&self, _url: &Url) -> Result<Vec<u8>> {
            Ok(self.0.to_vec())
        }
    }

    #[test]
    fn test_non_utf8_body_is_encoding_error() {
        let client = ForecastClient::with_transport(
            ClientConfig::new(),
            BytesTransport(b"<weatherdata name=\"Malm\xF6\"/>"),
        );

        let err = client.fetch_forecast("Sweden", "Skåne", "Malmö").unwrap_err();
        assert!(matches!(err, Error::Document(yr_ir::Error::Encoding(_))));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_default_schema_is_weather_schema() {
        let client = ForecastClient::new();
        assert!(std::ptr::eq(client.schema(), weather_schema()));
    }
}
