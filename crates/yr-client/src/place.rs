//! Place forecast URLs

use crate::{Error, Result};
use url::Url;

/// Build `{server}/place/{country}/{area}/{city}/forecast.xml`.
///
/// Each location part becomes one percent-encoded path segment, so non-ASCII
/// names and embedded `/` are escaped rather than changing the path shape.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] when `server` is not an absolute base URL or a
/// location part is empty.
pub fn forecast_url(server: &str, country: &str, area: &str, city: &str) -> Result<Url> {
    for (label, part) in [("country", country), ("area", area), ("city", city)] {
        if part.trim().is_empty() {
            return Err(Error::invalid_url(server, format!("{label} is empty")));
        }
    }

    let mut url = Url::parse(server).map_err(|e| Error::invalid_url(server, e))?;

    url.path_segments_mut()
        .map_err(|()| Error::invalid_url(server, "server URL cannot be a base"))?
        .pop_if_empty()
        .extend(["place", country, area, city, "forecast.xml"]);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_place() {
        let url = forecast_url("https://www.yr.no", "Norway", "Hordaland", "Bergen").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.yr.no/place/Norway/Hordaland/Bergen/forecast.xml"
        );
    }

    #[test]
    fn test_non_ascii_place_is_percent_encoded() {
        let url = forecast_url("https://www.yr.no", "Sweden", "Skåne", "Malmö").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.yr.no/place/Sweden/Sk%C3%A5ne/Malm%C3%B6/forecast.xml"
        );
    }

    #[test]
    fn test_reserved_characters_stay_in_segment() {
        let url = forecast_url("https://www.yr.no", "USA", "New York", "A/B?").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.yr.no/place/USA/New%20York/A%2FB%3F/forecast.xml"
        );
    }

    #[test]
    fn test_server_with_path_prefix() {
        let url = forecast_url("http://localhost:8080/mirror/", "Norway", "Oslo", "Oslo").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/mirror/place/Norway/Oslo/Oslo/forecast.xml"
        );
    }

    #[test]
    fn test_invalid_server() {
        assert!(matches!(
            forecast_url("www.yr.no", "Norway", "Oslo", "Oslo"),
            Err(Error::InvalidUrl { .. })
        ));
        assert!(matches!(
            forecast_url("mailto:someone@example.com", "Norway", "Oslo", "Oslo"),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_empty_part() {
        let err = forecast_url("https://www.yr.no", "Norway", " ", "Oslo").unwrap_err();
        assert!(err.to_string().contains("area is empty"));
    }
}
