//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim API for geocoding.
//! Usage policy requires an identifying User-Agent, set by the shared client.

use crate::constants::api::NOMINATIM_URL;
use crate::constants::http::DEFAULT_TIMEOUT_SECS;
use crate::error::{Error, Result};
use crate::geo::{GeoBackend, GeoLocation};
use crate::http::build_client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
}

/// Nominatim search response item
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

impl NominatimBackend {
    /// Create a backend for the public Nominatim instance
    pub fn new() -> Result<Self> {
        Self::with_base_url(NOMINATIM_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a backend for a specific Nominatim instance
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL in use
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Parse lat/lon strings to f64
    fn parse_coords(lat: &str, lon: &str) -> Result<(f64, f64)> {
        let lat: f64 = lat.parse().map_err(|_| {
            Error::Geo(format!("Invalid latitude: {}", lat))
        })?;
        let lon: f64 = lon.parse().map_err(|_| {
            Error::Geo(format!("Invalid longitude: {}", lon))
        })?;
        Ok((lat, lon))
    }

    /// Take the first search result, ignoring the rest
    fn first_location(results: Vec<NominatimResult>) -> Result<Option<GeoLocation>> {
        let Some(result) = results.into_iter().next() else {
            return Ok(None);
        };
        let (lat, lon) = Self::parse_coords(&result.lat, &result.lon)?;
        Ok(Some(GeoLocation {
            lat,
            lon,
            display_name: result.display_name,
        }))
    }
}

impl GeoBackend for NominatimBackend {
    async fn geocode(&self, query: &str) -> Result<Option<GeoLocation>> {
        let url = format!(
            "{}/search?format=json&q={}",
            self.base_url,
            urlencoding::encode(query)
        );
        debug!(%url, "Geocoding");

        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Geo(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geo(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Failed to parse Nominatim response: {}", e)))?;

        debug!(count = results.len(), "Nominatim results");
        Self::first_location(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_coords() {
        let (lat, lon) = NominatimBackend::parse_coords("43.6835848", "7.2273575").unwrap();
        assert_relative_eq!(lat, 43.6835848);
        assert_relative_eq!(lon, 7.2273575);
    }

    #[test]
    fn test_parse_coords_invalid() {
        assert!(NominatimBackend::parse_coords("invalid", "0").is_err());
        assert!(NominatimBackend::parse_coords("0", "invalid").is_err());
    }

    #[test]
    fn test_first_result_wins() {
        let results: Vec<NominatimResult> = serde_json::from_str(
            r#"[
                {"lat": "43.70", "lon": "7.27", "display_name": "Nice"},
                {"lat": "0", "lon": "0", "display_name": "Null Island"}
            ]"#,
        )
        .unwrap();

        let location = NominatimBackend::first_location(results).unwrap().unwrap();
        assert_relative_eq!(location.lat, 43.70);
        assert_relative_eq!(location.lon, 7.27);
        assert_eq!(location.display_name, "Nice");
    }

    #[test]
    fn test_no_results() {
        assert!(NominatimBackend::first_location(Vec::new()).unwrap().is_none());
    }

    #[test]
    fn test_backend_creation() {
        let backend = NominatimBackend::new().unwrap();
        assert_eq!(backend.base_url(), NOMINATIM_URL);
        assert!(format!("{:?}", backend).contains("NominatimBackend"));
    }
}
