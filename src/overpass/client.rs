//! Overpass API client
//!
//! One GET per lookup; no pagination and no retry.

use crate::constants::api::OVERPASS_URL;
use crate::constants::http::DEFAULT_TIMEOUT_SECS;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::http::build_client;
use crate::overpass::{build_query, lenient_elements, FeatureSource, RawElement};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Overpass interpreter client
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: reqwest::Client,
    endpoint: String,
}

/// Overpass JSON response
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(deserialize_with = "lenient_elements")]
    elements: Vec<RawElement>,
    /// Set by the server on runtime errors such as timeouts
    #[serde(default)]
    remark: Option<String>,
}

impl OverpassClient {
    /// Create a client for the public Overpass endpoint
    pub fn new() -> Result<Self> {
        Self::with_endpoint(OVERPASS_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client for a specific interpreter endpoint
    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: endpoint.into(),
        })
    }

    /// Interpreter endpoint in use
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Decode a response body, rejecting server-side runtime errors
    fn parse_response(body: &str) -> Result<Vec<RawElement>> {
        let response: OverpassResponse = serde_json::from_str(body)
            .map_err(|e| Error::QueryFailed(format!("Failed to parse Overpass response: {}", e)))?;

        if let Some(remark) = response.remark.filter(|r| r.contains("error")) {
            return Err(Error::QueryFailed(format!("Overpass reported: {}", remark)));
        }

        Ok(response.elements)
    }
}

impl FeatureSource for OverpassClient {
    async fn query_features(
        &self,
        center: Coordinates,
        radius_meters: u32,
    ) -> Result<Vec<RawElement>> {
        let query = build_query(center, radius_meters);
        let url = format!("{}?data={}", self.endpoint, urlencoding::encode(&query));
        debug!(%center, radius_meters, "Querying Overpass");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::QueryFailed(format!("Overpass request failed: {}", e)))?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Overpass returned an error status");
            return Err(Error::QueryFailed(format!(
                "Overpass returned status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::QueryFailed(format!("Failed to read Overpass response: {}", e)))?;

        let elements = Self::parse_response(&body)?;
        debug!(count = elements.len(), "Overpass returned elements");
        Ok(elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "version": 0.6,
            "elements": [
                {"type": "way", "id": 1, "tags": {"natural": "water"}},
                {"type": "way", "id": 2}
            ]
        }"#;
        let elements = OverpassClient::parse_response(body).unwrap();
        assert_eq!(elements.len(), 2);
        assert!(elements[1].tags.is_empty());
    }

    #[test]
    fn test_parse_response_empty() {
        let elements = OverpassClient::parse_response(r#"{"elements": []}"#).unwrap();
        assert!(elements.is_empty());
    }

    #[test]
    fn test_parse_response_runtime_error() {
        let body = r#"{"elements": [], "remark": "runtime error: Query timed out in \"query\""}"#;
        let err = OverpassClient::parse_response(body).unwrap_err();
        assert!(matches!(err, Error::QueryFailed(_)));
    }

    #[test]
    fn test_parse_response_invalid_json() {
        let err = OverpassClient::parse_response("<html>busy</html>").unwrap_err();
        assert!(matches!(err, Error::QueryFailed(_)));
    }

    #[test]
    fn test_parse_response_missing_elements() {
        let err = OverpassClient::parse_response(r#"{"version": 0.6, "osm3s": {}}"#).unwrap_err();
        assert!(matches!(err, Error::QueryFailed(_)));

        let err = OverpassClient::parse_response(r#"{"elements": null}"#).unwrap_err();
        assert!(matches!(err, Error::QueryFailed(_)));
    }

    #[test]
    fn test_parse_response_skips_malformed_elements() {
        let body = r#"{
            "elements": [
                null,
                {"type": "way", "id": "not-a-number", "tags": {"natural": "water"}},
                {"type": "way", "id": 2, "tags": {"highway": "primary"}}
            ]
        }"#;
        let elements = OverpassClient::parse_response(body).unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].id, None);
        assert_eq!(elements[1].id, Some(2));
    }

    #[test]
    fn test_client_creation() {
        let client = OverpassClient::new().unwrap();
        assert_eq!(client.endpoint(), OVERPASS_URL);
    }
}
