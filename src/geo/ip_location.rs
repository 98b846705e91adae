//! IP-based geolocation
//!
//! Uses ip-api.com as the device position source. Positions are fetched
//! fresh on every call.

use crate::constants::api::IP_API_URL;
use crate::constants::http::DEFAULT_TIMEOUT_SECS;
use crate::error::{Error, Result};
use crate::geo::{GeoLocation, PositionProvider};
use crate::http::build_client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// IP location service
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: reqwest::Client,
    endpoint: String,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    /// Failure reason when status is "fail" (e.g. "private range")
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    country: Option<String>,
}

impl IpLocator {
    /// Create an IP locator for the public ip-api.com endpoint
    pub fn new() -> Result<Self> {
        Self::with_endpoint(IP_API_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create an IP locator for a specific endpoint
    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: endpoint.into(),
        })
    }

    /// Endpoint in use
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Turn an ip-api answer into a location
    fn location_from(data: IpApiResponse) -> Result<GeoLocation> {
        if data.status != "success" {
            return Err(Error::PositionDenied(
                data.message.unwrap_or_else(|| "IP location lookup failed".to_string()),
            ));
        }

        let lat = data.lat.ok_or_else(|| Error::PositionDenied("No latitude in response".to_string()))?;
        let lon = data.lon.ok_or_else(|| Error::PositionDenied("No longitude in response".to_string()))?;

        // Build display name from available fields
        let display_name = [data.city, data.region_name, data.country]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");

        Ok(GeoLocation {
            lat,
            lon,
            display_name: if display_name.is_empty() {
                "Unknown Location".to_string()
            } else {
                display_name
            },
        })
    }
}

impl PositionProvider for IpLocator {
    async fn current_position(&self) -> Result<GeoLocation> {
        debug!(endpoint = %self.endpoint, "Locating by IP");

        let response = self.client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| Error::PositionDenied(format!("IP location request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::PositionDenied(format!(
                "IP location API returned status: {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response
            .json()
            .await
            .map_err(|e| Error::PositionDenied(format!("Failed to parse IP location response: {}", e)))?;

        Self::location_from(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> IpApiResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_ip_locator_creation() {
        let locator = IpLocator::new().unwrap();
        assert_eq!(locator.endpoint(), IP_API_URL);
    }

    #[test]
    fn test_success_response() {
        let data = parse(
            r#"{"status": "success", "lat": 43.7, "lon": 7.27,
                "city": "Nice", "regionName": "Provence", "country": "France"}"#,
        );
        let location = IpLocator::location_from(data).unwrap();
        assert_eq!(location.display_name, "Nice, Provence, France");
        assert_eq!(location.lat, 43.7);
    }

    #[test]
    fn test_success_without_names() {
        let data = parse(r#"{"status": "success", "lat": 1.0, "lon": 2.0}"#);
        let location = IpLocator::location_from(data).unwrap();
        assert_eq!(location.display_name, "Unknown Location");
    }

    #[test]
    fn test_fail_carries_message() {
        let data = parse(r#"{"status": "fail", "message": "private range", "query": "10.0.0.1"}"#);
        match IpLocator::location_from(data).unwrap_err() {
            Error::PositionDenied(message) => assert_eq!(message, "private range"),
            other => panic!("expected PositionDenied, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_latitude() {
        let data = parse(r#"{"status": "success", "lon": 2.0}"#);
        assert!(matches!(
            IpLocator::location_from(data),
            Err(Error::PositionDenied(_))
        ));
    }
}
