//! Location inputs
//!
//! This module handles:
//! - Geographic coordinates produced by the resolver or the device
//! - Free-text address input for geocoding

use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lon
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// A free-text postal address
///
/// Fields are not validated; empty fields are passed through to the geocoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInput {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
}

impl AddressInput {
    /// Create a new address
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            postal_code: postal_code.into(),
        }
    }

    /// Free-text geocoding query: street, city and postal code joined by commas
    pub fn to_query(&self) -> String {
        format!("{},{},{}", self.street, self.city, self.postal_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(Coordinates::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(-90.0, -180.0).validate().is_ok());
        assert!(Coordinates::new(43.6835848, 7.2273575).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(Coordinates::new(91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -180.5).validate().is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn test_address_query_keeps_empty_fields() {
        let address = AddressInput::new("12 Rue de France", "Nice", "06000");
        assert_eq!(address.to_query(), "12 Rue de France,Nice,06000");

        let empty = AddressInput::default();
        assert_eq!(empty.to_query(), ",,");
    }

    #[test]
    fn test_address_deserialize_missing_fields() {
        let address: AddressInput = serde_json::from_str(r#"{"city": "Nice"}"#).unwrap();
        assert_eq!(address, AddressInput::new("", "Nice", ""));
    }
}
