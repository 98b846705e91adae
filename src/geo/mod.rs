//! Coordinate resolution
//!
//! Provides geocoding (address to coordinates) and device positioning.

pub mod device;
pub mod ip_location;
pub mod nominatim;

use crate::config::Config;
use crate::coord::{AddressInput, Coordinates};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub use device::{DeviceLocator, FixedPosition, NoPositioning};
pub use ip_location::IpLocator;
pub use nominatim::NominatimBackend;

/// A resolved location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
    /// Display name (address or description)
    pub display_name: String,
}

impl GeoLocation {
    /// Coordinates of this location
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

/// Trait for geocoding backends
pub trait GeoBackend: Send + Sync {
    /// Geocode a free-text query to coordinates
    ///
    /// Returns the first match for the query, or None if there is none
    fn geocode(&self, query: &str) -> impl std::future::Future<Output = Result<Option<GeoLocation>>> + Send;
}

/// Trait for device positioning
pub trait PositionProvider: Send + Sync {
    /// Current position of the device
    ///
    /// Fails with `Error::PositionUnavailable` when there is no positioning
    /// capability, or `Error::PositionDenied` when a position cannot be had.
    fn current_position(&self) -> impl std::future::Future<Output = Result<GeoLocation>> + Send;
}

/// Resolve an address to a location with a single geocoding request
///
/// Zero results is `Error::NotFound`.
pub async fn resolve_from_address<G: GeoBackend>(
    geocoder: &G,
    address: &AddressInput,
) -> Result<GeoLocation> {
    let query = address.to_query();
    debug!(%query, "Resolving address");
    let location = geocoder.geocode(&query).await?;
    location.ok_or(Error::NotFound(query))
}

/// Resolve the device's current position; never retried
pub async fn resolve_from_device<P: PositionProvider>(provider: &P) -> Result<GeoLocation> {
    provider.current_position().await
}

/// Get the geocoding backend configured in `services`
pub fn get_geocoder(config: &Config) -> Result<NominatimBackend> {
    NominatimBackend::with_base_url(
        &config.services.nominatim_url,
        Duration::from_secs(config.services.timeout_secs),
    )
}

/// Get the position provider configured in `location`
pub fn get_position_provider(config: &Config) -> Result<DeviceLocator> {
    DeviceLocator::from_config(config)
}
