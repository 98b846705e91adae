//! Device position providers
//!
//! A command-line host has no GPS, so "the device position" comes from one of:
//! an IP lookup, a position fixed in the config file, or nothing at all.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::{GeoLocation, IpLocator, PositionProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configured position source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionSource {
    /// IP geolocation
    Ip,
    /// Position from `location.fixed_lat` / `location.fixed_lon`
    Fixed,
    /// No positioning capability
    None,
}

impl std::fmt::Display for PositionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ip => write!(f, "ip"),
            Self::Fixed => write!(f, "fixed"),
            Self::None => write!(f, "none"),
        }
    }
}

impl std::str::FromStr for PositionSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ip" => Ok(Self::Ip),
            "fixed" => Ok(Self::Fixed),
            "none" | "off" => Ok(Self::None),
            _ => Err(format!("Unknown position provider: {}", s)),
        }
    }
}

/// A position set by the user
#[derive(Debug, Clone, Default)]
pub struct FixedPosition {
    lat: Option<f64>,
    lon: Option<f64>,
}

impl FixedPosition {
    pub fn new(lat: Option<f64>, lon: Option<f64>) -> Self {
        Self { lat, lon }
    }
}

impl PositionProvider for FixedPosition {
    async fn current_position(&self) -> Result<GeoLocation> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(GeoLocation {
                lat,
                lon,
                display_name: "Configured position".to_string(),
            }),
            _ => Err(Error::PositionUnavailable),
        }
    }
}

/// Always unavailable
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPositioning;

impl PositionProvider for NoPositioning {
    async fn current_position(&self) -> Result<GeoLocation> {
        Err(Error::PositionUnavailable)
    }
}

/// Position provider selected by configuration
#[derive(Debug, Clone)]
pub enum DeviceLocator {
    Ip(IpLocator),
    Fixed(FixedPosition),
    None(NoPositioning),
}

impl DeviceLocator {
    /// Build the provider named by `location.provider`
    pub fn from_config(config: &Config) -> Result<Self> {
        let source: PositionSource = config
            .location
            .provider
            .parse()
            .map_err(Error::Config)?;

        Ok(match source {
            PositionSource::Ip => Self::Ip(IpLocator::with_endpoint(
                config.services.ip_api_url.clone(),
                Duration::from_secs(config.services.timeout_secs),
            )?),
            PositionSource::Fixed => Self::Fixed(FixedPosition::new(
                config.location.fixed_lat,
                config.location.fixed_lon,
            )),
            PositionSource::None => Self::None(NoPositioning),
        })
    }

    /// Source kind of this provider
    pub fn source(&self) -> PositionSource {
        match self {
            Self::Ip(_) => PositionSource::Ip,
            Self::Fixed(_) => PositionSource::Fixed,
            Self::None(_) => PositionSource::None,
        }
    }
}

impl PositionProvider for DeviceLocator {
    async fn current_position(&self) -> Result<GeoLocation> {
        match self {
            Self::Ip(locator) => locator.current_position().await,
            Self::Fixed(fixed) => fixed.current_position().await,
            Self::None(none) => none.current_position().await,
        }
    }
}
