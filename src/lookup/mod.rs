//! Lookup pipeline
//!
//! Chains coordinate resolution, the feature query and classification, and
//! keeps the current coordinates and flags for a session.

pub mod sequence;
pub mod session;

pub use sequence::RequestSequence;
pub use session::{DefaultSession, Session};

use crate::coord::{AddressInput, Coordinates};
use crate::hazard::HazardFlags;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the coordinates of a lookup came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationSource {
    /// Geocoded address
    Address { address: AddressInput },
    /// Device position
    Device,
    /// Coordinates supplied directly
    Coordinates,
}

impl std::fmt::Display for LocationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Address { address } => write!(f, "address \"{}\"", address.to_query()),
            Self::Device => write!(f, "device position"),
            Self::Coordinates => write!(f, "coordinates"),
        }
    }
}

/// Result of an applied lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Sequence number of the lookup
    pub seq: u64,

    /// How the coordinates were obtained
    pub source: LocationSource,

    /// Resolver display name, when one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Resolved coordinates
    pub coordinates: Coordinates,

    /// Radius of the feature query in meters
    pub radius_meters: u32,

    /// Hazard flags; the previous ones if the feature query failed
    pub flags: HazardFlags,

    /// False when the feature query failed and `flags` were retained
    pub flags_current: bool,

    /// Feature query failure, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_error: Option<String>,

    /// When the lookup was applied
    pub resolved_at: DateTime<Utc>,
}

/// Outcome of a lookup that did not fail
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// The lookup was the latest and its result is now current
    Applied { report: Report },
    /// A newer lookup was issued; this result was discarded
    Superseded { seq: u64 },
}

impl Resolution {
    /// The report, if the lookup was applied
    pub fn report(&self) -> Option<&Report> {
        match self {
            Self::Applied { report } => Some(report),
            Self::Superseded { .. } => None,
        }
    }
}

/// Current session state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Sequence number of the last applied lookup (0 if none)
    pub seq: u64,

    /// Current coordinates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    /// Display name of the current coordinates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Current hazard flags
    pub flags: HazardFlags,

    /// Coordinates the current flags were computed for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags_for: Option<Coordinates>,
}
