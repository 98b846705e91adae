//! Lookup session
//!
//! Holds the current coordinates and hazard flags. Each lookup resolves a
//! position, runs the feature query for it, classifies the result and commits
//! coordinates and flags together. Only the most recently started lookup may
//! commit; older results are dropped.

use crate::config::Config;
use crate::constants::search::RADIUS_METERS;
use crate::coord::{AddressInput, Coordinates};
use crate::error::Result;
use crate::geo::{
    get_geocoder, get_position_provider, resolve_from_address, resolve_from_device, DeviceLocator,
    GeoBackend, NominatimBackend, PositionProvider,
};
use crate::hazard::classify;
use crate::lookup::{LocationSource, Report, RequestSequence, Resolution, Snapshot};
use crate::overpass::{FeatureSource, OverpassClient};
use chrono::Utc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Session wired to the configured network services
pub type DefaultSession = Session<NominatimBackend, DeviceLocator, OverpassClient>;

/// Resolution-and-classification session
pub struct Session<G, P, F> {
    geocoder: G,
    positioner: P,
    features: F,
    sequence: RequestSequence,
    state: RwLock<Snapshot>,
}

impl DefaultSession {
    /// Build a session from the `services` and `location` config sections
    pub fn from_config(config: &Config) -> Result<Self> {
        let features = OverpassClient::with_endpoint(
            config.services.overpass_url.clone(),
            Duration::from_secs(config.services.timeout_secs),
        )?;
        Ok(Self::new(
            get_geocoder(config)?,
            get_position_provider(config)?,
            features,
        ))
    }
}

impl<G, P, F> Session<G, P, F>
where
    G: GeoBackend,
    P: PositionProvider,
    F: FeatureSource,
{
    /// Create a session with no coordinates and all flags absent
    pub fn new(geocoder: G, positioner: P, features: F) -> Self {
        Self {
            geocoder,
            positioner,
            features,
            sequence: RequestSequence::new(),
            state: RwLock::new(Snapshot::default()),
        }
    }

    /// Current state
    pub async fn snapshot(&self) -> Snapshot {
        self.state.read().await.clone()
    }

    /// Sequence number of the most recently started lookup
    pub fn latest_seq(&self) -> u64 {
        self.sequence.latest()
    }

    /// Geocode an address and look up hazards around it
    ///
    /// `Error::NotFound` and out-of-range results leave the session untouched.
    pub async fn locate_address(&self, address: AddressInput) -> Result<Resolution> {
        let seq = self.sequence.next();
        let location = resolve_from_address(&self.geocoder, &address).await?;
        let coordinates = location.coordinates();
        coordinates.validate()?;
        self.complete(
            seq,
            LocationSource::Address { address },
            Some(location.display_name),
            coordinates,
        )
        .await
    }

    /// Use the device position and look up hazards around it
    ///
    /// Out-of-range positions fail with `Error::InvalidCoordinates`.
    pub async fn locate_device(&self) -> Result<Resolution> {
        let seq = self.sequence.next();
        let location = resolve_from_device(&self.positioner).await?;
        let coordinates = location.coordinates();
        coordinates.validate()?;
        self.complete(seq, LocationSource::Device, Some(location.display_name), coordinates)
            .await
    }

    /// Look up hazards around coordinates supplied directly
    pub async fn locate_coordinates(&self, coordinates: Coordinates) -> Result<Resolution> {
        coordinates.validate()?;
        let seq = self.sequence.next();
        self.complete(seq, LocationSource::Coordinates, None, coordinates)
            .await
    }

    /// Run the feature query for resolved coordinates and commit if still latest
    async fn complete(
        &self,
        seq: u64,
        source: LocationSource,
        label: Option<String>,
        coordinates: Coordinates,
    ) -> Result<Resolution> {
        if !self.sequence.is_latest(seq) {
            debug!(seq, "Lookup superseded before feature query");
            return Ok(Resolution::Superseded { seq });
        }

        let classified = match self.features.query_features(coordinates, RADIUS_METERS).await {
            Ok(elements) => Ok(classify(&elements)),
            Err(e) => {
                warn!(seq, %coordinates, error = %e, "Feature query failed; keeping previous flags");
                Err(e.to_string())
            }
        };

        let mut state = self.state.write().await;
        if !self.sequence.is_latest(seq) {
            debug!(seq, latest = self.sequence.latest(), "Discarding stale lookup result");
            return Ok(Resolution::Superseded { seq });
        }

        state.seq = seq;
        state.coordinates = Some(coordinates);
        state.label = label.clone();

        let query_error = match classified {
            Ok(flags) => {
                state.flags = flags;
                state.flags_for = Some(coordinates);
                None
            }
            Err(message) => Some(message),
        };

        let report = Report {
            seq,
            source,
            label,
            coordinates,
            radius_meters: RADIUS_METERS,
            flags: state.flags.clone(),
            flags_current: query_error.is_none(),
            query_error,
            resolved_at: Utc::now(),
        };

        info!(
            seq,
            %coordinates,
            source = %report.source,
            present = report.flags.present().len(),
            "Lookup applied"
        );

        Ok(Resolution::Applied { report })
    }
}
