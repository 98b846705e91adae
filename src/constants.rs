//! Centralized constants for the hazard-scout crate
//!
//! Values shared by the resolver, the feature query client and the
//! presentation surfaces.

/// Search settings
pub mod search {
    /// Radius of the feature query around the resolved position, in meters
    pub const RADIUS_METERS: u32 = 500;

    /// Server-side timeout requested in the Overpass query header, in seconds
    pub const QUERY_TIMEOUT_SECS: u64 = 25;
}

/// Outbound HTTP settings
pub mod http {
    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
}

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// Overpass API interpreter endpoint
    pub const OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";

    /// User-Agent sent with every outbound request (Nominatim requires one)
    pub const USER_AGENT: &str = concat!("hazard-scout/", env!("CARGO_PKG_VERSION"));
}
