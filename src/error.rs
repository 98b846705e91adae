//! Error types for hazard-scout

use thiserror::Error;

/// Main error type for hazard-scout operations
#[derive(Error, Debug)]
pub enum Error {
    /// Geocoding returned no result for the address
    #[error("Address not found: {0}")]
    NotFound(String),

    /// No positioning capability is configured
    #[error("Positioning is not available")]
    PositionUnavailable,

    /// The position provider refused or could not supply a position
    #[error("Position denied: {0}")]
    PositionDenied(String),

    /// The spatial feature query failed (transport or service error)
    #[error("Feature query failed: {0}")]
    QueryFailed(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Geo error: {0}")]
    Geo(String),
}

/// Result type alias for hazard-scout operations
pub type Result<T> = std::result::Result<T, Error>;
