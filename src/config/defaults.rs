//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::api;
use crate::constants::http;

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default Nominatim base URL
pub const DEFAULT_NOMINATIM_URL: &str = api::NOMINATIM_URL;

/// Default Overpass interpreter endpoint
pub const DEFAULT_OVERPASS_URL: &str = api::OVERPASS_URL;

/// Default IP geolocation endpoint
pub const DEFAULT_IP_API_URL: &str = api::IP_API_URL;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = http::DEFAULT_TIMEOUT_SECS;

/// Default position provider
pub const DEFAULT_POSITION_PROVIDER: &str = "ip";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7879;

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "openstreetmap";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "hazard-scout";
