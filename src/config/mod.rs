//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/hazard-scout/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default values for lookups
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// External service endpoints
    #[serde(default)]
    pub services: ServicesConfig,

    /// Device position settings
    #[serde(default)]
    pub location: LocationConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Map URL settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Default values for lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// External service endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Nominatim base URL (the `/search` path is appended)
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    /// Overpass interpreter endpoint
    #[serde(default = "default_overpass_url")]
    pub overpass_url: String,

    /// IP geolocation endpoint
    #[serde(default = "default_ip_api_url")]
    pub ip_api_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Device position settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Position provider: ip, fixed or none
    #[serde(default = "default_position_provider")]
    pub provider: String,

    /// Latitude used by the fixed provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_lat: Option<f64>,

    /// Longitude used by the fixed provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_lon: Option<f64>,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Map URL settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_nominatim_url() -> String {
    DEFAULT_NOMINATIM_URL.to_string()
}
fn default_overpass_url() -> String {
    DEFAULT_OVERPASS_URL.to_string()
}
fn default_ip_api_url() -> String {
    DEFAULT_IP_API_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_position_provider() -> String {
    DEFAULT_POSITION_PROVIDER.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=16/{lat}/{lon}".to_string(),
    );
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lon},16z".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lon}".to_string(),
    );
    providers
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            nominatim_url: default_nominatim_url(),
            overpass_url: default_overpass_url(),
            ip_api_url: default_ip_api_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider: default_position_provider(),
            fixed_lat: None,
            fixed_lon: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

/// Parse an optional float within `[-limit, limit]`; empty string or "none"
/// clears the value
fn parse_optional_f64(key: &str, value: &str, limit: f64) -> Result<Option<f64>> {
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let parsed: f64 = value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {} value: {}", key, value)))?;
    if !(-limit..=limit).contains(&parsed) {
        return Err(Error::Config(format!(
            "{} {} is out of range [-{}, {}]",
            key, value, limit, limit
        )));
    }
    Ok(Some(parsed))
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "format"] => Some(self.defaults.format.clone()),

            ["services", "nominatim_url"] => Some(self.services.nominatim_url.clone()),
            ["services", "overpass_url"] => Some(self.services.overpass_url.clone()),
            ["services", "ip_api_url"] => Some(self.services.ip_api_url.clone()),
            ["services", "timeout_secs"] => Some(self.services.timeout_secs.to_string()),

            ["location", "provider"] => Some(self.location.provider.clone()),
            ["location", "fixed_lat"] => Some(
                self.location
                    .fixed_lat
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            ),
            ["location", "fixed_lon"] => Some(
                self.location
                    .fixed_lon
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            ),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["url", "default"] => Some(self.url.default.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "format"] => {
                self.defaults.format = value.to_string();
            }

            ["services", "nominatim_url"] => {
                self.services.nominatim_url = value.to_string();
            }
            ["services", "overpass_url"] => {
                self.services.overpass_url = value.to_string();
            }
            ["services", "ip_api_url"] => {
                self.services.ip_api_url = value.to_string();
            }
            ["services", "timeout_secs"] => {
                self.services.timeout_secs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout value: {}", value))
                })?;
            }

            ["location", "provider"] => {
                value
                    .parse::<crate::geo::device::PositionSource>()
                    .map_err(Error::Config)?;
                self.location.provider = value.to_lowercase();
            }
            ["location", "fixed_lat"] => {
                self.location.fixed_lat = parse_optional_f64("latitude", value, 90.0)?;
            }
            ["location", "fixed_lon"] => {
                self.location.fixed_lon = parse_optional_f64("longitude", value, 180.0)?;
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            ["url", "default"] => {
                self.url.default = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.format",
            "services.nominatim_url",
            "services.overpass_url",
            "services.ip_api_url",
            "services.timeout_secs",
            "location.provider",
            "location.fixed_lat",
            "location.fixed_lon",
            "server.host",
            "server.port",
            "url.default",
        ]
    }

    /// Format a URL using the specified provider
    ///
    /// Replaces {lat} and {lon} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lon: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self.url.providers.get(provider_name).ok_or_else(|| {
            Error::Config(format!("Unknown URL provider: {}", provider_name))
        })?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lon}", &lon.to_string()))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
