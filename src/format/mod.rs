//! Output formatters
//!
//! Provides trait-based output formatting for lookup reports.

pub mod json;
pub mod text;
pub mod url;

use crate::config::Config;
use crate::error::Result;
use crate::lookup::Report;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a lookup report
    ///
    /// # Arguments
    /// * `report` - The applied lookup to format
    /// * `config` - Application config (for url providers, etc.)
    fn format(&self, report: &Report, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    [
        &json::JsonFormatter as &dyn OutputFormatter,
        &text::TextFormatter,
        &url::UrlFormatter,
    ]
    .into_iter()
    .map(|f| FormatInfo {
        name: f.name().to_string(),
        description: f.description().to_string(),
    })
    .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::coord::{AddressInput, Coordinates};
    use crate::hazard::{classify, HazardFlags};
    use crate::lookup::{LocationSource, Report};
    use crate::overpass::RawElement;
    use chrono::{TimeZone, Utc};

    /// A report for Nice with water and roads present
    pub fn sample_report() -> Report {
        let elements: Vec<RawElement> = serde_json::from_str(
            r#"[{"tags": {"natural": "water"}}, {"tags": {"highway": "primary"}}]"#,
        )
        .unwrap();
        Report {
            seq: 1,
            source: LocationSource::Address {
                address: AddressInput::new("Promenade des Anglais", "Nice", "06000"),
            },
            label: Some("Nice, France".to_string()),
            coordinates: Coordinates::new(43.6835848, 7.2273575),
            radius_meters: 500,
            flags: classify(&elements),
            flags_current: true,
            query_error: None,
            resolved_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    /// A report whose feature query failed
    pub fn failed_report() -> Report {
        Report {
            flags: HazardFlags::none(),
            flags_current: false,
            query_error: Some("Feature query failed: timeout".to_string()),
            ..sample_report()
        }
    }
}
