//! Feature query module
//!
//! Builds radius-bounded Overpass queries and decodes the tagged elements
//! they return.

pub mod client;

pub use client::OverpassClient;

use crate::constants::search::QUERY_TIMEOUT_SECS;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::hazard::PREDICATES;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A tagged map element as returned by the feature query service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawElement {
    /// Element type (node, way, relation)
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_kind",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,

    /// OSM id
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<u64>,

    /// Tag mapping; missing or malformed tags decode as empty
    #[serde(
        default,
        deserialize_with = "lenient_tags",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub tags: BTreeMap<String, String>,
}

impl RawElement {
    /// Create an element carrying only tags
    pub fn with_tags(tags: BTreeMap<String, String>) -> Self {
        Self {
            kind: None,
            id: None,
            tags,
        }
    }
}

/// Accept any JSON for `tags`, keeping only string-valued entries of an object
fn lenient_tags<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Object(map) => map
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(s) => Some((key, s)),
                _ => None,
            })
            .collect(),
        _ => BTreeMap::new(),
    })
}

/// Accept any JSON for `type`, keeping only strings
fn lenient_kind<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

/// Accept any JSON for `id`, keeping only unsigned integers
fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64())
}

/// Decode an element list, skipping entries that are not element objects
pub fn lenient_elements<'de, D>(deserializer: D) -> std::result::Result<Vec<RawElement>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .filter(serde_json::Value::is_object)
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect())
}

/// Trait for spatial feature sources
pub trait FeatureSource: Send + Sync {
    /// Fetch all tagged ways within `radius_meters` of `center`
    ///
    /// Fails with `Error::QueryFailed` on transport or service error.
    fn query_features(
        &self,
        center: Coordinates,
        radius_meters: u32,
    ) -> impl std::future::Future<Output = Result<Vec<RawElement>>> + Send;
}

/// Build the Overpass QL query for every category filter around a point
pub fn build_query(center: Coordinates, radius_meters: u32) -> String {
    let mut query = format!("[out:json][timeout:{}];(", QUERY_TIMEOUT_SECS);
    for (_, predicate) in PREDICATES.iter() {
        query.push_str(&format!(
            "way(around:{},{},{}){};",
            radius_meters,
            center.lat,
            center.lon,
            predicate.overpass_filter()
        ));
    }
    query.push_str(");out body;");
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_has_every_filter() {
        let query = build_query(Coordinates::new(43.7, 7.27), 500);

        assert!(query.starts_with("[out:json]"));
        assert!(query.ends_with(");out body;"));
        assert_eq!(query.matches("way(around:500,43.7,7.27)").count(), 21);
        assert!(query.contains(r#"["natural"="coastline"]"#));
        assert!(query.contains(r#"["landuse"="farmland"]"#));
        assert!(query.contains(r#"["reservoir"]"#));
    }

    #[test]
    fn test_element_decodes_tags() {
        let el: RawElement = serde_json::from_str(
            r#"{"type": "way", "id": 42, "tags": {"natural": "water", "name": "Lac"}}"#,
        )
        .unwrap();
        assert_eq!(el.kind.as_deref(), Some("way"));
        assert_eq!(el.id, Some(42));
        assert_eq!(el.tags.get("natural").map(String::as_str), Some("water"));
    }

    #[test]
    fn test_element_missing_tags() {
        let el: RawElement = serde_json::from_str(r#"{"type": "way", "id": 1}"#).unwrap();
        assert!(el.tags.is_empty());
    }

    #[test]
    fn test_element_malformed_tags() {
        let el: RawElement = serde_json::from_str(r#"{"tags": null}"#).unwrap();
        assert!(el.tags.is_empty());

        let el: RawElement = serde_json::from_str(r#"{"tags": ["natural", "water"]}"#).unwrap();
        assert!(el.tags.is_empty());

        let el: RawElement =
            serde_json::from_str(r#"{"tags": {"building": 3, "highway": "primary"}}"#).unwrap();
        assert_eq!(el.tags.len(), 1);
        assert!(el.tags.contains_key("highway"));
    }

    #[test]
    fn test_element_malformed_kind_and_id() {
        let el: RawElement = serde_json::from_str(
            r#"{"type": 7, "id": "w42", "tags": {"natural": "water"}}"#,
        )
        .unwrap();
        assert_eq!(el.kind, None);
        assert_eq!(el.id, None);
        assert_eq!(el.tags.get("natural").map(String::as_str), Some("water"));

        let el: RawElement = serde_json::from_str(r#"{"type": null, "id": -1}"#).unwrap();
        assert_eq!(el.kind, None);
        assert_eq!(el.id, None);
    }

    #[derive(Deserialize)]
    struct Batch {
        #[serde(deserialize_with = "lenient_elements")]
        elements: Vec<RawElement>,
    }

    #[test]
    fn test_lenient_elements_skips_non_objects() {
        let batch: Batch = serde_json::from_str(
            r#"{"elements": [null, {"tags": {"highway": "primary"}}, "way", 3, {"id": 1.5}]}"#,
        )
        .unwrap();
        assert_eq!(batch.elements.len(), 2);
        assert_eq!(batch.elements[0].tags.get("highway").map(String::as_str), Some("primary"));
        assert_eq!(batch.elements[1].id, None);
    }
}
