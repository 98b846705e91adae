//! Tag predicate table
//!
//! One row per category. The same rows drive the Overpass filters and the
//! classifier, so a category can never be queried without being classified.

use crate::hazard::HazardCategory;
use std::collections::BTreeMap;

/// Match rule against an element's tag mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagPredicate {
    /// Tag key
    pub key: &'static str,
    /// Expected value; `None` matches any value as long as the key exists
    pub value: Option<&'static str>,
}

impl TagPredicate {
    /// Key must equal the given value
    pub const fn equals(key: &'static str, value: &'static str) -> Self {
        Self {
            key,
            value: Some(value),
        }
    }

    /// Key must be present with any value
    pub const fn present(key: &'static str) -> Self {
        Self { key, value: None }
    }

    /// Evaluate against a tag mapping
    pub fn matches(&self, tags: &BTreeMap<String, String>) -> bool {
        match (tags.get(self.key), self.value) {
            (Some(actual), Some(expected)) => actual == expected,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Overpass QL tag filter, e.g. `["natural"="water"]` or `["waterway"]`
    pub fn overpass_filter(&self) -> String {
        match self.value {
            Some(value) => format!("[\"{}\"=\"{}\"]", self.key, value),
            None => format!("[\"{}\"]", self.key),
        }
    }
}

impl std::fmt::Display for TagPredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value {
            Some(value) => write!(f, "{}={}", self.key, value),
            None => write!(f, "{}=*", self.key),
        }
    }
}

// wetland, scrub and reservoir are presence-only while water/floodplain need an
// exact value; keep as observed in the source data model.
pub const PREDICATES: [(HazardCategory, TagPredicate); 21] = [
    (HazardCategory::Coastal, TagPredicate::equals("natural", "coastline")),
    (HazardCategory::Farmlands, TagPredicate::equals("landuse", "farmland")),
    (HazardCategory::Woodlands, TagPredicate::equals("landuse", "forest")),
    (HazardCategory::Waterway, TagPredicate::present("waterway")),
    (HazardCategory::Water, TagPredicate::equals("natural", "water")),
    (HazardCategory::Wetland, TagPredicate::present("wetland")),
    (HazardCategory::Wood, TagPredicate::equals("natural", "wood")),
    (HazardCategory::Scrub, TagPredicate::present("scrub")),
    (HazardCategory::Cliff, TagPredicate::equals("natural", "cliff")),
    (HazardCategory::Hill, TagPredicate::equals("natural", "hill")),
    (
        HazardCategory::MountainRange,
        TagPredicate::equals("natural", "mountain_range"),
    ),
    (HazardCategory::Building, TagPredicate::present("building")),
    (HazardCategory::Tower, TagPredicate::equals("man_made", "tower")),
    (HazardCategory::Industrial, TagPredicate::equals("landuse", "industrial")),
    (HazardCategory::Residential, TagPredicate::equals("landuse", "residential")),
    (HazardCategory::Highway, TagPredicate::present("highway")),
    (HazardCategory::Railway, TagPredicate::present("railway")),
    (HazardCategory::Dam, TagPredicate::equals("man_made", "dam")),
    (HazardCategory::Reservoir, TagPredicate::present("reservoir")),
    (HazardCategory::Landfill, TagPredicate::equals("landuse", "landfill")),
    (HazardCategory::Floodplain, TagPredicate::equals("natural", "floodplain")),
];

/// Look up the predicate for a category
///
/// Rows are stored in declaration order, so the discriminant is the index.
pub fn predicate_for(category: HazardCategory) -> TagPredicate {
    PREDICATES[category as usize].1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_every_category_has_one_row() {
        for category in HazardCategory::ALL {
            let rows = PREDICATES.iter().filter(|(c, _)| *c == category).count();
            assert_eq!(rows, 1, "{} should have exactly one predicate", category);
        }
    }

    #[test]
    fn test_table_follows_display_order() {
        let order: Vec<_> = PREDICATES.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, HazardCategory::ALL.to_vec());
    }

    #[test]
    fn test_equals_predicate() {
        let predicate = TagPredicate::equals("natural", "water");
        assert!(predicate.matches(&tags(&[("natural", "water")])));
        assert!(!predicate.matches(&tags(&[("natural", "wood")])));
        assert!(!predicate.matches(&tags(&[("water", "natural")])));
        assert!(!predicate.matches(&tags(&[])));
    }

    #[test]
    fn test_present_predicate() {
        let predicate = TagPredicate::present("highway");
        assert!(predicate.matches(&tags(&[("highway", "primary")])));
        assert!(predicate.matches(&tags(&[("highway", "")])));
        assert!(!predicate.matches(&tags(&[("railway", "rail")])));
    }

    #[test]
    fn test_presence_only_rows() {
        assert_eq!(predicate_for(HazardCategory::Reservoir).value, None);
        assert_eq!(predicate_for(HazardCategory::Wetland).value, None);
        assert_eq!(
            predicate_for(HazardCategory::Floodplain).value,
            Some("floodplain")
        );
    }

    #[test]
    fn test_overpass_filter() {
        assert_eq!(
            TagPredicate::equals("man_made", "dam").overpass_filter(),
            r#"["man_made"="dam"]"#
        );
        assert_eq!(
            TagPredicate::present("railway").overpass_filter(),
            r#"["railway"]"#
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(TagPredicate::equals("landuse", "forest").to_string(), "landuse=forest");
        assert_eq!(TagPredicate::present("scrub").to_string(), "scrub=*");
    }
}
