//! Element classification
//!
//! Turns the raw element list of a feature query into one presence flag per
//! category. Pure: no I/O, no state.

use crate::hazard::{HazardCategory, PREDICATES};
use crate::overpass::RawElement;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Presence flag for every hazard category
///
/// Always holds exactly the 21 categories. Decoding a partial map fills the
/// missing categories with `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<HazardCategory, bool>",
    from = "BTreeMap<HazardCategory, bool>"
)]
pub struct HazardFlags {
    flags: BTreeMap<HazardCategory, bool>,
}

impl HazardFlags {
    /// All categories absent
    pub fn none() -> Self {
        Self {
            flags: HazardCategory::ALL.into_iter().map(|c| (c, false)).collect(),
        }
    }

    /// Whether a category is present
    pub fn is_present(&self, category: HazardCategory) -> bool {
        self.flags.get(&category).copied().unwrap_or(false)
    }

    /// Iterate over (category, present) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (HazardCategory, bool)> + '_ {
        self.flags.iter().map(|(c, p)| (*c, *p))
    }

    /// Categories flagged present, in display order
    pub fn present(&self) -> Vec<HazardCategory> {
        self.iter().filter(|(_, p)| *p).map(|(c, _)| c).collect()
    }

    /// Number of categories (always 21)
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Never empty; provided for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    fn set(&mut self, category: HazardCategory, present: bool) {
        self.flags.insert(category, present);
    }
}

impl Default for HazardFlags {
    fn default() -> Self {
        Self::none()
    }
}

impl From<BTreeMap<HazardCategory, bool>> for HazardFlags {
    fn from(map: BTreeMap<HazardCategory, bool>) -> Self {
        let mut flags = Self::none();
        for (category, present) in map {
            flags.set(category, present);
        }
        flags
    }
}

impl From<HazardFlags> for BTreeMap<HazardCategory, bool> {
    fn from(flags: HazardFlags) -> Self {
        flags.flags
    }
}

/// Classify raw elements into hazard flags
///
/// A category is present iff at least one element matches its predicate.
/// Elements without tags never match. Total over any input, including an
/// empty slice.
pub fn classify(elements: &[RawElement]) -> HazardFlags {
    let mut flags = HazardFlags::none();
    for (category, predicate) in PREDICATES.iter() {
        let present = elements.iter().any(|el| predicate.matches(&el.tags));
        flags.set(*category, present);
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hazard::predicate_for;

    fn element(pairs: &[(&str, &str)]) -> RawElement {
        RawElement::with_tags(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn only(flags: &HazardFlags, expected: &[HazardCategory]) {
        for (category, present) in flags.iter() {
            assert_eq!(
                present,
                expected.contains(&category),
                "unexpected flag for {}",
                category
            );
        }
    }

    #[test]
    fn test_single_water_element() {
        let flags = classify(&[element(&[("natural", "water")])]);
        only(&flags, &[HazardCategory::Water]);
    }

    #[test]
    fn test_forest_and_highway() {
        let flags = classify(&[
            element(&[("landuse", "forest")]),
            element(&[("highway", "primary")]),
        ]);
        only(&flags, &[HazardCategory::Woodlands, HazardCategory::Highway]);
    }

    #[test]
    fn test_empty_input_all_absent() {
        let flags = classify(&[]);
        assert_eq!(flags.len(), 21);
        assert!(flags.present().is_empty());
    }

    #[test]
    fn test_element_without_tags_ignored() {
        let flags = classify(&[RawElement::default(), element(&[("name", "Promenade")])]);
        assert_eq!(flags, HazardFlags::none());
    }

    #[test]
    fn test_each_row_triggers_only_its_category() {
        for category in HazardCategory::ALL {
            let predicate = predicate_for(category);
            let value = predicate.value.unwrap_or("yes");
            let flags = classify(&[element(&[(predicate.key, value)])]);
            assert!(flags.is_present(category), "{} should be present", category);
            for (other, present) in flags.iter() {
                if other != category {
                    assert!(!present, "{} leaked into {}", category, other);
                }
            }
        }
    }

    #[test]
    fn test_one_element_can_set_several_flags() {
        let flags = classify(&[element(&[("building", "yes"), ("man_made", "tower")])]);
        only(&flags, &[HazardCategory::Building, HazardCategory::Tower]);
    }

    #[test]
    fn test_deterministic() {
        let elements = vec![
            element(&[("natural", "cliff")]),
            element(&[("railway", "rail")]),
            RawElement::default(),
        ];
        assert_eq!(classify(&elements), classify(&elements));
    }

    #[test]
    fn test_flags_serialize_all_keys() {
        let json = serde_json::to_value(HazardFlags::none()).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), 21);
        assert_eq!(map.get("mountain_range"), Some(&serde_json::Value::Bool(false)));
    }

    #[test]
    fn test_flags_deserialize_partial_fills_missing() {
        let flags: HazardFlags = serde_json::from_str(r#"{"dam": true}"#).unwrap();
        assert_eq!(flags.len(), 21);
        assert_eq!(flags.present(), vec![HazardCategory::Dam]);
    }
}
