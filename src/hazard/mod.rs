//! Hazard categories and classification
//!
//! This module handles:
//! - The fixed set of environmental/hazard categories
//! - The tag predicate table shared by the query builder and the classifier
//! - Classifying raw map elements into presence/absence flags

pub mod classify;
pub mod predicate;

pub use classify::{classify, HazardFlags};
pub use predicate::{predicate_for, TagPredicate, PREDICATES};

use serde::{Deserialize, Serialize};

/// Environmental feature categories reported by a lookup
///
/// Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardCategory {
    Coastal,
    Farmlands,
    Woodlands,
    Waterway,
    Water,
    Wetland,
    Wood,
    Scrub,
    Cliff,
    Hill,
    MountainRange,
    Building,
    Tower,
    Industrial,
    Residential,
    Highway,
    Railway,
    Dam,
    Reservoir,
    Landfill,
    Floodplain,
}

impl HazardCategory {
    /// Every category, in display order
    pub const ALL: [HazardCategory; 21] = [
        Self::Coastal,
        Self::Farmlands,
        Self::Woodlands,
        Self::Waterway,
        Self::Water,
        Self::Wetland,
        Self::Wood,
        Self::Scrub,
        Self::Cliff,
        Self::Hill,
        Self::MountainRange,
        Self::Building,
        Self::Tower,
        Self::Industrial,
        Self::Residential,
        Self::Highway,
        Self::Railway,
        Self::Dam,
        Self::Reservoir,
        Self::Landfill,
        Self::Floodplain,
    ];

    /// Machine name (snake_case, as used in JSON and config)
    pub fn name(&self) -> &'static str {
        match self {
            Self::Coastal => "coastal",
            Self::Farmlands => "farmlands",
            Self::Woodlands => "woodlands",
            Self::Waterway => "waterway",
            Self::Water => "water",
            Self::Wetland => "wetland",
            Self::Wood => "wood",
            Self::Scrub => "scrub",
            Self::Cliff => "cliff",
            Self::Hill => "hill",
            Self::MountainRange => "mountain_range",
            Self::Building => "building",
            Self::Tower => "tower",
            Self::Industrial => "industrial",
            Self::Residential => "residential",
            Self::Highway => "highway",
            Self::Railway => "railway",
            Self::Dam => "dam",
            Self::Reservoir => "reservoir",
            Self::Landfill => "landfill",
            Self::Floodplain => "floodplain",
        }
    }

    /// Human-readable label for reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Coastal => "Coastal zones",
            Self::Farmlands => "Farmland",
            Self::Woodlands => "Wooded areas",
            Self::Waterway => "Waterways",
            Self::Water => "Bodies of water",
            Self::Wetland => "Wetlands",
            Self::Wood => "Forests",
            Self::Scrub => "Dense vegetation",
            Self::Cliff => "Cliffs",
            Self::Hill => "Hills",
            Self::MountainRange => "Mountain ranges",
            Self::Building => "Buildings",
            Self::Tower => "Towers",
            Self::Industrial => "Industrial zones",
            Self::Residential => "Residential zones",
            Self::Highway => "Roads",
            Self::Railway => "Railways",
            Self::Dam => "Dams",
            Self::Reservoir => "Reservoirs",
            Self::Landfill => "Landfills",
            Self::Floodplain => "Floodplains",
        }
    }
}

impl std::fmt::Display for HazardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for HazardCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| format!("Unknown hazard category: {}", s))
    }
}
