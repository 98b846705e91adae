//! hazard-scout: nearby environmental hazard finder
//!
//! A library and CLI tool that resolves an address (or the current position)
//! to coordinates, queries OpenStreetMap features within 500 m, and reports
//! which of 21 environmental/hazard categories are present.
//!
//! ## Features
//!
//! - Address geocoding (Nominatim) and device positioning (IP, fixed, none)
//! - Radius-bounded feature query (Overpass API)
//! - Table-driven tag classification into presence/absence flags
//! - Latest-request-wins lookup session
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use hazard_scout::hazard::{classify, HazardCategory};
//! use hazard_scout::overpass::RawElement;
//! use std::collections::BTreeMap;
//!
//! let lake = RawElement::with_tags(BTreeMap::from([
//!     ("natural".to_string(), "water".to_string()),
//! ]));
//! let untagged = RawElement::default();
//!
//! let flags = classify(&[lake, untagged]);
//! assert!(flags.is_present(HazardCategory::Water));
//! assert_eq!(flags.present().len(), 1);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod hazard;
pub mod http;
pub mod logging;
pub mod lookup;
pub mod overpass;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use coord::{AddressInput, Coordinates};
pub use error::{Error, Result};
pub use hazard::{classify, HazardCategory, HazardFlags};
pub use lookup::{Report, Resolution, Session};
