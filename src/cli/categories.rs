//! Categories command handler
//!
//! Lists every hazard category with the map tag it is detected by.

use crate::constants::search::RADIUS_METERS;
use crate::hazard::PREDICATES;

/// Run the categories command
pub fn run() {
    println!("Hazard categories (searched within {}m):", RADIUS_METERS);
    for (category, predicate) in PREDICATES.iter() {
        println!(
            "  {:15} {:20} {}",
            category.name(),
            category.label(),
            predicate
        );
    }
}
