//! hazard-scout CLI entry point
//!
//! Nearby environmental hazard finder - CLI + HTTP API

use hazard_scout::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
