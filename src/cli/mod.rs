//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod categories;
pub mod config;
pub mod lookup;
pub mod serve;

use crate::logging;
use clap::{Parser, Subcommand};

/// Find environmental hazards near an address or position
#[derive(Parser)]
#[command(name = "hazard-scout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up hazards around a postal address
    Address(lookup::AddressArgs),

    /// Look up hazards around the current position
    Here(lookup::HereArgs),

    /// Look up hazards around explicit coordinates
    Check(lookup::CheckArgs),

    /// List hazard categories and their map tags
    Categories,

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    let level = if matches!(cli.command, Commands::Serve(_)) {
        "info"
    } else {
        "warn"
    };
    logging::init(level);

    match cli.command {
        Commands::Address(args) => lookup::run_address(args).await,
        Commands::Here(args) => lookup::run_here(args).await,
        Commands::Check(args) => lookup::run_check(args).await,
        Commands::Categories => {
            categories::run();
            Ok(())
        }
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_address() {
        let cli = Cli::try_parse_from([
            "hazard-scout",
            "address",
            "--street",
            "12 Rue de France",
            "--city",
            "Nice",
            "--postal-code",
            "06000",
            "-f",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Address(args) => {
                assert_eq!(args.city, "Nice");
                assert_eq!(args.postal_code, "06000");
                assert_eq!(args.output.format.as_deref(), Some("json"));
            }
            _ => panic!("expected address command"),
        }
    }

    #[test]
    fn test_parse_check_requires_both() {
        assert!(Cli::try_parse_from(["hazard-scout", "check", "--lat", "43.7"]).is_err());
        assert!(Cli::try_parse_from(["hazard-scout", "check", "--lat", "43.7", "--lon", "7.27"]).is_ok());
    }

    #[test]
    fn test_parse_check_negative_longitude() {
        let cli =
            Cli::try_parse_from(["hazard-scout", "check", "--lat", "40.71", "--lon", "-74.0"]).unwrap();
        match cli.command {
            Commands::Check(args) => assert_eq!(args.lon, -74.0),
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn test_parse_url_provider() {
        let cli = Cli::try_parse_from(["hazard-scout", "here", "-f", "url", "-p", "apple"]).unwrap();
        match cli.command {
            Commands::Here(args) => {
                assert_eq!(args.output.format.as_deref(), Some("url"));
                assert_eq!(args.output.provider.as_deref(), Some("apple"));
            }
            _ => panic!("expected here command"),
        }
    }
}
