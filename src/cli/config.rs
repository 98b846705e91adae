//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "location.provider")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    // Show path
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Reset config
    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            show_all_config(&config);
        }

        // Key only: show that value
        (Some(key), None) => {
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else {
                eprintln!("Available keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        // Value without key: not valid (clap fills positionals in order)
        (None, Some(_)) => {
            return Err(Error::Config("Must specify a key to set a value".to_string()));
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[defaults]");
    println!("format = \"{}\"", config.defaults.format);
    println!();

    println!("[services]");
    println!("nominatim_url = \"{}\"", config.services.nominatim_url);
    println!("overpass_url = \"{}\"", config.services.overpass_url);
    println!("ip_api_url = \"{}\"", config.services.ip_api_url);
    println!("timeout_secs = {}", config.services.timeout_secs);
    println!();

    println!("[location]");
    println!("provider = \"{}\"", config.location.provider);
    match (config.location.fixed_lat, config.location.fixed_lon) {
        (Some(lat), Some(lon)) => {
            println!("fixed_lat = {}", lat);
            println!("fixed_lon = {}", lon);
        }
        _ => println!("# fixed position not configured"),
    }
    println!();

    println!("[server]");
    println!("host = \"{}\"", config.server.host);
    println!("port = {}", config.server.port);
    println!();

    println!("[url]");
    println!("default = \"{}\"", config.url.default);
    println!();

    println!("[url.providers]");
    let mut providers: Vec<_> = config.url.providers.iter().collect();
    providers.sort();
    for (name, template) in providers {
        println!("{} = \"{}\"", name, template);
    }
}
