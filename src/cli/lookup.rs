//! Lookup command handlers
//!
//! `address`, `here` and `check` each resolve a position, run the feature
//! query and print the hazard report.

use crate::config::Config;
use crate::coord::{AddressInput, Coordinates};
use crate::error::{Error, Result};
use crate::format::url::UrlFormatter;
use crate::format::{available_formats, get_formatter, OutputFormatter};
use crate::lookup::{DefaultSession, Resolution};
use clap::Args;

/// Output options shared by lookup commands
#[derive(Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,

    /// Map provider for url output (overrides url.default)
    #[arg(long, short = 'p')]
    pub provider: Option<String>,
}

/// Address command arguments
#[derive(Args)]
pub struct AddressArgs {
    /// Street and number
    #[arg(long, default_value = "")]
    pub street: String,

    /// City
    #[arg(long, default_value = "")]
    pub city: String,

    /// Postal code
    #[arg(long, default_value = "")]
    pub postal_code: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Here command arguments
#[derive(Args)]
pub struct HereArgs {
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Check command arguments
#[derive(Args)]
pub struct CheckArgs {
    /// Latitude
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Run the address command
pub async fn run_address(args: AddressArgs) -> Result<()> {
    let Some((config, formatter)) = prepare(&args.output)? else {
        return Ok(());
    };
    let session = DefaultSession::from_config(&config)?;

    let address = AddressInput::new(args.street, args.city, args.postal_code);
    let resolution = session.locate_address(address).await?;
    emit(&resolution, formatter.as_ref(), &args.output, &config)
}

/// Run the here command
pub async fn run_here(args: HereArgs) -> Result<()> {
    let Some((config, formatter)) = prepare(&args.output)? else {
        return Ok(());
    };
    let session = DefaultSession::from_config(&config)?;

    let resolution = session.locate_device().await?;
    emit(&resolution, formatter.as_ref(), &args.output, &config)
}

/// Run the check command
pub async fn run_check(args: CheckArgs) -> Result<()> {
    let Some((config, formatter)) = prepare(&args.output)? else {
        return Ok(());
    };
    let session = DefaultSession::from_config(&config)?;

    let resolution = session
        .locate_coordinates(Coordinates::new(args.lat, args.lon))
        .await?;
    emit(&resolution, formatter.as_ref(), &args.output, &config)
}

/// Load config and pick the formatter before any network traffic
///
/// Returns None when only the format list was requested.
fn prepare(args: &OutputArgs) -> Result<Option<(Config, Box<dyn OutputFormatter>)>> {
    if args.list_formats {
        list_formats();
        return Ok(None);
    }

    let config = Config::load()?;
    let format = args
        .format
        .clone()
        .unwrap_or_else(|| config.defaults.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    if let Some(provider) = &args.provider {
        if !config.url.providers.contains_key(provider) {
            return Err(Error::Config(format!("Unknown URL provider: {}", provider)));
        }
    }

    Ok(Some((config, formatter)))
}

/// Format an applied lookup and write it out
fn emit(
    resolution: &Resolution,
    formatter: &dyn OutputFormatter,
    args: &OutputArgs,
    config: &Config,
) -> Result<()> {
    let Some(report) = resolution.report() else {
        eprintln!("Lookup was superseded by a newer one; nothing to show");
        return Ok(());
    };

    if let Some(label) = &report.label {
        eprintln!("Resolved to: {}", label);
    }

    let output = match (&args.provider, formatter.name()) {
        (Some(provider), "url") => {
            UrlFormatter.format_with_provider(report, config, Some(provider))?
        }
        _ => formatter.format(report, config)?,
    };

    if let Some(path) = &args.output {
        std::fs::write(path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::test_support::sample_report;
    use tempfile::TempDir;

    fn output_args(path: Option<String>) -> OutputArgs {
        OutputArgs {
            format: None,
            output: path,
            list_formats: false,
            provider: None,
        }
    }

    #[test]
    fn test_prepare_list_formats_short_circuits() {
        let args = OutputArgs {
            format: None,
            output: None,
            list_formats: true,
            provider: None,
        };
        assert!(prepare(&args).unwrap().is_none());
    }

    #[test]
    fn test_emit_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");
        let args = output_args(Some(path.to_string_lossy().to_string()));
        let resolution = Resolution::Applied {
            report: sample_report(),
        };

        emit(
            &resolution,
            &crate::format::json::JsonFormatter,
            &args,
            &Config::default(),
        )
        .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["flags"]["water"], true);
    }

    #[test]
    fn test_emit_url_with_provider() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("map.txt");
        let mut args = output_args(Some(path.to_string_lossy().to_string()));
        args.provider = Some("apple".to_string());
        let resolution = Resolution::Applied {
            report: sample_report(),
        };

        emit(&resolution, &UrlFormatter, &args, &Config::default()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "https://maps.apple.com/?ll=43.6835848,7.2273575");
    }

    #[test]
    fn test_emit_url_default_provider() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("map.txt");
        let args = output_args(Some(path.to_string_lossy().to_string()));
        let resolution = Resolution::Applied {
            report: sample_report(),
        };

        emit(&resolution, &UrlFormatter, &args, &Config::default()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("https://www.openstreetmap.org/"));
    }

    #[test]
    fn test_emit_superseded_is_quiet() {
        let resolution = Resolution::Superseded { seq: 4 };
        let result = emit(
            &resolution,
            &crate::format::text::TextFormatter,
            &output_args(None),
            &Config::default(),
        );
        assert!(result.is_ok());
    }
}
