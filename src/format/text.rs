//! Text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::lookup::Report;

/// Text formatter - one Present/Absent line per category
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable table"
    }

    fn format(&self, report: &Report, _config: &Config) -> Result<String> {
        let mut output = String::new();

        // Header
        output.push_str(&format!("Hazard lookup #{} ({})\n", report.seq, report.source));
        if let Some(label) = &report.label {
            output.push_str(&format!("Location: {}\n", label));
        }
        output.push_str(&format!("Coordinates: {}\n", report.coordinates));
        output.push_str(&format!("Radius: {}m\n\n", report.radius_meters));

        if let Some(error) = &report.query_error {
            output.push_str(&format!("Warning: {}\n", error));
            output.push_str("Flags below were not refreshed for this position.\n\n");
        }

        let width = report
            .flags
            .iter()
            .map(|(c, _)| c.label().len())
            .max()
            .unwrap_or(0);

        for (category, present) in report.flags.iter() {
            output.push_str(&format!(
                "  {:width$} : {}\n",
                category.label(),
                if present { "Present" } else { "Absent" },
                width = width
            ));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::test_support::{failed_report, sample_report};

    #[test]
    fn test_text_format() {
        let output = TextFormatter
            .format(&sample_report(), &Config::default())
            .unwrap();

        assert!(output.contains("Hazard lookup #1"));
        assert!(output.contains("Location: Nice, France"));
        assert!(output.contains("Radius: 500m"));
        assert_eq!(output.matches("Present").count(), 2);
        assert_eq!(output.matches("Absent").count(), 19);
        assert!(output.lines().any(|l| l.contains("Bodies of water") && l.ends_with("Present")));
        assert!(!output.contains("Warning"));
    }

    #[test]
    fn test_text_format_query_failure() {
        let output = TextFormatter
            .format(&failed_report(), &Config::default())
            .unwrap();

        assert!(output.contains("Warning: Feature query failed: timeout"));
        assert!(output.contains("not refreshed"));
    }

    #[test]
    fn test_text_formatter_info() {
        assert_eq!(TextFormatter.name(), "text");
        assert!(!TextFormatter.description().is_empty());
    }
}
