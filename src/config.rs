//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.negotiation-review.toml` files.

use crate::analysis::{SectionPatterns, COACHING_PATTERN, IMPROVEMENT_PATTERN, WORKED_WELL_PATTERN};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".negotiation-review.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Coaching section heading patterns.
    #[serde(default)]
    pub sections: SectionsConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "negotiation_report.md".to_string()
}

/// Heading patterns used to locate the coaching sections.
///
/// Patterns are case-insensitive regular expressions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionsConfig {
    #[serde(default = "default_worked_well")]
    pub worked_well: String,

    #[serde(default = "default_improvement_areas")]
    pub improvement_areas: String,

    #[serde(default = "default_coaching_advice")]
    pub coaching_advice: String,
}

impl Default for SectionsConfig {
    fn default() -> Self {
        Self {
            worked_well: default_worked_well(),
            improvement_areas: default_improvement_areas(),
            coaching_advice: default_coaching_advice(),
        }
    }
}

fn default_worked_well() -> String {
    WORKED_WELL_PATTERN.to_string()
}

fn default_improvement_areas() -> String {
    IMPROVEMENT_PATTERN.to_string()
}

fn default_coaching_advice() -> String {
    COACHING_PATTERN.to_string()
}

impl From<&SectionsConfig> for SectionPatterns {
    fn from(config: &SectionsConfig) -> Self {
        Self {
            worked_well: config.worked_well.clone(),
            improvement_areas: config.improvement_areas.clone(),
            coaching_advice: config.coaching_advice.clone(),
        }
    }
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include the full transcript section.
    #[serde(default = "default_true")]
    pub include_transcript: bool,

    /// Include the technique definitions legend.
    #[serde(default = "default_true")]
    pub include_legend: bool,

    /// Width of technique usage bars in characters.
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_transcript: true,
            include_legend: true,
            bar_width: default_bar_width(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_bar_width() -> usize {
    20
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }

        if args.no_transcript {
            self.report.include_transcript = false;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Log level for a run. `--quiet` wins over `verbose` from either source.
    ///
    /// Call after `merge_with_args` so `--verbose` is already folded in.
    pub fn log_level(&self, args: &crate::cli::Args) -> tracing::Level {
        if args.quiet {
            tracing::Level::ERROR
        } else if self.general.verbose {
            tracing::Level::DEBUG
        } else {
            args.log_level()
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output, "negotiation_report.md");
        assert_eq!(config.sections.worked_well, "things.*did well");
        assert!(config.report.include_transcript);
        assert_eq!(config.report.bar_width, 20);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "review.md"
verbose = true

[sections]
coaching_advice = "coaching (advice|tips)"

[report]
include_legend = false
bar_width = 40
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "review.md");
        assert!(config.general.verbose);
        assert_eq!(config.sections.coaching_advice, "coaching (advice|tips)");
        assert_eq!(config.sections.improvement_areas, "areas for improvement");
        assert!(!config.report.include_legend);
        assert!(config.report.include_transcript);
        assert_eq!(config.report.bar_width, 40);
    }

    #[test]
    fn test_section_patterns_from_config() {
        let patterns = SectionPatterns::from(&SectionsConfig::default());
        assert_eq!(patterns, SectionPatterns::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[report]\ninclude_transcript = false").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(!config.report.include_transcript);
        assert_eq!(config.general.output, "negotiation_report.md");
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[report\nbar_width = ").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    fn parse_args(extra: &[&str]) -> crate::cli::Args {
        use clap::Parser;
        let mut argv = vec!["negotiation-review", "--session", "session.json"];
        argv.extend_from_slice(extra);
        crate::cli::Args::parse_from(argv)
    }

    #[test]
    fn test_verbose_from_config_file_raises_log_level() {
        let config: Config = toml::from_str("[general]\nverbose = true").unwrap();
        let args = parse_args(&[]);
        assert_eq!(config.log_level(&args), tracing::Level::DEBUG);

        let quiet = parse_args(&["--quiet"]);
        assert_eq!(config.log_level(&quiet), tracing::Level::ERROR);
    }

    #[test]
    fn test_verbose_flag_merges_into_log_level() {
        let mut config = Config::default();
        let args = parse_args(&[]);
        assert_eq!(config.log_level(&args), tracing::Level::INFO);

        let verbose = parse_args(&["--verbose"]);
        config.merge_with_args(&verbose);
        assert!(config.general.verbose);
        assert_eq!(config.log_level(&verbose), tracing::Level::DEBUG);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[sections]"));
        assert!(toml_str.contains("[report]"));
    }
}
