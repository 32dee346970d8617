//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Negotiation Review - coaching reports for simulated sales negotiations
///
/// Reads the JSON export of a finished negotiation session and writes a
/// report with the deal outcome, technique usage and coaching points.
///
/// Examples:
///   negotiation-review --session session.json
///   negotiation-review --session session.json --format json -o review.json
///   negotiation-review --session session.json --fail-on-no-deal
///   negotiation-review --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Session file to analyze (JSON)
    ///
    /// Contains the transcript, the simulator's analysis and the session settings.
    #[arg(
        short,
        long,
        value_name = "FILE",
        required_unless_present = "init_config",
        env = "NEGOTIATION_SESSION"
    )]
    pub session: Option<PathBuf>,

    /// Output file path for the report
    ///
    /// Defaults to the config file setting, or negotiation_report.md.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .negotiation-review.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Leave the full transcript out of the report
    #[arg(long)]
    pub no_transcript: bool,

    /// Exit with code 2 when the negotiation ended without a deal
    ///
    /// Useful for scripted training drills.
    #[arg(long)]
    pub fail_on_no_deal: bool,

    /// Generate a default .negotiation-review.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        let Some(ref session) = self.session else {
            return Err("A session file is required (--session)".to_string());
        };

        if !session.exists() {
            return Err(format!(
                "Session file does not exist: {}",
                session.display()
            ));
        }
        if !session.is_file() {
            return Err(format!("Session path is not a file: {}", session.display()));
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
