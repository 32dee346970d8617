//! Negotiation Review - coaching reports for simulated sales negotiations
//!
//! A CLI tool that reads the JSON export of a finished negotiation session
//! and writes a Markdown or JSON review.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (unreadable session, invalid config, etc.)
//!   2 - Negotiation ended without a deal and --fail-on-no-deal is set

use anyhow::{Context, Result};
use negotiation_review::analysis::SectionPatterns;
use negotiation_review::cli::{Args, OutputFormat};
use negotiation_review::config::{Config, CONFIG_FILE_NAME};
use negotiation_review::models::{format_price, DealOutcome};
use negotiation_review::report::{self, Report};
use negotiation_review::session::Session;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config is read before logging starts so its verbose setting applies
    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(config.log_level(&args));

    info!("Negotiation Review v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run_review(args, config) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Review failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .negotiation-review.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize section headings and report layout.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run the review workflow. Returns exit code (0 or 2).
fn run_review(args: Args, config: Config) -> Result<i32> {
    debug!("Effective config: {:?}", config);

    // Validated before logging starts
    let session_path = args
        .session
        .clone()
        .context("No session file given")?;

    let session = Session::load(&session_path)?;
    info!(
        "Loaded session with {} messages from {}",
        session.messages.len(),
        session_path.display()
    );

    let patterns = SectionPatterns::from(&config.sections);
    let source = session_path.display().to_string();
    let report = Report::build(&session, &source, &patterns)
        .with_context(|| format!("Invalid session data in {}", source))?;

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report, &config.report),
    };

    let output_path = PathBuf::from(&config.general.output);
    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    if !args.quiet {
        print_summary(&report);
        println!(
            "\n✅ Review complete! Report saved to: {}",
            output_path.display()
        );
    }

    if args.fail_on_no_deal && !report.summary.outcome.is_closed() {
        eprintln!("\n⛔ Negotiation ended without a deal. Failing (exit code 2).");
        return Ok(2);
    }

    Ok(0)
}

/// Print a short console summary of the review.
fn print_summary(report: &Report) {
    let outcome = &report.summary.outcome;

    println!("\n📊 {} {}", outcome.emoji(), outcome.status_label());
    match outcome {
        DealOutcome::Closed {
            price,
            deviation_pct,
        } => {
            println!("   Final price: {}", format_price(*price as f64));
            println!("   From target: {:.1}%", deviation_pct);
        }
        DealOutcome::Failed { gap, .. } => {
            println!("   Final gap: {}", format_price(*gap as f64));
        }
    }
    println!(
        "   Rounds used: {} / {}",
        report.summary.rounds_used, report.config.max_rounds
    );

    if let Some(top) = report.summary.techniques.first() {
        println!("   Top technique: {} ({})", top.label, top.count);
    }
}

/// Load configuration from file or use defaults.
///
/// Runs before the subscriber is installed, so problems go to stderr.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Ok(Config::default()),
        Err(e) => {
            eprintln!("⚠️  Failed to load config: {:#}. Using defaults.", e);
            Ok(Config::default())
        }
    }
}
