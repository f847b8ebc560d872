//! Sitelens main entry point
//!
//! This is the command-line interface for the Sitelens SEO auditor.

use anyhow::Context;
use clap::Parser;
use sitelens::analyzer::BatchProgress;
use sitelens::config::{default_config_with_hash, load_config_with_hash};
use sitelens::history::{open_history, HistoryStore};
use sitelens::pipeline::Pipeline;
use sitelens::report::{print_report, write_json};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Sitelens: a sitemap-driven SEO page auditor
///
/// Sitelens discovers a site's sitemaps, fetches every listed page through a
/// rate-limited proxy, and scores each page on basic SEO signals. Completed
/// runs are recorded in a local history database.
#[derive(Parser, Debug)]
#[command(name = "sitelens")]
#[command(version = "1.0.0")]
#[command(about = "A sitemap-driven SEO page auditor", long_about = None)]
struct Cli {
    /// Domain or sitemap URL to analyze
    #[arg(value_name = "INPUT", required_unless_present = "history")]
    input: Option<String>,

    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Requester name recorded with the analysis
    #[arg(long, default_value = "local")]
    actor: String,

    /// Skip recording the result in the history database
    #[arg(long)]
    no_save: bool,

    /// Write the full result as JSON to this path
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// List the N most recent analyses and exit
    #[arg(long, value_name = "N", conflicts_with_all = ["json", "no_save"])]
    history: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let (config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, hash)
        }
        None => {
            tracing::info!("No config file given, using built-in defaults");
            default_config_with_hash()
        }
    };

    if let Some(limit) = cli.history {
        handle_history(&config, limit)?;
        return Ok(());
    }

    // The clap rule guarantees input is present outside --history mode
    let input = cli.input.as_deref().unwrap_or_default();
    handle_analyze(config, config_hash, input, &cli).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitelens=info,warn"),
            1 => EnvFilter::new("sitelens=debug,info"),
            2 => EnvFilter::new("sitelens=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the main analyze operation
async fn handle_analyze(
    config: sitelens::config::Config,
    config_hash: String,
    input: &str,
    cli: &Cli,
) -> anyhow::Result<()> {
    let history_path = config.output.history_path.clone();
    let pipeline = Pipeline::new(config, config_hash)?;

    let batch_observer = |progress: &BatchProgress| {
        tracing::info!(
            "Analyzed {}/{} pages ({:.0}%)",
            progress.completed,
            progress.total,
            progress.percent
        );
    };

    let result = pipeline
        .run(input, None, Some(&batch_observer))
        .await
        .with_context(|| format!("analysis of {} failed", input))?;

    print_report(&result, 10);

    if let Some(path) = &cli.json {
        write_json(&result, path)
            .with_context(|| format!("failed to write JSON to {}", path.display()))?;
        println!("✓ Result written to: {}", path.display());
    }

    if !cli.no_save {
        let mut history = open_history(Path::new(&history_path))
            .with_context(|| format!("failed to open history database {}", history_path))?;
        let record = pipeline.record(&mut history, &cli.actor, input, &result)?;
        println!("✓ Saved as analysis #{}", record.id);
    }

    Ok(())
}

/// Handles the --history mode: lists recent analyses and exits
fn handle_history(config: &sitelens::config::Config, limit: usize) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.history_path);

    let history = open_history(Path::new(&config.output.history_path))?;
    let records = history.list_recent(limit)?;

    if records.is_empty() {
        println!("No analyses recorded yet");
        return Ok(());
    }

    println!("Recent analyses:");
    for record in records {
        println!(
            "  #{:<4} {}  {} pages, avg {:.1}, {} errors, {} warnings  [{} @ {}]",
            record.id,
            record.source_url,
            record.summary.total_pages,
            record.summary.average_score,
            record.summary.critical_issues,
            record.summary.warnings,
            record.actor,
            record.created_at,
        );
    }

    Ok(())
}
