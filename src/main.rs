//! Profile-Scraper main entry point
//!
//! This is the command-line interface for the profile scraper.

use anyhow::{Context, Result};
use clap::Parser;
use profile_scraper::browser::WebDriverFactory;
use profile_scraper::config::{load_config_with_hash, Config};
use profile_scraper::export::{output_path, write_export};
use profile_scraper::input::read_entries;
use profile_scraper::notify::{ConsoleNotifier, Notifier, INTERRUPTED_MESSAGE, SUCCESS_MESSAGE};
use profile_scraper::orchestrator::{partition, partition_count};
use profile_scraper::run_scrape;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Profile-Scraper: a resilient multi-worker career-history extractor
///
/// Reads profile addresses (optionally with a graduation date) from the
/// configured input file, scrapes each profile through a WebDriver-controlled
/// browser and writes one CSV row per entry.
#[derive(Parser, Debug)]
#[command(name = "profile-scraper")]
#[command(version = "1.0.0")]
#[command(about = "A resilient multi-worker profile scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Run browsers without a window, one per configured worker
    #[arg(long)]
    headless: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and input and show the partition plan without scraping
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    let input = Path::new(&config.output.input_file);
    let entries = read_entries(input)
        .with_context(|| format!("Failed to read input file {}", input.display()))?;

    if entries.is_empty() {
        println!("Please provide an input.");
        return Ok(());
    }

    if cli.dry_run {
        handle_dry_run(&config, entries, cli.headless);
        return Ok(());
    }

    handle_scrape(config, entries, cli.headless).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("profile_scraper=info,warn"),
            1 => EnvFilter::new("profile_scraper=debug,info"),
            2 => EnvFilter::new("profile_scraper=trace,debug"),
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

/// Handles the --dry-run mode: shows how entries would be split
fn handle_dry_run(config: &Config, entries: Vec<String>, headless: bool) {
    println!("=== Profile-Scraper Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Mode: {}", if headless { "headless" } else { "interactive" });
    println!("  Workers: {}", config.scraper.workers);
    println!("  Delimiter: {:?}", config.scraper.delimiter);
    println!("  Loading pause: {:?}", config.scraper.loading_pause());
    println!("  Scroll pause: {:?}", config.scraper.scroll_pause());
    println!("  WebDriver: {}", config.browser.webdriver_url);

    println!("\nOutput:");
    println!("  Export: {}", config.output.output_file);
    println!("  Append timestamp: {}", config.output.append_timestamp);
    println!("  Error log: {}", config.output.error_log);

    let total = entries.len();
    let parts = partition(entries, partition_count(config, headless));
    println!("\nPartitions ({} entries):", total);
    for (index, part) in parts.iter().enumerate() {
        let first = part.first().map(String::as_str).unwrap_or("-");
        println!("  Scraper #{}: {} entries, starting at {}", index + 1, part.len(), first);
    }

    println!("\n✓ Configuration is valid");
}

/// Runs the scrape and writes the export
async fn handle_scrape(config: Config, entries: Vec<String>, headless: bool) -> Result<()> {
    tracing::info!(
        "Scraping {} entries ({})",
        entries.len(),
        if headless { "headless" } else { "interactive" }
    );

    let config = Arc::new(config);
    let notifier = Arc::new(ConsoleNotifier::new(&config.notify));
    let factory = Arc::new(WebDriverFactory::new(config.browser.clone()));

    let report = run_scrape(
        config.clone(),
        entries,
        headless,
        factory,
        notifier.clone(),
    )
    .await;

    let path = output_path(&config.output, chrono::Utc::now().timestamp());
    write_export(&path, &report.results)
        .with_context(|| format!("Failed to write export {}", path.display()))?;

    let message = if report.interrupted {
        INTERRUPTED_MESSAGE
    } else {
        SUCCESS_MESSAGE
    };
    notifier.message(message).await;

    Ok(())
}
