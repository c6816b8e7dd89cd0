//! Listing-Sweep main entry point
//!
//! This is the command-line interface for the Listing-Sweep directory scraper.

use anyhow::{bail, Context};
use clap::Parser;
use listing_sweep::config::{load_config_with_hash, Config};
use listing_sweep::crawler::{CrawlOutcome, CrawlReport, CrawlSession};
use listing_sweep::output::{export_csv, print_statistics};
use listing_sweep::{ListingRecord, SearchQuery};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Listing-Sweep: a directory-site scraper
///
/// Searches a business listings site for an occupation in a location,
/// follows every results page, and prints each distinct business as it is
/// found. The collected records can be exported as labeled CSV rows.
#[derive(Parser, Debug)]
#[command(name = "listing-sweep")]
#[command(version)]
#[command(about = "A directory-site scraper", long_about = None)]
struct Cli {
    /// Occupation or business category to search for
    #[arg(value_name = "OCCUPATION")]
    occupation: String,

    /// City or region to search in
    #[arg(value_name = "LOCATION")]
    location: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Export the collected records to this file (".csv" is added if no extension)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the first search URL without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            (Config::default(), None)
        }
    };

    let query = SearchQuery::new(cli.occupation.clone(), cli.location.clone());
    let export_path = cli
        .output
        .clone()
        .or_else(|| config.output.export_path.as_ref().map(PathBuf::from));

    if cli.dry_run {
        return handle_dry_run(config, query, export_path);
    }

    let report = handle_crawl(config, config_hash, query, cli.quiet).await?;

    if let Some(path) = export_path {
        let written = export_csv(&report.records, &path)
            .with_context(|| format!("Failed to export records to {}", path.display()))?;
        if !cli.quiet {
            println!("✓ {} records exported to: {}", report.records.len(), written.display());
        }
    }

    if !cli.quiet {
        println!();
        print_statistics(&report.stats);
    }

    match report.outcome {
        CrawlOutcome::Done => {
            tracing::info!("Crawl completed successfully");
            Ok(())
        }
        CrawlOutcome::Cancelled => {
            tracing::warn!("Crawl cancelled; results are partial");
            Ok(())
        }
        CrawlOutcome::Aborted(e) => {
            if e.needs_intervention() {
                tracing::error!("The site is asking for a CAPTCHA; solve it in a browser before crawling again");
            }
            bail!("Crawl failed: {}", e)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so the record stream on stdout stays clean.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("listing_sweep=info,warn"),
            1 => EnvFilter::new("listing_sweep=debug,info"),
            2 => EnvFilter::new("listing_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(
    config: Config,
    query: SearchQuery,
    export_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    println!("=== Listing-Sweep Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Page delay: {}ms", config.crawler.page_delay);
    println!("  Request timeout: {}s", config.crawler.request_timeout);
    println!("  Connect timeout: {}s", config.crawler.connect_timeout);
    println!("  User agent: {}", config.user_agent.value);

    println!("\nSelectors:");
    println!("  Listing: {}", config.selectors.listing);
    println!("  Page count: {}", config.selectors.page_count);
    println!("  Challenge marker: {}", config.selectors.captcha);

    if let Some(path) = &export_path {
        println!("\nExport: {}", path.display());
    }

    let session = CrawlSession::new(config, query)?;

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling at {}", session.search_url());

    Ok(())
}

/// Runs the crawl on its own task and prints records as they arrive
async fn handle_crawl(
    config: Config,
    config_hash: Option<String>,
    query: SearchQuery,
    quiet: bool,
) -> anyhow::Result<CrawlReport> {
    let mut session = CrawlSession::new(config, query)?;
    if let Some(hash) = config_hash {
        session = session.with_config_hash(hash);
    }
    let interrupt_token = session.cancellation_token();

    let (tx, mut rx) = mpsc::unbounded_channel::<ListingRecord>();
    let crawl_task = tokio::spawn(async move {
        let mut tx = tx;
        session.run(&mut tx).await
    });

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current page");
            interrupt_token.cancel();
        }
    });

    while let Some(record) = rx.recv().await {
        if !quiet {
            println!("{}\n", record);
        }
    }

    let report = crawl_task.await.context("Crawl task panicked")?;
    Ok(report)
}
