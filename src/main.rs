//! Site-Searcher main entry point
//!
//! This is the command-line interface for the Site-Searcher home page searcher.

use anyhow::Context;
use clap::Parser;
use site_searcher::config::{resolve_config, Config, ConfigOverrides};
use site_searcher::input::read_ranked_list;
use site_searcher::output::{print_summary, TextReport};
use site_searcher::search::{Coordinator, Matcher};
use site_searcher::RequestRecord;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Searcher: search the home pages of ranked websites
///
/// Fetches the home page of every site in a ranked list, at most a fixed
/// number at a time, and writes the case-insensitive matches of a regular
/// expression per site, in rank order.
#[derive(Parser, Debug)]
#[command(name = "site-searcher")]
#[command(version)]
#[command(about = "Search the home pages of ranked websites", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Ranked URL list [default: urls.txt]
    #[arg(long, value_name = "FILE")]
    infile: Option<PathBuf>,

    /// Report file [default: out.txt]
    #[arg(long, value_name = "FILE")]
    outfile: Option<PathBuf>,

    /// Regular expression, matched case-insensitively [default: new.?]
    #[arg(long = "regexp", value_name = "PATTERN")]
    pattern: Option<String>,

    /// Diagnostics: 0 = off, 1 = per-event summary, 2 = per-event detail
    #[arg(long, alias = "debugLevel", value_name = "LEVEL")]
    debug_level: Option<u8>,

    /// Maximum simultaneous HTTP requests [default: 20]
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Block size as a multiple of --concurrency [default: 5]
    #[arg(long, value_name = "N")]
    block_factor: Option<usize>,

    /// Per-request timeout in seconds [default: 15]
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "debug_level")]
    quiet: bool,

    /// Validate config and show what would be searched without fetching anything
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input_path: self.infile.clone(),
            output_path: self.outfile.clone(),
            pattern: self.pattern.clone(),
            max_concurrent_requests: self.concurrency,
            block_factor: self.block_factor,
            request_timeout_secs: self.timeout,
            debug_level: self.debug_level,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load and validate configuration
    let (config, config_hash) = resolve_config(cli.config.as_deref(), &cli.overrides())
        .context("Failed to load configuration")?;

    // Setup logging based on verbosity
    setup_logging(config.logging.debug_level, cli.quiet);

    if let (Some(path), Some(hash)) = (&cli.config, &config_hash) {
        tracing::info!("Configuration {} loaded (hash: {})", path.display(), hash);
    }

    tracing::info!(
        "Web search running. input={:?}, output={:?}, regexp={:?}",
        config.input.path.display().to_string(),
        config.output.path.display().to_string(),
        config.search.pattern
    );

    // Everything fatal is checked before the first request goes out
    let matcher = Matcher::new(&config.search.pattern)?;
    let records = read_ranked_list(&config.input.path)?;

    if cli.dry_run {
        handle_dry_run(&config, &records);
    } else {
        handle_search(config, matcher, records, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on the debug level
fn setup_logging(debug_level: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match debug_level {
            0 => EnvFilter::new("site_searcher=info,warn"),
            1 => EnvFilter::new("site_searcher=debug,info"),
            2 => EnvFilter::new("site_searcher=trace,debug"),
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

/// Handles the --dry-run mode: shows what would be searched
fn handle_dry_run(config: &Config, records: &[RequestRecord]) {
    println!("=== Site-Searcher Dry Run ===\n");

    let options = config.search_options();

    println!("Search Configuration:");
    println!("  Pattern: {} (case-insensitive)", config.search.pattern);
    println!("  Max concurrent requests: {}", options.max_concurrent_requests);
    println!("  Block size: {}", options.block_size());
    println!("  Request timeout: {}s", options.request_timeout.as_secs());
    println!("  User agent: {}", options.user_agent);

    println!("\nFiles:");
    println!("  Input: {}", config.input.path.display());
    println!("  Output: {}", config.output.path.display());

    println!("\nTargets ({}):", records.len());
    for record in records.iter().take(10) {
        println!("  {}. {}", record.rank(), record.target());
    }
    if records.len() > 10 {
        println!("  ... and {} more", records.len() - 10);
    }

    let blocks = records.len().div_ceil(options.block_size());
    println!("\n✓ Configuration is valid");
    println!("✓ Would search {} sites in {} blocks", records.len(), blocks);
}

/// Handles the main search operation
async fn handle_search(
    config: Config,
    matcher: Matcher,
    records: Vec<RequestRecord>,
    quiet: bool,
) -> anyhow::Result<()> {
    let mut report = TextReport::create(&config.output.path)
        .with_context(|| format!("Cannot write report to {}", config.output.path.display()))?;

    let coordinator = Coordinator::new(matcher, config.search_options())?;

    match coordinator.run(records, &mut report).await {
        Ok(summary) => {
            tracing::info!(
                "Search completed, report written to {}",
                config.output.path.display()
            );
            if !quiet {
                print_summary(&summary);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Search failed: {}", e);
            Err(e.into())
        }
    }
}
