//! linkrake main entry point
//!
//! This is the command-line interface for the linkrake catalog link checker.

use clap::Parser;
use linkrake::config::load_config;
use linkrake::crawler::run_pipeline;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// linkrake: a paginated catalog link checker
///
/// linkrake walks a catalog site's "next page" chain to collect every
/// same-site link, checks each link with a pool of parallel workers, and
/// appends the outcomes to a CSV log.
#[derive(Parser, Debug)]
#[command(name = "linkrake")]
#[command(version)]
#[command(about = "Collects catalog links and checks their reachability", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would run, without touching the network
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)?;

    if cli.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    // An interrupt stops the pipeline mid-flight; returning from main shuts
    // the runtime down, which drops the worker tasks and with them each
    // worker's client.
    tokio::select! {
        result = run_pipeline(config) => {
            result?;
            tracing::info!("Run complete");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, shutting down");
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkrake=info,warn"),
            1 => EnvFilter::new("linkrake=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would run
fn print_dry_run(config: &linkrake::Config) {
    println!("=== linkrake dry run ===\n");

    println!("Crawl:");
    println!("  Base URL: {}", config.crawl.base_url);
    println!("  Delay: {}ms", config.crawl.delay_ms);
    println!("  Workers: {}", config.crawl.worker_count);
    println!(
        "  Collector timeout: {}s",
        config.crawl.collector_timeout_secs
    );
    println!("  Fetch timeout: {}s", config.crawl.fetch_timeout_secs);

    println!("\nOutput:");
    println!("  Result log: {}", config.output.log_path);

    println!("\n✓ Configuration is valid");
}
