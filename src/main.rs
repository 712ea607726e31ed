//! Orbweave main entry point
//!
//! Command-line interface for running a crawl session from a TOML
//! configuration file.

use clap::Parser;
use orbweave::config::{load_config, Config, StorageBackend};
use orbweave::driver::HttpDriver;
use orbweave::session::{Performance, SessionController};
use orbweave::storage::{JsonFileStorage, SqliteStorage, Storage, PERFORMANCE_DOCUMENT};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Orbweave: a stateful URL frontier and crawl-session controller
///
/// Orbweave visits one site page by page, never the same page twice,
/// pausing politely between loads. Interrupted sessions resume from their
/// persisted state.
#[derive(Parser, Debug)]
#[command(name = "orbweave")]
#[command(version)]
#[command(about = "A single-site, page-by-page crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Resume an interrupted session from persisted state
    #[arg(long, conflicts_with = "stats")]
    resume: bool,

    /// Show the persisted performance record and exit
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let path = Path::new(&config.storage.path).to_path_buf();
    match config.storage.backend {
        StorageBackend::Json => {
            let storage = JsonFileStorage::new(&path)?;
            dispatch(&cli, config, storage).await
        }
        StorageBackend::Sqlite => {
            let storage = SqliteStorage::new(&path)?;
            dispatch(&cli, config, storage).await
        }
    }
}

async fn dispatch<S: Storage>(
    cli: &Cli,
    config: Config,
    storage: S,
) -> Result<(), Box<dyn std::error::Error>> {
    if cli.stats {
        return show_stats(&storage);
    }

    run_session(config, storage, cli.resume).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("orbweave=info,warn"),
            1 => EnvFilter::new("orbweave=debug,info"),
            2 => EnvFilter::new("orbweave=trace,debug"),
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

/// Handles the --stats mode: prints the persisted performance record
fn show_stats<S: Storage>(storage: &S) -> Result<(), Box<dyn std::error::Error>> {
    if !storage.has(PERFORMANCE_DOCUMENT) {
        println!("No performance record found; has a session run here?");
        return Ok(());
    }

    let performance: Performance = serde_json::from_value(storage.get(PERFORMANCE_DOCUMENT)?)?;

    println!("=== Session Performance ===\n");
    println!("Started:     {}", performance.start_time);
    match performance.end_time {
        Some(end) => println!("Ended:       {}", end),
        None => println!("Ended:       (still running or interrupted)"),
    }
    println!("Duration:    {}s", performance.duration_seconds);
    println!("Iterations:  {}", performance.iteration_count);
    println!("Errors:      {}", performance.error_count);
    println!("Visited:     {}", performance.visited_count);
    println!("Queued:      {}", performance.urls_to_visit_count);
    println!(
        "Completion:  {:.1}%",
        performance.completion() * 100.0
    );

    Ok(())
}

/// Runs a crawl session to completion
async fn run_session<S: Storage>(
    config: Config,
    storage: S,
    resume: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let driver = HttpDriver::new(&config.driver)?;
    let mut controller = SessionController::new(config, driver, storage)?;

    // Ctrl-C requests a clean stop; the page in flight still finishes.
    let handle = controller.handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping after the current page");
            handle.stop();
        }
    });

    let result = if resume {
        tracing::info!("Resuming session from persisted state");
        controller.resume().await
    } else {
        tracing::info!("Starting fresh session");
        controller.start().await
    };

    match result {
        Ok(()) => {
            tracing::info!(
                "Session finished: {} pages visited, {} errors",
                controller.performance().visited_count,
                controller.performance().error_count
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Session failed: {}", e);
            Err(e.into())
        }
    }
}
