//! # Injury Scrape
//!
//! Collects injured and suspended football players from league injury pages
//! and writes them to a single JSON report keyed by league.
//!
//! ## Usage
//!
//! ```sh
//! injury_scrape -o injured_players.json
//! ```
//!
//! ## Architecture
//!
//! The run is a straight pipeline, one league at a time:
//! 1. **Fetching**: download each league page
//! 2. **Extracting**: group player rows under their team heading and map fields
//! 3. **Aggregating**: collect per-league results in configured order
//! 4. **Output**: write the report as indented JSON
//!
//! A league whose page cannot be fetched gets an error record; a report that
//! cannot be written is logged. Neither changes the exit status.

use chrono::Utc;
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use config::ScrapeConfig;
use outputs::json;
use scrapers::fetch::HttpFetcher;

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("injury_scrape starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = match ScrapeConfig::resolve(&args).await {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration; nothing to scrape");
            return ExitCode::FAILURE;
        }
    };
    info!(
        leagues = config.leagues.len(),
        output = %config.output.display(),
        user_agent = %config.user_agent,
        "Configuration resolved"
    );

    let fetcher = match HttpFetcher::new(&config.user_agent) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!(error = %e, "Could not build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    // ---- Scrape ----
    let mut report = scrapers::scrape_leagues(&fetcher, &config.leagues).await;
    if config.with_metadata {
        report.stamp(Utc::now());
        debug!(metadata = ?report.metadata(), "Stamped report");
    }

    // ---- Output ----
    if let Err(e) = json::write_report(&report, &config.output).await {
        error!(path = %config.output.display(), error = %e, "Error saving file");
    }

    for (league, result) in report.leagues() {
        info!(
            league,
            players = result.players().len(),
            failed = result.is_failure(),
            "League summary"
        );
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        leagues = report.len(),
        failed_leagues = report.failed_leagues(),
        players = report.total_players(),
        "Execution complete"
    );

    ExitCode::SUCCESS
}
