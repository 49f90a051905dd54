//! Command-line interface definitions.
//!
//! Every option can also come from an environment variable or, for the league
//! table, a YAML file (see [`crate::config`]).

use clap::Parser;
use std::path::PathBuf;

/// Scrape football injury and suspension tables into one JSON report.
///
/// # Examples
///
/// ```sh
/// # All seven default competitions into ./injured_players.json
/// injury_scrape
///
/// # Two leagues, custom output path, with a metadata trailer
/// injury_scrape -l spain-la-liga -l italy-serie-a -o out/injuries.json --metadata
///
/// # League table from a file
/// injury_scrape --config leagues.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path of the JSON report [default: injured_players.json]
    #[arg(short, long, env = "INJURY_OUTPUT")]
    pub output: Option<PathBuf>,

    /// YAML file with the league table to scrape instead of the built-in one
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// User-Agent header sent with every request [default: Mozilla/5.0]
    #[arg(long, env = "INJURY_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Only scrape these league ids (repeatable)
    #[arg(short, long)]
    pub league: Vec<String>,

    /// Append a `_metadata` object with run statistics to the report
    #[arg(long)]
    pub metadata: bool,
}
