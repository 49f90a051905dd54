//! League table and run configuration.
//!
//! Values are resolved in three layers, later ones winning:
//!
//! 1. Built-in defaults ([`default_leagues`], [`DEFAULT_USER_AGENT`], [`DEFAULT_OUTPUT`])
//! 2. An optional YAML file passed with `--config`
//! 3. Command-line flags and their environment variables
//!
//! # YAML format
//!
//! ```yaml
//! user_agent: Mozilla/5.0
//! output: data/injured_players.json
//! leagues:
//!   - id: england-premier-league
//!     url: https://www.sportsgambler.com/injuries/football/england-premier-league/
//!   - id: spain-la-liga
//!     url: https://www.sportsgambler.com/injuries/football/spain-la-liga/
//! ```
//!
//! `leagues` is a sequence so the configured order is the output order.

use crate::cli::Cli;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument, warn};
use url::Url;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_OUTPUT: &str = "injured_players.json";

const SPORTSGAMBLER_BASE: &str = "https://www.sportsgambler.com/injuries/football";

const DEFAULT_LEAGUE_IDS: [&str; 7] = [
    "england-premier-league",
    "spain-la-liga",
    "italy-serie-a",
    "germany-bundesliga",
    "france-ligue-1",
    "uefa-europa-league",
    "uefa-champions-league",
];

/// A competition to scrape: an opaque id and the page listing its injuries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct League {
    pub id: String,
    pub url: String,
}

impl League {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// The seven European competitions scraped when no config file is given.
pub fn default_leagues() -> Vec<League> {
    DEFAULT_LEAGUE_IDS
        .iter()
        .map(|id| League::new(*id, format!("{SPORTSGAMBLER_BASE}/{id}/")))
        .collect()
}

/// Contents of a `--config` YAML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub leagues: Vec<League>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl ConfigFile {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_yaml::from_str(text)?;
        validate_leagues(&file.leagues)?;
        Ok(file)
    }

    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let file = Self::from_yaml(&text)?;
        info!(leagues = file.leagues.len(), "Loaded league table");
        Ok(file)
    }
}

/// Reject tables that cannot produce a meaningful report.
pub fn validate_leagues(leagues: &[League]) -> Result<(), ConfigError> {
    if leagues.is_empty() {
        return Err(ConfigError::Empty);
    }
    let mut seen = HashSet::new();
    for league in leagues {
        if league.id.trim().is_empty() {
            return Err(ConfigError::BlankLeague);
        }
        if !seen.insert(league.id.as_str()) {
            return Err(ConfigError::DuplicateLeague(league.id.clone()));
        }
        Url::parse(&league.url).map_err(|source| ConfigError::InvalidUrl {
            league: league.id.clone(),
            url: league.url.clone(),
            source,
        })?;
    }
    Ok(())
}

/// Keep only the leagues named in `only`, in table order.
///
/// An empty filter keeps everything. Ids not in the table are logged and ignored.
pub fn select_leagues(leagues: Vec<League>, only: &[String]) -> Vec<League> {
    if only.is_empty() {
        return leagues;
    }
    for id in only {
        if !leagues.iter().any(|l| &l.id == id) {
            warn!(league = %id, "Unknown league requested; ignoring");
        }
    }
    leagues
        .into_iter()
        .filter(|l| only.contains(&l.id))
        .collect()
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    pub leagues: Vec<League>,
    pub user_agent: String,
    pub output: PathBuf,
    pub with_metadata: bool,
}

impl ScrapeConfig {
    /// Merge built-in defaults, the optional config file and CLI flags.
    pub async fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => Some(ConfigFile::load(path).await?),
            None => None,
        };
        Self::merge(cli, file)
    }

    pub fn merge(cli: &Cli, file: Option<ConfigFile>) -> Result<Self, ConfigError> {
        let ConfigFile {
            leagues,
            user_agent,
            output,
        } = file.unwrap_or_else(|| ConfigFile {
            leagues: default_leagues(),
            ..ConfigFile::default()
        });

        let leagues = select_leagues(leagues, &cli.league);
        if leagues.is_empty() {
            return Err(ConfigError::Empty);
        }

        Ok(Self {
            leagues,
            user_agent: cli
                .user_agent
                .clone()
                .or(user_agent)
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            output: cli
                .output
                .clone()
                .or(output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            with_metadata: cli.metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("injury_scrape").chain(args.iter().copied()))
    }

    #[test]
    fn test_default_leagues_order_and_urls() {
        let leagues = default_leagues();
        assert_eq!(leagues.len(), 7);
        assert_eq!(leagues[0].id, "england-premier-league");
        assert_eq!(
            leagues[0].url,
            "https://www.sportsgambler.com/injuries/football/england-premier-league/"
        );
        assert_eq!(leagues[6].id, "uefa-champions-league");
        assert!(validate_leagues(&leagues).is_ok());
    }

    #[test]
    fn test_config_file_parses_in_order() {
        let yaml = r#"
user_agent: test-agent
leagues:
  - id: b-league
    url: https://example.com/b/
  - id: a-league
    url: https://example.com/a/
"#;
        let file = ConfigFile::from_yaml(yaml).unwrap();
        let ids: Vec<_> = file.leagues.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["b-league", "a-league"]);
        assert_eq!(file.user_agent.as_deref(), Some("test-agent"));
        assert!(file.output.is_none());
    }

    #[test]
    fn test_config_file_rejects_bad_tables() {
        assert!(matches!(
            ConfigFile::from_yaml("leagues: []"),
            Err(ConfigError::Empty)
        ));
        assert!(matches!(
            ConfigFile::from_yaml("leagues:\n  - id: x\n    url: not a url\n"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            ConfigFile::from_yaml(
                "leagues:\n  - id: x\n    url: https://a.example/\n  - id: x\n    url: https://b.example/\n"
            ),
            Err(ConfigError::DuplicateLeague(id)) if id == "x"
        ));
        assert!(matches!(
            ConfigFile::from_yaml("leagues:\n  - id: ' '\n    url: https://a.example/\n"),
            Err(ConfigError::BlankLeague)
        ));
        assert!(matches!(
            ConfigFile::from_yaml("leagues: [}"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_select_leagues_keeps_table_order() {
        let leagues = default_leagues();
        let picked = select_leagues(
            leagues,
            &["france-ligue-1".to_string(), "spain-la-liga".to_string(), "nope".to_string()],
        );
        let ids: Vec<_> = picked.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["spain-la-liga", "france-ligue-1"]);
    }

    #[test]
    fn test_merge_defaults() {
        let config = ScrapeConfig::merge(&cli(&[]), None).unwrap();
        assert_eq!(config.leagues, default_leagues());
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert!(!config.with_metadata);
    }

    #[test]
    fn test_merge_cli_overrides_file() {
        let file = ConfigFile {
            leagues: vec![League::new("x", "https://x.example/")],
            user_agent: Some("file-agent".to_string()),
            output: Some(PathBuf::from("from-file.json")),
        };
        let config = ScrapeConfig::merge(&cli(&["-o", "cli.json", "--metadata"]), Some(file)).unwrap();
        assert_eq!(config.output, PathBuf::from("cli.json"));
        assert_eq!(config.user_agent, "file-agent");
        assert!(config.with_metadata);
    }

    #[test]
    fn test_merge_filter_matching_nothing_is_empty() {
        assert!(matches!(
            ScrapeConfig::merge(&cli(&["-l", "nowhere"]), None),
            Err(ConfigError::Empty)
        ));
    }
}
