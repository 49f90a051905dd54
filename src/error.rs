//! Error types for the scrape pipeline.
//!
//! Only three things can go wrong in a way worth naming:
//!
//! - [`FetchError`]: one league page could not be downloaded. Recovered by the
//!   aggregator, which substitutes an error record for that league.
//! - [`WriteError`]: the final report could not be written. Logged by `main`.
//! - [`ConfigError`]: a user-supplied league table is unusable.
//!
//! Malformed markup is never an error; see [`crate::scrapers::extract`].

use reqwest::StatusCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to download one league page.
#[derive(Error, Debug)]
pub enum FetchError {
    /// DNS, connect, TLS, timeout or body read failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
}

impl FetchError {
    /// The URL that could not be fetched.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. } | FetchError::Status { url, .. } => url,
        }
    }
}

/// Failure to persist the aggregate report.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("could not encode report as JSON: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("could not write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Problems with a league table loaded from disk.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("league `{league}` has an invalid URL `{url}`: {source}")]
    InvalidUrl {
        league: String,
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("league table is empty")]
    Empty,

    #[error("league id must not be empty")]
    BlankLeague,

    #[error("league `{0}` is listed more than once")]
    DuplicateLeague(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_names_url() {
        let e = FetchError::Status {
            url: "https://example.com/x/".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(e.url(), "https://example.com/x/");
        let msg = e.to_string();
        assert!(msg.contains("https://example.com/x/"));
        assert!(msg.contains("404"));
    }

    #[test]
    fn test_write_error_names_path() {
        let e = WriteError::Io {
            path: PathBuf::from("/nope/out.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(e.to_string().contains("/nope/out.json"));
    }
}
