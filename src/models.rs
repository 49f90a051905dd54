//! Data models for scraped injury records and the aggregate report.
//!
//! - [`PlayerInjury`]: one player row extracted from a league page
//! - [`ScrapeFailure`]: the record substituted for a league whose page could not be fetched
//! - [`LeagueResult`]: either the extracted rows or a single failure record
//! - [`InjuryReport`]: league id → [`LeagueResult`], in input order
//!
//! The JSON encoding of [`InjuryReport`] is the persisted artifact:
//!
//! ```text
//! {
//!     "england-premier-league": [
//!         { "team": "Arsenal", "player_name": "Bukayo Saka", ... }
//!     ],
//!     "spain-la-liga": [
//!         { "error": "Failed to scrape data from https://..." }
//!     ]
//! }
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Placeholder for a field the source row did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Key under which optional run metadata is stored in the report.
pub const METADATA_KEY: &str = "_metadata";

/// An injured or suspended player as listed on a league page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerInjury {
    /// Team heading text the row was listed under.
    pub team: String,
    pub player_name: String,
    pub position: String,
    /// Injury or suspension description, or `"N/A"`.
    pub info: String,
    /// Expected return date as printed by the source, or `"N/A"`.
    pub expected_return: String,
}

/// Stand-in record for a league whose page could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScrapeFailure {
    pub error: String,
}

impl ScrapeFailure {
    pub fn for_url(url: &str) -> Self {
        Self {
            error: format!("Failed to scrape data from {url}"),
        }
    }
}

/// Outcome for one league. The two shapes never mix.
///
/// Both serialize as a JSON array; a failure is always a one-element array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LeagueResult {
    Players(Vec<PlayerInjury>),
    Failed([ScrapeFailure; 1]),
}

impl LeagueResult {
    pub fn failed(url: &str) -> Self {
        LeagueResult::Failed([ScrapeFailure::for_url(url)])
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, LeagueResult::Failed(_))
    }

    /// Extracted rows; empty for a failed league.
    pub fn players(&self) -> &[PlayerInjury] {
        match self {
            LeagueResult::Players(players) => players,
            LeagueResult::Failed(_) => &[],
        }
    }
}

/// Optional trailer describing the run that produced a report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReportMetadata {
    /// RFC 3339 UTC timestamp.
    pub last_updated: String,
    pub total_leagues: usize,
    pub successful_leagues: usize,
}

/// Aggregate of every league's result, keyed by league id.
///
/// Leagues are kept in insertion order so the JSON object lists them in the
/// order they were configured. Serialization is hand-written for that reason;
/// a `HashMap` would shuffle them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjuryReport {
    leagues: Vec<(String, LeagueResult)>,
    metadata: Option<ReportMetadata>,
}

impl InjuryReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a league. A repeated id replaces the earlier entry in place.
    pub fn insert(&mut self, league: impl Into<String>, result: LeagueResult) {
        let league = league.into();
        match self.leagues.iter_mut().find(|(id, _)| *id == league) {
            Some((_, existing)) => *existing = result,
            None => self.leagues.push((league, result)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, league: &str) -> Option<&LeagueResult> {
        self.leagues
            .iter()
            .find(|(id, _)| id == league)
            .map(|(_, result)| result)
    }

    pub fn leagues(&self) -> impl Iterator<Item = (&str, &LeagueResult)> {
        self.leagues.iter().map(|(id, result)| (id.as_str(), result))
    }

    pub fn len(&self) -> usize {
        self.leagues.len()
    }

    pub fn failed_leagues(&self) -> usize {
        self.leagues.iter().filter(|(_, r)| r.is_failure()).count()
    }

    pub fn total_players(&self) -> usize {
        self.leagues.iter().map(|(_, r)| r.players().len()).sum()
    }

    pub fn metadata(&self) -> Option<&ReportMetadata> {
        self.metadata.as_ref()
    }

    /// Attach a `_metadata` trailer computed from the current contents.
    pub fn stamp(&mut self, at: DateTime<Utc>) {
        self.metadata = Some(ReportMetadata {
            last_updated: at.to_rfc3339_opts(SecondsFormat::Secs, true),
            total_leagues: self.len(),
            successful_leagues: self.len() - self.failed_leagues(),
        });
    }
}

impl Serialize for InjuryReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.leagues.len() + usize::from(self.metadata.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for (league, result) in &self.leagues {
            map.serialize_entry(league, result)?;
        }
        if let Some(meta) = &self.metadata {
            map.serialize_entry(METADATA_KEY, meta)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for InjuryReport {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ReportVisitor;

        impl<'de> Visitor<'de> for ReportVisitor {
            type Value = InjuryReport;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of league id to injury list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut report = InjuryReport::new();
                while let Some(key) = access.next_key::<String>()? {
                    if key == METADATA_KEY {
                        report.metadata = Some(access.next_value()?);
                    } else {
                        let result = access.next_value()?;
                        report.insert(key, result);
                    }
                }
                Ok(report)
            }
        }

        deserializer.deserialize_map(ReportVisitor)
    }
}
