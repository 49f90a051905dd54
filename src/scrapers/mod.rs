//! League scraping pipeline.
//!
//! Each league goes through the same two steps, strictly one league at a time:
//!
//! 1. **Fetching** ([`fetch`]): download the league page
//! 2. **Extracting** ([`extract`]): turn the page into [`PlayerInjury`] records
//!
//! A failed download does not stop the run; the league gets a single error
//! record instead (see [`LeagueResult::failed`]).
//!
//! [`PlayerInjury`]: crate::models::PlayerInjury

pub mod extract;
pub mod fetch;

use crate::config::League;
use crate::models::{InjuryReport, LeagueResult};
use fetch::PageSource;
use tracing::{error, info, instrument};

/// Scrape one league. Never fails; fetch errors become an error record.
#[instrument(level = "info", skip_all, fields(league = %league.id))]
pub async fn scrape_league<S: PageSource>(source: &S, league: &League) -> LeagueResult {
    info!("Scraping data for {} from {}...", league.id, league.url);

    match source.fetch(&league.url).await {
        Ok(html) => {
            let players = extract::extract_page(&html);
            info!(count = players.len(), "Found {} injuries for {}", players.len(), league.id);
            LeagueResult::Players(players)
        }
        Err(e) => {
            error!(url = %e.url(), error = %e, "Error fetching {}", league.url);
            LeagueResult::failed(&league.url)
        }
    }
}

/// Scrape every league in order and collect the results into one report.
#[instrument(level = "info", skip_all, fields(leagues = leagues.len()))]
pub async fn scrape_leagues<S: PageSource>(source: &S, leagues: &[League]) -> InjuryReport {
    let mut report = InjuryReport::new();
    for league in leagues {
        let result = scrape_league(source, league).await;
        report.insert(league.id.clone(), result);
    }

    info!(
        leagues = report.len(),
        failed = report.failed_leagues(),
        players = report.total_players(),
        "Scraped all leagues"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use reqwest::StatusCode;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Serves canned pages; any other URL answers 404. Records request order.
    #[derive(Default)]
    struct StaticPages {
        pages: HashMap<String, String>,
        requested: RefCell<Vec<String>>,
    }

    impl StaticPages {
        fn with(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }
    }

    impl PageSource for StaticPages {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: StatusCode::NOT_FOUND,
            })
        }
    }

    const ARSENAL_PAGE: &str = r#"<html><body><div>
<h3>Premier League Injuries</h3>
<h3>Arsenal</h3>
<div class="inj-row"><div>
<span>Bukayo Saka</span>
<span>Forward</span>
<span>5</span>
<span>2</span>
<span>1</span>
<span>Hamstring injury</span>
<span>20.03.2025</span>
</div></div>
</div></body></html>"#;

    const BAYERN_PAGE: &str = r#"<html><body><div>
<h3>Bayern München</h3>
<div class="inj-row"><div>
Jamal Musiala
Midfielder
10
4
</div></div>
</div></body></html>"#;

    #[tokio::test]
    async fn test_scrape_leagues_keeps_order_and_isolates_failures() {
        let source = StaticPages::default()
            .with("https://e.example/pl/", ARSENAL_PAGE)
            .with("https://e.example/bl/", BAYERN_PAGE);
        let leagues = vec![
            League::new("pl", "https://e.example/pl/"),
            League::new("missing", "https://e.example/gone/"),
            League::new("bl", "https://e.example/bl/"),
        ];

        let report = scrape_leagues(&source, &leagues).await;

        let ids: Vec<_> = report.leagues().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["pl", "missing", "bl"]);
        assert_eq!(
            *source.requested.borrow(),
            vec!["https://e.example/pl/", "https://e.example/gone/", "https://e.example/bl/"]
        );

        let pl = report.get("pl").unwrap().players();
        assert_eq!(pl.len(), 1);
        assert_eq!(pl[0].player_name, "Bukayo Saka");
        assert_eq!(pl[0].expected_return, "20.03.2025");

        let missing = report.get("missing").unwrap();
        assert_eq!(missing, &LeagueResult::failed("https://e.example/gone/"));

        let bl = report.get("bl").unwrap().players();
        assert_eq!(bl[0].team, "Bayern München");
        assert_eq!(bl[0].info, "N/A");

        assert_eq!(report.failed_leagues(), 1);
        assert_eq!(report.total_players(), 2);
    }

    #[tokio::test]
    async fn test_failure_record_mentions_url() {
        let source = StaticPages::default();
        let result = scrape_league(&source, &League::new("x", "https://e.example/x/")).await;
        let LeagueResult::Failed([failure]) = &result else {
            panic!("expected failure, got {result:?}");
        };
        assert!(failure.error.contains("https://e.example/x/"));
    }

    #[tokio::test]
    async fn test_page_without_rows_yields_empty_list() {
        let source = StaticPages::default().with("https://e.example/empty/", "<html></html>");
        let result = scrape_league(&source, &League::new("e", "https://e.example/empty/")).await;
        assert_eq!(result, LeagueResult::Players(vec![]));
    }
}
