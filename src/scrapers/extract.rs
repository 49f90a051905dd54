//! Injury table extraction.
//!
//! League pages list injuries as a flat run of siblings with no nesting
//! between a team and its players:
//!
//! ```text
//! <h3>Arsenal</h3>
//! <div class="inj-row"><div>Bukayo Saka\nForward\n5\n2\n1\nHamstring injury\n20.03.2025</div></div>
//! <div class="inj-row">...</div>
//! <div class="ad">...</div>
//! <h3>Chelsea</h3>
//! ...
//! ```
//!
//! Extraction runs in three steps:
//!
//! 1. **Classify**: every `<h3>`, in document order, and its element siblings
//!    up to the next `<h3>` become a [`PageNode`] sequence (heading, row, or
//!    anything else).
//! 2. **Segment**: heading positions are collected first, then every row is
//!    assigned to the nearest heading before it. Rows under a heading that is
//!    a section or competition title, or with no heading at all, are dropped.
//! 3. **Map fields**: the row's first inner `<div>` is split into lines and
//!    mapped by position (see [`lines_to_fields`]).
//!
//! Nothing here fails. Rows that do not look like player rows are classified
//! as a skipped [`RowOutcome`] and left out of the result.

use crate::models::{NOT_AVAILABLE, PlayerInjury};
use crate::utils::{is_team_heading, non_empty_lines, or_not_available, truncate_for_log};
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

/// Heading tier used for team names (and, unhelpfully, section titles).
pub const HEADING_TAG: &str = "h3";

/// Class token carried by player rows.
pub const ROW_CLASS: &str = "inj-row";

/// Rows with fewer lines than this cannot hold a name and position.
pub const MIN_ROW_LINES: usize = 4;

static HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(HEADING_TAG).expect("heading selector is valid"));

/// One element of a heading's sibling run, reduced to what extraction needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageNode {
    /// A heading of the team tier, with its trimmed text.
    Heading(String),
    /// A player row, with the text of its first inner `<div>` if it has one.
    Row(Option<String>),
    Other,
}

impl PageNode {
    pub fn classify(element: ElementRef<'_>) -> Self {
        let value = element.value();
        if value.name() == HEADING_TAG {
            let text = element.text().collect::<String>();
            return PageNode::Heading(text.trim().to_string());
        }
        if value.classes().any(|class| class == ROW_CLASS) {
            let container = element
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .find(|e| e.value().name() == "div")
                .map(|div| div.text().collect::<String>());
            return PageNode::Row(container);
        }
        PageNode::Other
    }
}

/// A row attributed to an accepted team heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateRow<'a> {
    pub team: &'a str,
    pub container: Option<&'a str>,
}

/// Player fields mapped from a row's lines, before the team is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFields {
    pub player_name: String,
    pub position: String,
    pub info: String,
    pub expected_return: String,
}

/// What became of one candidate row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Accepted(PlayerInjury),
    SkippedNoContainer,
    SkippedTooFewLines,
    SkippedNoName,
}

impl RowOutcome {
    fn label(&self) -> &'static str {
        match self {
            RowOutcome::Accepted(_) => "accepted",
            RowOutcome::SkippedNoContainer => "no_container",
            RowOutcome::SkippedTooFewLines => "too_few_lines",
            RowOutcome::SkippedNoName => "no_name",
        }
    }
}

/// Build one [`PageNode`] sequence per team-tier heading, in document order.
///
/// Each sequence starts with the heading and holds its following element
/// siblings up to the next heading of the same tier.
pub fn node_sequences(document: &Html) -> Vec<Vec<PageNode>> {
    document
        .select(&HEADING_SELECTOR)
        .map(|heading| {
            let block = heading
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .take_while(|e| e.value().name() != HEADING_TAG)
                .map(PageNode::classify);
            std::iter::once(PageNode::classify(heading))
                .chain(block)
                .collect()
        })
        .collect()
}

/// Attribute each row to the closest heading before it.
///
/// Rows whose heading is not a team (per [`is_team_heading`]) or that precede
/// every heading are dropped. Document order is preserved.
pub fn segment(nodes: &[PageNode]) -> Vec<CandidateRow<'_>> {
    let headings: Vec<usize> = nodes
        .iter()
        .positions(|node| matches!(node, PageNode::Heading(_)))
        .collect();

    nodes
        .iter()
        .enumerate()
        .filter_map(|(idx, node)| {
            let PageNode::Row(container) = node else {
                return None;
            };
            let before = headings.partition_point(|&h| h < idx);
            let heading = headings[before.checked_sub(1)?];
            match &nodes[heading] {
                PageNode::Heading(team) if is_team_heading(team) => Some(CandidateRow {
                    team: team.as_str(),
                    container: container.as_deref(),
                }),
                _ => None,
            }
        })
        .collect()
}

/// Map a row's lines to fields by position.
///
/// Source rows read: name, position, matches, goals, assists, injury, return date.
///
/// | lines | `info`     | `expected_return` |
/// |-------|------------|-------------------|
/// | ≥ 7   | `lines[5]` | `lines[6]`        |
/// | 6     | `lines[5]` | `"N/A"`           |
/// | < 6   | `"N/A"`    | `"N/A"`           |
///
/// An empty or `-` value at index 5 or 6 also becomes `"N/A"`.
pub fn lines_to_fields(lines: &[String]) -> RowFields {
    let line = |i: usize| lines.get(i).map(String::as_str);

    let player_name = match line(0) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    };
    let position = line(1).unwrap_or(NOT_AVAILABLE).to_string();

    let (info, expected_return) = match lines.len() {
        n if n >= 7 => (or_not_available(line(5)), or_not_available(line(6))),
        6 => (or_not_available(line(5)), NOT_AVAILABLE.to_string()),
        _ => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
    };

    RowFields {
        player_name,
        position,
        info,
        expected_return,
    }
}

/// Decide whether a candidate row yields a record.
pub fn classify_row(row: CandidateRow<'_>) -> RowOutcome {
    let Some(text) = row.container else {
        return RowOutcome::SkippedNoContainer;
    };

    let lines = non_empty_lines(text);
    if lines.len() < MIN_ROW_LINES {
        debug!(team = row.team, text = %truncate_for_log(text.trim(), 80), "Row too short");
        return RowOutcome::SkippedTooFewLines;
    }

    let fields = lines_to_fields(&lines);
    if fields.player_name.is_empty() || fields.player_name == NOT_AVAILABLE {
        return RowOutcome::SkippedNoName;
    }

    RowOutcome::Accepted(PlayerInjury {
        team: row.team.to_string(),
        player_name: fields.player_name,
        position: fields.position,
        info: fields.info,
        expected_return: fields.expected_return,
    })
}

/// Extract player records from one classified node sequence.
pub fn extract(nodes: &[PageNode]) -> Vec<PlayerInjury> {
    let outcomes: Vec<RowOutcome> = segment(nodes).into_iter().map(classify_row).collect();

    let tally = outcomes.iter().map(RowOutcome::label).counts();
    if !tally.is_empty() {
        debug!(?tally, "Classified injury rows");
    }

    outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            RowOutcome::Accepted(player) => Some(player),
            _ => None,
        })
        .collect()
}

/// Parse a league page and extract every player record on it.
#[instrument(level = "debug", skip_all, fields(bytes = html.len()))]
pub fn extract_page(html: &str) -> Vec<PlayerInjury> {
    let document = Html::parse_document(html);
    node_sequences(&document)
        .iter()
        .flat_map(|nodes| extract(nodes))
        .collect()
}
