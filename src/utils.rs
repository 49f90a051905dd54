//! Text helpers shared by the extractor and logging.
//!
//! - Heading classification against the exclusion vocabulary
//! - Splitting element text into trimmed, non-empty lines
//! - String truncation for log output

use crate::models::NOT_AVAILABLE;

/// Lower-cased fragments that mark a heading as a page or competition title
/// rather than a team. Matched as substrings, so a team whose name contains
/// one of these is also rejected.
pub const EXCLUDED_HEADING_WORDS: [&str; 11] = [
    "injuries",
    "suspensions",
    "premier",
    "liga",
    "bundesliga",
    "serie",
    "ligue",
    "la liga",
    "serie a",
    "news",
    "updates",
];

/// Whether a heading's text names a team.
///
/// Case-insensitive substring test against [`EXCLUDED_HEADING_WORDS`].
///
/// # Examples
///
/// ```ignore
/// assert!(is_team_heading("Arsenal"));
/// assert!(!is_team_heading("Premier League Injuries"));
/// ```
pub fn is_team_heading(text: &str) -> bool {
    let folded = text.trim().to_lowercase();
    !EXCLUDED_HEADING_WORDS
        .iter()
        .any(|word| folded.contains(word))
}

/// Split text on line breaks, trim every piece and drop the empty ones.
pub fn non_empty_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// The value itself, or `"N/A"` when it is empty or a bare `-`.
pub fn or_not_available(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() && v != "-" => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a count of
/// the dropped bytes appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_team_heading_accepts_plain_team_names() {
        assert!(is_team_heading("Arsenal"));
        assert!(is_team_heading("  Bayern München  "));
        assert!(is_team_heading("Real Madrid"));
    }

    #[test]
    fn test_is_team_heading_rejects_section_titles() {
        assert!(!is_team_heading("Premier League Injuries"));
        assert!(!is_team_heading("LATEST NEWS"));
        assert!(!is_team_heading("Suspensions"));
        assert!(!is_team_heading("Serie A"));
        assert!(!is_team_heading("Team updates"));
    }

    #[test]
    fn test_is_team_heading_substring_false_positive_is_kept() {
        // "Newcastle" is fine, but anything containing "news" or "liga" is not.
        assert!(is_team_heading("Newcastle"));
        assert!(!is_team_heading("Newsham Rovers"));
        assert!(!is_team_heading("Deportivo Ligamento"));
    }

    #[test]
    fn test_non_empty_lines() {
        let text = "\n  Bukayo Saka \n\n Forward\r\n   \n5\n";
        assert_eq!(non_empty_lines(text), vec!["Bukayo Saka", "Forward", "5"]);
        assert!(non_empty_lines("  \n\t\n").is_empty());
    }

    #[test]
    fn test_or_not_available() {
        assert_eq!(or_not_available(Some("Knee")), "Knee");
        assert_eq!(or_not_available(Some("-")), "N/A");
        assert_eq!(or_not_available(Some("")), "N/A");
        assert_eq!(or_not_available(None), "N/A");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        assert_eq!(truncate_for_log("ééé", 1), "é…(+4 bytes)");
    }
}
