//! Latest-development extraction.
//!
//! The case page lists procedural history as dated one-line entries. Rules
//! run from most to least specific; within a rule the longest match wins,
//! on the theory that the longest dated line carries the fullest event
//! description. Matches shorter than the length floor are bare dates or
//! stray year references and are rejected.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Reported when no rule produces an acceptable match.
pub const NO_DEVELOPMENT: &str = "No development information found";

const MIN_MATCH_LEN: usize = 15;
const MAX_DEVELOPMENT_LEN: usize = 400;

struct DevelopmentRule {
    name: &'static str,
    re: Regex,
}

static DEVELOPMENT_RULES: LazyLock<Vec<DevelopmentRule>> = LazyLock::new(|| {
    [
        (
            "latest-filing-line",
            r"(?i)August 22, 2025[^\n\r]*(?:Respondent|rejoinder)[^\n\r]*",
        ),
        (
            "month-name-event",
            r"(?i)(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},?\s+2025[^\n\r]*(?:files|filed|submit|issue|render|decision|order|memorial|rejoinder|award)[^\n\r]*",
        ),
        (
            "numeric-date-event",
            r"(?i)\d{1,2}[/\-]\d{1,2}[/\-]2025[^\n\r]*(?:files|filed|submit|issue)[^\n\r]*",
        ),
        (
            "year-event",
            r"(?i)2025[^\n\r]*(?:files|filed|submitted|issued|rendered|decision|order|memorial|rejoinder|award)[^\n\r]*",
        ),
    ]
    .into_iter()
    .map(|(name, pattern)| DevelopmentRule {
        name,
        re: Regex::new(pattern).unwrap(),
    })
    .collect()
});

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Scan the flattened page text for the most recent procedural event.
pub fn extract(text: &str) -> String {
    for rule in DEVELOPMENT_RULES.iter() {
        let candidates: Vec<&str> = rule.re.find_iter(text).map(|m| m.as_str()).collect();
        debug!(rule = rule.name, candidates = candidates.len(), "development rule scanned");

        let Some(best) = longest(&candidates) else {
            continue;
        };
        let best = best.trim();
        if best.chars().count() < MIN_MATCH_LEN {
            debug!(rule = rule.name, "match below length floor, skipped");
            continue;
        }

        let collapsed = WHITESPACE_RUN.replace_all(best, " ");
        return super::truncate_chars(&collapsed, MAX_DEVELOPMENT_LEN);
    }
    NO_DEVELOPMENT.to_string()
}

/// First-longest candidate by character count. Strict comparison keeps the
/// earliest of equally long matches, so repeated scans of the same page
/// agree.
fn longest<'a>(candidates: &[&'a str]) -> Option<&'a str> {
    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        let len = candidate.chars().count();
        if best.map_or(true, |(_, best_len)| len > best_len) {
            best = Some((candidate, len));
        }
    }
    best.map(|(s, _)| s)
}
