use std::sync::LazyLock;

use regex::Regex;

/// Reported when no status rule matches. A fallback value, not a failure.
pub const STATUS_FALLBACK: &str = "Pending";

const MAX_STATUS_LEN: usize = 100;

struct StatusRule {
    name: &'static str,
    re: Regex,
    group: usize,
}

impl StatusRule {
    fn new(name: &'static str, pattern: &str, group: usize) -> Self {
        StatusRule {
            name,
            re: Regex::new(pattern).unwrap(),
            group,
        }
    }
}

// Ordered most-specific first; the first rule with a non-empty capture wins.
static STATUS_RULES: LazyLock<Vec<StatusRule>> = LazyLock::new(|| {
    vec![
        StatusRule::new(
            "status-pending-line",
            r"(?i)Status[:\s]*([^\n\r]*pending[^\n\r]*)",
            1,
        ),
        StatusRule::new("case-status-label", r"(?i)Case Status[:\s]*([^\n\r]*)", 1),
        StatusRule::new(
            "bare-status-token",
            r"(?i)(Pending|Concluded|Discontinued|Settled)[^\n\r]*",
            1,
        ),
    ]
});

/// Scan the flattened page text for the case status line.
pub fn extract(text: &str) -> String {
    for rule in STATUS_RULES.iter() {
        let Some(caps) = rule.re.captures(text) else {
            continue;
        };
        let matched = caps.get(rule.group).map_or("", |m| m.as_str()).trim();
        if !matched.is_empty() {
            tracing::debug!(rule = rule.name, "case status matched");
            return super::truncate_chars(matched, MAX_STATUS_LEN);
        }
    }
    STATUS_FALLBACK.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_with_pending_is_captured() {
        let text = "Case No. ARB/23/39\nStatus: Pending – jurisdictional phase\nMore text";
        let status = extract(text);
        assert!(status.starts_with("Pending"));
        assert!(status.contains("jurisdictional"));
    }

    #[test]
    fn case_status_label_captures_non_pending_values() {
        let text = "Overview\nCase Status: Concluded by award\nNext section";
        assert_eq!(extract(text), "Concluded by award");
    }

    #[test]
    fn bare_token_rule_captures_only_the_token() {
        // The token alone, not the rest of its line.
        assert_eq!(
            extract("The proceeding was Discontinued at the parties' request."),
            "Discontinued"
        );
        assert_eq!(extract("Once concluded, fees are refunded."), "concluded");
    }

    #[test]
    fn label_capture_spans_the_label_line_break() {
        // The label rule keeps the full value even when it sits on the
        // line after "Case Status:".
        let text = "Case Status:\nSettled by agreement dated earlier.";
        assert_eq!(extract(text), "Settled by agreement dated earlier.");
    }

    #[test]
    fn empty_capture_falls_through_to_later_rules() {
        // A trailing "Case Status:" label with no value must not win with
        // its empty capture.
        let text = "Settled amicably by the parties.\nCase Status:";
        assert_eq!(extract(text), "Settled");
    }

    #[test]
    fn no_match_yields_fallback() {
        assert_eq!(extract("Nothing relevant on this page."), STATUS_FALLBACK);
    }

    #[test]
    fn long_status_is_truncated_to_one_hundred_chars() {
        let text = format!("Status: pending {}", "x".repeat(300));
        let status = extract(&text);
        assert_eq!(status.chars().count(), 100);
    }
}
