//! Report rendering for the notification channel.
//!
//! All reports share one shell: title line, body block, case-identity
//! footer with the page link. Markdown formatting here must stay inside
//! what Telegram's `Markdown` parse mode accepts.

use itertools::Itertools;

use crate::commands::Command;
use crate::diff::Change;
use crate::snapshot::Snapshot;

pub const CASE_CAPTION: &str = "Abertis Infraestructuras S.A. v. Argentine Republic";
pub const CASE_NUMBER: &str = "ARB/23/39";

const TITLE_AUTOMATIC: &str = "🏛️ *ICSID Case Daily Report - ARB/23/39*";
const TITLE_MANUAL: &str = "🏛️ *ICSID Case Report - ARB/23/39* (manual query)";

const HELP_BLOCK: &str =
    "ℹ️ Commands: /check - full report · /status - short digest · /report - full report";

/// Scheduled report. Renders the full snapshot block whether or not
/// anything changed; when something did, the change lines go in right
/// after the date so they lead the message.
pub fn automatic(snapshot: &Snapshot, changes: &[Change], case_url: &str) -> String {
    let mut lines = vec![TITLE_AUTOMATIC.to_string(), String::new()];
    lines.push(format!(
        "📅 *Daily Report - {}*",
        snapshot.timestamp.format("%d/%m/%Y")
    ));
    lines.push(String::new());
    if !changes.is_empty() {
        lines.push("🔔 *Changes detected:*".to_string());
        lines.push(changes.iter().map(|c| format!("• {}", c)).join("\n"));
        lines.push(String::new());
    }
    push_snapshot_block(&mut lines, snapshot);
    push_footer(&mut lines, case_url);
    lines.join("\n")
}

/// On-demand report for a recognized command. `Check` and `Report` get the
/// full snapshot block plus the command help; `Status` gets a one-line
/// digest.
pub fn manual(snapshot: &Snapshot, command: Command, case_url: &str) -> String {
    let mut lines = vec![TITLE_MANUAL.to_string(), String::new()];
    match command {
        Command::Check | Command::Report => {
            lines.push(format!(
                "📅 *Manual Report - {}*",
                snapshot.timestamp.format("%d/%m/%Y")
            ));
            lines.push(String::new());
            push_snapshot_block(&mut lines, snapshot);
            push_footer(&mut lines, case_url);
            lines.push(String::new());
            lines.push(HELP_BLOCK.to_string());
        }
        Command::Status => {
            lines.push(format!(
                "📋 {} (checked {} UTC)",
                snapshot.latest_development,
                snapshot.timestamp.format("%Y-%m-%d %H:%M:%S")
            ));
            push_footer(&mut lines, case_url);
        }
    }
    lines.join("\n")
}

/// Rendered when the page could not be fetched. Carries the manual title
/// and help block when the failed pass was answering a command, so the
/// sender still learns how to retry.
pub fn fetch_failure(command: Option<Command>, case_url: &str) -> String {
    let title = if command.is_some() { TITLE_MANUAL } else { TITLE_AUTOMATIC };
    let mut lines = vec![title.to_string(), String::new()];
    lines.push("❌ *Error fetching case information*".to_string());
    lines.push(String::new());
    lines.push("Could not connect to the ICSID case page. The next run will try again.".to_string());
    push_footer(&mut lines, case_url);
    if command.is_some() {
        lines.push(String::new());
        lines.push(HELP_BLOCK.to_string());
    }
    lines.join("\n")
}

fn push_snapshot_block(lines: &mut Vec<String>, snapshot: &Snapshot) {
    lines.push("📋 *Latest Development:*".to_string());
    lines.push(format!("`{}`", snapshot.latest_development));
    lines.push(String::new());
    lines.push(format!("📊 *Case Status:* `{}`", snapshot.case_status));
    lines.push(String::new());
    if snapshot.has_award_mention {
        lines.push("🏆 *Note:* the page mentions an award - verify manually".to_string());
        lines.push(String::new());
    }
    if snapshot.has_decision_mention {
        lines.push("⚖️ *Note:* decisions are mentioned on the page".to_string());
        lines.push(String::new());
    }
    lines.push(format!(
        "🕐 *Checked:* {} (UTC)",
        snapshot.timestamp.format("%Y-%m-%d %H:%M:%S")
    ));
}

fn push_footer(lines: &mut Vec<String>, case_url: &str) {
    lines.push(String::new());
    lines.push(format!("*Case:* {}", CASE_CAPTION));
    lines.push(format!("*Number:* {}", CASE_NUMBER));
    lines.push(String::new());
    lines.push(format!("🔗 [View case]({})", case_url));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const URL: &str = "https://icsid.worldbank.org/cases/case-database/case-detail?CaseNo=ARB/23/39";

    fn sample() -> Snapshot {
        let mut s = crate::snapshot::build(
            b"<p>Status: Pending</p><p>August 22, 2025 - The Respondent files its Rejoinder on the Merits.</p>",
            Utc.with_ymd_and_hms(2025, 8, 22, 6, 0, 0).unwrap(),
        );
        s.has_award_mention = false;
        s.has_decision_mention = false;
        s
    }

    #[test]
    fn automatic_report_without_changes_has_no_change_block() {
        let text = automatic(&sample(), &[], URL);
        assert!(text.starts_with("🏛️ *ICSID Case Daily Report"));
        assert!(!text.contains("Changes detected"));
        assert!(text.contains("📅 *Daily Report - 22/08/2025*"));
        assert!(text.contains("📊 *Case Status:*"));
        assert!(text.contains(CASE_CAPTION));
        assert!(text.contains(&format!("[View case]({})", URL)));
    }

    #[test]
    fn automatic_report_lists_each_change_as_a_bullet() {
        let changes = vec![
            Change::PageContent,
            Change::DocumentCount { old: 3, new: 5 },
        ];
        let text = automatic(&sample(), &changes, URL);
        assert!(text.contains("🔔 *Changes detected:*"));
        assert!(text.contains("• 🔄 Page content changed"));
        assert!(text.contains("• 📄 Document count changed: 3 → 5"));
    }

    #[test]
    fn alert_lines_appear_only_when_flagged() {
        let mut snapshot = sample();
        let without = automatic(&snapshot, &[], URL);
        assert!(!without.contains("🏆"));
        assert!(!without.contains("⚖️"));

        snapshot.has_award_mention = true;
        snapshot.has_decision_mention = true;
        let with = automatic(&snapshot, &[], URL);
        assert!(with.contains("🏆 *Note:*"));
        assert!(with.contains("⚖️ *Note:*"));
    }

    #[test]
    fn manual_check_carries_manual_title_and_help() {
        let text = manual(&sample(), Command::Check, URL);
        assert!(text.starts_with("🏛️ *ICSID Case Report - ARB/23/39* (manual query)"));
        assert!(text.contains("📋 *Latest Development:*"));
        assert!(text.contains(HELP_BLOCK));
    }

    #[test]
    fn manual_report_matches_manual_check_shape() {
        let snapshot = sample();
        assert_eq!(
            manual(&snapshot, Command::Check, URL),
            manual(&snapshot, Command::Report, URL)
        );
    }

    #[test]
    fn manual_status_is_a_short_digest() {
        let text = manual(&sample(), Command::Status, URL);
        assert!(text.contains("(manual query)"));
        assert!(text.contains("August 22, 2025"));
        assert!(text.contains("checked 2025-08-22 06:00:00 UTC"));
        assert!(!text.contains("*Latest Development:*"));
        assert!(!text.contains("*Case Status:*"));
    }

    #[test]
    fn fetch_failure_title_follows_the_trigger() {
        let scheduled = fetch_failure(None, URL);
        assert!(scheduled.starts_with(TITLE_AUTOMATIC));
        assert!(!scheduled.contains(HELP_BLOCK));
        assert!(scheduled.contains("❌ *Error fetching case information*"));

        let on_command = fetch_failure(Some(Command::Check), URL);
        assert!(on_command.starts_with(TITLE_MANUAL));
        assert!(on_command.contains(HELP_BLOCK));
    }
}
