use chrono::{DateTime, Duration, Utc};

/// A user directive read back from the notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Check,
    Status,
    Report,
}

/// One inbound chat message, already decoded from the channel's wire shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub id: i64,
    pub text: String,
    pub received_at: DateTime<Utc>,
}

// Slash-prefixed and bare forms are equivalent; matching is exact after
// trimming and lowercasing, so "statusreport" or "check the case" are not
// commands.
const COMMAND_WORDS: &[(&str, Command)] = &[
    ("/check", Command::Check),
    ("check", Command::Check),
    ("/status", Command::Status),
    ("status", Command::Status),
    ("/report", Command::Report),
    ("report", Command::Report),
];

fn recognize(text: &str) -> Option<Command> {
    let normalized = text.trim().to_lowercase();
    COMMAND_WORDS
        .iter()
        .find(|(word, _)| *word == normalized)
        .map(|(_, command)| *command)
}

/// Pick at most one actionable command from the polled message window.
/// Only messages inside the recency window count; among those, the newest
/// recognized command wins, with the higher message id breaking timestamp
/// ties.
pub fn select_command(
    messages: &[InboundMessage],
    now: DateTime<Utc>,
    window: Duration,
) -> Option<Command> {
    let cutoff = now - window;
    messages
        .iter()
        .filter(|m| m.received_at >= cutoff)
        .filter_map(|m| recognize(&m.text).map(|c| (m.received_at, m.id, c)))
        .max_by_key(|(received_at, id, _)| (*received_at, *id))
        .map(|(_, _, command)| command)
}
