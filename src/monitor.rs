use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::commands::{self, Command};
use crate::diff::{self, Change};
use crate::error::MonitorError;
use crate::fetch::PageFetcher;
use crate::report;
use crate::snapshot;
use crate::store::SnapshotStore;
use crate::telegram::NotifyChannel;

/// Which way one pass went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunPath {
    Automatic,
    Manual(Command),
    FetchFailed,
}

/// Summary of a single pass, for the CLI and for tests.
#[derive(Debug)]
pub struct RunOutcome {
    pub path: RunPath,
    pub changes: Vec<Change>,
    pub report: String,
    pub notified: bool,
    pub persisted: bool,
}

/// The run controller. Owns the pass sequencing; every collaborator with
/// side effects sits behind a trait or the store so passes can be driven
/// end to end in tests.
pub struct Monitor<F, C> {
    fetcher: F,
    channel: C,
    store: SnapshotStore,
    chat_id: String,
    case_url: String,
    command_window: Duration,
}

impl<F: PageFetcher, C: NotifyChannel> Monitor<F, C> {
    pub fn new(
        fetcher: F,
        channel: C,
        store: SnapshotStore,
        chat_id: String,
        case_url: String,
        command_window: Duration,
    ) -> Self {
        Monitor {
            fetcher,
            channel,
            store,
            chat_id,
            case_url,
            command_window,
        }
    }

    /// One full pass: poll for a command, fetch the page, build the
    /// snapshot, dispatch the matching report, persist. Exactly one send
    /// is attempted no matter which branch runs.
    pub async fn run_once(&self, now: DateTime<Utc>) -> Result<RunOutcome, MonitorError> {
        let command = self.pending_command(now).await;

        let raw = match self.fetcher.fetch(&self.case_url).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("fetch failed: {}", e);
                let text = report::fetch_failure(command, &self.case_url);
                let notified = self.try_send(&text).await;
                return Ok(RunOutcome {
                    path: RunPath::FetchFailed,
                    changes: Vec::new(),
                    report: text,
                    notified,
                    persisted: false,
                });
            }
        };

        let current = snapshot::build(&raw, now);
        info!(
            status = current.case_status.as_str(),
            documents = current.documents.len(),
            "snapshot built"
        );

        // Manual queries answer from the fresh snapshot and leave the
        // stored baseline alone.
        if let Some(command) = command {
            let text = report::manual(&current, command, &self.case_url);
            let notified = self.try_send(&text).await;
            return Ok(RunOutcome {
                path: RunPath::Manual(command),
                changes: Vec::new(),
                report: text,
                notified,
                persisted: false,
            });
        }

        let previous = self.store.load();
        let changes = diff::diff(previous.as_ref(), &current);
        if changes.is_empty() {
            info!("no changes since previous snapshot");
        } else {
            info!(count = changes.len(), "changes detected");
        }

        let text = report::automatic(&current, &changes, &self.case_url);
        let notified = self.try_send(&text).await;
        // Persist regardless of the send result; a dropped notification
        // must not make the next pass re-announce the same changes.
        self.store.save(&current)?;
        Ok(RunOutcome {
            path: RunPath::Automatic,
            changes,
            report: text,
            notified,
            persisted: true,
        })
    }

    /// Read the inbound window and interpret it. Poll failures degrade to
    /// "no command": the scheduled pass must not die on its interactive
    /// extra.
    async fn pending_command(&self, now: DateTime<Utc>) -> Option<Command> {
        match self.channel.poll_recent(&self.chat_id).await {
            Ok(messages) => commands::select_command(&messages, now, self.command_window),
            Err(e) => {
                warn!("inbound poll failed: {}", e);
                None
            }
        }
    }

    async fn try_send(&self, text: &str) -> bool {
        match self.channel.send(&self.chat_id, text).await {
            Ok(()) => true,
            Err(e) => {
                warn!("notification send failed: {}", e);
                false
            }
        }
    }
}
