use std::fmt;

use crate::snapshot::Snapshot;

/// One detected difference between consecutive snapshots. `Display` gives
/// the line that goes into the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Baseline,
    PageContent,
    Status { old: String, new: String },
    DocumentCount { old: usize, new: usize },
    Phase { new: String },
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Baseline => write!(f, "First run - baseline snapshot stored"),
            Change::PageContent => write!(f, "🔄 Page content changed"),
            Change::Status { old, new } => write!(f, "📊 Status changed: {} → {}", old, new),
            Change::DocumentCount { old, new } => {
                write!(f, "📄 Document count changed: {} → {}", old, new)
            }
            Change::Phase { new } => write!(f, "⚖️ Procedure phase now: {}", new),
        }
    }
}

/// Compare the previous observation against the current one. The checks are
/// independent and run in a fixed order, so one pass can report several
/// changes and repeated comparisons always list them the same way.
pub fn diff(previous: Option<&Snapshot>, current: &Snapshot) -> Vec<Change> {
    let Some(prev) = previous else {
        return vec![Change::Baseline];
    };

    let mut changes = Vec::new();
    if prev.content_fingerprint != current.content_fingerprint {
        changes.push(Change::PageContent);
    }
    if prev.case_status != current.case_status {
        changes.push(Change::Status {
            old: prev.case_status.clone(),
            new: current.case_status.clone(),
        });
    }
    // Count only; a same-count document swap does not fire this check.
    if prev.documents.len() != current.documents.len() {
        changes.push(Change::DocumentCount {
            old: prev.documents.len(),
            new: current.documents.len(),
        });
    }
    if prev.proceedings_phase != current.proceedings_phase {
        changes.push(Change::Phase {
            new: current.proceedings_phase.clone(),
        });
    }
    changes
}

// ── Tests ──
