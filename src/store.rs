use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::MonitorError;
use crate::snapshot::Snapshot;

/// Single-record store: the most recent snapshot as one pretty-printed JSON
/// file. Each save overwrites the previous record.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted snapshot. A missing file is an ordinary first
    /// run. An unreadable or corrupt record is logged and treated the same
    /// way rather than killing the pass.
    pub fn load(&self) -> Option<Snapshot> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("could not read {}: {}", self.path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("corrupt snapshot record in {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Replace the stored snapshot, creating the parent directory on first
    /// use.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), MonitorError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(snapshot)?)?;
        Ok(())
    }
}
