//! Coordinator backed by a JSON snapshot file

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use wl_sens_core::{Coordinator, CurrentConditions};

use crate::config::StationConfig;

/// Serves the last snapshot read from disk
///
/// Each `refresh` parses the whole file and swaps the new snapshot in
/// atomically. A failed refresh keeps the previous snapshot, so readers
/// never observe a partially written file.
pub struct FileCoordinator {
    path: PathBuf,
    snapshot: ArcSwap<CurrentConditions>,
    poll_interval: Option<Duration>,
    device_label: String,
    device_id: String,
}

impl FileCoordinator {
    /// Create a coordinator with an empty snapshot
    pub fn new(path: impl Into<PathBuf>, station: &StationConfig) -> Self {
        Self {
            path: path.into(),
            snapshot: ArcSwap::from_pointee(CurrentConditions::new()),
            poll_interval: station.poll_interval(),
            device_label: station.device_label.clone(),
            device_id: station.device_id.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the snapshot file
    pub fn refresh(&self) -> Result<()> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let snapshot: CurrentConditions = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        log::debug!(
            "Loaded snapshot from {} with {} record(s)",
            self.path.display(),
            snapshot.len()
        );
        self.replace(snapshot);
        Ok(())
    }

    /// Swap in a new snapshot
    pub fn replace(&self, snapshot: CurrentConditions) {
        self.snapshot.store(Arc::new(snapshot));
    }
}

impl Coordinator for FileCoordinator {
    fn current_snapshot(&self) -> Arc<CurrentConditions> {
        self.snapshot.load_full()
    }

    fn poll_interval(&self) -> Option<Duration> {
        self.poll_interval
    }

    fn device_label(&self) -> &str {
        &self.device_label
    }

    fn device_id(&self) -> &str {
        &self.device_id
    }
}
