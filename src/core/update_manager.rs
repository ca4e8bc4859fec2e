//! Periodic snapshot refresh

use log::{trace, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use super::FileCoordinator;

/// Interval used when the station has no poll interval configured
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Refreshes a coordinator on a fixed schedule until told to stop
pub struct UpdateManager {
    coordinator: Arc<FileCoordinator>,
    interval: Duration,
}

impl UpdateManager {
    pub fn new(coordinator: Arc<FileCoordinator>, interval: Option<Duration>) -> Self {
        Self {
            coordinator,
            interval: interval.unwrap_or(DEFAULT_REFRESH_INTERVAL),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run the refresh loop
    ///
    /// `on_refresh` is called after every successful refresh. Returns the
    /// number of successful refreshes once `shutdown` flips to `true` or
    /// its sender is dropped.
    pub async fn run<F>(&self, mut shutdown: watch::Receiver<bool>, mut on_refresh: F) -> u64
    where
        F: FnMut(),
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut refreshes = 0u64;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.coordinator.refresh() {
                        Ok(()) => {
                            refreshes += 1;
                            trace!("Refresh #{} of {}", refreshes, self.coordinator.path().display());
                            on_refresh();
                        }
                        Err(e) => warn!("Snapshot refresh failed: {:#}", e),
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        refreshes
    }
}
