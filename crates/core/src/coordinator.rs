//! Coordinator trait and a fixed-snapshot implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use wl_sens_types::CurrentConditions;

/// Trait for the component that owns the latest snapshot
///
/// Coordinators poll the hub on their own schedule and replace the
/// snapshot atomically. Sensors hold a shared handle to the coordinator
/// and re-resolve the snapshot on every read instead of keeping a copy.
pub trait Coordinator: Send + Sync {
    /// The latest complete snapshot (empty before the first successful poll)
    fn current_snapshot(&self) -> Arc<CurrentConditions>;

    /// Configured poll interval, if any
    fn poll_interval(&self) -> Option<Duration>;

    /// Human-readable device label, used to prefix sensor names
    fn device_label(&self) -> &str;

    /// Stable device identifier, used to build sensor unique ids
    fn device_id(&self) -> &str;

    /// Current wall clock time
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Type-erased coordinator shared between sensors
pub type SharedCoordinator = Arc<dyn Coordinator>;

/// Coordinator serving one fixed snapshot
///
/// Useful for one-shot reads and for tests; the clock can be pinned so
/// staleness checks are deterministic.
#[derive(Debug, Clone)]
pub struct StaticCoordinator {
    snapshot: Arc<CurrentConditions>,
    poll_interval: Option<Duration>,
    device_label: String,
    device_id: String,
    fixed_now: Option<DateTime<Utc>>,
}

impl StaticCoordinator {
    pub fn new(
        device_label: impl Into<String>,
        device_id: impl Into<String>,
        snapshot: CurrentConditions,
    ) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
            poll_interval: None,
            device_label: device_label.into(),
            device_id: device_id.into(),
            fixed_now: None,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Pin the clock to a fixed instant
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.fixed_now = Some(now);
        self
    }

    pub fn into_shared(self) -> SharedCoordinator {
        Arc::new(self)
    }
}

impl Coordinator for StaticCoordinator {
    fn current_snapshot(&self) -> Arc<CurrentConditions> {
        Arc::clone(&self.snapshot)
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

    fn now(&self) -> DateTime<Utc> {
        self.fixed_now.unwrap_or_else(Utc::now)
    }
}
