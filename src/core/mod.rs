//! Snapshot coordination for the host binary

mod file_coordinator;
mod update_manager;

pub use file_coordinator::FileCoordinator;
pub use update_manager::{UpdateManager, DEFAULT_REFRESH_INTERVAL};
