//! wl-sens: capability-gated sensors for WeatherLink stations
//!
//! This library provides the host side of wl-sens:
//! - Configuration management
//! - A file-backed snapshot coordinator and its refresh loop
//!
//! The sensor model itself lives in `wl-sens-core` and the built-in
//! metrics in `wl-sens-sensors`.

pub mod config;
pub mod core;

// Re-export commonly used types
pub use config::{AppConfig, StationConfig};
pub use core::{FileCoordinator, UpdateManager};
