//! Error types for the metric registry and sensor reads

use thiserror::Error;
use wl_sens_types::MissingRecord;

/// Errors raised while reading a live sensor
#[derive(Debug, Error)]
pub enum SensorError {
    /// The sensor's record is gone from the snapshot. Activation only
    /// creates sensors whose records are present, so this is a contract
    /// violation; it fails the one read, never the others.
    #[error(transparent)]
    MissingRecord(#[from] MissingRecord),
}

/// Errors raised while declaring or registering descriptors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Sensor key '{0}' is already registered")]
    DuplicateKey(String),

    #[error("Registry is sealed, cannot register '{0}'")]
    Sealed(String),
}
