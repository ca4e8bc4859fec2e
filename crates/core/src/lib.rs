//! wl-sens-core: Core traits and registry for wl-Sens.
//!
//! This crate contains the coordinator trait consumed from the polling
//! layer, metric descriptors and their requirement fragments, the
//! process-wide Registry, and the activation step that turns a snapshot
//! into the set of live sensors that can safely read it.

mod activation;
pub mod constants;
mod coordinator;
mod descriptor;
mod error;
mod registry;
pub mod rounding;

pub use activation::{activate, Sensor, SensorReading};
pub use constants::{COMPASS_DIRECTIONS, DECIMALS_HUMIDITY, DECIMALS_RADIATION, DECIMALS_UV};
pub use coordinator::{Coordinator, SharedCoordinator, StaticCoordinator};
pub use descriptor::{
    Attributes, DescriptorBuilder, Projection, ReadContext, Requirements, SensorDescriptor,
    SensorFamily,
};
pub use error::{RegistryError, SensorError};
pub use registry::{global_registry, init_global_registry, Registry};
pub use rounding::{bearing_to_direction, connection_status, round_optional, ConnectionStatus};

// Re-export types used in trait signatures for convenience
pub use wl_sens_types::{
    Condition, ConditionKind, CurrentConditions, Device, DeviceClass, MissingRecord, StateClass,
};
