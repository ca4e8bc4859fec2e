//! wl-sens-types: Shared data types for wl-Sens.
//!
//! This crate contains pure data types (condition records, the current
//! conditions snapshot, metric classifications and unit tokens) that are
//! shared across all wl-Sens crates. Nothing in here knows about metrics
//! or registries, making it suitable as a foundation layer.

pub mod conditions;
pub mod field;
pub mod snapshot;
pub mod units;

// Re-export commonly used types at the crate root for convenience
pub use conditions::{
    AirQualityCondition, Condition, ConditionKind, ConditionRecord, IssCondition,
    LssBarCondition, LssTempHumCondition, RxState,
};
pub use field::{Device, DeviceClass, StateClass};
pub use snapshot::{CurrentConditions, MissingRecord};
