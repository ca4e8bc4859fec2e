//! wl-sens-sensors: Metric projections for WeatherLink hubs.
//!
//! Each module declares one sensor family and registers its members in a
//! fixed order. `register_all` chains them; that order is the order in
//! which activation hands sensors to the host.

/// Declare a sensor whose value is one optional field of one record
macro_rules! field_sensor {
    ($name:ident, $condition:ty, $field:ident) => {
        pub(crate) struct $name;

        impl wl_sens_core::Projection for $name {
            fn value(
                &self,
                ctx: &wl_sens_core::ReadContext<'_>,
            ) -> Result<Option<serde_json::Value>, wl_sens_core::SensorError> {
                Ok(ctx
                    .condition::<$condition>()?
                    .$field
                    .map(serde_json::Value::from))
            }
        }
    };
}

pub(crate) use field_sensor;

mod air_quality;
mod hub;
mod iss;
mod station;

#[cfg(test)]
mod fixtures;

use chrono::{DateTime, Utc};
use serde_json::Value;
use wl_sens_core::{init_global_registry, Attributes, Registry, RegistryError};

/// Register all built-in sensors, in declaration order
pub fn register_all(registry: &mut Registry) -> Result<(), RegistryError> {
    hub::register(registry)?;
    air_quality::register(registry)?;
    iss::register(registry)?;
    station::register(registry)?;
    Ok(())
}

/// Install the built-in sensors as the process-wide registry
pub fn builtin_registry() -> Result<&'static Registry, RegistryError> {
    init_global_registry(register_all)
}

/// Build an attribute map from label/value pairs
pub(crate) fn attributes<const N: usize>(pairs: [(&str, Value); N]) -> Attributes {
    pairs
        .into_iter()
        .map(|(label, value)| (label.to_string(), value))
        .collect()
}

/// RFC 3339 string, or null when absent
pub(crate) fn timestamp_value(timestamp: Option<DateTime<Utc>>) -> Value {
    timestamp
        .map(|t| Value::from(t.to_rfc3339()))
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use std::collections::HashSet;
    use wl_sens_core::{activate, ConditionKind, CurrentConditions, StaticCoordinator};

    fn registry() -> Registry {
        let mut registry = Registry::new();
        register_all(&mut registry).unwrap();
        registry
    }

    fn active_keys(snapshot: CurrentConditions) -> Vec<&'static str> {
        let coordinator = StaticCoordinator::new("WeatherLink Live", "001d0a61", snapshot)
            .into_shared();
        activate(&registry(), &coordinator)
            .iter()
            .map(|s| s.key())
            .collect()
    }

    #[test]
    fn test_declaration_order() {
        let keys = registry().keys();
        assert_eq!(keys.len(), 25);
        assert_eq!(keys[0], "hub_status");
        assert_eq!(keys[1], "air_quality_status");
        assert_eq!(keys[7], "iss_status");
        assert_eq!(keys[keys.len() - 1], "inside_humidity");
    }

    #[test]
    fn test_keys_are_unique() {
        let keys = registry().keys();
        let unique: HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn test_all_records_activate_everything() {
        let keys = active_keys(fixtures::full_snapshot());
        assert_eq!(keys, registry().keys());
    }

    #[test]
    fn test_iss_only_snapshot() {
        let snapshot = CurrentConditions::new().insert(fixtures::iss());
        let keys = active_keys(snapshot);

        assert!(keys.contains(&"hub_status"));
        assert!(keys.contains(&"wind_direction"));
        assert!(!keys.contains(&"pressure"));
        assert!(!keys
            .iter()
            .any(|k| k.starts_with("air_quality") || k.starts_with("pm_")));
        assert!(!keys.iter().any(|k| k.starts_with("inside")));

        let registry = registry();
        for key in &keys {
            let descriptor = registry.get(key).unwrap();
            let kinds = descriptor.requirements().kinds();
            assert!(kinds.is_empty() || kinds == [ConditionKind::Iss]);
        }
    }

    #[test]
    fn test_every_active_sensor_reads() {
        let coordinator =
            StaticCoordinator::new("WeatherLink Live", "001d0a61", fixtures::full_snapshot())
                .into_shared();
        for sensor in activate(&registry(), &coordinator) {
            assert!(sensor.value().is_ok(), "{} failed", sensor.key());
            assert!(sensor.attributes().is_ok(), "{} failed", sensor.key());
        }
    }

    #[test]
    fn test_builtin_registry_is_sealed() {
        let registry = builtin_registry().unwrap();
        assert!(registry.is_sealed());
        assert_eq!(registry.len(), 25);
    }
}
