//! Metric activation and live sensor instances
//!
//! Activation intersects what the coordinator's snapshot currently reports
//! with what each registered descriptor needs. Only descriptors whose
//! required records are all present get a live `Sensor`; the rest are
//! skipped with a debug log.

use crate::coordinator::SharedCoordinator;
use crate::descriptor::{Attributes, ReadContext, SensorDescriptor};
use crate::error::SensorError;
use crate::registry::Registry;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use wl_sens_types::{CurrentConditions, Device, DeviceClass, StateClass};

/// Create one sensor per eligible descriptor, in registry order
///
/// Runs once per activation cycle. It is not re-run when the snapshot's
/// set of records changes later; callers that need that re-invoke it.
pub fn activate(registry: &Registry, coordinator: &SharedCoordinator) -> Vec<Sensor> {
    let snapshot = coordinator.current_snapshot();
    let mut sensors = Vec::with_capacity(registry.len());

    for descriptor in registry.descriptors() {
        if !descriptor.is_eligible(&snapshot) {
            log::debug!(
                "Ignoring sensor {} because requirements are not met (missing {:?})",
                descriptor.key(),
                descriptor.requirements().missing_from(&snapshot)
            );
            continue;
        }
        sensors.push(Sensor::new(Arc::clone(descriptor), Arc::clone(coordinator)));
    }

    log::info!(
        "Activated {} of {} sensors for {}",
        sensors.len(),
        registry.len(),
        coordinator.device_label()
    );
    sensors
}

/// A descriptor bound to a coordinator
///
/// Holds no state besides the binding; every read resolves the
/// coordinator's latest snapshot.
#[derive(Clone)]
pub struct Sensor {
    descriptor: Arc<SensorDescriptor>,
    coordinator: SharedCoordinator,
}

impl Sensor {
    pub fn new(descriptor: Arc<SensorDescriptor>, coordinator: SharedCoordinator) -> Self {
        Self {
            descriptor,
            coordinator,
        }
    }

    pub fn descriptor(&self) -> &SensorDescriptor {
        &self.descriptor
    }

    pub fn key(&self) -> &'static str {
        self.descriptor.key()
    }

    /// Display name, prefixed with the device label
    pub fn name(&self) -> String {
        format!("{} {}", self.coordinator.device_label(), self.descriptor.name())
    }

    /// Stable id: device id, device suffix, then sensor key
    pub fn unique_id(&self) -> String {
        match self.descriptor.device().id_suffix() {
            Some(suffix) => format!(
                "{}-{}-{}",
                self.coordinator.device_id(),
                suffix,
                self.descriptor.key()
            ),
            None => format!("{}-{}", self.coordinator.device_id(), self.descriptor.key()),
        }
    }

    pub fn unit(&self) -> Option<&'static str> {
        self.descriptor.unit()
    }

    pub fn device_class(&self) -> Option<DeviceClass> {
        self.descriptor.device_class()
    }

    pub fn state_class(&self) -> Option<StateClass> {
        self.descriptor.state_class()
    }

    pub fn device(&self) -> Device {
        self.descriptor.device()
    }

    pub fn icon(&self) -> Option<&'static str> {
        self.descriptor.icon()
    }

    /// Whether the latest snapshot still has every required record
    pub fn available(&self) -> bool {
        self.descriptor
            .is_eligible(&self.coordinator.current_snapshot())
    }

    fn context<'a>(&self, conditions: &'a CurrentConditions) -> ReadContext<'a> {
        ReadContext {
            conditions,
            poll_interval: self.coordinator.poll_interval(),
            now: self.coordinator.now(),
        }
    }

    /// Primary value from the latest snapshot
    pub fn value(&self) -> Result<Option<Value>, SensorError> {
        let snapshot = self.coordinator.current_snapshot();
        self.descriptor.projection().value(&self.context(&snapshot))
    }

    /// Auxiliary readings from the latest snapshot
    pub fn attributes(&self) -> Result<Attributes, SensorError> {
        let snapshot = self.coordinator.current_snapshot();
        self.descriptor
            .projection()
            .attributes(&self.context(&snapshot))
    }

    /// Read value and attributes from one snapshot
    ///
    /// A failed read marks the reading unavailable instead of propagating,
    /// so one broken sensor never takes the others down with it.
    pub fn read(&self) -> SensorReading {
        let snapshot = self.coordinator.current_snapshot();
        let ctx = self.context(&snapshot);
        let projection = self.descriptor.projection();

        let result = projection
            .value(&ctx)
            .and_then(|value| Ok((value, projection.attributes(&ctx)?)));

        let (value, attributes, available) = match result {
            Ok((value, attributes)) => (value, attributes, true),
            Err(e) => {
                log::error!("Failed to read sensor {}: {}", self.unique_id(), e);
                (None, Attributes::new(), false)
            }
        };

        SensorReading {
            key: self.key(),
            unique_id: self.unique_id(),
            name: self.name(),
            unit: self.unit(),
            device_class: self.device_class(),
            state_class: self.state_class(),
            icon: self.icon(),
            available,
            value,
            attributes,
        }
    }
}

impl std::fmt::Debug for Sensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sensor")
            .field("key", &self.descriptor.key())
            .field("device_id", &self.coordinator.device_id())
            .finish()
    }
}

/// One read of a sensor, ready to hand to the host
#[derive(Debug, Clone, Serialize)]
pub struct SensorReading {
    pub key: &'static str,
    pub unique_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class: Option<DeviceClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_class: Option<StateClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
    pub available: bool,
    pub value: Option<Value>,
    pub attributes: Attributes,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::{Coordinator, StaticCoordinator};
    use crate::descriptor::{Projection, SensorFamily};
    use std::sync::RwLock;
    use std::time::Duration;
    use wl_sens_types::{
        AirQualityCondition, ConditionKind, IssCondition, LssBarCondition, LssTempHumCondition,
    };

    struct Echo(&'static str);

    impl Projection for Echo {
        fn value(&self, _ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
            Ok(Some(Value::from(self.0)))
        }
    }

    struct IssTemp;

    impl Projection for IssTemp {
        fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
            Ok(ctx.condition::<IssCondition>()?.temp.map(Value::from))
        }

        fn attributes(&self, ctx: &ReadContext<'_>) -> Result<Attributes, SensorError> {
            let iss = ctx.condition::<IssCondition>()?;
            let mut attributes = Attributes::new();
            attributes.insert("dew_point".into(), iss.dew_point.into());
            Ok(attributes)
        }
    }

    /// Coordinator whose snapshot can be swapped under live sensors
    struct SwappableCoordinator {
        snapshot: RwLock<Arc<CurrentConditions>>,
    }

    impl Coordinator for SwappableCoordinator {
        fn current_snapshot(&self) -> Arc<CurrentConditions> {
            Arc::clone(&self.snapshot.read().unwrap())
        }

        fn poll_interval(&self) -> Option<Duration> {
            None
        }

        fn device_label(&self) -> &str {
            "Station"
        }

        fn device_id(&self) -> &str {
            "001d0a61"
        }
    }

    fn test_registry() -> Registry {
        let hub = SensorFamily::new("hub", Device::Hub);
        let iss = SensorFamily::new("iss", Device::Iss).requires(&[ConditionKind::Iss]);
        let aq = SensorFamily::new("air_quality", Device::AirQuality)
            .requires(&[ConditionKind::AirQuality]);

        let mut registry = Registry::new();
        registry
            .register(hub.sensor("hub", "Hub").build(Echo("hub")).unwrap())
            .unwrap();
        registry
            .register(aq.sensor("aq", "AQ").build(Echo("aq")).unwrap())
            .unwrap();
        registry
            .register(iss.sensor("temp", "Temperature").build(IssTemp).unwrap())
            .unwrap();
        registry
            .register(
                SensorDescriptor::builder("pressure", "Pressure")
                    .requires(&[ConditionKind::LssBar])
                    .build(Echo("pressure"))
                    .unwrap(),
            )
            .unwrap();
        registry
            .register(
                SensorDescriptor::builder("inside", "Inside")
                    .requires(&[ConditionKind::LssTempHum])
                    .build(Echo("inside"))
                    .unwrap(),
            )
            .unwrap();
        registry
    }

    fn full_snapshot() -> CurrentConditions {
        CurrentConditions::new()
            .insert(LssBarCondition {
                lsid: None,
                bar_sea_level: 1013.0,
                bar_trend: None,
                bar_absolute: 980.0,
            })
            .insert(LssTempHumCondition {
                lsid: None,
                temp_in: 21.0,
                hum_in: None,
                dew_point_in: None,
                heat_index_in: None,
            })
            .insert(IssCondition {
                temp: Some(14.5),
                ..Default::default()
            })
            .insert(AirQualityCondition::reported_at(chrono::Utc::now()))
    }

    fn keys(sensors: &[Sensor]) -> Vec<&'static str> {
        sensors.iter().map(|s| s.key()).collect()
    }

    #[test]
    fn test_activation_with_all_records() {
        let registry = test_registry();
        let coordinator = StaticCoordinator::new("Station", "abc", full_snapshot()).into_shared();
        let sensors = activate(&registry, &coordinator);
        assert_eq!(keys(&sensors), registry.keys());
    }

    #[test]
    fn test_activation_with_iss_only() {
        let registry = test_registry();
        let snapshot = CurrentConditions::new().insert(IssCondition::default());
        let coordinator = StaticCoordinator::new("Station", "abc", snapshot).into_shared();
        let sensors = activate(&registry, &coordinator);
        assert_eq!(keys(&sensors), vec!["hub", "temp"]);
    }

    #[test]
    fn test_activation_with_empty_snapshot_keeps_requirement_free() {
        let registry = test_registry();
        let coordinator =
            StaticCoordinator::new("Station", "abc", CurrentConditions::new()).into_shared();
        let sensors = activate(&registry, &coordinator);
        assert_eq!(keys(&sensors), vec!["hub"]);
    }

    #[test]
    fn test_eligibility_matches_subset_rule() {
        let registry = test_registry();
        // Every combination of present kinds
        for mask in 0u8..16 {
            let mut snapshot = CurrentConditions::new();
            let full = full_snapshot();
            for (bit, kind) in ConditionKind::ALL.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    snapshot = snapshot.insert(full.get(*kind).unwrap().clone());
                }
            }
            let coordinator =
                StaticCoordinator::new("Station", "abc", snapshot.clone()).into_shared();
            let active = keys(&activate(&registry, &coordinator));

            for descriptor in registry.descriptors() {
                let expected = descriptor
                    .requirements()
                    .kinds()
                    .iter()
                    .all(|k| snapshot.contains(*k));
                assert_eq!(active.contains(&descriptor.key()), expected);
            }
        }
    }

    #[test]
    fn test_sensor_metadata() {
        let registry = test_registry();
        let coordinator = StaticCoordinator::new("WeatherLink Live", "001d0a61", full_snapshot())
            .into_shared();
        let sensors = activate(&registry, &coordinator);

        let temp = sensors.iter().find(|s| s.key() == "temp").unwrap();
        assert_eq!(temp.name(), "WeatherLink Live Temperature");
        assert_eq!(temp.unique_id(), "001d0a61-iss-temp");

        let hub = sensors.iter().find(|s| s.key() == "hub").unwrap();
        assert_eq!(hub.unique_id(), "001d0a61-hub");
    }

    #[test]
    fn test_sensor_reads_latest_snapshot() {
        let registry = test_registry();
        let swappable = Arc::new(SwappableCoordinator {
            snapshot: RwLock::new(Arc::new(full_snapshot())),
        });
        let coordinator: SharedCoordinator = swappable.clone();
        let sensors = activate(&registry, &coordinator);
        let temp = sensors.iter().find(|s| s.key() == "temp").unwrap();
        assert_eq!(temp.value().unwrap(), Some(Value::from(14.5)));

        let updated = CurrentConditions::new().insert(IssCondition {
            temp: Some(16.0),
            ..Default::default()
        });
        *swappable.snapshot.write().unwrap() = Arc::new(updated);
        assert_eq!(temp.value().unwrap(), Some(Value::from(16.0)));
    }

    #[test]
    fn test_vanished_record_fails_single_read() {
        let registry = test_registry();
        let swappable = Arc::new(SwappableCoordinator {
            snapshot: RwLock::new(Arc::new(full_snapshot())),
        });
        let coordinator: SharedCoordinator = swappable.clone();
        let sensors = activate(&registry, &coordinator);

        *swappable.snapshot.write().unwrap() = Arc::new(CurrentConditions::new());

        let temp = sensors.iter().find(|s| s.key() == "temp").unwrap();
        assert!(!temp.available());
        assert!(matches!(
            temp.value(),
            Err(SensorError::MissingRecord(_))
        ));

        let reading = temp.read();
        assert!(!reading.available);
        assert!(reading.value.is_none());

        let hub = sensors.iter().find(|s| s.key() == "hub").unwrap();
        assert!(hub.read().available);
    }

    #[test]
    fn test_absent_field_is_no_value() {
        let registry = test_registry();
        let snapshot = CurrentConditions::new().insert(IssCondition::default());
        let coordinator = StaticCoordinator::new("Station", "abc", snapshot).into_shared();
        let sensors = activate(&registry, &coordinator);
        let temp = sensors.iter().find(|s| s.key() == "temp").unwrap();

        let reading = temp.read();
        assert!(reading.available);
        assert_eq!(reading.value, None);
        assert_eq!(reading.attributes.get("dew_point"), Some(&Value::Null));
    }
}
