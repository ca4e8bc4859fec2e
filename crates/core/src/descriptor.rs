//! Metric descriptors, requirement fragments and the projection trait

use crate::error::{RegistryError, SensorError};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use wl_sens_types::{Condition, ConditionKind, CurrentConditions, Device, DeviceClass, StateClass};

/// Secondary readings of a sensor, keyed by label
pub type Attributes = serde_json::Map<String, Value>;

/// Everything a projection may look at during one read
pub struct ReadContext<'a> {
    /// Snapshot resolved from the coordinator for this read
    pub conditions: &'a CurrentConditions,
    /// Coordinator poll interval
    pub poll_interval: Option<Duration>,
    /// Time of the read
    pub now: DateTime<Utc>,
}

impl<'a> ReadContext<'a> {
    /// Borrow the record of type `T` from the snapshot
    pub fn condition<T: Condition>(&self) -> Result<&'a T, SensorError> {
        Ok(self.conditions.get_as::<T>()?)
    }
}

/// Per-metric read rules
///
/// Implementations are pure: they only read from the context and never
/// cache anything between calls. Absent optional fields come back as
/// `None`/`Value::Null`, never as an error.
pub trait Projection: Send + Sync {
    /// Primary value; `None` means "no value"
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError>;

    /// Auxiliary readings
    fn attributes(&self, _ctx: &ReadContext<'_>) -> Result<Attributes, SensorError> {
        Ok(Attributes::new())
    }
}

/// Ordered, duplicate-free set of record kinds a metric depends on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirements(Vec<ConditionKind>);

impl Requirements {
    /// No requirements at all
    pub const fn none() -> Self {
        Self(Vec::new())
    }

    pub fn of(kinds: &[ConditionKind]) -> Self {
        let mut requirements = Self::none();
        requirements.extend(kinds);
        requirements
    }

    /// Merge `other` into a new set; order of first appearance is kept
    pub fn union(&self, other: &Requirements) -> Self {
        let mut merged = self.clone();
        merged.extend(&other.0);
        merged
    }

    fn extend(&mut self, kinds: &[ConditionKind]) {
        for kind in kinds {
            if !self.0.contains(kind) {
                self.0.push(*kind);
            }
        }
    }

    pub fn kinds(&self) -> &[ConditionKind] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every required kind is present in the snapshot
    pub fn is_satisfied_by(&self, conditions: &CurrentConditions) -> bool {
        self.0.iter().all(|kind| conditions.contains(*kind))
    }

    /// Required kinds the snapshot does not contain
    pub fn missing_from(&self, conditions: &CurrentConditions) -> Vec<ConditionKind> {
        self.0
            .iter()
            .copied()
            .filter(|kind| !conditions.contains(*kind))
            .collect()
    }
}

impl fmt::Display for Requirements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|k| k.as_str()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// Abstract group of related metrics
///
/// A family is never registered itself. Every descriptor declared through
/// it inherits its device and its requirement fragment; sub-families add
/// their own fragment on top.
#[derive(Debug, Clone)]
pub struct SensorFamily {
    name: &'static str,
    device: Device,
    requirements: Requirements,
}

impl SensorFamily {
    pub fn new(name: &'static str, device: Device) -> Self {
        Self {
            name,
            device,
            requirements: Requirements::none(),
        }
    }

    /// Add kinds to the fragment injected into every member
    pub fn requires(mut self, kinds: &[ConditionKind]) -> Self {
        self.requirements.extend(kinds);
        self
    }

    /// Derive a narrower family that keeps this family's requirements
    pub fn subfamily(&self, name: &'static str) -> SensorFamily {
        SensorFamily {
            name,
            device: self.device,
            requirements: self.requirements.clone(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    /// Start declaring a concrete member of this family
    pub fn sensor(&self, key: &'static str, name: &'static str) -> DescriptorBuilder {
        let mut builder = SensorDescriptor::builder(key, name);
        builder.family = Some(self.name);
        builder.device = self.device;
        builder.requirements = self.requirements.clone();
        builder
    }
}

/// Static declaration of one metric
pub struct SensorDescriptor {
    key: &'static str,
    name: &'static str,
    unit: Option<&'static str>,
    device_class: Option<DeviceClass>,
    state_class: Option<StateClass>,
    device: Device,
    family: Option<&'static str>,
    icon: Option<&'static str>,
    requirements: Requirements,
    projection: Box<dyn Projection>,
}

impl SensorDescriptor {
    pub fn builder(key: &'static str, name: &'static str) -> DescriptorBuilder {
        DescriptorBuilder {
            key,
            name,
            unit: None,
            device_class: None,
            state_class: None,
            device: Device::Hub,
            family: None,
            icon: None,
            requirements: Requirements::none(),
        }
    }

    /// Registry key, unique per registry
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn unit(&self) -> Option<&'static str> {
        self.unit
    }

    pub fn device_class(&self) -> Option<DeviceClass> {
        self.device_class
    }

    pub fn state_class(&self) -> Option<StateClass> {
        self.state_class
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn family(&self) -> Option<&'static str> {
        self.family
    }

    pub fn icon(&self) -> Option<&'static str> {
        self.icon
    }

    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    pub fn projection(&self) -> &dyn Projection {
        self.projection.as_ref()
    }

    /// Whether a sensor can be created against this snapshot
    pub fn is_eligible(&self, conditions: &CurrentConditions) -> bool {
        self.requirements.is_satisfied_by(conditions)
    }
}

impl fmt::Debug for SensorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensorDescriptor")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("unit", &self.unit)
            .field("device_class", &self.device_class)
            .field("state_class", &self.state_class)
            .field("device", &self.device)
            .field("family", &self.family)
            .field("requirements", &self.requirements)
            .finish_non_exhaustive()
    }
}

/// Builder for a concrete descriptor
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    key: &'static str,
    name: &'static str,
    unit: Option<&'static str>,
    device_class: Option<DeviceClass>,
    state_class: Option<StateClass>,
    device: Device,
    family: Option<&'static str>,
    icon: Option<&'static str>,
    requirements: Requirements,
}

impl DescriptorBuilder {
    pub fn unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn device_class(mut self, device_class: DeviceClass) -> Self {
        self.device_class = Some(device_class);
        self
    }

    pub fn state_class(mut self, state_class: StateClass) -> Self {
        self.state_class = Some(state_class);
        self
    }

    /// Shorthand for `state_class(StateClass::Measurement)`
    pub fn measurement(self) -> Self {
        self.state_class(StateClass::Measurement)
    }

    pub fn device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    pub fn icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Add kinds on top of any inherited fragment
    pub fn requires(mut self, kinds: &[ConditionKind]) -> Self {
        self.requirements.extend(kinds);
        self
    }

    /// Validate and attach the projection
    pub fn build(
        self,
        projection: impl Projection + 'static,
    ) -> Result<SensorDescriptor, RegistryError> {
        if self.key.trim().is_empty() {
            return Err(RegistryError::InvalidDescriptor(format!(
                "sensor '{}' has an empty key",
                self.name
            )));
        }
        if self.name.trim().is_empty() {
            return Err(RegistryError::InvalidDescriptor(format!(
                "sensor '{}' has an empty name",
                self.key
            )));
        }

        Ok(SensorDescriptor {
            key: self.key,
            name: self.name,
            unit: self.unit,
            device_class: self.device_class,
            state_class: self.state_class,
            device: self.device,
            family: self.family,
            icon: self.icon,
            requirements: self.requirements,
            projection: Box::new(projection),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nothing;

    impl Projection for Nothing {
        fn value(&self, _ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
            Ok(None)
        }
    }

    #[test]
    fn test_requirements_dedup_and_order() {
        let requirements = Requirements::of(&[
            ConditionKind::Iss,
            ConditionKind::LssBar,
            ConditionKind::Iss,
        ]);
        assert_eq!(
            requirements.kinds(),
            &[ConditionKind::Iss, ConditionKind::LssBar]
        );

        let merged = requirements.union(&Requirements::of(&[
            ConditionKind::LssBar,
            ConditionKind::AirQuality,
        ]));
        assert_eq!(merged.kinds().len(), 3);
    }

    #[test]
    fn test_family_fragment_is_injected() {
        let family = SensorFamily::new("iss", Device::Iss).requires(&[ConditionKind::Iss]);
        let descriptor = family
            .sensor("rain_combo", "Rain combo")
            .requires(&[ConditionKind::LssBar, ConditionKind::Iss])
            .build(Nothing)
            .unwrap();

        assert_eq!(
            descriptor.requirements().kinds(),
            &[ConditionKind::Iss, ConditionKind::LssBar]
        );
        assert_eq!(descriptor.device(), Device::Iss);
        assert_eq!(descriptor.family(), Some("iss"));
    }

    #[test]
    fn test_subfamily_accumulates() {
        let outdoor = SensorFamily::new("outdoor", Device::Iss).requires(&[ConditionKind::Iss]);
        let combined = outdoor
            .subfamily("outdoor_bar")
            .requires(&[ConditionKind::LssBar]);
        assert!(outdoor.requirements().kinds().len() == 1);
        assert_eq!(
            combined.requirements().kinds(),
            &[ConditionKind::Iss, ConditionKind::LssBar]
        );
    }

    #[test]
    fn test_family_without_requirements() {
        let family = SensorFamily::new("hub", Device::Hub);
        assert!(family.requirements().is_empty());
        let descriptor = family.sensor("status", "Status").build(Nothing).unwrap();
        assert!(descriptor.is_eligible(&CurrentConditions::new()));
    }

    #[test]
    fn test_build_rejects_empty_name() {
        let err = SensorDescriptor::builder("pressure", " ")
            .build(Nothing)
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidDescriptor(_)));
    }
}
