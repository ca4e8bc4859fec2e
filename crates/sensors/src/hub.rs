//! Hub-level sensors
//!
//! These need no condition record, only the snapshot itself, so they are
//! active on every station.

use crate::{attributes, timestamp_value};
use serde_json::Value;
use wl_sens_core::{
    connection_status, Attributes, ConnectionStatus, Device, Projection, ReadContext, Registry,
    RegistryError, SensorError, SensorFamily,
};

/// Reachability of the hub itself, from the report timestamp
pub(crate) struct HubStatus;

impl Projection for HubStatus {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        let status = match ctx.conditions.timestamp() {
            Some(reported) => connection_status(reported, ctx.poll_interval, ctx.now),
            None => ConnectionStatus::Unknown,
        };
        Ok(Some(Value::from(status.as_str())))
    }

    fn attributes(&self, ctx: &ReadContext<'_>) -> Result<Attributes, SensorError> {
        let groups: Vec<Value> = ctx
            .conditions
            .kinds()
            .iter()
            .map(|kind| Value::from(kind.as_str()))
            .collect();

        Ok(attributes([
            ("last_report_time", timestamp_value(ctx.conditions.timestamp())),
            ("did", ctx.conditions.did().map(Value::from).unwrap_or(Value::Null)),
            ("groups", Value::Array(groups)),
        ]))
    }
}

pub(crate) fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let hub = SensorFamily::new("hub", Device::Hub);

    registry.register(
        hub.sensor("hub_status", "Hub Status")
            .icon("mdi:router-wireless")
            .build(HubStatus)?,
    )
}
