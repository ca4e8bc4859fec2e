//! Barometer and indoor sensors mounted on the hub

use crate::attributes;
use serde_json::Value;
use wl_sens_core::{
    round_optional, Attributes, ConditionKind, Device, DeviceClass, Projection, ReadContext,
    Registry, RegistryError, SensorError, SensorFamily, DECIMALS_HUMIDITY,
};
use wl_sens_types::units::{CELSIUS, HECTOPASCAL, PERCENTAGE};
use wl_sens_types::{LssBarCondition, LssTempHumCondition};

/// Sea-level pressure, with trend and station pressure as attributes
pub(crate) struct Pressure;

impl Projection for Pressure {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        let bar = ctx.condition::<LssBarCondition>()?;
        Ok(Some(Value::from(bar.bar_sea_level)))
    }

    fn attributes(&self, ctx: &ReadContext<'_>) -> Result<Attributes, SensorError> {
        let bar = ctx.condition::<LssBarCondition>()?;
        Ok(attributes([
            ("trend", bar.bar_trend.into()),
            ("absolute", bar.bar_absolute.into()),
        ]))
    }
}

pub(crate) struct InsideTemp;

impl Projection for InsideTemp {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        let inside = ctx.condition::<LssTempHumCondition>()?;
        Ok(Some(Value::from(inside.temp_in)))
    }

    fn attributes(&self, ctx: &ReadContext<'_>) -> Result<Attributes, SensorError> {
        let inside = ctx.condition::<LssTempHumCondition>()?;
        Ok(attributes([
            ("dew_point", inside.dew_point_in.into()),
            ("heat_index", inside.heat_index_in.into()),
        ]))
    }
}

pub(crate) struct InsideHum;

impl Projection for InsideHum {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        let hum = ctx.condition::<LssTempHumCondition>()?.hum_in;
        Ok(round_optional(hum, DECIMALS_HUMIDITY).map(Value::from))
    }
}

pub(crate) fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let barometer = SensorFamily::new("barometer", Device::Hub).requires(&[ConditionKind::LssBar]);
    let inside =
        SensorFamily::new("inside", Device::Hub).requires(&[ConditionKind::LssTempHum]);

    registry.register(
        barometer
            .sensor("pressure", "Pressure")
            .unit(HECTOPASCAL)
            .device_class(DeviceClass::Pressure)
            .measurement()
            .build(Pressure)?,
    )?;
    registry.register(
        inside
            .sensor("inside_temperature", "Inside Temperature")
            .unit(CELSIUS)
            .device_class(DeviceClass::Temperature)
            .measurement()
            .build(InsideTemp)?,
    )?;
    registry.register(
        inside
            .sensor("inside_humidity", "Inside Humidity")
            .unit(PERCENTAGE)
            .device_class(DeviceClass::Humidity)
            .measurement()
            .build(InsideHum)?,
    )
}
