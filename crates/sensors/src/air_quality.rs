//! Air-quality station sensors
//!
//! The air-quality station is its own physical device, so these sensors
//! carry the `AirQuality` device and get their own unique-id suffix.

use crate::{attributes, field_sensor, timestamp_value};
use serde_json::Value;
use wl_sens_core::{
    connection_status, round_optional, Attributes, ConditionKind, Device, DeviceClass,
    Projection, ReadContext, Registry, RegistryError, SensorError, SensorFamily,
    DECIMALS_HUMIDITY,
};
use wl_sens_types::units::{CELSIUS, MICROGRAMS_PER_CUBIC_METER, PERCENTAGE};
use wl_sens_types::AirQualityCondition;

/// Whether the station reported within the last two poll intervals
pub(crate) struct AirQualityStatus;

impl Projection for AirQualityStatus {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        let aq = ctx.condition::<AirQualityCondition>()?;
        let status = connection_status(aq.last_report_time, ctx.poll_interval, ctx.now);
        Ok(Some(Value::from(status.as_str())))
    }

    fn attributes(&self, ctx: &ReadContext<'_>) -> Result<Attributes, SensorError> {
        let aq = ctx.condition::<AirQualityCondition>()?;
        Ok(attributes([
            ("last_report_time", timestamp_value(Some(aq.last_report_time))),
            ("pm_data_1_hr", aq.pct_pm_data_last_1_hour.into()),
            ("pm_data_3_hr", aq.pct_pm_data_last_3_hours.into()),
            ("pm_data_24_hr", aq.pct_pm_data_last_24_hours.into()),
            ("pm_data_nowcast", aq.pct_pm_data_nowcast.into()),
        ]))
    }
}

pub(crate) struct Temperature;

impl Projection for Temperature {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        Ok(ctx.condition::<AirQualityCondition>()?.temp.map(Value::from))
    }

    fn attributes(&self, ctx: &ReadContext<'_>) -> Result<Attributes, SensorError> {
        let aq = ctx.condition::<AirQualityCondition>()?;
        Ok(attributes([
            ("dew_point", aq.dew_point.into()),
            ("wet_bulb", aq.wet_bulb.into()),
            ("heat_index", aq.heat_index.into()),
        ]))
    }
}

pub(crate) struct Humidity;

impl Projection for Humidity {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        let hum = ctx.condition::<AirQualityCondition>()?.hum;
        Ok(round_optional(hum, DECIMALS_HUMIDITY).map(Value::from))
    }
}

field_sensor!(Pm1p0, AirQualityCondition, pm_1);

/// PM 2.5 nowcast, with the raw windows as attributes
pub(crate) struct Pm2p5;

impl Projection for Pm2p5 {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        Ok(ctx
            .condition::<AirQualityCondition>()?
            .pm_2p5_nowcast
            .map(Value::from))
    }

    fn attributes(&self, ctx: &ReadContext<'_>) -> Result<Attributes, SensorError> {
        let aq = ctx.condition::<AirQualityCondition>()?;
        Ok(attributes([
            ("1_min", aq.pm_2p5.into()),
            ("1_hr", aq.pm_2p5_last_1_hour.into()),
            ("3_hr", aq.pm_2p5_last_3_hours.into()),
            ("24_hr", aq.pm_2p5_last_24_hours.into()),
        ]))
    }
}

/// PM 10 nowcast, with the raw windows as attributes
pub(crate) struct Pm10p0;

impl Projection for Pm10p0 {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        Ok(ctx
            .condition::<AirQualityCondition>()?
            .pm_10_nowcast
            .map(Value::from))
    }

    fn attributes(&self, ctx: &ReadContext<'_>) -> Result<Attributes, SensorError> {
        let aq = ctx.condition::<AirQualityCondition>()?;
        Ok(attributes([
            ("1_min", aq.pm_10.into()),
            ("1_hr", aq.pm_10_last_1_hour.into()),
            ("3_hr", aq.pm_10_last_3_hours.into()),
            ("24_hr", aq.pm_10_last_24_hours.into()),
        ]))
    }
}

pub(crate) fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let aq = SensorFamily::new("air_quality", Device::AirQuality)
        .requires(&[ConditionKind::AirQuality]);

    registry.register(
        aq.sensor("air_quality_status", "Status")
            .icon("mdi:information")
            .build(AirQualityStatus)?,
    )?;
    registry.register(
        aq.sensor("air_quality_temperature", "Temperature")
            .unit(CELSIUS)
            .device_class(DeviceClass::Temperature)
            .measurement()
            .build(Temperature)?,
    )?;
    registry.register(
        aq.sensor("air_quality_humidity", "Humidity")
            .unit(PERCENTAGE)
            .device_class(DeviceClass::Humidity)
            .measurement()
            .build(Humidity)?,
    )?;
    registry.register(
        aq.sensor("pm_1", "PM 1.0")
            .unit(MICROGRAMS_PER_CUBIC_METER)
            .device_class(DeviceClass::Pm1)
            .measurement()
            .icon("mdi:air-filter")
            .build(Pm1p0)?,
    )?;
    registry.register(
        aq.sensor("pm_2p5", "PM 2.5")
            .unit(MICROGRAMS_PER_CUBIC_METER)
            .device_class(DeviceClass::Pm25)
            .measurement()
            .icon("mdi:air-filter")
            .build(Pm2p5)?,
    )?;
    registry.register(
        aq.sensor("pm_10", "PM 10.0")
            .unit(MICROGRAMS_PER_CUBIC_METER)
            .device_class(DeviceClass::Pm10)
            .measurement()
            .icon("mdi:air-filter")
            .build(Pm10p0)?,
    )
}
