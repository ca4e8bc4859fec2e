//! Integrated sensor suite (outdoor) sensors
//!
//! All of these read the same `IssCondition` record, so the family
//! injects that single requirement into every member.

use crate::{attributes, field_sensor, timestamp_value};
use serde_json::Value;
use wl_sens_core::{
    bearing_to_direction, round_optional, Attributes, ConditionKind, Device, DeviceClass,
    Projection, ReadContext, Registry, RegistryError, SensorError, SensorFamily,
    DECIMALS_HUMIDITY, DECIMALS_RADIATION, DECIMALS_UV,
};
use wl_sens_types::units::{
    CELSIUS, DEGREE, KILOMETERS_PER_HOUR, MILLIMETERS, MILLIMETERS_PER_HOUR, PERCENTAGE,
    UV_INDEX, WATTS_PER_SQUARE_METER,
};
use wl_sens_types::IssCondition;

/// Radio reception state of the transmitter
pub(crate) struct IssStatus;

impl Projection for IssStatus {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        let iss = ctx.condition::<IssCondition>()?;
        Ok(iss.rx_state.map(|state| Value::from(state.name())))
    }

    fn attributes(&self, ctx: &ReadContext<'_>) -> Result<Attributes, SensorError> {
        let iss = ctx.condition::<IssCondition>()?;
        Ok(attributes([
            ("txid", iss.txid.into()),
            ("battery", iss.trans_battery_flag.into()),
        ]))
    }
}

pub(crate) struct Temperature;

impl Projection for Temperature {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        Ok(ctx.condition::<IssCondition>()?.temp.map(Value::from))
    }

    fn attributes(&self, ctx: &ReadContext<'_>) -> Result<Attributes, SensorError> {
        let iss = ctx.condition::<IssCondition>()?;
        Ok(attributes([
            ("dew_point", iss.dew_point.into()),
            ("wet_bulb", iss.wet_bulb.into()),
            ("heat_index", iss.heat_index.into()),
            ("wind_chill", iss.wind_chill.into()),
            ("thw_index", iss.thw_index.into()),
            ("thsw_index", iss.thsw_index.into()),
        ]))
    }
}

field_sensor!(ThswIndex, IssCondition, thsw_index);

pub(crate) struct Humidity;

impl Projection for Humidity {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        let hum = ctx.condition::<IssCondition>()?.hum;
        Ok(round_optional(hum, DECIMALS_HUMIDITY).map(Value::from))
    }
}

/// 2 minute average, 10 minute average as attribute
pub(crate) struct WindSpeed;

impl Projection for WindSpeed {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        Ok(ctx
            .condition::<IssCondition>()?
            .wind_speed_avg_last_2_min
            .map(Value::from))
    }

    fn attributes(&self, ctx: &ReadContext<'_>) -> Result<Attributes, SensorError> {
        let iss = ctx.condition::<IssCondition>()?;
        Ok(attributes([("10_min", iss.wind_speed_avg_last_10_min.into())]))
    }
}

field_sensor!(WindSpeedNow, IssCondition, wind_speed_last);

/// 2 minute gust, 10 minute gust as attribute
pub(crate) struct WindMaxSpeed;

impl Projection for WindMaxSpeed {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        Ok(ctx
            .condition::<IssCondition>()?
            .wind_speed_hi_last_2_min
            .map(Value::from))
    }

    fn attributes(&self, ctx: &ReadContext<'_>) -> Result<Attributes, SensorError> {
        let iss = ctx.condition::<IssCondition>()?;
        Ok(attributes([("10_min", iss.wind_speed_hi_last_10_min.into())]))
    }
}

pub(crate) struct WindBearing;

impl Projection for WindBearing {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        Ok(ctx
            .condition::<IssCondition>()?
            .wind_dir_scalar_avg_last_2_min
            .map(Value::from))
    }

    fn attributes(&self, ctx: &ReadContext<'_>) -> Result<Attributes, SensorError> {
        let iss = ctx.condition::<IssCondition>()?;
        Ok(attributes([
            ("high", iss.wind_dir_at_hi_speed_last_2_min.into()),
            ("10_min", iss.wind_dir_scalar_avg_last_10_min.into()),
            ("10_min_high", iss.wind_dir_at_hi_speed_last_10_min.into()),
        ]))
    }
}

field_sensor!(WindBearingNow, IssCondition, wind_dir_last);

/// Compass label for the bearings reported by `WindBearing`
pub(crate) struct WindDirection;

fn compass(bearing: Option<u16>) -> Value {
    bearing_to_direction(bearing.map(f64::from))
        .map(Value::from)
        .unwrap_or(Value::Null)
}

impl Projection for WindDirection {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        let bearing = ctx.condition::<IssCondition>()?.wind_dir_scalar_avg_last_2_min;
        Ok(bearing_to_direction(bearing.map(f64::from)).map(Value::from))
    }

    fn attributes(&self, ctx: &ReadContext<'_>) -> Result<Attributes, SensorError> {
        let iss = ctx.condition::<IssCondition>()?;
        Ok(attributes([
            ("high", compass(iss.wind_dir_at_hi_speed_last_2_min)),
            ("10_min", compass(iss.wind_dir_scalar_avg_last_10_min)),
            ("10_min_high", compass(iss.wind_dir_at_hi_speed_last_10_min)),
        ]))
    }
}

pub(crate) struct SolarRad;

impl Projection for SolarRad {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        let solar_rad = ctx.condition::<IssCondition>()?.solar_rad;
        Ok(round_optional(solar_rad, DECIMALS_RADIATION).map(Value::from))
    }
}

pub(crate) struct UvIndex;

impl Projection for UvIndex {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        let uv_index = ctx.condition::<IssCondition>()?.uv_index;
        Ok(round_optional(uv_index, DECIMALS_UV).map(Value::from))
    }
}

pub(crate) struct RainRate;

impl Projection for RainRate {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        Ok(ctx.condition::<IssCondition>()?.rain_rate_last.map(Value::from))
    }

    fn attributes(&self, ctx: &ReadContext<'_>) -> Result<Attributes, SensorError> {
        let iss = ctx.condition::<IssCondition>()?;
        Ok(attributes([
            ("high", iss.rain_rate_hi.into()),
            ("15_min_high", iss.rain_rate_hi_last_15_min.into()),
        ]))
    }
}

/// Daily total, other accumulation windows as attributes
pub(crate) struct Rainfall;

impl Projection for Rainfall {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        Ok(ctx.condition::<IssCondition>()?.rainfall_daily.map(Value::from))
    }

    fn attributes(&self, ctx: &ReadContext<'_>) -> Result<Attributes, SensorError> {
        let iss = ctx.condition::<IssCondition>()?;
        Ok(attributes([
            ("15_min", iss.rainfall_last_15_min.into()),
            ("60_min", iss.rainfall_last_60_min.into()),
            ("24_hr", iss.rainfall_last_24_hr.into()),
            ("monthly", iss.rainfall_monthly.into()),
            ("yearly", iss.rainfall_year.into()),
        ]))
    }
}

/// Current storm total, plus the previous storm
pub(crate) struct Rainstorm;

impl Projection for Rainstorm {
    fn value(&self, ctx: &ReadContext<'_>) -> Result<Option<Value>, SensorError> {
        Ok(ctx.condition::<IssCondition>()?.rain_storm.map(Value::from))
    }

    fn attributes(&self, ctx: &ReadContext<'_>) -> Result<Attributes, SensorError> {
        let iss = ctx.condition::<IssCondition>()?;
        Ok(attributes([
            ("start", timestamp_value(iss.rain_storm_start_at)),
            ("last", iss.rain_storm_last.into()),
            ("last_start", timestamp_value(iss.rain_storm_last_start_at)),
            ("last_end", timestamp_value(iss.rain_storm_last_end_at)),
        ]))
    }
}

pub(crate) fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let iss = SensorFamily::new("iss", Device::Iss).requires(&[ConditionKind::Iss]);

    registry.register(
        iss.sensor("iss_status", "ISS Status")
            .icon("mdi:information")
            .build(IssStatus)?,
    )?;
    registry.register(
        iss.sensor("temperature", "Temperature")
            .unit(CELSIUS)
            .device_class(DeviceClass::Temperature)
            .measurement()
            .build(Temperature)?,
    )?;
    registry.register(
        iss.sensor("thsw_index", "THSW index")
            .unit(CELSIUS)
            .device_class(DeviceClass::Temperature)
            .measurement()
            .build(ThswIndex)?,
    )?;
    registry.register(
        iss.sensor("humidity", "Humidity")
            .unit(PERCENTAGE)
            .device_class(DeviceClass::Humidity)
            .measurement()
            .build(Humidity)?,
    )?;
    registry.register(
        iss.sensor("wind_speed", "Wind speed")
            .unit(KILOMETERS_PER_HOUR)
            .device_class(DeviceClass::WindSpeed)
            .measurement()
            .icon("mdi:weather-windy")
            .build(WindSpeed)?,
    )?;
    registry.register(
        iss.sensor("wind_speed_last", "Wind speed last")
            .unit(KILOMETERS_PER_HOUR)
            .device_class(DeviceClass::WindSpeed)
            .measurement()
            .icon("mdi:weather-windy")
            .build(WindSpeedNow)?,
    )?;
    registry.register(
        iss.sensor("wind_max_speed", "Wind max speed")
            .unit(KILOMETERS_PER_HOUR)
            .device_class(DeviceClass::WindSpeed)
            .measurement()
            .icon("mdi:weather-windy")
            .build(WindMaxSpeed)?,
    )?;
    registry.register(
        iss.sensor("wind_bearing", "Wind bearing")
            .unit(DEGREE)
            .icon("mdi:compass-rose")
            .build(WindBearing)?,
    )?;
    registry.register(
        iss.sensor("wind_bearing_last", "Wind bearing last")
            .unit(DEGREE)
            .icon("mdi:compass-rose")
            .build(WindBearingNow)?,
    )?;
    registry.register(
        iss.sensor("wind_direction", "Wind direction")
            .icon("mdi:compass")
            .build(WindDirection)?,
    )?;
    registry.register(
        iss.sensor("solar_rad", "Solar rad")
            .unit(WATTS_PER_SQUARE_METER)
            .device_class(DeviceClass::Irradiance)
            .measurement()
            .icon("mdi:white-balance-sunny")
            .build(SolarRad)?,
    )?;
    registry.register(
        iss.sensor("uv_index", "UV index")
            .unit(UV_INDEX)
            .measurement()
            .icon("mdi:shield-sun")
            .build(UvIndex)?,
    )?;
    registry.register(
        iss.sensor("rain_rate", "Rain rate")
            .unit(MILLIMETERS_PER_HOUR)
            .device_class(DeviceClass::PrecipitationIntensity)
            .measurement()
            .icon("mdi:water")
            .build(RainRate)?,
    )?;
    registry.register(
        iss.sensor("rainfall", "Rainfall")
            .unit(MILLIMETERS)
            .device_class(DeviceClass::Precipitation)
            .measurement()
            .icon("mdi:weather-pouring")
            .build(Rainfall)?,
    )?;
    registry.register(
        iss.sensor("rainstorm", "Rainstorm")
            .unit(MILLIMETERS)
            .device_class(DeviceClass::Precipitation)
            .measurement()
            .icon("mdi:weather-lightning-rainy")
            .build(Rainstorm)?,
    )
}
