//! Classification metadata describing what a metric measures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of physical quantity a metric reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Pressure,
    Temperature,
    Humidity,
    WindSpeed,
    Irradiance,
    PrecipitationIntensity,
    Precipitation,
    Pm1,
    Pm25,
    Pm10,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Pressure => "pressure",
            DeviceClass::Temperature => "temperature",
            DeviceClass::Humidity => "humidity",
            DeviceClass::WindSpeed => "wind_speed",
            DeviceClass::Irradiance => "irradiance",
            DeviceClass::PrecipitationIntensity => "precipitation_intensity",
            DeviceClass::Precipitation => "precipitation",
            DeviceClass::Pm1 => "pm1",
            DeviceClass::Pm25 => "pm25",
            DeviceClass::Pm10 => "pm10",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the host should treat successive values of a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateClass {
    /// Instantaneous measurement
    Measurement,
}

impl StateClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateClass::Measurement => "measurement",
        }
    }
}

impl fmt::Display for StateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical device a metric belongs to
///
/// The hub and its ISS share a host device, the air-quality station is
/// a separate one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Device {
    Hub,
    Iss,
    AirQuality,
}

impl Device {
    /// Suffix appended to unique ids of metrics on this device
    pub fn id_suffix(&self) -> Option<&'static str> {
        match self {
            Device::Hub => None,
            Device::Iss => Some("iss"),
            Device::AirQuality => Some("air-quality"),
        }
    }
}
