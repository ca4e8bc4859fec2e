//! Condition records reported by a WeatherLink hub
//!
//! Each record type corresponds to one physical sensor group (barometer,
//! indoor temp/hum board, outdoor integrated sensor suite, air-quality
//! station). A hub only reports the groups it actually has, so every record
//! is optional at the snapshot level, and most fields inside a record are
//! optional too.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a condition record variant
///
/// This is a closed enumeration; presence queries on a snapshot are keyed
/// by it rather than by type reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    /// Barometric pressure group
    LssBar,
    /// Indoor temperature/humidity group
    LssTempHum,
    /// Outdoor integrated sensor suite
    Iss,
    /// Air-quality station
    AirQuality,
}

impl ConditionKind {
    /// All kinds in canonical order
    pub const ALL: [ConditionKind; 4] = [
        ConditionKind::LssBar,
        ConditionKind::LssTempHum,
        ConditionKind::Iss,
        ConditionKind::AirQuality,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionKind::LssBar => "lss_bar",
            ConditionKind::LssTempHum => "lss_temp_hum",
            ConditionKind::Iss => "iss",
            ConditionKind::AirQuality => "air_quality",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            ConditionKind::LssBar => 0,
            ConditionKind::LssTempHum => 1,
            ConditionKind::Iss => 2,
            ConditionKind::AirQuality => 3,
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Barometric pressure readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LssBarCondition {
    #[serde(default)]
    pub lsid: Option<u32>,
    /// Sea-level corrected pressure (hPa)
    pub bar_sea_level: f64,
    /// Pressure change over the last 3 hours (hPa)
    #[serde(default)]
    pub bar_trend: Option<f64>,
    /// Raw station pressure (hPa)
    pub bar_absolute: f64,
}

/// Indoor temperature/humidity readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LssTempHumCondition {
    #[serde(default)]
    pub lsid: Option<u32>,
    pub temp_in: f64,
    #[serde(default)]
    pub hum_in: Option<f64>,
    #[serde(default)]
    pub dew_point_in: Option<f64>,
    #[serde(default)]
    pub heat_index_in: Option<f64>,
}

/// Reception state of the ISS radio link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RxState {
    Synced,
    Rescan,
    Lost,
}

impl RxState {
    pub fn name(&self) -> &'static str {
        match self {
            RxState::Synced => "SYNCED",
            RxState::Rescan => "RESCAN",
            RxState::Lost => "LOST",
        }
    }
}

/// Outdoor integrated sensor suite readings
///
/// Windowed aggregates (2/10 minute wind, 15/60 minute rain, ...) are
/// computed by the hub; they are carried here as plain fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssCondition {
    pub lsid: Option<u32>,
    /// Transmitter id
    pub txid: u8,
    pub rx_state: Option<RxState>,
    pub trans_battery_flag: Option<u8>,

    pub temp: Option<f64>,
    pub hum: Option<f64>,
    pub dew_point: Option<f64>,
    pub wet_bulb: Option<f64>,
    pub heat_index: Option<f64>,
    pub wind_chill: Option<f64>,
    pub thw_index: Option<f64>,
    pub thsw_index: Option<f64>,

    pub wind_speed_last: Option<f64>,
    pub wind_dir_last: Option<u16>,
    pub wind_speed_avg_last_2_min: Option<f64>,
    pub wind_dir_scalar_avg_last_2_min: Option<u16>,
    pub wind_speed_hi_last_2_min: Option<f64>,
    pub wind_dir_at_hi_speed_last_2_min: Option<u16>,
    pub wind_speed_avg_last_10_min: Option<f64>,
    pub wind_dir_scalar_avg_last_10_min: Option<u16>,
    pub wind_speed_hi_last_10_min: Option<f64>,
    pub wind_dir_at_hi_speed_last_10_min: Option<u16>,

    pub rain_rate_last: Option<f64>,
    pub rain_rate_hi: Option<f64>,
    pub rain_rate_hi_last_15_min: Option<f64>,
    pub rainfall_last_15_min: Option<f64>,
    pub rainfall_last_60_min: Option<f64>,
    pub rainfall_last_24_hr: Option<f64>,
    pub rainfall_daily: Option<f64>,
    pub rainfall_monthly: Option<f64>,
    pub rainfall_year: Option<f64>,
    pub rain_storm: Option<f64>,
    pub rain_storm_start_at: Option<DateTime<Utc>>,
    pub rain_storm_last: Option<f64>,
    pub rain_storm_last_start_at: Option<DateTime<Utc>>,
    pub rain_storm_last_end_at: Option<DateTime<Utc>>,

    pub solar_rad: Option<f64>,
    pub uv_index: Option<f64>,
}

/// Air-quality station readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityCondition {
    #[serde(default)]
    pub lsid: Option<u32>,
    /// Time the station last reported to the hub
    pub last_report_time: DateTime<Utc>,

    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub hum: Option<f64>,
    #[serde(default)]
    pub dew_point: Option<f64>,
    #[serde(default)]
    pub wet_bulb: Option<f64>,
    #[serde(default)]
    pub heat_index: Option<f64>,

    #[serde(default)]
    pub pm_1: Option<f64>,
    #[serde(default)]
    pub pm_2p5: Option<f64>,
    #[serde(default)]
    pub pm_2p5_last_1_hour: Option<f64>,
    #[serde(default)]
    pub pm_2p5_last_3_hours: Option<f64>,
    #[serde(default)]
    pub pm_2p5_last_24_hours: Option<f64>,
    #[serde(default)]
    pub pm_2p5_nowcast: Option<f64>,
    #[serde(default)]
    pub pm_10: Option<f64>,
    #[serde(default)]
    pub pm_10_last_1_hour: Option<f64>,
    #[serde(default)]
    pub pm_10_last_3_hours: Option<f64>,
    #[serde(default)]
    pub pm_10_last_24_hours: Option<f64>,
    #[serde(default)]
    pub pm_10_nowcast: Option<f64>,

    /// Share of minutes with valid PM data in each window (percent)
    #[serde(default)]
    pub pct_pm_data_last_1_hour: Option<u8>,
    #[serde(default)]
    pub pct_pm_data_last_3_hours: Option<u8>,
    #[serde(default)]
    pub pct_pm_data_last_24_hours: Option<u8>,
    #[serde(default)]
    pub pct_pm_data_nowcast: Option<u8>,
}

impl AirQualityCondition {
    /// A record with only the report time set
    pub fn reported_at(last_report_time: DateTime<Utc>) -> Self {
        Self {
            lsid: None,
            last_report_time,
            temp: None,
            hum: None,
            dew_point: None,
            wet_bulb: None,
            heat_index: None,
            pm_1: None,
            pm_2p5: None,
            pm_2p5_last_1_hour: None,
            pm_2p5_last_3_hours: None,
            pm_2p5_last_24_hours: None,
            pm_2p5_nowcast: None,
            pm_10: None,
            pm_10_last_1_hour: None,
            pm_10_last_3_hours: None,
            pm_10_last_24_hours: None,
            pm_10_nowcast: None,
            pct_pm_data_last_1_hour: None,
            pct_pm_data_last_3_hours: None,
            pct_pm_data_last_24_hours: None,
            pct_pm_data_nowcast: None,
        }
    }
}

/// One condition record of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionRecord {
    LssBar(LssBarCondition),
    LssTempHum(LssTempHumCondition),
    Iss(IssCondition),
    AirQuality(AirQualityCondition),
}

impl ConditionRecord {
    pub fn kind(&self) -> ConditionKind {
        match self {
            ConditionRecord::LssBar(_) => ConditionKind::LssBar,
            ConditionRecord::LssTempHum(_) => ConditionKind::LssTempHum,
            ConditionRecord::Iss(_) => ConditionKind::Iss,
            ConditionRecord::AirQuality(_) => ConditionKind::AirQuality,
        }
    }
}

/// Typed access to a single record variant
pub trait Condition: Sized + 'static {
    /// The variant identity of this record type
    const KIND: ConditionKind;

    /// Borrow the record if it is of this type
    fn from_record(record: &ConditionRecord) -> Option<&Self>;
}

macro_rules! impl_condition {
    ($type:ty, $variant:ident) => {
        impl Condition for $type {
            const KIND: ConditionKind = ConditionKind::$variant;

            fn from_record(record: &ConditionRecord) -> Option<&Self> {
                match record {
                    ConditionRecord::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$type> for ConditionRecord {
            fn from(value: $type) -> Self {
                ConditionRecord::$variant(value)
            }
        }
    };
}

impl_condition!(LssBarCondition, LssBar);
impl_condition!(LssTempHumCondition, LssTempHum);
impl_condition!(IssCondition, Iss);
impl_condition!(AirQualityCondition, AirQuality);
