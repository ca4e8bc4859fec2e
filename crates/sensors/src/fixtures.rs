//! Condition records shared by the sensor tests

use chrono::{DateTime, TimeZone, Utc};
use std::time::Duration;
use wl_sens_core::{CurrentConditions, SharedCoordinator, StaticCoordinator};
use wl_sens_types::{
    AirQualityCondition, IssCondition, LssBarCondition, LssTempHumCondition, RxState,
};

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn barometer() -> LssBarCondition {
    LssBarCondition {
        lsid: Some(48308),
        bar_sea_level: 1017.3,
        bar_trend: Some(-0.7),
        bar_absolute: 960.2,
    }
}

pub fn inside() -> LssTempHumCondition {
    LssTempHumCondition {
        lsid: Some(48307),
        temp_in: 22.4,
        hum_in: Some(41.6),
        dew_point_in: Some(8.6),
        heat_index_in: Some(21.9),
    }
}

pub fn iss() -> IssCondition {
    IssCondition {
        lsid: Some(48306),
        txid: 1,
        rx_state: Some(RxState::Synced),
        trans_battery_flag: Some(0),
        temp: Some(17.8),
        hum: Some(63.4),
        dew_point: Some(10.7),
        wet_bulb: Some(13.5),
        heat_index: Some(17.6),
        wind_chill: Some(17.8),
        thw_index: Some(17.6),
        thsw_index: Some(19.2),
        wind_speed_last: Some(9.7),
        wind_dir_last: Some(237),
        wind_speed_avg_last_2_min: Some(8.1),
        wind_dir_scalar_avg_last_2_min: Some(349),
        wind_speed_hi_last_2_min: Some(14.5),
        wind_dir_at_hi_speed_last_2_min: Some(90),
        wind_speed_avg_last_10_min: Some(7.4),
        wind_dir_scalar_avg_last_10_min: Some(225),
        wind_speed_hi_last_10_min: Some(19.3),
        wind_dir_at_hi_speed_last_10_min: None,
        rain_rate_last: Some(0.0),
        rain_rate_hi: Some(1.2),
        rain_rate_hi_last_15_min: Some(0.6),
        rainfall_last_15_min: Some(0.2),
        rainfall_last_60_min: Some(0.8),
        rainfall_last_24_hr: Some(3.4),
        rainfall_daily: Some(2.6),
        rainfall_monthly: Some(41.2),
        rainfall_year: Some(388.0),
        rain_storm: Some(3.0),
        rain_storm_start_at: Some(now() - chrono::Duration::hours(5)),
        rain_storm_last: Some(12.4),
        rain_storm_last_start_at: None,
        rain_storm_last_end_at: None,
        solar_rad: Some(412.6),
        uv_index: Some(2.34),
    }
}

pub fn air_quality() -> AirQualityCondition {
    AirQualityCondition {
        lsid: Some(48309),
        temp: Some(18.3),
        hum: Some(58.5),
        dew_point: Some(10.0),
        wet_bulb: Some(13.2),
        heat_index: Some(18.0),
        pm_1: Some(3.0),
        pm_2p5: Some(5.0),
        pm_2p5_last_1_hour: Some(4.8),
        pm_2p5_last_3_hours: Some(4.2),
        pm_2p5_last_24_hours: Some(6.1),
        pm_2p5_nowcast: Some(4.6),
        pm_10: Some(7.0),
        pm_10_last_1_hour: Some(6.9),
        pm_10_last_3_hours: Some(6.3),
        pm_10_last_24_hours: Some(8.8),
        pm_10_nowcast: Some(6.7),
        pct_pm_data_last_1_hour: Some(100),
        pct_pm_data_last_3_hours: Some(100),
        pct_pm_data_last_24_hours: Some(96),
        pct_pm_data_nowcast: Some(100),
        ..AirQualityCondition::reported_at(now() - chrono::Duration::minutes(1))
    }
}

pub fn full_snapshot() -> CurrentConditions {
    CurrentConditions::new()
        .with_did("001D0A61")
        .with_timestamp(now() - chrono::Duration::seconds(30))
        .insert(barometer())
        .insert(inside())
        .insert(iss())
        .insert(air_quality())
}

/// Coordinator with a pinned clock and a 5 minute poll interval
pub fn coordinator(snapshot: CurrentConditions) -> SharedCoordinator {
    StaticCoordinator::new("WeatherLink Live", "001d0a61", snapshot)
        .with_poll_interval(Duration::from_secs(300))
        .with_now(now())
        .into_shared()
}
