//! Rounding, compass and connectivity helpers shared by projections

use crate::constants::{COMPASS_DIRECTIONS, COMPASS_SECTOR_DEGREES};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Round to `ndigits` decimal places (half away from zero)
pub fn round_to(value: f64, ndigits: u32) -> f64 {
    if ndigits == 0 {
        return value.round();
    }
    let factor = 10f64.powi(ndigits as i32);
    (value * factor).round() / factor
}

/// Round a reading that may be absent
///
/// Absent and NaN readings stay absent; zero passes through untouched.
/// A missing reading must never come back as a fabricated `0`.
pub fn round_optional(value: Option<f64>, ndigits: u32) -> Option<f64> {
    match value {
        None => None,
        Some(v) if v.is_nan() => None,
        Some(v) if v == 0.0 => Some(v),
        Some(v) => Some(round_to(v, ndigits)),
    }
}

/// Map a bearing in degrees to one of the 16 compass labels
pub fn bearing_to_direction(degrees: Option<f64>) -> Option<&'static str> {
    let degrees = degrees.filter(|d| d.is_finite())?;
    let normalized = degrees.rem_euclid(360.0);
    let sector = ((normalized + COMPASS_SECTOR_DEGREES / 2.0) / COMPASS_SECTOR_DEGREES).floor();
    COMPASS_DIRECTIONS.get(sector as usize).copied()
}

/// Derived reachability of a reporting module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
    Unknown,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare a report time against `now - 2 * poll_interval`
///
/// Reports older than two poll intervals count as disconnected. Without a
/// (non-zero) poll interval there is nothing to compare against.
pub fn connection_status(
    last_report: DateTime<Utc>,
    poll_interval: Option<Duration>,
    now: DateTime<Utc>,
) -> ConnectionStatus {
    let interval = match poll_interval {
        Some(interval) if !interval.is_zero() => interval,
        _ => return ConnectionStatus::Unknown,
    };

    let grace = match interval.checked_mul(2).map(chrono::Duration::from_std) {
        Some(Ok(grace)) => grace,
        Some(Err(e)) => {
            log::warn!("Poll interval {:?} out of range: {}", interval, e);
            return ConnectionStatus::Unknown;
        }
        None => {
            log::warn!("Poll interval {:?} out of range", interval);
            return ConnectionStatus::Unknown;
        }
    };
    let deadline = match now.checked_sub_signed(grace) {
        Some(deadline) => deadline,
        None => {
            log::warn!("Poll interval {:?} reaches before the earliest time", interval);
            return ConnectionStatus::Unknown;
        }
    };

    if last_report < deadline {
        ConnectionStatus::Disconnected
    } else {
        ConnectionStatus::Connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(54.6, 0), 55.0);
        assert_eq!(round_to(3.14159, 1), 3.1);
        assert_eq!(round_to(-2.25, 1), -2.3);
    }

    #[test]
    fn test_rounding_is_idempotent() {
        for value in [0.15, 12.349, 54.5, 999.99, -7.05] {
            for digits in 0..3 {
                let once = round_to(value, digits);
                assert_eq!(round_to(once, digits), once);
            }
        }
    }

    #[test]
    fn test_round_optional_keeps_absence() {
        assert_eq!(round_optional(None, 0), None);
        assert_eq!(round_optional(Some(f64::NAN), 1), None);
        assert_eq!(round_optional(Some(0.0), 1), Some(0.0));
        assert_eq!(round_optional(Some(4.26), 1), Some(4.3));
    }

    #[test]
    fn test_bearing_to_direction() {
        assert_eq!(bearing_to_direction(Some(0.0)), Some("N"));
        assert_eq!(bearing_to_direction(Some(360.0)), Some("N"));
        assert_eq!(bearing_to_direction(Some(349.0)), Some("N"));
        assert_eq!(bearing_to_direction(Some(348.0)), Some("NNW"));
        assert_eq!(bearing_to_direction(Some(11.0)), Some("N"));
        assert_eq!(bearing_to_direction(Some(12.0)), Some("NNE"));
        assert_eq!(bearing_to_direction(Some(90.0)), Some("E"));
        assert_eq!(bearing_to_direction(Some(225.0)), Some("SW"));
        assert_eq!(bearing_to_direction(Some(-90.0)), Some("W"));
        assert_eq!(bearing_to_direction(None), None);
    }

    #[test]
    fn test_connection_status() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let interval = Some(Duration::from_secs(5 * 60));

        let stale = now - chrono::Duration::minutes(12);
        assert_eq!(
            connection_status(stale, interval, now),
            ConnectionStatus::Disconnected
        );

        let fresh = now - chrono::Duration::minutes(3);
        assert_eq!(
            connection_status(fresh, interval, now),
            ConnectionStatus::Connected
        );

        assert_eq!(
            connection_status(fresh, None, now),
            ConnectionStatus::Unknown
        );
        assert_eq!(
            connection_status(stale, Some(Duration::ZERO), now),
            ConnectionStatus::Unknown
        );
    }

    #[test]
    fn test_connection_status_at_deadline() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let interval = Some(Duration::from_secs(5 * 60));

        let at_deadline = now - chrono::Duration::minutes(10);
        assert_eq!(
            connection_status(at_deadline, interval, now),
            ConnectionStatus::Connected
        );

        let past_deadline = at_deadline - chrono::Duration::seconds(1);
        assert_eq!(
            connection_status(past_deadline, interval, now),
            ConnectionStatus::Disconnected
        );
    }

    #[test]
    fn test_connection_status_huge_interval() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        assert_eq!(
            connection_status(now, Some(Duration::from_secs(u64::MAX)), now),
            ConnectionStatus::Unknown
        );
        assert_eq!(
            connection_status(now, Some(Duration::from_secs(10_000_000_000_000)), now),
            ConnectionStatus::Unknown
        );
    }
}
