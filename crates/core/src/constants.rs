//! Shared constants for metric projections

/// Decimal places kept for relative humidity
pub const DECIMALS_HUMIDITY: u32 = 0;

/// Decimal places kept for solar radiation
pub const DECIMALS_RADIATION: u32 = 0;

/// Decimal places kept for the UV index
pub const DECIMALS_UV: u32 = 1;

/// Compass labels in 22.5° steps, starting at north.
/// North appears twice so bearings just below 360° land on it.
pub const COMPASS_DIRECTIONS: [&str; 17] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW", "N",
];

/// Width of one compass sector in degrees
pub const COMPASS_SECTOR_DEGREES: f64 = 22.5;
