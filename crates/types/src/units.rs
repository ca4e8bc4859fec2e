//! Unit of measurement tokens

pub const CELSIUS: &str = "°C";
pub const HECTOPASCAL: &str = "hPa";
pub const PERCENTAGE: &str = "%";
pub const KILOMETERS_PER_HOUR: &str = "km/h";
pub const DEGREE: &str = "°";
pub const WATTS_PER_SQUARE_METER: &str = "W/m²";
pub const UV_INDEX: &str = "UV Index";
pub const MILLIMETERS_PER_HOUR: &str = "mm/h";
pub const MILLIMETERS: &str = "mm";
pub const MICROGRAMS_PER_CUBIC_METER: &str = "µg/m³";
