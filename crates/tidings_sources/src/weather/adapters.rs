//! Display fields extracted from a raw weather record.
//!
//! Every adapter accepts an optional record. A missing or `null` record is
//! "no data yet" and yields `Ok(None)`; a present record lacking an expected
//! field yields `MissingFieldError`. Nothing falls back to a default value.

use chrono::{DateTime, Local};
use derive_getters::Getters;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tidings_error::MissingFieldError;

/// Kelvin to Celsius, rounded to one decimal place.
///
/// ```
/// use tidings_sources::kelvin_to_celsius;
///
/// assert_eq!(kelvin_to_celsius(300.0), 26.9);
/// ```
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    ((kelvin - 273.15) * 10.0).round() / 10.0
}

/// Unix seconds as local `YYYY-MM-DD HH:MM:SS`.
///
/// Timestamps outside chrono's range are rendered as the raw number.
pub fn format_timestamp(unix_secs: i64) -> String {
    DateTime::from_timestamp(unix_secs, 0)
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| unix_secs.to_string())
}

/// Temperatures in Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Getters)]
pub struct Temperature {
    average: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
}

/// Formatted sunrise and sunset times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct SunTimes {
    sunrise: String,
    sunset: String,
}

/// Everything a weather reply shows, read from one record.
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
pub struct WeatherReport {
    temperature: Temperature,
    description: String,
    sun_times: SunTimes,
    observed_at: String,
    timezone_hours: i64,
}

impl WeatherReport {
    /// Assemble a report, or `Ok(None)` when there is no record.
    ///
    /// # Errors
    ///
    /// Returns the first field missing from a present record.
    pub fn from_record(record: Option<&JsonValue>) -> Result<Option<Self>, MissingFieldError> {
        let Some(record) = present(record) else {
            return Ok(None);
        };
        Ok(Some(Self {
            temperature: read_temperature(record)?,
            description: read_description(record)?,
            sun_times: read_sun_times(record)?,
            observed_at: format_timestamp(read_int(record, "/dt", "dt")?),
            timezone_hours: read_timezone_hours(record)?,
        }))
    }

    /// Replace the description, typically with a translation.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// The `main` temperature block, in Celsius.
///
/// ```
/// use serde_json::json;
/// use tidings_sources::temperature;
///
/// let record = json!({"main": {"temp": 300.0, "feels_like": 298.0, "temp_min": 295.0, "temp_max": 305.0}});
/// let temp = temperature(Some(&record)).unwrap().unwrap();
/// assert_eq!(*temp.temp_max(), 31.9);
/// assert!(temperature(None).unwrap().is_none());
/// ```
pub fn temperature(record: Option<&JsonValue>) -> Result<Option<Temperature>, MissingFieldError> {
    present(record).map(read_temperature).transpose()
}

/// The first weather condition's description.
pub fn description(record: Option<&JsonValue>) -> Result<Option<String>, MissingFieldError> {
    present(record).map(read_description).transpose()
}

/// Sunrise and sunset, formatted.
pub fn sun_times(record: Option<&JsonValue>) -> Result<Option<SunTimes>, MissingFieldError> {
    present(record).map(read_sun_times).transpose()
}

/// Observation time (`dt`), formatted.
pub fn observed_at(record: Option<&JsonValue>) -> Result<Option<String>, MissingFieldError> {
    present(record)
        .map(|record| read_int(record, "/dt", "dt").map(format_timestamp))
        .transpose()
}

/// UTC offset in whole hours, truncated toward zero.
pub fn timezone_hours(record: Option<&JsonValue>) -> Result<Option<i64>, MissingFieldError> {
    present(record).map(read_timezone_hours).transpose()
}

fn present(record: Option<&JsonValue>) -> Option<&JsonValue> {
    record.filter(|record| !record.is_null())
}

fn read_temperature(record: &JsonValue) -> Result<Temperature, MissingFieldError> {
    let main = record
        .get("main")
        .filter(|main| main.is_object())
        .ok_or_else(|| MissingFieldError::new("main"))?;
    let celsius = |field: &str| {
        main.get(field)
            .and_then(JsonValue::as_f64)
            .map(kelvin_to_celsius)
            .ok_or_else(|| MissingFieldError::new(format!("main.{field}")))
    };
    Ok(Temperature {
        average: celsius("temp")?,
        feels_like: celsius("feels_like")?,
        temp_min: celsius("temp_min")?,
        temp_max: celsius("temp_max")?,
    })
}

fn read_description(record: &JsonValue) -> Result<String, MissingFieldError> {
    record
        .pointer("/weather/0/description")
        .and_then(JsonValue::as_str)
        .map(str::to_string)
        .ok_or_else(|| MissingFieldError::new("weather.0.description"))
}

fn read_sun_times(record: &JsonValue) -> Result<SunTimes, MissingFieldError> {
    Ok(SunTimes {
        sunrise: format_timestamp(read_int(record, "/sys/sunrise", "sys.sunrise")?),
        sunset: format_timestamp(read_int(record, "/sys/sunset", "sys.sunset")?),
    })
}

fn read_timezone_hours(record: &JsonValue) -> Result<i64, MissingFieldError> {
    read_int(record, "/timezone", "timezone").map(|secs| secs / 3600)
}

/// Integer at `pointer`; whole-valued floats are accepted, fractional ones
/// are reported as missing.
fn read_int(record: &JsonValue, pointer: &str, field: &str) -> Result<i64, MissingFieldError> {
    record
        .pointer(pointer)
        .and_then(|value| {
            value.as_i64().or_else(|| {
                value
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            })
        })
        .ok_or_else(|| MissingFieldError::new(field))
}
