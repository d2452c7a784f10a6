use chrono::{DateTime, Utc};

/// One normalized observation, one CSV row.
///
/// Every provider-sourced field is optional: the payload may omit any of
/// them and the row simply carries an empty cell there. The timestamp is
/// stamped locally when the record is built, never taken from the payload,
/// so all rows of a run share one clock source.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub ts_utc: DateTime<Utc>,
    pub city: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub temp_c: Option<f64>,
    pub feelslike_c: Option<f64>,
    pub condition_text: Option<String>,
    pub humidity: Option<f64>,
    pub wind_kph: Option<f64>,
    pub wind_dir: Option<String>,
    pub pressure_mb: Option<f64>,
    pub precip_mm: Option<f64>,
    pub cloud: Option<f64>,
    pub uv: Option<f64>,
    /// 1 for day, 0 for night, as reported by the provider.
    pub is_day: Option<u8>,
}

/// A city that failed during a run, with the error it failed with.
///
/// Accumulated in memory and printed at the end; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub city: String,
    pub message: String,
}
