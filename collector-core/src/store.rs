//! Month-partitioned CSV output and raw payload snapshots.
//!
//! One CSV per UTC calendar month, append-only, header written once when the
//! file is first created. Snapshots are one pretty-printed JSON file per
//! fetch; they are written for audits and never read back.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};

use crate::{error::CollectError, model::WeatherRecord};

/// Column names, in row order.
pub const CSV_HEADERS: [&str; 15] = [
    "ts_utc", "city", "lat", "lon",
    "temp_c", "feelslike_c", "condition_text",
    "humidity", "wind_kph", "wind_dir",
    "pressure_mb", "precip_mm", "cloud", "uv",
    "is_day",
];

const TABLE_STEM: &str = "weather_india";

/// One CSV per month keeps the files tidy.
pub fn monthly_csv_path(data_dir: &Path, now: DateTime<Utc>) -> PathBuf {
    data_dir.join(format!("{TABLE_STEM}_{}.csv", now.format("%Y_%m")))
}

/// Append one record to its month's table, writing the header row first if
/// the file does not exist yet. The file handle is opened and closed per
/// call; nothing is held across cities.
pub fn append_record(data_dir: &Path, record: &WeatherRecord) -> Result<PathBuf, CollectError> {
    let path = monthly_csv_path(data_dir, record.ts_utc);
    let file_exists = path.exists();

    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let mut writer = csv::Writer::from_writer(file);

    if !file_exists {
        writer.write_record(CSV_HEADERS)?;
    }
    writer.write_record(&encode_row(record))?;
    writer.flush()?;

    Ok(path)
}

/// Keep a verbatim copy of one payload, named by city and fetch time.
pub fn write_snapshot(
    raw_dir: &Path,
    city: &str,
    payload: &Value,
    now: DateTime<Utc>,
) -> Result<PathBuf, CollectError> {
    let name = format!("{}_{}.json", sanitize_city(city), now.format("%Y%m%dT%H%M%SZ"));
    let path = raw_dir.join(name);

    fs::write(&path, serde_json::to_string_pretty(payload)?)?;
    Ok(path)
}

fn encode_row(record: &WeatherRecord) -> [String; 15] {
    [
        record.ts_utc.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        record.city.clone(),
        number(record.lat),
        number(record.lon),
        number(record.temp_c),
        number(record.feelslike_c),
        text(&record.condition_text),
        number(record.humidity),
        number(record.wind_kph),
        text(&record.wind_dir),
        number(record.pressure_mb),
        number(record.precip_mm),
        number(record.cloud),
        number(record.uv),
        number(record.is_day),
    ]
}

fn number<T: ToString>(value: Option<T>) -> String {
    value.map_or(String::new(), |v| v.to_string())
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn sanitize_city(city: &str) -> String {
    city.to_lowercase().replace(' ', "_")
}
