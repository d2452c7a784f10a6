use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    config::{Config, FetchMode},
    error::CollectError,
    model::WeatherRecord,
};

use super::WeatherProvider;

/// Client for the WeatherAPI.com `current.json` and `forecast.json` endpoints.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    mode: FetchMode,
    forecast_days: u8,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(config: &Config) -> Result<Self, CollectError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            mode: config.mode,
            forecast_days: config.forecast_days,
            http,
        })
    }

    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Value, CollectError> {
        let res = self.http.get(url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(CollectError::Status { status, body: truncate_body(&body) });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn fetch(&self, city: &str) -> Result<Value, CollectError> {
        match self.mode {
            FetchMode::Current => {
                let url = format!("{}/current.json", self.base_url);
                let query = [
                    ("key", self.api_key.clone()),
                    ("q", city.to_string()),
                    ("aqi", "no".to_string()),
                ];
                self.get(&url, &query).await
            }
            FetchMode::Forecast => {
                let url = format!("{}/forecast.json", self.base_url);
                let query = [
                    ("key", self.api_key.clone()),
                    ("q", city.to_string()),
                    ("days", self.forecast_days.to_string()),
                    ("aqi", "no".to_string()),
                    ("alerts", "no".to_string()),
                ];
                self.get(&url, &query).await
            }
        }
    }

    fn normalize(&self, city: &str, payload: &Value) -> Result<WeatherRecord, CollectError> {
        let parsed: WaPayload = serde_json::from_value(payload.clone())?;

        let location = parsed.location.unwrap_or_default();
        let current = parsed.current.unwrap_or_default();
        let condition = current.condition.unwrap_or_default();

        // The provider reports location-local time; stamping the record here
        // keeps a single clock source across all cities of a run.
        Ok(WeatherRecord {
            ts_utc: Utc::now(),
            city: city.to_string(),
            lat: location.lat,
            lon: location.lon,
            temp_c: current.temp_c,
            feelslike_c: current.feelslike_c,
            condition_text: condition.text,
            humidity: current.humidity,
            wind_kph: current.wind_kph,
            wind_dir: current.wind_dir,
            pressure_mb: current.pressure_mb,
            precip_mm: current.precip_mm,
            cloud: current.cloud,
            uv: current.uv,
            is_day: current.is_day,
        })
    }
}

/// The subset of the payload we flatten. A forecast response carries the
/// same `location`/`current` blocks plus a `forecast` subtree, which is
/// ignored here (hourly rows are an extension point, not current behavior).
#[derive(Debug, Default, Deserialize)]
struct WaPayload {
    #[serde(default)]
    location: Option<WaLocation>,
    #[serde(default)]
    current: Option<WaCurrent>,
}

#[derive(Debug, Default, Deserialize)]
struct WaLocation {
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct WaCondition {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WaCurrent {
    temp_c: Option<f64>,
    feelslike_c: Option<f64>,
    #[serde(default)]
    condition: Option<WaCondition>,
    humidity: Option<f64>,
    wind_kph: Option<f64>,
    wind_dir: Option<String>,
    pressure_mb: Option<f64>,
    precip_mm: Option<f64>,
    cloud: Option<f64>,
    uv: Option<f64>,
    is_day: Option<u8>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let cut: String = body.chars().take(MAX).collect();
        format!("{cut}...")
    } else {
        body.to_string()
    }
}
