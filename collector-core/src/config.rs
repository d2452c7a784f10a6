use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{env, fs, path::PathBuf, time::Duration};

/// Environment variable holding the WeatherAPI.com key.
///
/// This is the run's only secret and its only fatal startup requirement.
pub const API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Cities fetched on every run, in fetch order.
const DEFAULT_CITIES: [&str; 8] = [
    "Chennai", "Mumbai", "Delhi", "Bengaluru",
    "Kolkata", "Hyderabad", "Pune", "Ahmedabad",
];

const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_FORECAST_DAYS: u8 = 1;
const DEFAULT_TIMEOUT_SECS: u64 = 20;
const DEFAULT_PAUSE_MS: u64 = 200;

/// Which provider endpoint a run hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// `current.json`: conditions as of now.
    Current,
    /// `forecast.json`: the combined response also carries a `current`
    /// block, which is the only portion persisted.
    Forecast,
}

/// Settings for one collector run, immutable once loaded.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cities queried one by one, in this order.
    pub cities: Vec<String>,
    pub mode: FetchMode,
    /// Requested day count, used only in forecast mode.
    pub forecast_days: u8,
    pub base_url: String,
    /// Directory holding the monthly CSV tables.
    pub data_dir: PathBuf,
    /// Whether to keep a pretty-printed copy of each raw payload.
    pub archive_raw: bool,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// Delay between consecutive cities, to stay under provider rate limits.
    pub pause: Duration,
    pub api_key: String,
}

/// Optional on-disk overrides for the compiled-in defaults.
///
/// Example TOML:
/// ```toml
/// cities = ["Chennai", "Mumbai"]
/// mode = "forecast"
/// forecast_days = 2
/// data_dir = "data"
/// ```
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    cities: Option<Vec<String>>,
    mode: Option<FetchMode>,
    forecast_days: Option<u8>,
    base_url: Option<String>,
    data_dir: Option<PathBuf>,
    archive_raw: Option<bool>,
    timeout_secs: Option<u64>,
    pause_ms: Option<u64>,
}

impl Config {
    /// Compiled-in defaults plus the secret from the environment.
    pub fn with_api_key(api_key: String) -> Self {
        Self {
            cities: DEFAULT_CITIES.iter().map(|c| (*c).to_string()).collect(),
            mode: FetchMode::Current,
            forecast_days: DEFAULT_FORECAST_DAYS,
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            archive_raw: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            pause: Duration::from_millis(DEFAULT_PAUSE_MS),
            api_key,
        }
    }

    /// Load the run configuration: defaults, overlaid with the optional
    /// config file. The API key is never read from the file.
    pub fn load(api_key: String) -> Result<Self> {
        let mut cfg = Self::with_api_key(api_key);

        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(cfg);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let file: ConfigFile = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.apply(file);
        Ok(cfg)
    }

    /// Where the raw payload snapshots go.
    pub fn raw_dir(&self) -> PathBuf {
        self.data_dir.join("raw")
    }

    /// Path to the optional config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-collector", "collector-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn apply(&mut self, file: ConfigFile) {
        if let Some(cities) = file.cities {
            self.cities = cities;
        }
        if let Some(mode) = file.mode {
            self.mode = mode;
        }
        if let Some(days) = file.forecast_days {
            self.forecast_days = days;
        }
        if let Some(base_url) = file.base_url {
            self.base_url = base_url;
        }
        if let Some(data_dir) = file.data_dir {
            self.data_dir = data_dir;
        }
        if let Some(archive_raw) = file.archive_raw {
            self.archive_raw = archive_raw;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = file.pause_ms {
            self.pause = Duration::from_millis(ms);
        }
    }
}

/// Read the provider API key from the environment.
pub fn api_key_from_env() -> Result<String> {
    require_api_key(env::var(API_KEY_VAR).ok())
}

fn require_api_key(value: Option<String>) -> Result<String> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(anyhow!(
            "Missing {API_KEY_VAR} env var.\n\
             Hint: export your WeatherAPI.com key before running the collector."
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_full_city_list() {
        let cfg = Config::with_api_key("KEY".into());

        assert_eq!(cfg.cities.len(), 8);
        assert_eq!(cfg.cities[0], "Chennai");
        assert_eq!(cfg.mode, FetchMode::Current);
        assert_eq!(cfg.base_url, "http://api.weatherapi.com/v1");
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.raw_dir(), PathBuf::from("data/raw"));
        assert!(cfg.archive_raw);
        assert_eq!(cfg.timeout, Duration::from_secs(20));
    }

    #[test]
    fn file_overrides_replace_defaults() {
        let file: ConfigFile = toml::from_str(
            r#"
            cities = ["Chennai", "Mumbai"]
            mode = "forecast"
            forecast_days = 3
            data_dir = "out"
            archive_raw = false
            timeout_secs = 5
            pause_ms = 0
            "#,
        )
        .expect("valid TOML");

        let mut cfg = Config::with_api_key("KEY".into());
        cfg.apply(file);

        assert_eq!(cfg.cities, vec!["Chennai".to_string(), "Mumbai".to_string()]);
        assert_eq!(cfg.mode, FetchMode::Forecast);
        assert_eq!(cfg.forecast_days, 3);
        assert_eq!(cfg.data_dir, PathBuf::from("out"));
        assert!(!cfg.archive_raw);
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.pause, Duration::from_millis(0));
        // untouched fields keep their defaults
        assert_eq!(cfg.base_url, "http://api.weatherapi.com/v1");
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let file: ConfigFile = toml::from_str(r#"cities = ["Pune"]"#).expect("valid TOML");

        let mut cfg = Config::with_api_key("KEY".into());
        cfg.apply(file);

        assert_eq!(cfg.cities, vec!["Pune".to_string()]);
        assert_eq!(cfg.mode, FetchMode::Current);
        assert!(cfg.archive_raw);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = toml::from_str::<ConfigFile>(r#"mode = "hourly""#).unwrap_err();
        assert!(err.to_string().contains("unknown variant"));
    }

    #[test]
    fn api_key_is_required() {
        let err = require_api_key(None).unwrap_err();
        assert!(err.to_string().contains(API_KEY_VAR));

        let err = require_api_key(Some("  ".into())).unwrap_err();
        assert!(err.to_string().contains(API_KEY_VAR));

        let key = require_api_key(Some("SECRET".into())).expect("key must be accepted");
        assert_eq!(key, "SECRET");
    }
}
